// sfplanner/src/commands/stats.rs
//! The `stats` dashboard.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use is_terminal::IsTerminal;
use std::io::{self, Write};

use sfplanner_core::report::TREND_DAYS;
use sfplanner_core::{format_money, is_iso_date, summarize, CapStatus};

use super::{CommandError, Session};
use crate::ui::output_format::{paint, paint_bold};
use crate::ui::table::trend_lines;
use crate::ui::theme::ThemeEntry;

/// Parses `--today`, defaulting to the local calendar date.
pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, CommandError> {
    match raw {
        None => Ok(Local::now().date_naive()),
        Some(text) => {
            let text = text.trim();
            if !is_iso_date(text) {
                return Err(CommandError::InvalidDate(text.to_string()));
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| CommandError::InvalidDate(text.to_string()))
        }
    }
}

pub fn show(session: &Session, today: Option<&str>) -> Result<()> {
    let today = resolve_today(today)?;
    let settings = &session.settings;
    let summary = summarize(session.ledger.records(), settings, today);

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut out = stdout.lock();
    let theme = &session.theme;

    writeln!(out, "Records: {}", summary.count)?;
    writeln!(out, "Total: {}", format_money(summary.total, settings))?;
    writeln!(out, "Top category: {}", summary.top_category.as_deref().unwrap_or("-"))?;
    writeln!(out, "Last {} days: {}", TREND_DAYS, format_money(summary.trend_total, settings))?;

    let cap_entry = match summary.cap {
        CapStatus::Under(_) => ThemeEntry::UnderCap,
        CapStatus::Over(_) => ThemeEntry::OverCap,
    };
    writeln!(out, "{}", paint(&summary.cap.message(settings), cap_entry, theme, supports_color))?;

    writeln!(out)?;
    writeln!(out, "{}", paint_bold(&format!("{}-day trend", TREND_DAYS), ThemeEntry::Header, theme, supports_color))?;
    for line in trend_lines(&summary.trend, settings, theme, supports_color) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_today_is_parsed() {
        assert_eq!(
            resolve_today(Some("2024-03-09")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn malformed_or_impossible_today_is_rejected() {
        assert!(matches!(resolve_today(Some("09/03/2024")), Err(CommandError::InvalidDate(_))));
        assert!(matches!(resolve_today(Some("2024-02-30")), Err(CommandError::InvalidDate(_))));
    }
}
