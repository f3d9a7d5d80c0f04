// sfplanner/src/ui/table.rs
//! Renders records, settings and the trend chart for the terminal.
//!
//! License: MIT OR APACHE 2.0

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};

use sfplanner_core::report::{format_money, TrendPoint};
use sfplanner_core::{highlight_markup, highlight_segments, Matcher, Record, Settings};

use crate::ui::output_format::{paint, paint_bold};
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Width of the longest trend bar, in characters.
pub const TREND_BAR_WIDTH: usize = 36;

const BAR_CHAR: &str = "█";

/// The calendar part of an RFC 3339 timestamp.
fn updated_day(record: &Record) -> String {
    record.updated_at.format("%Y-%m-%d").to_string()
}

/// Renders `text` with every match painted in the highlight color.
pub fn highlight_ansi(text: &str, matcher: Option<&Matcher>, theme: &ThemeMap, supports_color: bool) -> String {
    highlight_segments(text, matcher)
        .into_iter()
        .map(|segment| {
            if segment.is_match() {
                paint_bold(segment.text(), ThemeEntry::Highlight, theme, supports_color)
            } else {
                segment.text().to_string()
            }
        })
        .collect()
}

/// Builds the record table. Matches in the description, amount, category and
/// date columns are highlighted.
pub fn records_table(
    records: &[&Record],
    settings: &Settings,
    matcher: Option<&Matcher>,
    theme: &ThemeMap,
    supports_color: bool,
) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if !supports_color {
        table.force_no_tty();
    }
    table.set_header(
        ["ID", "Description", "Amount", "Category", "Date", "Updated"]
            .into_iter()
            .map(|h| Cell::new(paint_bold(h, ThemeEntry::Header, theme, supports_color))),
    );

    for rec in records {
        let money = format_money(rec.amount, settings);
        table.add_row(vec![
            Cell::new(&rec.id),
            Cell::new(highlight_ansi(&rec.description, matcher, theme, supports_color)),
            Cell::new(highlight_ansi(&money, matcher, theme, supports_color))
                .set_alignment(CellAlignment::Right),
            Cell::new(highlight_ansi(&rec.category, matcher, theme, supports_color)),
            Cell::new(highlight_ansi(&rec.date, matcher, theme, supports_color)),
            Cell::new(updated_day(rec)),
        ]);
    }
    table
}

/// One record per line with escaped `<mark>` markup, tab separated.
pub fn records_markup(records: &[&Record], settings: &Settings, matcher: Option<&Matcher>) -> Vec<String> {
    records
        .iter()
        .map(|rec| {
            [
                highlight_markup(&rec.id, None),
                highlight_markup(&rec.description, matcher),
                highlight_markup(&format_money(rec.amount, settings), matcher),
                highlight_markup(&rec.category, matcher),
                highlight_markup(&rec.date, matcher),
                updated_day(rec),
            ]
            .join("\t")
        })
        .collect()
}

/// Two-column table of the current settings.
pub fn settings_table(settings: &Settings, theme: &ThemeMap, supports_color: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if !supports_color {
        table.force_no_tty();
    }
    table.set_header(
        ["Setting", "Value"]
            .into_iter()
            .map(|h| Cell::new(paint_bold(h, ThemeEntry::Header, theme, supports_color))),
    );
    table.add_row(vec!["Base currency".to_string(), settings.base_currency.to_string()]);
    table.add_row(vec!["Rate EUR".to_string(), settings.rates.eur.to_string()]);
    table.add_row(vec!["Rate GBP".to_string(), settings.rates.gbp.to_string()]);
    table.add_row(vec![
        "Budget cap".to_string(),
        format!("{} ({})", format_money(settings.budget_cap, settings), format_money(settings.budget_cap, &Settings::default())),
    ]);
    table.add_row(vec!["Categories".to_string(), settings.categories.join(", ")]);
    table
}

/// Bar length for `value`, scaled against the largest value (at least 1).
pub fn bar_length(value: f64, max: f64) -> usize {
    let max = max.max(1.0);
    let scaled = (value / max * TREND_BAR_WIDTH as f64).round();
    (scaled as usize).max(1)
}

/// Renders the trend as one `MM-DD  bar  amount` line per day.
pub fn trend_lines(points: &[TrendPoint], settings: &Settings, theme: &ThemeMap, supports_color: bool) -> Vec<String> {
    let max = points.iter().map(|p| p.total).fold(1.0, f64::max);
    points
        .iter()
        .map(|p| {
            let key = p.key();
            let len = bar_length(p.total, max);
            let bar = BAR_CHAR.repeat(len);
            format!(
                "{}  {}{}  {}",
                &key[5..],
                paint(&bar, ThemeEntry::TrendBar, theme, supports_color),
                " ".repeat(TREND_BAR_WIDTH.saturating_sub(len)),
                format_money(p.total, settings)
            )
        })
        .collect()
}
