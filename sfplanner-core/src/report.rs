// sfplanner-core/src/report.rs
//! Sorting, money formatting and summary statistics for a record list.
//!
//! Everything here is a pure function of the records, the settings and, for
//! the trend window, an explicit `today`.
//!
//! License: MIT OR APACHE 2.0

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Record;
use crate::settings::Settings;

/// Number of days covered by the spending trend, today included.
pub const TREND_DAYS: u64 = 7;

/// Record list orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DateDesc,
    DateAsc,
    DescriptionAsc,
    DescriptionDesc,
    AmountAsc,
    AmountDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::DateDesc,
        SortKey::DateAsc,
        SortKey::DescriptionAsc,
        SortKey::DescriptionDesc,
        SortKey::AmountAsc,
        SortKey::AmountDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateDesc => "date_desc",
            SortKey::DateAsc => "date_asc",
            SortKey::DescriptionAsc => "description_asc",
            SortKey::DescriptionDesc => "description_desc",
            SortKey::AmountAsc => "amount_asc",
            SortKey::AmountDesc => "amount_desc",
        }
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::DateDesc => b.date.cmp(&a.date),
            SortKey::DateAsc => a.date.cmp(&b.date),
            SortKey::DescriptionAsc => compare_text(&a.description, &b.description),
            SortKey::DescriptionDesc => compare_text(&b.description, &a.description),
            SortKey::AmountAsc => a.amount.total_cmp(&b.amount),
            SortKey::AmountDesc => b.amount.total_cmp(&a.amount),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort order '{0}'. Expected one of: date_desc, date_asc, description_asc, description_desc, amount_asc, amount_desc.")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Returns a sorted copy of `records`. Equal keys keep their input order.
pub fn sort_records(records: &[Record], key: SortKey) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    sorted
}

/// Formats a USD amount in the base currency, e.g. `$12.50` or `EUR 11.50`.
pub fn format_money(value: f64, settings: &Settings) -> String {
    format!(
        "{}{:.2}",
        settings.base_currency.symbol(),
        settings.convert(value)
    )
}

/// Spending on one day of the trend window.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub total: f64,
}

impl TrendPoint {
    /// `YYYY-MM-DD`, the same form records store their dates in.
    pub fn key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

/// Daily totals for the [`TREND_DAYS`] days ending on `today`, oldest first.
pub fn trend(records: &[Record], today: NaiveDate) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = (0..TREND_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| TrendPoint { day, total: 0.0 })
        .collect();
    let keys: Vec<String> = points.iter().map(TrendPoint::key).collect();
    for rec in records {
        if let Some(idx) = keys.iter().position(|k| *k == rec.date) {
            points[idx].total += rec.amount;
        }
    }
    points
}

/// The category with the highest total; ties go to the one seen first.
pub fn top_category(records: &[Record]) -> Option<String> {
    let mut totals: Vec<(&str, f64)> = Vec::new();
    for rec in records {
        match totals.iter_mut().find(|(name, _)| *name == rec.category) {
            Some((_, total)) => *total += rec.amount,
            None => totals.push((rec.category.as_str(), rec.amount)),
        }
    }
    let mut best: Option<(&str, f64)> = None;
    for (name, total) in totals {
        if best.map_or(true, |(_, max)| total > max) {
            best = Some((name, total));
        }
    }
    best.map(|(name, _)| name.to_string())
}

/// Position of total spending relative to the budget cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapStatus {
    /// Amount still available (zero when exactly at the cap).
    Under(f64),
    /// Amount spent beyond the cap.
    Over(f64),
}

impl CapStatus {
    pub fn from_total(total: f64, cap: f64) -> Self {
        let remaining = cap - total;
        if remaining >= 0.0 {
            CapStatus::Under(remaining)
        } else {
            CapStatus::Over(remaining.abs())
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, CapStatus::Over(_))
    }

    pub fn message(&self, settings: &Settings) -> String {
        match self {
            CapStatus::Under(remaining) => {
                format!("Under cap by {}.", format_money(*remaining, settings))
            }
            CapStatus::Over(excess) => {
                format!("Cap exceeded by {}.", format_money(*excess, settings))
            }
        }
    }
}

/// Dashboard figures for a record list.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total: f64,
    pub top_category: Option<String>,
    pub trend: Vec<TrendPoint>,
    pub trend_total: f64,
    pub cap: CapStatus,
}

pub fn summarize(records: &[Record], settings: &Settings, today: NaiveDate) -> Summary {
    let total: f64 = records.iter().map(|r| r.amount).sum();
    let trend = trend(records, today);
    let trend_total = trend.iter().map(|p| p.total).sum();
    Summary {
        count: records.len(),
        total,
        top_category: top_category(records),
        trend,
        trend_total,
        cap: CapStatus::from_total(total, settings.budget_cap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordFields;
    use crate::settings::Currency;
    use chrono::{TimeZone, Utc};

    fn rec(id: &str, description: &str, amount: f64, category: &str, date: &str) -> Record {
        Record::new(
            id.into(),
            RecordFields {
                description: description.into(),
                amount,
                category: category.into(),
                date: date.into(),
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    fn fixture() -> Vec<Record> {
        vec![
            rec("a", "banana", 5.0, "Food", "2024-01-02"),
            rec("b", "Apple", 12.0, "Books", "2024-01-03"),
            rec("c", "cherry", 1.5, "Food", "2024-01-01"),
        ]
    }

    #[test]
    fn sort_orders() {
        let records = fixture();
        assert_eq!(ids(&sort_records(&records, SortKey::DateDesc)), ["b", "a", "c"]);
        assert_eq!(ids(&sort_records(&records, SortKey::DateAsc)), ["c", "a", "b"]);
        assert_eq!(ids(&sort_records(&records, SortKey::DescriptionAsc)), ["b", "a", "c"]);
        assert_eq!(ids(&sort_records(&records, SortKey::DescriptionDesc)), ["c", "a", "b"]);
        assert_eq!(ids(&sort_records(&records, SortKey::AmountAsc)), ["c", "a", "b"]);
        assert_eq!(ids(&sort_records(&records, SortKey::AmountDesc)), ["b", "a", "c"]);
        // Input untouched.
        assert_eq!(ids(&records), ["a", "b", "c"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            rec("x", "Same", 1.0, "Food", "2024-01-01"),
            rec("y", "Same", 1.0, "Food", "2024-01-01"),
        ];
        assert_eq!(ids(&sort_records(&records, SortKey::DateDesc)), ["x", "y"]);
        assert_eq!(ids(&sort_records(&records, SortKey::AmountDesc)), ["x", "y"]);
    }

    #[test]
    fn sort_key_names_round_trip() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("newest".parse::<SortKey>().is_err());
        assert_eq!(SortKey::default(), SortKey::DateDesc);
    }

    #[test]
    fn money_is_converted_and_prefixed() {
        let mut settings = Settings::default();
        assert_eq!(format_money(12.5, &settings), "$12.50");
        settings.base_currency = Currency::Eur;
        settings.rates.eur = 0.5;
        assert_eq!(format_money(12.5, &settings), "EUR 6.25");
    }

    #[test]
    fn trend_covers_last_seven_days() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let points = trend(&fixture(), today);
        assert_eq!(points.len(), 7);
        assert_eq!(points[0].key(), "2023-12-28");
        assert_eq!(points[6].key(), "2024-01-03");
        assert_eq!(points[4].total, 1.5);
        assert_eq!(points[5].total, 5.0);
        assert_eq!(points[6].total, 12.0);
    }

    #[test]
    fn top_category_prefers_first_on_tie() {
        let records = vec![
            rec("a", "x", 5.0, "Books", "2024-01-01"),
            rec("b", "y", 2.0, "Food", "2024-01-01"),
            rec("c", "z", 3.0, "Food", "2024-01-01"),
        ];
        assert_eq!(top_category(&records).as_deref(), Some("Books"));
        assert_eq!(top_category(&[]), None);
    }

    #[test]
    fn cap_status_messages() {
        let settings = Settings::default();
        let under = CapStatus::from_total(450.0, 500.0);
        assert_eq!(under, CapStatus::Under(50.0));
        assert_eq!(under.message(&settings), "Under cap by $50.00.");

        let exact = CapStatus::from_total(500.0, 500.0);
        assert!(!exact.is_over());

        let over = CapStatus::from_total(512.25, 500.0);
        assert!(over.is_over());
        assert_eq!(over.message(&settings), "Cap exceeded by $12.25.");
    }

    #[test]
    fn summary_combines_figures() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let summary = summarize(&fixture(), &Settings::default(), today);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total, 18.5);
        assert_eq!(summary.trend_total, 18.5);
        assert_eq!(summary.top_category.as_deref(), Some("Books"));
        assert_eq!(summary.cap, CapStatus::Under(481.5));
    }
}
