// sfplanner-core/src/record.rs
//! The expense record model and its identifier sequence.
//!
//! License: MIT OR APACHE 2.0

use chrono::{DateTime, Utc};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Prefix used for identifiers minted by this application.
pub const DEFAULT_ID_PREFIX: &str = "txn";

static RE_ID_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([0-9]+)$").expect("id sequence pattern is valid"));

/// One expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// `<prefix>_<zero-padded-sequence>`, fixed at creation.
    pub id: String,
    pub description: String,
    /// Amount in the base unit (USD).
    pub amount: f64,
    pub category: String,
    /// `YYYY-MM-DD`, stored exactly as validated.
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The validated, user-editable part of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

impl Record {
    pub fn new(id: String, fields: RecordFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            description: fields.description,
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the editable fields, keeping `id` and `created_at`.
    pub fn apply(&mut self, fields: RecordFields, now: DateTime<Utc>) {
        self.description = fields.description;
        self.amount = fields.amount;
        self.category = fields.category;
        self.date = fields.date;
        self.updated_at = now;
    }

    /// The text searched for this record: description, category, date and the
    /// amount to two decimals, separated by single spaces.
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {} {:.2}",
            self.description, self.category, self.date, self.amount
        )
    }

    /// The searchable fields one at a time, in haystack order.
    pub fn search_fields(&self) -> [String; 4] {
        [
            self.description.clone(),
            self.category.clone(),
            self.date.clone(),
            format!("{:.2}", self.amount),
        ]
    }
}

/// Extracts the trailing `_<digits>` sequence number of an identifier.
pub fn sequence_number(id: &str) -> Option<u64> {
    RE_ID_SEQUENCE
        .captures(id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Source of new record identifiers.
///
/// Owned by the session rather than held globally; rebuilt from the existing
/// records whenever they are loaded or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after the highest sequence number found among `records`.
    pub fn from_records(records: &[Record]) -> Self {
        let max = records
            .iter()
            .filter_map(|r| sequence_number(&r.id))
            .max()
            .unwrap_or(0);
        debug!("Id sequence derived from {} records, highest is {}.", records.len(), max);
        Self {
            next: max.saturating_add(1),
        }
    }

    /// The number the next minted id will carry.
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn mint(&mut self, prefix: &str) -> String {
        let id = format!("{}_{:04}", prefix, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}
