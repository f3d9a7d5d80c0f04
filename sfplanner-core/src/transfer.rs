// File: sfplanner-core/src/transfer.rs
//! JSON import and export of the whole planner state.
//!
//! The exported document has the shape
//! `{ "version": 1, "records": [...], "settings": {...} }`. Import is
//! all-or-nothing: [`validate_import_payload`] checks every record before
//! anything is decoded, and the first structural problem is reported as a
//! single [`ImportError`].
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::errors::PlannerError;
use crate::ledger::Ledger;
use crate::record::Record;
use crate::settings::{Rates, Settings, SettingsPatch};
use crate::validators::is_iso_date;

/// Format version written by [`export_payload`].
pub const EXPORT_VERSION: u64 = 1;

#[derive(Serialize)]
struct ExportDocument<'a> {
    version: u64,
    records: &'a [Record],
    settings: &'a Settings,
}

/// Why an import payload was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Invalid JSON syntax.")]
    InvalidJson,

    #[error("JSON root must be an object.")]
    RootNotObject,

    #[error("Missing records array.")]
    MissingRecords,

    #[error("Record {position} has invalid structure.")]
    InvalidRecord { position: usize },

    #[error("Duplicate record id \"{0}\".")]
    DuplicateId(String),

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

/// A record as found in an import document. Timestamps may be absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRecord {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ImportedRecord {
    /// Missing `createdAt` becomes `now`; missing `updatedAt` becomes `createdAt`.
    pub fn into_record(self, now: DateTime<Utc>) -> Record {
        let created_at = self.created_at.unwrap_or(now);
        Record {
            id: self.id,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

/// A validated import document.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPayload {
    pub records: Vec<ImportedRecord>,
    pub settings: Option<SettingsPatch>,
}

impl ImportPayload {
    pub fn into_records(self, now: DateTime<Utc>) -> Vec<Record> {
        self.records.into_iter().map(|r| r.into_record(now)).collect()
    }

    /// Replaces the ledger's records and returns the merged settings.
    ///
    /// Imported settings override `current` field by field; rates missing
    /// from the import fall back to the built-in defaults.
    pub fn apply(self, ledger: &mut Ledger, current: &Settings, now: DateTime<Utc>) -> Settings {
        let settings = match &self.settings {
            Some(patch) => current.overlay(patch, &Rates::default()),
            None => current.clone(),
        };
        let records = self.into_records(now);
        info!("Importing {} records.", records.len());
        ledger.replace_all(records);
        settings
    }
}

/// Serializes records and settings as a pretty-printed export document.
pub fn export_payload(records: &[Record], settings: &Settings) -> Result<String, PlannerError> {
    let doc = ExportDocument {
        version: EXPORT_VERSION,
        records,
        settings,
    };
    let json = serde_json::to_string_pretty(&doc)?;
    info!("Exported {} records.", records.len());
    Ok(json)
}

/// Checks and decodes an import document.
pub fn validate_import_payload(raw: &str) -> Result<ImportPayload, ImportError> {
    let parsed: Value = serde_json::from_str(raw).map_err(|e| {
        debug!("Import payload is not JSON: {}", e);
        ImportError::InvalidJson
    })?;
    let root = parsed.as_object().ok_or(ImportError::RootNotObject)?;
    let entries = root
        .get("records")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingRecords)?;

    let mut seen_ids = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(id) = structurally_valid_id(entry) else {
            return Err(ImportError::InvalidRecord { position: index + 1 });
        };
        if !seen_ids.insert(id) {
            return Err(ImportError::DuplicateId(id.to_string()));
        }
    }

    match root.get("version") {
        Some(v) if v.as_u64() == Some(EXPORT_VERSION) => {}
        Some(v) => warn!("Import payload declares version {}; reading it as version {}.", v, EXPORT_VERSION),
        None => warn!("Import payload has no version; reading it as version {}.", EXPORT_VERSION),
    }

    let records: Vec<ImportedRecord> = entries
        .iter()
        .map(|entry| ImportedRecord::deserialize(entry))
        .collect::<Result<_, _>>()
        .map_err(|e| ImportError::Malformed(e.to_string()))?;

    let settings = match root.get("settings") {
        None | Some(Value::Null) => None,
        Some(value) => Some(
            SettingsPatch::deserialize(value).map_err(|e| ImportError::Malformed(e.to_string()))?,
        ),
    };

    debug!(
        "Import payload accepted: {} records, settings {}.",
        records.len(),
        if settings.is_some() { "present" } else { "absent" }
    );
    Ok(ImportPayload { records, settings })
}

/// Returns the record's id when the entry has every required field.
fn structurally_valid_id(entry: &Value) -> Option<&str> {
    let obj = entry.as_object()?;
    let non_empty = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };
    let id = non_empty("id")?;
    non_empty("description")?;
    non_empty("category")?;
    obj.get("date").and_then(Value::as_str).filter(|d| is_iso_date(d))?;
    obj.get("amount").and_then(Value::as_f64)?;
    Some(id)
}
