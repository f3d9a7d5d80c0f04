// sfplanner-core/src/store.rs
//! Defines the `RecordStore` persistence trait.
//!
//! Stores exchange serialized JSON with some backing medium (a key/value
//! area, files on disk). Unreadable stored data never aborts the caller: a
//! corrupt record list loads as empty and corrupt settings load as the
//! defaults, with a warning in the log. Only failures of the medium itself
//! are returned as errors.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::errors::PlannerError;
use crate::record::Record;
use crate::settings::{Settings, SettingsPatch};

/// Persistence for the record list and the settings object.
pub trait RecordStore {
    fn load_records(&self) -> Result<Vec<Record>, PlannerError>;

    fn save_records(&mut self, records: &[Record]) -> Result<(), PlannerError>;

    /// Loads stored settings laid over `defaults`.
    fn load_settings(&self, defaults: &Settings) -> Result<Settings, PlannerError>;

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PlannerError>;
}

/// Decodes a stored record list. Absent or corrupt data yields an empty list.
pub fn decode_records(raw: Option<&str>) -> Vec<Record> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Record>>(raw) {
        Ok(records) => {
            debug!("Decoded {} stored records.", records.len());
            records
        }
        Err(e) => {
            warn!("Stored records are unreadable, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Decodes stored settings over `defaults`. Absent or corrupt data yields `defaults`.
pub fn decode_settings(raw: Option<&str>, defaults: &Settings) -> Settings {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return defaults.clone();
    };
    match serde_json::from_str::<Option<SettingsPatch>>(raw) {
        Ok(Some(patch)) => defaults.overlay(&patch, &defaults.rates),
        Ok(None) => defaults.clone(),
        Err(e) => {
            warn!("Stored settings are unreadable, using defaults: {}", e);
            defaults.clone()
        }
    }
}

/// In-process store holding serialized JSON, the way a browser key/value
/// area would.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Option<String>,
    settings: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw stored values.
    pub fn with_raw(records: Option<String>, settings: Option<String>) -> Self {
        Self { records, settings }
    }

    pub fn raw_records(&self) -> Option<&str> {
        self.records.as_deref()
    }

    pub fn raw_settings(&self) -> Option<&str> {
        self.settings.as_deref()
    }
}

impl RecordStore for MemoryStore {
    fn load_records(&self) -> Result<Vec<Record>, PlannerError> {
        Ok(decode_records(self.records.as_deref()))
    }

    fn save_records(&mut self, records: &[Record]) -> Result<(), PlannerError> {
        self.records = Some(serde_json::to_string(records)?);
        Ok(())
    }

    fn load_settings(&self, defaults: &Settings) -> Result<Settings, PlannerError> {
        Ok(decode_settings(self.settings.as_deref(), defaults))
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PlannerError> {
        self.settings = Some(serde_json::to_string(settings)?);
        Ok(())
    }
}
