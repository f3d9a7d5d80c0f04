// sfplanner/src/utils/data_store.rs
//! File-backed ledger storage for the `sfplanner` CLI tool.
//!
//! Records and settings live as JSON in `records.json` and `settings.json`
//! inside the data directory. Reads take a shared lock; writes go to a
//! sibling temp file under an exclusive lock and are renamed into place, so a
//! concurrent reader never sees a half-written file.

use log::debug;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use sfplanner_core::store::{decode_records, decode_settings, RecordStore};
use sfplanner_core::{PlannerError, Record, Settings};

pub const RECORDS_FILE_NAME: &str = "records.json";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
const TMP_SUFFIX: &str = ".tmp";

/// Platform data directory for the application, e.g. `~/.local/share/sfplanner`.
pub fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("sfplanner"),
        None => PathBuf::from(".sfplanner"),
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn records_path(&self) -> PathBuf {
        self.dir.join(RECORDS_FILE_NAME)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }
}

/// Reads `path` under a shared lock. A missing file reads as `None`.
fn read_locked(path: &Path) -> io::Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut f = OpenOptions::new().read(true).open(path)?;
    fs2::FileExt::lock_shared(&f)?;
    let mut raw = String::new();
    let read = f.read_to_string(&mut raw);
    fs2::FileExt::unlock(&f)?;
    read?;
    debug!("Read {} bytes from {}.", raw.len(), path.display());
    Ok(Some(raw))
}

/// Writes `contents` to a temp file next to `path`, then renames it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension(format!(
        "{}{}",
        path.extension().map(|s| s.to_string_lossy()).unwrap_or_default(),
        TMP_SUFFIX
    ));
    {
        let mut tmp = OpenOptions::new().create(true).write(true).truncate(true).open(&tmp_path)?;
        fs2::FileExt::lock_exclusive(&tmp)?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        fs2::FileExt::unlock(&tmp)?;
    }
    fs::rename(&tmp_path, path)?;
    debug!("Wrote {} bytes to {}.", contents.len(), path.display());
    Ok(())
}

impl RecordStore for JsonFileStore {
    fn load_records(&self) -> Result<Vec<Record>, PlannerError> {
        let raw = read_locked(&self.records_path())?;
        Ok(decode_records(raw.as_deref()))
    }

    fn save_records(&mut self, records: &[Record]) -> Result<(), PlannerError> {
        let json = serde_json::to_vec_pretty(records)?;
        write_atomic(&self.records_path(), &json)?;
        Ok(())
    }

    fn load_settings(&self, defaults: &Settings) -> Result<Settings, PlannerError> {
        let raw = read_locked(&self.settings_path())?;
        Ok(decode_settings(raw.as_deref(), defaults))
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), PlannerError> {
        let json = serde_json::to_vec_pretty(settings)?;
        write_atomic(&self.settings_path(), &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sfplanner_core::{Ledger, RecordInput};
    use tempfile::tempdir;

    #[test]
    fn missing_files_load_as_empty_and_defaults() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("not-yet-created"));
        assert!(store.load_records().unwrap().is_empty());
        assert_eq!(store.load_settings(&Settings::default()).unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load_round_trips_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let mut ledger = Ledger::default();
        ledger
            .add(
                &RecordInput {
                    description: "Bus pass".into(),
                    amount: "30".into(),
                    category: "Transport".into(),
                    date: "2024-05-01".into(),
                },
                Utc::now(),
            )
            .unwrap();

        store.save_records(ledger.records()).unwrap();
        assert_eq!(store.load_records().unwrap(), ledger.records());
        assert!(store.records_path().exists());
        assert!(!dir.path().join("records.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(RECORDS_FILE_NAME), "{{{").unwrap();
        fs::write(dir.path().join(SETTINGS_FILE_NAME), "[]").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_records().unwrap().is_empty());
        assert_eq!(store.load_settings(&Settings::default()).unwrap(), Settings::default());
    }
}
