// sfplanner/src/commands/transfer.rs
//! `export` and `import`.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use std::fs;
use std::path::Path;

use sfplanner_core::{export_payload, validate_import_payload, PlannerError};

use super::Session;

pub fn export(session: &Session, output: Option<&Path>) -> Result<()> {
    let json = export_payload(session.ledger.records(), &session.settings)?;
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .with_context(|| format!("Failed to write export file: {}", path.display()))?;
            session.info(format!(
                "Exported {} records to {}.",
                session.ledger.len(),
                path.display()
            ));
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Replaces the ledger with the file's records and merges its settings.
/// Nothing is written unless the whole document validates.
pub fn import(session: &mut Session, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;
    let payload = validate_import_payload(&raw).map_err(PlannerError::from)?;

    let settings = payload.apply(&mut session.ledger, &session.settings, Utc::now());
    session.settings = settings;
    session.save_records()?;
    session.save_settings()?;

    info!("Imported {} records from {}.", session.ledger.len(), file.display());
    session.success(format!(
        "Imported {} records. Next id: {}.",
        session.ledger.len(),
        session.ledger.next_id()
    ));
    Ok(())
}
