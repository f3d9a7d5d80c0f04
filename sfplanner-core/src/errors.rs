//! errors.rs - Custom error types for the sfplanner-core library.
//!
//! This module defines the structured error enum returned by the fallible
//! ledger, settings, transfer and store operations. Field-level validation,
//! settings and import failures keep their own types so their `Display`
//! output can be shown to the user as is.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

use crate::settings::SettingsError;
use crate::transfer::ImportError;
use crate::validators::FieldError;

/// All error types surfaced by the `sfplanner-core` library.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlannerError {
    #[error("Invalid record input: {}", join_field_errors(.0))]
    InvalidRecord(Vec<FieldError>),

    #[error("Record '{0}' not found.")]
    RecordNotFound(String),

    #[error(transparent)]
    InvalidSettings(#[from] SettingsError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Failed to serialize data: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::Field;

    #[test]
    fn invalid_record_lists_every_message() {
        let err = PlannerError::InvalidRecord(vec![
            FieldError::new(Field::Amount, "Amount must be numeric with up to 2 decimals."),
            FieldError::new(Field::Date, "Date must be YYYY-MM-DD."),
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid record input: Amount must be numeric with up to 2 decimals. Date must be YYYY-MM-DD."
        );
    }
}
