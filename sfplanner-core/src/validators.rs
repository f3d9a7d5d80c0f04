// File: sfplanner-core/src/validators.rs
//! Field validation and normalization for expense records.
//!
//! Every validator is a pure function from the raw text a user typed into a
//! form field to either a normalized value or a [`FieldError`] carrying the
//! message to show next to that field. Validators never panic and never stop
//! early: [`validate_record_input`] always runs all four so every message is
//! available at once.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::record::RecordFields;

// Interior characters exclude line terminators, as `.` does in browser regexes.
static RE_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\S(?:[^\n\r\x{2028}\x{2029}]*\S)?$").expect("description pattern is valid")
});
static RE_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").expect("amount pattern is valid")
});
static RE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("date pattern is valid")
});
static RE_CATEGORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").expect("category pattern is valid")
});
static RE_MULTI_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));
// ASCII word characters, the same class `\w` covers in browser regexes.
static RE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word pattern is valid"));

const MSG_DESCRIPTION_REQUIRED: &str = "Description is required.";
const MSG_DESCRIPTION_SPACING: &str = "Description cannot start/end with spaces.";
const MSG_AMOUNT: &str = "Amount must be numeric with up to 2 decimals.";
const MSG_DATE: &str = "Date must be YYYY-MM-DD.";
const MSG_CATEGORY: &str = "Category allows letters, spaces, and hyphens only.";

/// The user-editable fields of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Description,
    Amount,
    Category,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
        };
        f.write_str(name)
    }
}

/// A rejected field value. `Display` yields the message meant for the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Outcome of validating one field.
pub type Validated<T> = Result<T, FieldError>;

/// Raw, unvalidated field text as collected from an input surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

/// Per-field results of [`validate_record_input`]. Nothing is combined; the
/// caller decides whether all four are acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValidation {
    pub description: Validated<String>,
    pub amount: Validated<f64>,
    pub category: Validated<String>,
    pub date: Validated<String>,
}

impl RecordValidation {
    pub fn is_valid(&self) -> bool {
        self.description.is_ok() && self.amount.is_ok() && self.category.is_ok() && self.date.is_ok()
    }

    /// All field errors, in form order.
    pub fn errors(&self) -> Vec<&FieldError> {
        [
            self.description.as_ref().err(),
            self.amount.as_ref().err(),
            self.category.as_ref().err(),
            self.date.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Converts into validated fields, or every error when any field failed.
    pub fn into_fields(self) -> Result<RecordFields, Vec<FieldError>> {
        match (self.description, self.amount, self.category, self.date) {
            (Ok(description), Ok(amount), Ok(category), Ok(date)) => Ok(RecordFields {
                description,
                amount,
                category,
                date,
            }),
            (description, amount, category, date) => Err([
                description.err(),
                amount.err(),
                category.err(),
                date.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }
}

/// Collapses every run of two or more whitespace characters into one space.
pub fn normalize_spaces(value: &str) -> String {
    RE_MULTI_SPACE.replace_all(value, " ").into_owned()
}

/// Validates a description and returns it with spaces normalized.
pub fn validate_description(value: &str) -> Validated<String> {
    let normalized = normalize_spaces(value);
    if normalized.trim().is_empty() {
        return Err(FieldError::new(Field::Description, MSG_DESCRIPTION_REQUIRED));
    }
    if !RE_DESCRIPTION.is_match(&normalized) {
        return Err(FieldError::new(Field::Description, MSG_DESCRIPTION_SPACING));
    }
    if let Some(word) = find_duplicate_word(&normalized) {
        return Err(FieldError::new(
            Field::Description,
            format!("Description contains a duplicate word (\"{}\").", word),
        ));
    }
    Ok(normalized)
}

/// Validates a non-negative amount with at most two decimals and no leading zeros.
pub fn validate_amount(value: &str) -> Validated<f64> {
    let raw = value.trim();
    if !RE_AMOUNT.is_match(raw) {
        return Err(FieldError::new(Field::Amount, MSG_AMOUNT));
    }
    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(FieldError::new(Field::Amount, MSG_AMOUNT)),
    }
}

/// Validates a `YYYY-MM-DD` date. Only ranges are checked, so `2024-02-30` passes.
pub fn validate_date(value: &str) -> Validated<String> {
    let raw = value.trim();
    if !is_iso_date(raw) {
        return Err(FieldError::new(Field::Date, MSG_DATE));
    }
    Ok(raw.to_string())
}

/// Validates a category made of letter words joined by single spaces or hyphens.
pub fn validate_category(value: &str) -> Validated<String> {
    let raw = normalize_spaces(value.trim());
    if !RE_CATEGORY.is_match(&raw) {
        return Err(FieldError::new(Field::Category, MSG_CATEGORY));
    }
    Ok(raw)
}

/// Runs all four field validators independently.
pub fn validate_record_input(input: &RecordInput) -> RecordValidation {
    RecordValidation {
        description: validate_description(&input.description),
        amount: validate_amount(&input.amount),
        category: validate_category(&input.category),
        date: validate_date(&input.date),
    }
}

/// Raw `YYYY-MM-DD` pattern test, without trimming.
pub fn is_iso_date(value: &str) -> bool {
    RE_DATE.is_match(value)
}

/// Finds a word immediately repeated after whitespace, ignoring ASCII case.
///
/// Equivalent to testing `\b(\w+)\s+\1\b` case-insensitively: adjacent word
/// runs are compared whole, and the gap between them must be pure whitespace.
fn find_duplicate_word(text: &str) -> Option<&str> {
    let mut words = RE_WORD.find_iter(text);
    let mut previous = words.next()?;
    for word in words {
        let gap = &text[previous.end()..word.start()];
        if gap.chars().all(char::is_whitespace)
            && previous.as_str().eq_ignore_ascii_case(word.as_str())
        {
            return Some(previous.as_str());
        }
        previous = word;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_spaces_collapses_runs_only() {
        assert_eq!(normalize_spaces("a  b\t\tc d"), "a b c d");
        assert_eq!(normalize_spaces(" lone "), " lone ");
        assert_eq!(normalize_spaces(""), "");
    }

    #[test]
    fn normalize_spaces_is_idempotent() {
        for s in ["", "  ", "a   b", "\n\n x \t y  ", "plain text"] {
            let once = normalize_spaces(s);
            assert_eq!(normalize_spaces(&once), once);
        }
    }

    #[test]
    fn description_rules() {
        assert_eq!(validate_description("The cat").unwrap(), "The cat");
        assert_eq!(validate_description("Lunch   with  friends").unwrap(), "Lunch with friends");
        assert!(validate_description(" padded").is_err());
        assert!(validate_description("padded ").is_err());
        assert_eq!(
            validate_description("   ").unwrap_err().message,
            MSG_DESCRIPTION_REQUIRED
        );
        assert_eq!(validate_description("").unwrap_err().field, Field::Description);
    }

    #[test]
    fn description_rejects_line_terminators() {
        for text in ["a\nb", "a\rb", "a\u{2028}b", "a\u{2029}b"] {
            assert_eq!(
                validate_description(text).unwrap_err().message,
                MSG_DESCRIPTION_SPACING,
                "{:?}",
                text
            );
        }
        assert_eq!(validate_description("a\tb").unwrap(), "a\tb");
    }

    #[test]
    fn description_duplicate_words() {
        let err = validate_description("the the cat").unwrap_err();
        assert_eq!(err.message, "Description contains a duplicate word (\"the\").");
        assert!(validate_description("The THE cat").is_err());
        assert!(validate_description("coffee  coffee").is_err());
        // Whole words only.
        assert!(validate_description("the theater").is_ok());
        assert!(validate_description("cat at home").is_ok());
        // Punctuation between the words breaks the repetition.
        assert!(validate_description("bye, bye").is_ok());
    }

    #[test]
    fn amount_rules() {
        assert_eq!(validate_amount("0").unwrap(), 0.0);
        assert_eq!(validate_amount("12.5").unwrap(), 12.5);
        assert_eq!(validate_amount(" 7.25 ").unwrap(), 7.25);
        assert!(validate_amount("12.345").is_err());
        assert!(validate_amount("01").is_err());
        assert!(validate_amount("-3").is_err());
        assert!(validate_amount("1.").is_err());
        assert!(validate_amount(".5").is_err());
        assert!(validate_amount("").is_err());
        assert_eq!(validate_amount("abc").unwrap_err().message, MSG_AMOUNT);
    }

    #[test]
    fn amount_rejects_overflowing_literals() {
        let huge = "9".repeat(400);
        assert!(validate_amount(&huge).is_err());
    }

    #[test]
    fn date_rules() {
        assert_eq!(validate_date("2024-02-30").unwrap(), "2024-02-30");
        assert_eq!(validate_date(" 2024-01-31 ").unwrap(), "2024-01-31");
        assert!(validate_date("2024-13-01").is_err());
        assert!(validate_date("2024-00-10").is_err());
        assert!(validate_date("2024-01-32").is_err());
        assert!(validate_date("24-01-01").is_err());
        assert!(!is_iso_date(" 2024-01-01"));
    }

    #[test]
    fn category_rules() {
        assert_eq!(validate_category("Food-Drink").unwrap(), "Food-Drink");
        assert_eq!(validate_category("  Eating   Out ").unwrap(), "Eating Out");
        assert!(validate_category("Food & Drink").is_err());
        assert!(validate_category("Food2").is_err());
        assert!(validate_category("Food--Drink").is_err());
        assert!(validate_category("-Food").is_err());
        assert!(validate_category("").is_err());
    }

    #[test]
    fn record_validation_reports_every_field() {
        let input = RecordInput {
            description: "ok text".into(),
            amount: "1.234".into(),
            category: "Food!".into(),
            date: "2024-1-1".into(),
        };
        let result = validate_record_input(&input);
        assert!(!result.is_valid());
        let fields: Vec<Field> = result.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![Field::Amount, Field::Category, Field::Date]);
        assert_eq!(result.into_fields().unwrap_err().len(), 3);
    }

    #[test]
    fn record_validation_success_yields_normalized_fields() {
        let input = RecordInput {
            description: "Bus  pass".into(),
            amount: "20".into(),
            category: "Transport".into(),
            date: "2024-03-04".into(),
        };
        let fields = validate_record_input(&input).into_fields().unwrap();
        assert_eq!(fields.description, "Bus pass");
        assert_eq!(fields.amount, 20.0);
        assert_eq!(fields.category, "Transport");
        assert_eq!(fields.date, "2024-03-04");
    }
}
