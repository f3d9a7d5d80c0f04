// sfplanner-core/src/lib.rs
//! # SFPlanner Core Library
//!
//! `sfplanner-core` holds the platform-independent logic of the planner: field
//! validation for expense records, the record ledger, regex search with match
//! highlighting, settings, summary statistics and JSON import/export.
//!
//! The library performs no I/O of its own. Persistence goes through the
//! [`RecordStore`] trait, and every function that needs the current time or
//! date takes it as an argument.
//!
//! ## Modules
//!
//! * `validators`: Field validation for description, amount, date and category input.
//! * `record`: The `Record` type and the `txn_NNNN` identifier sequence.
//! * `ledger`: The in-session record list with add, update and delete.
//! * `search`: Pattern compilation, record filtering and match highlighting.
//! * `settings`: Base currency, conversion rates, budget cap and categories.
//! * `report`: Sorting, money formatting, the 7-day trend and cap status.
//! * `transfer`: Export to and validated import from a JSON document.
//! * `store`: The `RecordStore` persistence trait and an in-memory store.
//! * `errors`: The crate-wide `PlannerError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::Utc;
//! use sfplanner_core::{compile_search_pattern, filter_records, Ledger, RecordInput};
//!
//! let mut ledger = Ledger::default();
//! ledger
//!     .add(
//!         &RecordInput {
//!             description: "Coffee beans".into(),
//!             amount: "12.50".into(),
//!             category: "Food".into(),
//!             date: "2024-03-01".into(),
//!         },
//!         Utc::now(),
//!     )
//!     .unwrap();
//!
//! let search = compile_search_pattern("coffee", true);
//! let hits = filter_records(ledger.records(), search.matcher());
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, "txn_0001");
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`PlannerError`]. Field validation failures
//! carry one [`FieldError`] per rejected field so a front end can show each
//! message next to its input.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod errors;
pub mod ledger;
pub mod record;
pub mod report;
pub mod search;
pub mod settings;
pub mod store;
pub mod transfer;
pub mod validators;

/// Re-exports the crate-wide error type.
pub use errors::PlannerError;

/// Re-exports field validation.
pub use validators::{
    is_iso_date,
    normalize_spaces,
    validate_amount,
    validate_category,
    validate_date,
    validate_description,
    validate_record_input,
    Field,
    FieldError,
    RecordInput,
    RecordValidation,
};

pub use record::{sequence_number, IdSequence, Record, RecordFields, DEFAULT_ID_PREFIX};
pub use ledger::Ledger;

/// Re-exports search and highlighting.
pub use search::{
    compile_search_pattern,
    filter_records,
    highlight_markup,
    highlight_segments,
    CompiledSearch,
    Matcher,
    Segment,
    INVALID_PATTERN_MESSAGE,
};

pub use settings::{Currency, Rates, Settings, SettingsError, SettingsInput, SettingsPatch};

/// Re-exports reporting helpers.
pub use report::{format_money, sort_records, summarize, CapStatus, SortKey, Summary, TrendPoint};

pub use transfer::{export_payload, validate_import_payload, ImportError, ImportPayload};
pub use store::{MemoryStore, RecordStore};
