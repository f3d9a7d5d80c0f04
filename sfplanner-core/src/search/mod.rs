//! Regex search over a record list.
//!
//! A user pattern is compiled once by [`compile_search_pattern`], applied to
//! each record's haystack by [`filter_records`], and used again to mark
//! matched spans in rendered fields by [`highlight_markup`]. None of these
//! functions mutate the records they are given.

pub mod compiler;
pub mod highlight;

use log::debug;

use crate::record::Record;

pub use compiler::{compile_search_pattern, CompiledSearch, Matcher, INVALID_PATTERN_MESSAGE};
pub use highlight::{escape_markup, highlight_markup, highlight_segments, Segment};

/// Keeps the records whose [`Record::haystack`] or any single searchable
/// field matches, so anchored patterns such as `^Coffee$` can target one field.
///
/// Without a matcher every record is returned, in input order.
pub fn filter_records<'a>(records: &'a [Record], matcher: Option<&Matcher>) -> Vec<&'a Record> {
    let Some(matcher) = matcher else {
        return records.iter().collect();
    };
    let kept: Vec<&Record> = records
        .iter()
        .filter(|rec| {
            matcher.is_match(&rec.haystack())
                || rec.search_fields().iter().any(|f| matcher.is_match(f))
        })
        .collect();
    debug!(
        "Pattern '{}' kept {} of {} records.",
        matcher.as_str(),
        kept.len(),
        records.len()
    );
    kept
}
