//! compiler.rs - Turns user search text into a reusable matcher.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Matches, Regex, RegexBuilder};

/// Message surfaced when a search pattern does not compile.
pub const INVALID_PATTERN_MESSAGE: &str = "Invalid regex pattern.";

/// Upper bound on the compiled size of a user pattern.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A compiled search expression.
///
/// Matching is stateless: every call scans from the start of its input, so one
/// matcher can be shared across records and highlight passes.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    ignore_case: bool,
}

impl Matcher {
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }

    /// Iterates every non-overlapping match, left to right.
    pub fn find_iter<'r, 'h>(&'r self, haystack: &'h str) -> Matches<'r, 'h> {
        self.regex.find_iter(haystack)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }
}

/// Result of [`compile_search_pattern`].
///
/// `matcher` is `None` both for a blank pattern and for a pattern that failed
/// to compile; only the latter sets `error`. Callers treat both as "no
/// filtering" and are expected to show `error` to the user.
#[derive(Debug, Clone, Default)]
pub struct CompiledSearch {
    pub matcher: Option<Matcher>,
    pub error: Option<String>,
}

impl CompiledSearch {
    pub fn matcher(&self) -> Option<&Matcher> {
        self.matcher.as_ref()
    }

    pub fn is_filtering(&self) -> bool {
        self.matcher.is_some()
    }
}

/// Compiles `pattern_text` (trimmed) into a matcher.
pub fn compile_search_pattern(pattern_text: &str, ignore_case: bool) -> CompiledSearch {
    let trimmed = pattern_text.trim();
    if trimmed.is_empty() {
        return CompiledSearch::default();
    }

    debug!(
        "Compiling search pattern '{}' (ignore_case: {}).",
        trimmed, ignore_case
    );

    match RegexBuilder::new(trimmed)
        .case_insensitive(ignore_case)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => CompiledSearch {
            matcher: Some(Matcher { regex, ignore_case }),
            error: None,
        },
        Err(e) => {
            warn!("Search pattern '{}' did not compile: {}", trimmed, e);
            CompiledSearch {
                matcher: None,
                error: Some(INVALID_PATTERN_MESSAGE.to_string()),
            }
        }
    }
}
