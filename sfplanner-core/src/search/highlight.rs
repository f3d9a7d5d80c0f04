//! highlight.rs - Marks matched spans of display text.
//!
//! [`highlight_segments`] splits text into plain and matched slices; the
//! markup renderer and terminal renderers both build on it.
//!
//! License: MIT OR APACHE 2.0

use super::compiler::Matcher;

/// Opening tag wrapped around each match by [`highlight_markup`].
pub const MARK_OPEN: &str = "<mark>";
/// Closing tag wrapped around each match by [`highlight_markup`].
pub const MARK_CLOSE: &str = "</mark>";

/// A contiguous piece of highlighted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(s) | Segment::Match(s) => s,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Segment::Match(_))
    }
}

/// Escapes `& < > " '` for safe embedding in markup.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Splits `text` into plain and matched segments, in order.
///
/// Scanning stops at the first zero-length match; everything after the last
/// real match is returned as a single plain segment. Empty plain segments are
/// omitted.
pub fn highlight_segments<'a>(text: &'a str, matcher: Option<&Matcher>) -> Vec<Segment<'a>> {
    let Some(matcher) = matcher else {
        return if text.is_empty() { Vec::new() } else { vec![Segment::Plain(text)] };
    };

    let mut segments = Vec::new();
    let mut last = 0usize;
    for m in matcher.find_iter(text) {
        if m.start() == m.end() {
            break;
        }
        if m.start() > last {
            segments.push(Segment::Plain(&text[last..m.start()]));
        }
        segments.push(Segment::Match(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }
    segments
}

/// Escapes `text` and wraps every match in `<mark>` tags.
pub fn highlight_markup(text: &str, matcher: Option<&Matcher>) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in highlight_segments(text, matcher) {
        match segment {
            Segment::Plain(s) => out.push_str(&escape_markup(s)),
            Segment::Match(s) => {
                out.push_str(MARK_OPEN);
                out.push_str(&escape_markup(s));
                out.push_str(MARK_CLOSE);
            }
        }
    }
    out
}
