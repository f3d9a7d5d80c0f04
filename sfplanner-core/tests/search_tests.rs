// sfplanner-core/tests/search_tests.rs
use chrono::{TimeZone, Utc};
use sfplanner_core::{
    compile_search_pattern, filter_records, highlight_markup, highlight_segments, Ledger,
    RecordInput, Segment, INVALID_PATTERN_MESSAGE,
};
use test_log::test;

fn coffee_ledger() -> Ledger {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
    let mut ledger = Ledger::default();
    for (description, amount, date) in [("Coffee", "3.5", "2024-01-01"), ("Coffee break", "4", "2024-01-02")] {
        ledger
            .add(
                &RecordInput {
                    description: description.into(),
                    amount: amount.into(),
                    category: "Food".into(),
                    date: date.into(),
                },
                now,
            )
            .unwrap();
    }
    ledger
}

#[test]
fn case_insensitive_search_finds_both_coffees() {
    let ledger = coffee_ledger();
    let search = compile_search_pattern("coffee", true);
    assert!(search.error.is_none());
    let hits = filter_records(ledger.records(), search.matcher());
    assert_eq!(hits.len(), 2);
}

#[test]
fn anchored_search_finds_only_exact_description() {
    let ledger = coffee_ledger();
    let search = compile_search_pattern("^Coffee$", false);
    let hits = filter_records(ledger.records(), search.matcher());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "Coffee");
}

#[test]
fn case_sensitive_search_respects_case() {
    let ledger = coffee_ledger();
    let search = compile_search_pattern("coffee", false);
    assert!(filter_records(ledger.records(), search.matcher()).is_empty());
}

#[test]
fn invalid_and_blank_patterns_show_everything() {
    let ledger = coffee_ledger();

    let broken = compile_search_pattern("(unclosed", true);
    assert_eq!(broken.error.as_deref(), Some(INVALID_PATTERN_MESSAGE));
    assert!(!broken.is_filtering());
    assert_eq!(filter_records(ledger.records(), broken.matcher()).len(), 2);

    let blank = compile_search_pattern("   ", true);
    assert!(blank.error.is_none());
    assert!(!blank.is_filtering());
    assert_eq!(filter_records(ledger.records(), blank.matcher()).len(), 2);
}

#[test]
fn markup_escapes_without_matcher() {
    assert_eq!(highlight_markup("<b>", None), "&lt;b&gt;");
    assert_eq!(highlight_markup("Tom & Jerry's", None), "Tom &amp; Jerry&#39;s");
}

#[test]
fn markup_wraps_each_match() {
    let search = compile_search_pattern("co", true);
    assert_eq!(
        highlight_markup("Coffee & cocoa", search.matcher()),
        "<mark>Co</mark>ffee &amp; <mark>co</mark><mark>co</mark>a"
    );
}

#[test]
fn zero_length_match_ends_highlighting() {
    let search = compile_search_pattern("x*", false);
    assert_eq!(highlight_markup("a<b", search.matcher()), "a&lt;b");
    assert_eq!(
        highlight_segments("abc", search.matcher()),
        vec![Segment::Plain("abc")]
    );
}
