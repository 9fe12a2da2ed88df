//! Tests for output formatting helpers

use docsearch::cli::output::{describe_term, format_duration, format_location, truncate};
use docsearch::core::types::{Location, TermMatch};

#[test]
fn test_format_location_is_one_based() {
    assert_eq!(format_location(Location::Line(41)), "line 42");
    assert_eq!(format_location(Location::Title), "title match");
}

#[test]
fn test_truncate_long_snippet() {
    let line = "x".repeat(200);
    let cut = truncate(&line, 100);
    assert_eq!(cut.chars().count(), 100);
    assert!(cut.ends_with("..."));
}

#[test]
fn test_describe_term() {
    colored::control::set_override(false);

    let exact = TermMatch::Exact {
        term: "beta".to_string(),
    };
    assert_eq!(describe_term(&exact), "beta (exact)");

    let approx = TermMatch::Approximate {
        term: "alph".to_string(),
        closest: "alpha".to_string(),
        ratio: 0.8888,
    };
    assert_eq!(describe_term(&approx), "alph -> alpha (similarity 0.89)");

    let none = TermMatch::Unmatched {
        term: "zzz".to_string(),
    };
    assert_eq!(describe_term(&none), "zzz (no match)");
}

#[test]
fn test_format_duration_minutes() {
    assert_eq!(format_duration(125.0), "2m 5.0s");
}
