//! Integration tests for Issue and Issues.

use brm_validate::{Issue, IssuePath, Issues};
use stillwater::prelude::*;

#[test]
fn test_issue_full_context() {
    let issue = Issue::new(IssuePath::root().push_key("avg_txn_value"), "must be positive")
        .with_code("too_small")
        .with_got("-5")
        .with_expected("value >= 0");

    assert_eq!(issue.path.to_string(), "avg_txn_value");
    assert_eq!(issue.message, "must be positive");
    assert_eq!(issue.code, "too_small");
    assert_eq!(issue.got, Some("-5".to_string()));
    assert_eq!(issue.expected, Some("value >= 0".to_string()));
}

#[test]
fn test_issue_defaults_to_custom_code() {
    let issue = Issue::new(IssuePath::root(), "bad");
    assert_eq!(issue.code, "custom");
    assert_eq!(issue.to_string(), "(root): bad");
}

#[test]
fn test_issues_never_empty() {
    let issues = Issues::single(Issue::new(IssuePath::root(), "test issue"));
    assert!(!issues.is_empty());
    assert_eq!(issues.len(), 1);
    assert!(Issues::from_vec(Vec::new()).is_none());
}

#[test]
fn test_issues_combine_via_semigroup() {
    let a = Issues::single(Issue::new(
        IssuePath::root().push_key("offer_type"),
        "Invalid enum value",
    ));
    let b = Issues::single(Issue::new(
        IssuePath::root().push_key("notes"),
        "Expected string",
    ));

    let combined = a.combine(b);
    assert_eq!(combined.len(), 2);
    let paths: Vec<String> = combined.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["offer_type", "notes"]);
}

#[test]
fn test_field_errors_keep_first_message_per_path() {
    let name = IssuePath::root()
        .push_key("offers")
        .push_index(0)
        .push_key("name");
    let issues = Issues::from_vec(vec![
        Issue::new(name.clone(), "Offer 1 name is required"),
        Issue::new(name, "second message"),
        Issue::new(IssuePath::root(), "Expected object"),
    ])
    .unwrap();

    let fields = issues.field_errors();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields["offers.0.name"], "Offer 1 name is required");
    assert_eq!(fields[""], "Expected object");
}

#[test]
fn test_filter_by_path_and_code() {
    let notes = IssuePath::root().push_key("notes");
    let issues = Issues::from_vec(vec![
        Issue::new(notes.clone(), "Expected string").with_code("invalid_type"),
        Issue::new(IssuePath::root().push_key("has_upsell"), "Expected boolean")
            .with_code("invalid_type"),
        Issue::new(IssuePath::root().push_key("core_promise"), "too long").with_code("too_big"),
    ])
    .unwrap();

    assert_eq!(issues.at_path(&notes).len(), 1);
    assert_eq!(issues.with_code("invalid_type").len(), 2);
    assert_eq!(issues.with_code("too_big").len(), 1);
}

#[test]
fn test_issues_display_lists_every_issue() {
    let issues = Issues::from_vec(vec![
        Issue::new(IssuePath::root().push_key("notes"), "Expected string"),
        Issue::new(IssuePath::root().push_key("has_upsell"), "Expected boolean"),
    ])
    .unwrap();

    let rendered = issues.to_string();
    assert!(rendered.contains("notes: Expected string"));
    assert!(rendered.contains("has_upsell: Expected boolean"));
}
