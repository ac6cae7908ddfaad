//! Integration tests for array schema validation.

use brm_validate::{IssuePath, Schema, SchemaExt, SchemaLike};
use serde_json::{json, Value};

/// Helper to extract the success value from a Validation
fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

/// Helper to extract the error value from a Validation
fn unwrap_failure<T, E>(v: stillwater::Validation<T, E>) -> E
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

#[test]
fn test_array_of_strings() {
    let schema = Schema::array(Schema::string().min_len(1));
    let items = unwrap_success(schema.safe_parse(&json!(["hello", "world"])));
    assert_eq!(items, vec!["hello".to_string(), "world".to_string()]);
}

#[test]
fn test_empty_array_without_constraints() {
    let schema = Schema::array(Schema::number());
    assert!(unwrap_success(schema.safe_parse(&json!([]))).is_empty());
}

#[test]
fn test_non_array_rejected() {
    let errors = unwrap_failure(Schema::array(Schema::string()).safe_parse(&json!({"0": "a"})));
    assert_eq!(errors.first().message, "Expected array");
    assert!(errors.first().path.is_root());
}

#[test]
fn test_every_element_error_reported() {
    let schema = Schema::array(Schema::number().non_negative());
    let errors = unwrap_failure(schema.safe_parse(&json!([1, -2, "x", -4])));

    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["1", "2", "3"]);
}

#[test]
fn test_exact_length() {
    let schema = Schema::array(Schema::number()).length(3);
    assert!(schema.safe_parse(&json!([1, 2, 3])).is_success());

    for input in [json!([1, 2]), json!([1, 2, 3, 4])] {
        let errors = unwrap_failure(schema.safe_parse(&input));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "Array must contain exactly 3 element(s)");
        assert!(errors.first().path.is_root());
    }
}

#[test]
fn test_length_checked_only_after_elements_pass() {
    let schema = Schema::array(Schema::number()).length(3);
    let errors = unwrap_failure(schema.safe_parse(&json!([1, "x"])));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().path, IssuePath::root().push_index(1));
}

#[test]
fn test_min_max_len() {
    let schema = Schema::array(Schema::string()).min_len(1).max_len(2);
    assert!(schema.safe_parse(&json!(["a"])).is_success());
    assert_eq!(unwrap_failure(schema.safe_parse(&json!([]))).first().code, "too_small");
    assert_eq!(
        unwrap_failure(schema.safe_parse(&json!(["a", "b", "c"]))).first().code,
        "too_big"
    );
}

#[test]
fn test_non_empty_custom_message() {
    let schema = Schema::array(Schema::string()).non_empty().error("Add at least one offer");
    assert_eq!(
        unwrap_failure(schema.safe_parse(&json!([]))).first().message,
        "Add at least one offer"
    );
}

#[test]
fn test_nested_object_paths() {
    let schema = Schema::array(
        Schema::object()
            .field("slot", Schema::number())
            .field("name", Schema::string().nullable()),
    );

    let errors = unwrap_failure(schema.safe_parse(&json!([
        {"slot": 1, "name": "Mastermind"},
        {"slot": 2, "name": 7},
        {"name": null}
    ])));

    let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
    assert_eq!(paths, vec!["1.name", "2.slot"]);
}

#[test]
fn test_array_json_output_keeps_items() {
    let schema = Schema::array(Schema::literal(1).or(Schema::literal(2)));
    let out = schema
        .validate_to_value(Some(&json!([2, 1])), &IssuePath::root())
        .into_result()
        .unwrap();
    assert_eq!(out, Value::Array(vec![json!(2), json!(1)]));
}
