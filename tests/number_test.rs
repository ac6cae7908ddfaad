//! Integration tests for number schema validation.

use brm_validate::{Schema, SchemaExt, SchemaLike};
use serde_json::json;

fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

fn unwrap_failure<T: std::fmt::Debug, E>(v: stillwater::Validation<T, E>) -> E {
    v.into_result().unwrap_err()
}

#[test]
fn test_accepts_integers_and_floats() {
    let schema = Schema::number();
    assert_eq!(unwrap_success(schema.safe_parse(&json!(250))), 250.0);
    assert_eq!(unwrap_success(schema.safe_parse(&json!(99.5))), 99.5);
    assert_eq!(unwrap_success(schema.safe_parse(&json!(-3))), -3.0);
}

#[test]
fn test_rejects_numeric_strings() {
    let errors = unwrap_failure(Schema::number().safe_parse(&json!("250")));
    assert_eq!(errors.first().message, "Expected number");
    assert_eq!(errors.first().code, "invalid_type");
}

#[test]
fn test_non_negative() {
    let schema = Schema::number().non_negative();
    assert!(schema.safe_parse(&json!(0)).is_success());
    assert!(schema.safe_parse(&json!(0.01)).is_success());

    let errors = unwrap_failure(schema.safe_parse(&json!(-5)));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "too_small");
    assert_eq!(errors.first().message, "Number must be greater than or equal to 0");
}

#[test]
fn test_positive_rejects_zero() {
    let schema = Schema::number().positive();
    assert!(schema.safe_parse(&json!(1)).is_success());
    assert!(schema.safe_parse(&json!(0)).is_failure());
}

#[test]
fn test_min_max_bounds() {
    let schema = Schema::number().min(1.0).max(10.0);
    assert!(schema.safe_parse(&json!(1)).is_success());
    assert!(schema.safe_parse(&json!(10)).is_success());

    let errors = unwrap_failure(schema.safe_parse(&json!(11)));
    assert_eq!(errors.first().code, "too_big");
    assert_eq!(errors.first().message, "Number must be less than or equal to 10");
}

#[test]
fn test_custom_message() {
    let schema = Schema::number()
        .non_negative()
        .error("Average transaction value must be a nonnegative number");
    let errors = unwrap_failure(schema.safe_parse(&json!(-1)));
    assert_eq!(
        errors.first().message,
        "Average transaction value must be a nonnegative number"
    );
}

#[test]
fn test_nullable_number() {
    let schema = Schema::number().non_negative().nullable();
    assert_eq!(unwrap_success(schema.safe_parse(&json!(null))), None);
    assert_eq!(unwrap_success(schema.safe_parse(&json!(12))), Some(12.0));
    assert!(schema.safe_parse(&json!(-12)).is_failure());
}
