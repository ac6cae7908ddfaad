//! Tests for the business-information submission flow.

use std::sync::Mutex;

use brm_validate::forms::{BusinessInfoForm, ProfileStore, SubmitError};
use brm_validate::StoreError;
use serde_json::{json, Value};

/// Records every procedure call and answers with a fixed result.
struct RecordingStore {
    calls: Mutex<Vec<(String, Value)>>,
    response: Result<Value, StoreError>,
}

impl RecordingStore {
    fn ok() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Ok(Value::Null),
        }
    }

    fn failing(err: StoreError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Err(err),
        }
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProfileStore for RecordingStore {
    fn call_procedure(&self, procedure: &str, params: &Value) -> Result<Value, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((procedure.to_string(), params.clone()));
        self.response.clone()
    }
}

fn payload(avg_txn_value: Value) -> Value {
    json!({
        "offer_type": "consulting",
        "core_promise": "Operations audits for agencies",
        "avg_txn_value": avg_txn_value,
        "revenue_band": "500k_1m",
        "traffic_source": "referrals",
        "retention_model": "retainer",
        "has_upsell": true,
        "notes": "Prefers async",
        "offers": [
            {
                "slot": 1,
                "name": "Ops Audit",
                "price_point": 2500,
                "fulfillment_type": "one_on_one",
                "primary_outcome": null
            },
            {
                "slot": 2,
                "name": null,
                "price_point": null,
                "fulfillment_type": null,
                "primary_outcome": null
            },
            {
                "slot": 3,
                "name": null,
                "price_point": null,
                "fulfillment_type": null,
                "primary_outcome": null
            }
        ]
    })
}

#[test]
fn test_valid_submission_calls_store_once() {
    let store = RecordingStore::ok();
    let form = BusinessInfoForm::new(&store);

    let profile = form.submit(&payload(json!(250))).unwrap();
    assert_eq!(profile.avg_txn_value, Some(250.0));

    let calls = store.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "upsert_brm_profile");
    assert_eq!(calls[0].1["p_profile"]["core_promise"], "Operations audits for agencies");
    assert_eq!(calls[0].1["p_profile"]["offers"][0]["name"], "Ops Audit");
}

#[test]
fn test_invalid_submission_never_calls_store() {
    let store = RecordingStore::ok();
    let form = BusinessInfoForm::new(&store);

    let err = form.submit(&payload(json!(-5))).unwrap_err();
    match &err {
        SubmitError::Invalid { issues, field_errors } => {
            assert_eq!(issues.len(), 1);
            assert_eq!(field_errors.len(), 1);
            assert_eq!(
                field_errors["avg_txn_value"],
                "Average transaction value must be a nonnegative number"
            );
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(store.calls().is_empty());
}

#[test]
fn test_configured_procedure_and_payload_key() {
    let store = RecordingStore::ok();
    let form = BusinessInfoForm::new(&store)
        .with_procedure("save_business_profile")
        .with_payload_key("profile");

    form.submit(&payload(Value::Null)).unwrap();

    let calls = store.calls();
    assert_eq!(calls[0].0, "save_business_profile");
    assert!(calls[0].1.get("p_profile").is_none());
    assert_eq!(calls[0].1["profile"]["avg_txn_value"], Value::Null);
}

#[test]
fn test_store_rejection_is_returned() {
    let store = RecordingStore::failing(StoreError::Rejected {
        procedure: "upsert_brm_profile".to_string(),
        message: "new row violates row-level security policy".to_string(),
    });
    let form = BusinessInfoForm::new(&store);

    let err = form.submit(&payload(json!(100))).unwrap_err();
    assert!(matches!(err, SubmitError::Store(StoreError::Rejected { .. })));
    assert!(err.field_errors().is_none());
    assert_eq!(store.calls().len(), 1);
}

#[test]
fn test_store_unavailable_is_not_retried() {
    let store = RecordingStore::failing(StoreError::Unavailable("connection reset".to_string()));
    let form = BusinessInfoForm::new(&store);

    let err = form.submit(&payload(json!(100))).unwrap_err();
    assert_eq!(err.to_string(), "data store unavailable: connection reset");
    assert_eq!(store.calls().len(), 1);
}

#[test]
fn test_validate_does_not_submit() {
    let store = RecordingStore::ok();
    let form = BusinessInfoForm::new(&store);

    assert!(form.validate(&payload(json!(1))).is_success());
    assert!(store.calls().is_empty());
}
