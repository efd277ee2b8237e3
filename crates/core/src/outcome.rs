//! The uniform `{statusCode, body}` result the pipeline hands back.

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::CheckoutError;

/// Terminal result of one checkouts lookup.
///
/// The status code fully determines the body's shape: the upstream
/// payload verbatim for 200, an `{"error": ...}` descriptor for 400 and
/// 500. Built once when the pipeline finishes and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOutcome {
    /// 200 on success, 400 for rejected input, 500 for upstream failure.
    pub status_code: u16,
    /// Upstream JSON on success, error descriptor otherwise.
    pub body: Value,
}

impl CheckoutOutcome {
    /// Successful fetch: the upstream payload passes through untouched.
    #[must_use]
    pub fn success(body: Value) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }

    /// Map a pipeline failure to its caller-facing form.
    #[must_use]
    pub fn from_error(error: &CheckoutError) -> Self {
        Self {
            status_code: error.status_code(),
            body: json!({ "error": error.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_passes_the_payload_through() {
        let payload = json!({ "entities": { "checkouts": {} }, "total": 3 });
        let outcome = CheckoutOutcome::success(payload.clone());
        assert_eq!(outcome.status_code, 200);
        assert_eq!(outcome.body, payload);
    }

    #[test]
    fn test_missing_field_maps_to_contract_body() {
        let outcome = CheckoutOutcome::from_error(&CheckoutError::MissingField);
        assert_eq!(outcome.status_code, 400);
        assert_eq!(
            outcome.body,
            json!({ "error": "Missing name, user_pin, or accountId" })
        );
    }

    #[test]
    fn test_upstream_failure_keeps_its_detail() {
        let error = CheckoutError::LoginFailed("HTTP 401 Unauthorized: nope".to_string());
        let outcome = CheckoutOutcome::from_error(&error);
        assert_eq!(outcome.status_code, 500);
        let message = outcome.body["error"].as_str().expect("error message");
        assert!(message.contains("login failed"));
        assert!(message.contains("401"));
    }

    #[test]
    fn test_serializes_with_camel_case_status() {
        let outcome = CheckoutOutcome::success(json!([]));
        let serialized = serde_json::to_value(&outcome).expect("serializes");
        assert_eq!(serialized, json!({ "statusCode": 200, "body": [] }));
    }
}
