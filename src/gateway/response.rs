//! Response normalization: success bodies pass through untouched, and every
//! failure is reduced to one message plus an optional status code.

use crate::errors::AppError;
use serde_json::Value;
use std::error::Error as _;

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

/// Decodes a 2xx body verbatim. An empty body becomes `null` and a non-JSON
/// body is returned as a JSON string.
#[must_use]
pub fn success_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Builds the failure for a non-2xx response.
#[must_use]
pub fn backend_failure(status: u16, body: &str) -> AppError {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let message = parsed
        .as_ref()
        .and_then(error_message)
        .unwrap_or_else(|| fallback_text(status, body));

    AppError::Backend {
        status,
        message: sanitize(&message),
    }
}

/// Picks the most specific message from a structured error body:
/// `message` first, then `details`.
#[must_use]
pub fn error_message(body: &Value) -> Option<String> {
    ["message", "details"]
        .iter()
        .find_map(|key| body.get(*key).and_then(text_of))
}

/// True when a 2xx body explicitly reports `success: false`.
#[must_use]
pub fn reports_failure(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool) == Some(false)
}

/// Maps a `reqwest` failure where no usable response was received.
#[must_use]
pub fn transport_failure(err: &reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::Timeout("Request timed out. Please try again.".to_string());
    }
    if err.is_builder() {
        return AppError::Serialization(format!("Failed to build request: {err}"));
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message = format!("{message}: {cause}");
        source = cause.source();
    }

    AppError::Transport {
        message: format!("Unable to reach the server: {message}"),
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

fn fallback_text(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.starts_with('[') {
        format!("Request failed with status code {status}")
    } else {
        trimmed.to_string()
    }
}

fn sanitize(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_wins_over_details() {
        let err = backend_failure(
            400,
            r#"{"message":"Invalid credentials","details":"password mismatch"}"#,
        );
        assert_eq!(
            err,
            AppError::Backend {
                status: 400,
                message: "Invalid credentials".to_string()
            }
        );
    }

    #[test]
    fn details_used_when_message_missing_or_blank() {
        let err = backend_failure(422, r#"{"message":"  ","details":"price must be numeric"}"#);
        assert_eq!(err.message(), "price must be numeric");
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn falls_back_to_status_text() {
        let err = backend_failure(500, r#"{"error":"boom"}"#);
        assert_eq!(err.message(), "Request failed with status code 500");

        let err = backend_failure(502, "");
        assert_eq!(err.message(), "Request failed with status code 502");

        let err = backend_failure(503, "  Service Unavailable\n");
        assert_eq!(err.message(), "Service Unavailable");
    }

    #[test]
    fn long_messages_are_truncated() {
        let long = "x".repeat(500);
        let err = backend_failure(400, &json!({ "message": long }).to_string());
        assert_eq!(err.message().chars().count(), MAX_ERROR_CHARS);
    }

    #[test]
    fn success_body_is_verbatim() {
        assert_eq!(
            success_body(r#"{"success":true,"message":"deleted"}"#),
            json!({"success": true, "message": "deleted"})
        );
        assert_eq!(success_body(""), Value::Null);
        assert_eq!(success_body("ok"), json!("ok"));
    }

    #[test]
    fn explicit_success_false_is_detected() {
        assert!(reports_failure(&json!({"success": false, "message": "nope"})));
        assert!(!reports_failure(&json!({"success": true})));
        assert!(!reports_failure(&json!([1, 2])));
    }
}
