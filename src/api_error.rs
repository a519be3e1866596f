//! Error decoding for Xsolla API responses
//!
//! Every Xsolla endpoint reports failures with the same envelope:
//!
//! ```json
//! {"error":{"code":"003-003","description":"The username is already taken"}}
//! ```
//!
//! The decoder turns a completed request into an [`ApiError`] `(code, message)` pair,
//! falling back to the HTTP status when the body is not a well-formed envelope.
//!
//! # Examples
//!
//! ```
//! use xsolla_sdk::api_error::decode_error;
//!
//! let body = r#"{"error":{"code":"003-003","description":"The username is already taken"}}"#;
//! let error = decode_error(409, body).unwrap();
//! assert_eq!(error.code, "003-003");
//! assert_eq!(error.message, "The username is already taken");
//!
//! assert!(decode_error(200, "{}").is_none());
//! ```

use serde_json::Value;
use thiserror::Error;

/// Code reported when the request never produced a response
pub const NO_RESPONSE_CODE: &str = "204";

/// Message reported when the request never produced a response
pub const NO_RESPONSE_MESSAGE: &str = "No response";

const ERROR_FIELD: &str = "error";

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A failed Xsolla API call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Xsolla error code (e.g. `003-003`) or the stringified HTTP status
    pub code: String,

    /// Human readable description
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Transport failure: connection refused, timeout, or no response at all
    pub fn no_response() -> Self {
        Self::new(NO_RESPONSE_CODE, NO_RESPONSE_MESSAGE)
    }

    /// Generic failure carrying the HTTP status and the raw body
    pub fn invalid_response(status: u16, body: &str) -> Self {
        Self::new(
            status.to_string(),
            format!("Invalid response. code={} error={}", status, body),
        )
    }

    /// True if this error was produced by a transport failure
    pub fn is_no_response(&self) -> bool {
        self.code == NO_RESPONSE_CODE && self.message == NO_RESPONSE_MESSAGE
    }
}

/// Decode the outcome of a request
///
/// `None` as input means the transport failed before a response arrived.
/// Returns `None` when the request succeeded.
pub fn decode_outcome(response: Option<(u16, &str)>) -> Option<ApiError> {
    match response {
        Some((status, body)) => decode_error(status, body),
        None => Some(ApiError::no_response()),
    }
}

/// Decode a completed HTTP response
///
/// Returns `None` for any 2xx status. Otherwise:
/// - a well-formed envelope yields its `code` and `description`
/// - malformed JSON or a missing `error` object yields the HTTP status and
///   an "Invalid response" message that includes the raw body
/// - an envelope missing `code` or `description` falls back field by field
pub fn decode_error(status: u16, body: &str) -> Option<ApiError> {
    if (200..300).contains(&status) {
        return None;
    }

    let fallback = ApiError::invalid_response(status, body);

    let envelope: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return Some(fallback),
    };

    let Some(error) = envelope.get(ERROR_FIELD).and_then(Value::as_object) else {
        return Some(fallback);
    };

    let code = error
        .get("code")
        .and_then(field_as_string)
        .unwrap_or(fallback.code);
    let message = error
        .get("description")
        .and_then(field_as_string)
        .unwrap_or(fallback.message);

    Some(ApiError { code, message })
}

// Xsolla codes are strings, but some endpoints send plain numbers
fn field_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
