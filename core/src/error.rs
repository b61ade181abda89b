//! Error types for the GymHub API client.
//!
//! # Design
//! Every completed call either yields a decoded body or an `ApiError`. The
//! error has two tiers: with a `status_code` the server rejected the request,
//! without one the request never got a response. Transport failures are
//! folded into the second tier so no raw client error escapes the executor.
//!
//! `UnsupportedMethod` is a programmer error and is kept out of `ApiError`:
//! it is reported before any request exists.

use serde_json::Value;
use thiserror::Error;

use crate::presentation::{self, FieldError};

/// Message used when the server rejects a request without saying why.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";
pub const NETWORK_STATUS_TEXT: &str = "Network Error";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const INVALID_RESPONSE_STATUS_TEXT: &str = "Invalid Response";
pub const VALIDATION_STATUS: u16 = 422;

/// A failed network or API operation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Raw response body. `None` when no response was received.
    pub data: Option<Value>,
    pub status_text: String,
    /// HTTP status. `None` when no response was received.
    pub status_code: Option<u16>,
    pub message: String,
}

impl ApiError {
    /// Error for a non-2xx response. Prefers the body's `message` string.
    pub fn from_response(status: u16, status_text: &str, data: Value) -> Self {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();
        Self {
            data: Some(data),
            status_text: status_text.to_string(),
            status_code: Some(status),
            message,
        }
    }

    /// Error for a request that received no response.
    pub fn network() -> Self {
        Self {
            data: None,
            status_text: NETWORK_STATUS_TEXT.to_string(),
            status_code: None,
            message: NETWORK_MESSAGE.to_string(),
        }
    }

    /// A 2xx response whose body did not match the expected shape.
    pub fn invalid_response(status: u16, data: Value) -> Self {
        Self {
            data: Some(data),
            status_text: INVALID_RESPONSE_STATUS_TEXT.to_string(),
            status_code: Some(status),
            message: FALLBACK_MESSAGE.to_string(),
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.status_code.is_none()
    }

    pub fn is_validation_error(&self) -> bool {
        self.status_code == Some(VALIDATION_STATUS)
    }

    /// Per-field messages from the body's `errors` entry, in server order.
    /// Empty when there is no body or it carries no recognisable errors.
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.data
            .as_ref()
            .map(presentation::field_errors)
            .unwrap_or_default()
    }
}

impl From<TransportError> for ApiError {
    fn from(_: TransportError) -> Self {
        ApiError::network()
    }
}

/// The method string is not one of GET, POST, PUT, DELETE.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported HTTP method: {0:?}")]
pub struct UnsupportedMethod(pub String);

/// Failure of the string-method entry point `Executor::execute_str`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecuteError {
    #[error(transparent)]
    UnsupportedMethod(#[from] UnsupportedMethod),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A request that produced no HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else the HTTP client reports before a status line arrives.
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn response_error_uses_backend_message() {
        let err = ApiError::from_response(404, "Not Found", json!({"message": "Post not found"}));
        assert_eq!(err.status_code, Some(404));
        assert_eq!(err.status_text, "Not Found");
        assert_eq!(err.message, "Post not found");
        assert_eq!(err.data, Some(json!({"message": "Post not found"})));
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn response_error_falls_back_without_message() {
        let err = ApiError::from_response(500, "Internal Server Error", json!({"error": "boom"}));
        assert_eq!(err.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn non_string_message_falls_back() {
        let err = ApiError::from_response(400, "Bad Request", json!({"message": 7}));
        assert_eq!(err.message, FALLBACK_MESSAGE);
        let err = ApiError::from_response(400, "Bad Request", json!("plain text body"));
        assert_eq!(err.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::network();
        assert!(err.is_network_error());
        assert!(!err.is_validation_error());
        assert_eq!(err.data, None);
        assert_eq!(err.status_text, NETWORK_STATUS_TEXT);
        assert_eq!(err.message, NETWORK_MESSAGE);
    }

    #[test]
    fn every_transport_error_becomes_network_error() {
        let errors = [
            TransportError::Timeout,
            TransportError::Io(std::io::Error::from(std::io::ErrorKind::ConnectionRefused)),
            TransportError::Other("dns lookup failed".to_string()),
        ];
        for err in errors {
            assert_eq!(ApiError::from(err), ApiError::network());
        }
    }

    #[test]
    fn field_errors_read_the_body() {
        let err = ApiError::from_response(
            422,
            "Unprocessable Entity",
            json!({"errors": [{"field": "content", "message": "Content is required"}]}),
        );
        assert_eq!(
            err.field_errors(),
            vec![FieldError {
                field: Some("content".to_string()),
                message: "Content is required".to_string(),
            }]
        );
        assert!(ApiError::network().field_errors().is_empty());
        let err = ApiError::from_response(500, "Internal Server Error", json!("oops"));
        assert!(err.field_errors().is_empty());
    }

    #[test]
    fn validation_errors_are_422() {
        let err = ApiError::from_response(422, "Unprocessable Entity", json!({}));
        assert!(err.is_validation_error());
        assert!(!err.is_network_error());
    }
}
