//! Turn an `ApiError` into something a screen can show.
//!
//! A 422 response carrying field-level failures becomes one line per
//! failure. Anything else becomes a single generic line.

use serde_json::Value;

use crate::error::ApiError;

pub const VALIDATION_TITLE: &str = "Validation Error";
pub const ERROR_TITLE: &str = "Error";

/// A user-facing error notification (toast or alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub messages: Vec<String>,
}

/// One failed field from a validation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

/// Build the notification for `error`. `default_message` is used when the
/// error carries an empty message.
pub fn present_error(error: &ApiError, default_message: &str) -> Notification {
    if error.is_validation_error() {
        let fields = error.field_errors();
        if !fields.is_empty() {
            return Notification {
                title: VALIDATION_TITLE.to_string(),
                messages: fields.into_iter().map(|f| f.message).collect(),
            };
        }
    }
    let message = if error.message.trim().is_empty() {
        default_message
    } else {
        error.message.as_str()
    };
    Notification {
        title: ERROR_TITLE.to_string(),
        messages: vec![message.to_string()],
    }
}

/// Extract field failures from a validation body.
///
/// Two shapes are understood:
/// `{"errors": [{"field": "email", "message": "taken"}]}` (also `msg`), and
/// `{"errors": {"email": ["taken", ...]}}`.
pub fn field_errors(data: &Value) -> Vec<FieldError> {
    match data.get("errors") {
        Some(Value::Array(items)) => items.iter().filter_map(list_entry).collect(),
        Some(Value::Object(fields)) => fields
            .iter()
            .flat_map(|(field, messages)| {
                messages_of(messages).into_iter().map(|message| FieldError {
                    field: Some(field.clone()),
                    message,
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn list_entry(item: &Value) -> Option<FieldError> {
    if let Value::String(message) = item {
        return Some(FieldError {
            field: None,
            message: message.clone(),
        });
    }
    let message = item
        .get("message")
        .or_else(|| item.get("msg"))
        .and_then(Value::as_str)?;
    let field = item
        .get("field")
        .or_else(|| item.get("path"))
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(FieldError {
        field,
        message: message.to_string(),
    })
}

fn messages_of(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
