//! Gateway error types and the message shown to users on failed sign-in.
//!
//! ERROR HANDLING
//! ==============
//! The server's error body has no fixed schema. The message is taken, in
//! order, from a truthy `message` field, a string `error` field, or the values
//! of an `error` field-error map joined with `", "`; anything else gets the
//! generic message.

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

use serde_json::Value;
use thiserror::Error;

use super::http::{TransportError, UNAUTHORIZED};

pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(UNAUTHORIZED)
    }
}

/// Failed `login`/`register`; `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn generic() -> Self {
        Self { message: GENERIC_ERROR_MESSAGE.to_owned() }
    }
}

impl From<&ApiError> for AuthError {
    fn from(err: &ApiError) -> Self {
        Self { message: error_message(err) }
    }
}

/// Human-readable message for a failed API call.
pub fn error_message(err: &ApiError) -> String {
    let extracted = match err {
        ApiError::Status { body, .. } => message_from_body(body),
        _ => None,
    };
    extracted.unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned())
}

fn message_from_body(body: &str) -> Option<String> {
    let Ok(Value::Object(data)) = serde_json::from_str::<Value>(body) else {
        return None;
    };

    if let Some(message) = data.get("message").filter(|v| is_truthy(v)) {
        return Some(display_value(message));
    }

    match data.get("error")? {
        Value::String(error) => Some(error.clone()),
        Value::Object(fields) => Some(join_values(fields.values())),
        Value::Array(items) => Some(join_values(items.iter())),
        _ => None,
    }
}

fn join_values<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values.map(display_value).collect::<Vec<_>>().join(", ")
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerces a JSON value to text the way a browser stringifies it: arrays join
/// their items with `,` and objects collapse to `[object Object]`.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}
