//! Server response envelope
//!
//! Every backend response is a JSON object wrapping an arbitrary payload in
//! three well-known fields: `status` (1 means success), `message` (set on
//! failure) and `serverDate` (the server's current time, used for clock
//! correction). The payload itself is opaque to this layer.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::datetime::from_server_string;

/// `status` value the backend uses for success.
pub const STATUS_SUCCESS: i64 = 1;

/// The well-known fields of a server response.
///
/// Extracted from the full JSON value by [`Envelope::from_value`]; all
/// fields are optional and absence is decided by the caller. A `status`
/// that is missing or not an integer comes through as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Envelope {
    pub status: Option<i64>,
    pub message: Option<String>,
    pub server_date: Option<String>,
}

impl Envelope {
    /// Extract the envelope fields from a parsed JSON value.
    ///
    /// Fields are read independently: a wrong type in one does not discard
    /// the others. A missing or non-integer `status` comes through as
    /// `None` and is reported by the normalization layer.
    pub fn from_value(value: &Value) -> Self {
        Self {
            status: value.get("status").and_then(Value::as_i64),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
            server_date: value
                .get("serverDate")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Whether `status` marks this response as successful.
    pub fn is_success(&self) -> bool {
        self.status == Some(STATUS_SUCCESS)
    }

    /// The `serverDate` field parsed under the server wire format, if both
    /// present and well-formed.
    pub fn server_time(&self) -> Option<DateTime<Utc>> {
        self.server_date.as_deref().and_then(from_server_string)
    }
}
