//! Error codes and the business error type for the Stillmind API
//!
//! The backend reports failures through the response envelope, not through
//! HTTP status codes. Each failure surfaces here as an [`ApiError`] carrying
//! one of the well-known [`ErrorCode`]s and a human-readable message.

use serde_json::{Map, Value};
use thiserror::Error;

/// Domain tag carried by every business error, kept compatible with the
/// error surface the mobile clients already consume.
pub const ERROR_DOMAIN: &str = "CMNetworkUtils";

/// Well-known error codes for API operations.
///
/// Each code has a numeric value understood by the backend and a default
/// message used when the server response carries none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Cancelled,
    General,
    SignUpFail,
    LogInFail,
    FacebookUserDataMissing,
    DeviceTokenMissing,
}

impl ErrorCode {
    /// Numeric value of this code on the wire.
    pub fn value(self) -> i32 {
        match self {
            ErrorCode::Cancelled => -10_000,
            ErrorCode::General => 10_000,
            ErrorCode::SignUpFail => 10_001,
            ErrorCode::LogInFail => 10_002,
            ErrorCode::FacebookUserDataMissing => 10_003,
            ErrorCode::DeviceTokenMissing => 10_004,
        }
    }

    /// Message used when the server provides none.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::Cancelled => "Cancelled",
            ErrorCode::General => "Failed to process",
            ErrorCode::SignUpFail => "Failed to sign up",
            ErrorCode::LogInFail => "Failed to sign in",
            ErrorCode::FacebookUserDataMissing => "User data missing",
            ErrorCode::DeviceTokenMissing => "Device token missing",
        }
    }

    /// Build an [`ApiError`] from this code, preferring the caller-supplied
    /// message over the code's default.
    pub fn into_error(self, message: Option<String>) -> ApiError {
        ApiError {
            code: self,
            message: message.unwrap_or_else(|| self.default_message().to_string()),
            info: None,
        }
    }
}

/// Business error reported by the backend.
///
/// Constructed on demand from a failure envelope, never persisted and never
/// retried. `info` carries optional structured details for the caller.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{} {}: {}", ERROR_DOMAIN, .code.value(), .message)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    pub info: Option<Map<String, Value>>,
}

impl ApiError {
    /// Attach structured details to this error.
    pub fn with_info(mut self, info: Map<String, Value>) -> Self {
        self.info = Some(info);
        self
    }
}
