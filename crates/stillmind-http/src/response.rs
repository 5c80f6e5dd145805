//! Response normalization
//!
//! The backend signals success and failure through the envelope's `status`
//! field, not through HTTP status codes. [`normalize`] applies that
//! convention uniformly: transport failures pass through, everything else is
//! decided by the envelope.

use reqwest::Response;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::HttpError;
use stillmind_core::{Envelope, ErrorCode, ServerClock, STATUS_SUCCESS};

/// Turn a raw HTTP outcome into the response JSON or a structured error.
///
/// Rules, in order:
/// - A transport failure (no response body obtained) surfaces as
///   [`HttpError::Transport`]; the clock is not touched.
/// - A body that is not JSON, or whose `status` field is missing or not an
///   integer, surfaces as [`HttpError::Malformed`].
/// - A present-and-parseable `serverDate` updates `clock` regardless of the
///   `status` value — a business failure still carries valid server time.
/// - `status == 1` yields the full JSON value; any other integer yields an
///   error built from `default_code`, with the envelope's `message` when
///   present and the code's default message otherwise.
///
/// The HTTP status code is deliberately ignored; the envelope is the only
/// authority on success.
pub async fn normalize(
    outcome: Result<Response, reqwest::Error>,
    default_code: ErrorCode,
    clock: &ServerClock,
) -> Result<Value, HttpError> {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "transport failure");
            return Err(HttpError::Transport(err));
        }
    };

    let http_status = response.status();
    let body = response.bytes().await.map_err(HttpError::Transport)?;

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(err) => {
            warn!(%http_status, error = %err, "response body is not JSON");
            return Err(HttpError::Malformed(format!("invalid JSON: {err}")));
        }
    };

    let envelope = Envelope::from_value(&value);
    if let Some(t) = envelope.server_time() {
        clock.observe(t);
    }

    match envelope.status {
        Some(STATUS_SUCCESS) => Ok(value),
        Some(status) => {
            debug!(status, "server reported failure");
            Err(default_code.into_error(envelope.message).into())
        }
        None => {
            warn!(%http_status, "envelope has no integer status field");
            Err(HttpError::Malformed(
                "missing or non-integer status field".to_string(),
            ))
        }
    }
}
