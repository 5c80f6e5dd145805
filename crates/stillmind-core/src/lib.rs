//! # Stillmind Core
//!
//! Server response envelope, error taxonomy and date utilities for the
//! Stillmind backend API.
//!
//! This crate provides:
//! - The response envelope model (`status` / `message` / `serverDate`)
//! - Error codes with per-code default messages
//! - Fixed-format date parsing and formatting helpers (UTC)
//! - A shared handle for the last observed server time
//!
//! ## Example
//!
//! ```rust,ignore
//! use stillmind_core::{Envelope, from_server_string};
//!
//! let value: serde_json::Value = serde_json::from_str(body)?;
//! let envelope = Envelope::from_value(&value);
//!
//! if envelope.is_success() {
//!     // payload is the full JSON value, opaque to this layer
//! }
//! ```

pub mod clock;
pub mod datetime;
pub mod envelope;
pub mod error;

// Re-exports for convenience
pub use clock::*;
pub use datetime::*;
pub use envelope::*;
pub use error::*;
