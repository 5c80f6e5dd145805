//! # Stillmind HTTP
//!
//! HTTP client layer for the Stillmind backend API.
//!
//! This crate provides:
//! - [`ApiClient`], an explicitly constructed reqwest-based client with the
//!   backend's default timeouts and parameter encodings
//! - [`normalize`], which turns a raw HTTP outcome into either the response
//!   JSON or a structured error, recording the server time as a side effect
//! - Streamed downloads with their own, much longer default timeout
//!
//! ## Example
//!
//! ```ignore
//! use reqwest::Method;
//! use stillmind_core::{ErrorCode, ServerClock};
//! use stillmind_http::{ApiClient, RequestOptions};
//!
//! let clock = ServerClock::new();
//! let client = ApiClient::new("https://api.stillmind.example", clock.clone())?;
//!
//! let opts = RequestOptions::default().param("userId", "42");
//! let data = client
//!     .fetch(Method::GET, "/v1/sessions", &opts, ErrorCode::General)
//!     .await?;
//!
//! // every response stamped the last observed server time
//! let server_time = clock.last_observed();
//! ```

mod client;
mod error;
mod response;

pub use client::{ApiClient, ParamStyle, RequestOptions, DEFAULT_DOWNLOAD_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use error::HttpError;
pub use response::normalize;
