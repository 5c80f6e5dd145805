//! Reqwest-based client for the Stillmind backend API

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::HttpError;
use crate::response::normalize;
use stillmind_core::{ErrorCode, ServerClock};

/// Default timeout for ordinary API requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default timeout for media downloads.
pub const DEFAULT_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(3600);

/// How request parameters are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamStyle {
    /// URL query string.
    #[default]
    Query,
    /// `application/x-www-form-urlencoded` body.
    Form,
}

/// Per-call parameters, headers and timeout override.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub style: ParamStyle,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn style(mut self, style: ParamStyle) -> Self {
        self.style = style;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Client for the Stillmind backend API.
///
/// Explicitly constructed and cheap to clone; owns the underlying reqwest
/// client, the API base URL and the [`ServerClock`] handle that every
/// normalized response stamps with the observed server time.
///
/// # Example
///
/// ```ignore
/// use stillmind_core::ServerClock;
/// use stillmind_http::ApiClient;
///
/// let client = ApiClient::new("https://api.stillmind.example", ServerClock::new())?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    clock: ServerClock,
}

impl ApiClient {
    /// Create a client with the backend's default request timeout.
    ///
    /// The base URL should not include a trailing slash. reqwest performs no
    /// response caching, matching the backend's expectation that every call
    /// hits the server.
    pub fn new(base_url: impl Into<String>, clock: ServerClock) -> Result<Self, HttpError> {
        let http = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(http, base_url, clock))
    }

    /// Create a client around a preconfigured reqwest client.
    pub fn with_client(http: Client, base_url: impl Into<String>, clock: ServerClock) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            clock,
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The clock-correction handle this client stamps.
    pub fn clock(&self) -> &ServerClock {
        &self.clock
    }

    fn endpoint(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    /// Build a request with the given options applied.
    ///
    /// The returned builder carries the per-call timeout (default 15 s); the
    /// future obtained from `send` is the in-flight handle, and dropping it
    /// cancels the request.
    pub fn build(&self, method: Method, path: &str, opts: &RequestOptions) -> RequestBuilder {
        let mut builder = self.http.request(method, self.endpoint(path));

        if !opts.params.is_empty() {
            builder = match opts.style {
                ParamStyle::Query => builder.query(&opts.params),
                ParamStyle::Form => builder.form(&opts.params),
            };
        }
        for (name, value) in &opts.headers {
            builder = builder.header(name, value);
        }

        builder.timeout(opts.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
    }

    /// Send a request and return the raw response.
    ///
    /// Escape hatch for callers that need the response itself; most callers
    /// want [`ApiClient::fetch`].
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        opts: &RequestOptions,
    ) -> Result<Response, HttpError> {
        debug!(%method, path, "dispatching request");
        let response = self.build(method, path, opts).send().await?;
        debug!(status = %response.status(), "response received");
        Ok(response)
    }

    /// Send a request and normalize the server's envelope.
    ///
    /// On success returns the full response JSON; on failure an error built
    /// from `default_code` and the envelope's `message`. See [`normalize`]
    /// for the exact rules, including the server-time side effect.
    pub async fn fetch(
        &self,
        method: Method,
        path: &str,
        opts: &RequestOptions,
        default_code: ErrorCode,
    ) -> Result<Value, HttpError> {
        debug!(%method, path, "dispatching request");
        let outcome = self.build(method, path, opts).send().await;
        normalize(outcome, default_code, &self.clock).await
    }

    /// Download a resource to `dest`, streaming the body to disk.
    ///
    /// Uses the 3600 s download timeout unless the options override it.
    /// Returns the number of bytes written.
    pub async fn download(
        &self,
        method: Method,
        path: &str,
        opts: &RequestOptions,
        dest: &Path,
    ) -> Result<u64, HttpError> {
        let timeout = opts.timeout.unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT);
        debug!(%method, path, dest = %dest.display(), "starting download");

        let mut response = self
            .build(method, path, opts)
            .timeout(timeout)
            .send()
            .await?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(written, "download complete");
        Ok(written)
    }
}
