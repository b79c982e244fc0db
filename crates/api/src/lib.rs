//! OpenAI-compatible API client utilities.
//!
//! This crate provides the pieces the doctor needs to confirm that a
//! configured endpoint answers:
//!
//! - Loading `OPENAI_API_KEY` / `OPENAI_API_BASE` into an immutable
//!   [`ApiCredentials`] value without mutating the process environment
//! - Validating `OPENAI_API_BASE` before any request is built
//! - Issuing a single bearer-authenticated `GET <base>/models` bounded by a
//!   timeout and folding every result into one [`ProbeOutcome`]
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use codex_doctor_api::{OpenAiClient, ProbeOutcome};
//!
//! # async fn run() -> Result<(), codex_doctor_api::ProbeError> {
//! let client = OpenAiClient::new("https://api.example.com/v1", "sk-test")?;
//! match client.probe_models(Duration::from_secs(5)).await {
//!     ProbeOutcome::Reached(status) => println!("status: {status}"),
//!     ProbeOutcome::Unreachable(message) => println!("unreachable: {message}"),
//!     ProbeOutcome::TimedOut => println!("timed out"),
//! }
//! # Ok(())
//! # }
//! ```

mod credentials;

use std::env;
use std::error::Error as StdError;
use std::time::Duration;

use codex_doctor_util::redact_sensitive;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use thiserror::Error;
use tracing::{debug, warn};

pub use credentials::{API_BASE_VAR, API_KEY_VAR, ApiCredentials, CredentialsError};

/// Timeout applied to the endpoint probe when the caller does not override it.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Path probed below the configured base URL.
pub const MODELS_PATH: &str = "models";

/// Errors raised while preparing a client. Request failures are never
/// surfaced as errors; they become a [`ProbeOutcome`].
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid OPENAI_API_BASE URL '{base}': {reason}")]
    InvalidBaseUrl { base: String, reason: String },

    #[error("OPENAI_API_KEY contains characters that are not valid in an HTTP header")]
    InvalidApiKey,

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result of probing the endpoint. Exactly one variant per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A response arrived; the status may or may not be 200.
    Reached(StatusCode),
    /// The request failed before any response was received.
    Unreachable(String),
    /// No response arrived within the timeout and the request was dropped.
    TimedOut,
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for an
/// OpenAI-compatible API.
///
/// Default headers carry the bearer token and JSON content type; requests
/// are resolved below the validated base URL.
pub struct OpenAiClient {
    pub base_url: Url,
    pub http: Client,
    pub user_agent: String,
}

impl OpenAiClient {
    /// Construct a client for `api_base` authenticated with `api_key`.
    pub fn new(api_base: &str, api_key: &str) -> Result<Self, ProbeError> {
        let base_url = validate_base_url(api_base)?;

        let mut default_headers = header::HeaderMap::new();
        let authorization_header_value = format!("Bearer {}", api_key);
        let mut authorization =
            header::HeaderValue::from_str(&authorization_header_value).map_err(|_| ProbeError::InvalidApiKey)?;
        authorization.set_sensitive(true);
        default_headers.insert(header::AUTHORIZATION, authorization);
        default_headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static("application/json"));

        let http = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("codex-doctor/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Resolve an API-relative path below the base URL.
    ///
    /// The base path is kept, so `https://host/v1` and `https://host/v1/`
    /// both resolve `models` to `https://host/v1/models`.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(%url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// Send `GET <base>/models` and wait at most `timeout` for a response.
    ///
    /// Dropping the send future on expiry aborts the in-flight request.
    pub async fn probe_models(&self, timeout: Duration) -> ProbeOutcome {
        let request = self.request(Method::GET, MODELS_PATH);
        match tokio::time::timeout(timeout, request.send()).await {
            Err(_) => {
                warn!(timeout_ms = timeout.as_millis() as u64, "endpoint probe timed out");
                ProbeOutcome::TimedOut
            }
            Ok(Err(error)) if error.is_timeout() => ProbeOutcome::TimedOut,
            Ok(Err(error)) => {
                let message = describe_error(&error);
                warn!(error = %redact_sensitive(&message), "endpoint probe failed");
                ProbeOutcome::Unreachable(message)
            }
            Ok(Ok(response)) => {
                debug!(status = %response.status(), "endpoint probe answered");
                ProbeOutcome::Reached(response.status())
            }
        }
    }
}

/// Probe the models endpoint for a base URL and key.
///
/// Client construction failures (bad URL, unusable key) are reported as
/// [`ProbeOutcome::Unreachable`] since no request could be sent.
pub async fn probe_models(api_base: &str, api_key: &str, timeout: Duration) -> ProbeOutcome {
    match OpenAiClient::new(api_base, api_key) {
        Ok(client) => client.probe_models(timeout).await,
        Err(error) => ProbeOutcome::Unreachable(error.to_string()),
    }
}

/// Validate that a base URL is usable for the probe.
///
/// Rules:
/// - it must parse as an absolute URL
/// - the scheme must be `http` or `https`
/// - it must include a host
fn validate_base_url(base: &str) -> Result<Url, ProbeError> {
    let invalid = |reason: String| ProbeError::InvalidBaseUrl {
        base: base.to_string(),
        reason,
    };
    let parsed_base_url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(parsed_base_url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed_base_url.scheme())));
    }
    if parsed_base_url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed_base_url)
}

/// Flatten an error and its sources into one line.
fn describe_error(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
