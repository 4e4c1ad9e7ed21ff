// crates/serverest-harness/src/transport.rs
// ============================================================================
// Module: API Transport
// Description: Normalized HTTP exchange primitive for the store API.
// Purpose: Issue requests with optional credentials, never raising on non-2xx.
// Dependencies: reqwest, serde, serde_json, tokio, url
// ============================================================================

//! ## Overview
//! The transport issues exactly one logical HTTP exchange per command and
//! returns a normalized `{status, body}` descriptor regardless of status
//! class; failure classification belongs to the response oracle, not the
//! transport. Only network-level failures (after bounded retries of
//! transient send errors) surface as [`TransportError`]. Failures that may
//! have reached the server are retried only for safe read methods, keeping
//! write capabilities at exactly one remote state mutation.
//!
//! A credential is attached verbatim as the `Authorization` header only when
//! present. An absent credential produces a request with no header at all,
//! which is a distinct test condition from an empty-string header.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::time::sleep;
use url::Url;

use crate::model::Credential;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum attempts for transient HTTP send failures.
const MAX_HTTP_SEND_ATTEMPTS: u32 = 3;
/// Base backoff delay for transient HTTP send retries.
const BASE_HTTP_SEND_RETRY_DELAY_MS: u64 = 50;

// ============================================================================
// SECTION: Request & Response Descriptors
// ============================================================================

/// One logical request against the remote API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method fixed by the capability.
    pub method: Method,
    /// Resource path relative to the base URL.
    pub path: String,
    /// Query parameters as ordered pairs.
    pub query: Vec<(String, String)>,
    /// Optional JSON body for write capabilities.
    pub body: Option<Value>,
    /// Optional credential; `None` omits the `Authorization` header entirely.
    pub credential: Option<Credential>,
}

impl ApiRequest {
    /// Builds a request for the given method and path.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            credential: None,
        }
    }

    /// Attaches a serializable JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Body`] when serialization fails.
    pub fn with_body<T: Serialize>(mut self, body: &T) -> Result<Self, TransportError> {
        let value = serde_json::to_value(body)
            .map_err(|err| TransportError::Body(err.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: &str, value: &str) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Attaches an optional credential.
    #[must_use]
    pub fn with_credential(mut self, credential: Option<&Credential>) -> Self {
        self.credential = credential.cloned();
        self
    }
}

/// Normalized response descriptor: status plus parsed JSON body.
///
/// # Invariants
/// - Present for every completed exchange, 2xx or not.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body; raw text is wrapped in a JSON string when the body
    /// is not valid JSON, and an empty body becomes `null`.
    pub body: Value,
}

impl ApiResponse {
    /// Returns true for any 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a top-level string field from the body, when present.
    #[must_use]
    pub fn body_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    /// Returns the remote identifier (`_id`) from the body, when present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.body_str("_id")
    }

    /// Decodes the body into a typed view.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error when the body does not match.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body.clone())
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {} body {}", self.status.as_u16(), self.body)
    }
}

// ============================================================================
// SECTION: Transcript
// ============================================================================

/// One captured exchange for post-mortem diagnosis.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    /// 1-based exchange sequence number.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Resource path.
    pub path: String,
    /// Response status, absent when the exchange never completed.
    pub status: Option<u16>,
    /// Request body as sent.
    pub request: Value,
    /// Response body as received.
    pub response: Value,
    /// Transport-level error, when the exchange failed.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level failures; infrastructure, never test verdicts.
///
/// # Invariants
/// - Variants are stable for failure classification.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured base URL could not be parsed.
    #[error("invalid base url '{url}': {reason}")]
    BaseUrl {
        /// The rejected URL text.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(String),
    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Body(String),
    /// The credential could not be encoded as a header value.
    #[error("credential is not a valid header value: {0}")]
    CredentialHeader(String),
    /// The request could not complete after bounded retries.
    #[error("http request to {path} failed after {attempts} attempt(s): {reason}")]
    Send {
        /// Resource path of the failed exchange.
        path: String,
        /// Number of attempts made.
        attempts: u32,
        /// Final network diagnostic.
        reason: String,
    },
}

// ============================================================================
// SECTION: Transport
// ============================================================================

/// HTTP transport bound to one base URL, with transcript capture.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    /// Parsed base URL of the API under test.
    base_url: Url,
    /// Shared reqwest client.
    client: Client,
    /// Captured exchanges in issue order.
    transcript: Arc<Mutex<Vec<TranscriptEntry>>>,
}

impl ApiTransport {
    /// Creates a transport for the given base URL and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the URL is invalid or the client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url).map_err(|err| TransportError::BaseUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))?;
        Ok(Self {
            base_url,
            client,
            transcript: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Returns the base URL the transport is bound to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of the captured exchanges.
    #[must_use]
    pub fn transcript(&self) -> Vec<TranscriptEntry> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Issues one request and returns the normalized response descriptor.
    ///
    /// Non-2xx statuses are values, not errors. Transient send failures are
    /// retried with bounded linear backoff before the exchange is reported
    /// as an infrastructure failure; only connect failures, which never
    /// reached the server, are retried for write methods.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the request cannot complete.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.base_url.join(&request.path).map_err(|err| TransportError::BaseUrl {
            url: request.path.clone(),
            reason: err.to_string(),
        })?;
        let credential_header = request
            .credential
            .as_ref()
            .map(|credential| {
                HeaderValue::from_str(credential.as_str())
                    .map_err(|err| TransportError::CredentialHeader(err.to_string()))
            })
            .transpose()?;

        for attempt in 1..=MAX_HTTP_SEND_ATTEMPTS {
            let mut builder = self.client.request(request.method.clone(), url.clone());
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
            if let Some(header) = &credential_header {
                builder = builder.header(AUTHORIZATION, header.clone());
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(err) => {
                    if should_retry_http_send(&err, attempt, &request.method) {
                        sleep(retry_delay_for_attempt(attempt)).await;
                        continue;
                    }
                    let reason = err.to_string();
                    self.record(&request, None, Value::Null, Some(reason.clone()));
                    return Err(TransportError::Send {
                        path: request.path.clone(),
                        attempts: attempt,
                        reason,
                    });
                }
            };

            let status = response.status();
            let text = match response.text().await {
                Ok(text) => text,
                Err(err) => {
                    let reason = format!("failed to read response body: {err}");
                    self.record(&request, Some(status), Value::Null, Some(reason.clone()));
                    return Err(TransportError::Send {
                        path: request.path.clone(),
                        attempts: attempt,
                        reason,
                    });
                }
            };
            let body = parse_body(&text);
            self.record(&request, Some(status), body.clone(), None);
            return Ok(ApiResponse {
                status,
                body,
            });
        }

        Err(TransportError::Send {
            path: request.path,
            attempts: MAX_HTTP_SEND_ATTEMPTS,
            reason: "exhausted retry attempts".to_string(),
        })
    }

    /// Appends one exchange to the transcript.
    fn record(
        &self,
        request: &ApiRequest,
        status: Option<StatusCode>,
        response: Value,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(TranscriptEntry {
            sequence,
            method: request.method.to_string(),
            path: request.path.clone(),
            status: status.map(|code| code.as_u16()),
            request: request.body.clone().unwrap_or(Value::Null),
            response,
            error,
        });
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a response body, wrapping non-JSON text and mapping empty to null.
fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Returns true when an HTTP send failure should be retried.
///
/// Connect failures never reached the server and retry for any method. A
/// timeout or a mid-flight connection drop may fire after a write already
/// landed, so those retry only for safe methods; write capabilities perform
/// exactly one remote state mutation.
fn should_retry_http_send(err: &reqwest::Error, attempt: u32, method: &Method) -> bool {
    if attempt >= MAX_HTTP_SEND_ATTEMPTS {
        return false;
    }
    if err.is_connect() {
        return true;
    }
    if !method_is_safe(method) {
        return false;
    }
    if err.is_timeout() {
        return true;
    }
    if !err.is_request() {
        return false;
    }
    let msg = err.to_string().to_ascii_lowercase();
    msg.contains("connection reset")
        || msg.contains("connection refused")
        || msg.contains("connection closed")
        || msg.contains("broken pipe")
        || msg.contains("connection aborted")
        || msg.contains("timed out")
        || msg.contains("eof")
}

/// Returns true for methods without remote state mutation.
fn method_is_safe(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// Returns bounded linear backoff for HTTP send retries.
fn retry_delay_for_attempt(attempt: u32) -> Duration {
    Duration::from_millis(u64::from(attempt) * BASE_HTTP_SEND_RETRY_DELAY_MS)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
