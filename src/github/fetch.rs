// src/github/fetch.rs
// =============================================================================
// Resilient fetcher: GET a URL, decode the JSON body, retry on failure.
//
// - One attempt = one request. A transport failure, a non-2xx status or a body
//   that is not the expected JSON all count as a failed attempt.
// - After `max_attempts` consecutive failures the LAST error is returned to
//   the caller inside a NetworkError.
// - Every attempt emits a tracing event (attempt number + outcome). Failures
//   with attempts left are debug; only the attempt that exhausts the budget
//   is a warning.
//
// The actual HTTP call sits behind the `Transport` trait so the retry policy
// can be exercised without a network. `HttpTransport` is the reqwest version
// used by the CLI.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

// Status + body of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

// Why a single attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout, TLS...)
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status
    #[error("HTTP {}", .0.as_u16())]
    Status(StatusCode),
    /// The body was not the JSON we expected
    #[error("invalid response body: {0}")]
    Decode(String),
}

// The retry budget for one URL ran out
#[derive(Debug, Clone, Error)]
#[error("GET {url} failed after {attempts} attempt(s): {last_error}")]
pub struct NetworkError {
    pub url: String,
    pub attempts: u32,
    pub last_error: FetchError,
}

impl NetworkError {
    // Status code of the final attempt, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self.last_error {
            FetchError::Status(status) => Some(status),
            _ => None,
        }
    }
}

// The network boundary: one GET, no retries, no decoding
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

// reqwest-backed transport for the GitHub REST API
//
// The bearer token is optional and always supplied by the caller
// (flag or environment); requests go out anonymously without it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(token: Option<String>, timeout: Duration) -> reqwest::Result<Self> {
        // GitHub rejects requests without a User-Agent
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, token })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(describe_error)?;
        let status = response.status();
        let body = response.text().await.map_err(describe_error)?;

        Ok(RawResponse { status, body })
    }
}

// Turns a reqwest error into a short human-readable transport failure
fn describe_error(error: reqwest::Error) -> FetchError {
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else if error.is_body() || error.is_decode() {
        format!("could not read response body: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Transport(message)
}

// Retry policy wrapped around a Transport
#[derive(Debug, Clone)]
pub struct Fetcher<T> {
    transport: T,
    max_attempts: u32,
    retry_delay: Duration,
}

impl<T: Transport> Fetcher<T> {
    // A budget of 0 is treated as 1: every call makes at least one request
    pub fn new(transport: T, max_attempts: u32) -> Self {
        Self {
            transport,
            max_attempts: max_attempts.max(1),
            retry_delay: Duration::ZERO,
        }
    }

    // Pause between a failed attempt and the next one (none by default)
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // GETs `url` and decodes the body as `D`, retrying up to max_attempts times
    pub async fn fetch_json<D: DeserializeOwned>(&self, url: &str) -> Result<D, NetworkError> {
        let mut last_error = FetchError::Transport("no attempt made".to_string());

        for attempt in 1..=self.max_attempts {
            match self.attempt::<D>(url).await {
                Ok(value) => {
                    debug!(
                        url,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = "ok",
                        "fetch attempt"
                    );
                    return Ok(value);
                }
                Err(error) if attempt < self.max_attempts => {
                    debug!(
                        url,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = %error,
                        "fetch attempt failed, retrying"
                    );
                    last_error = error;

                    if !self.retry_delay.is_zero() {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(error) => {
                    warn!(
                        url,
                        attempt,
                        max_attempts = self.max_attempts,
                        outcome = %error,
                        "fetch attempt failed, giving up"
                    );
                    last_error = error;
                }
            }
        }

        Err(NetworkError {
            url: url.to_string(),
            attempts: self.max_attempts,
            last_error,
        })
    }

    async fn attempt<D: DeserializeOwned>(&self, url: &str) -> Result<D, FetchError> {
        let response = self.transport.get(url).await?;

        if !response.status.is_success() {
            return Err(FetchError::Status(response.status));
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Transport trait?
//    - The retry loop only needs "GET this URL, give me status + body"
//    - Putting that behind a trait lets tests plug in a fake server
//    - Production code uses HttpTransport (reqwest), tests use StubTransport
//
// 2. What does #[async_trait] do?
//    - Lets a trait declare `async fn` methods that work with dyn and Send
//    - Each call returns a boxed future under the hood
//
// 3. What is DeserializeOwned?
//    - A serde bound meaning "can be built from JSON without borrowing it"
//    - fetch_json::<TreeResponse>(...) and fetch_json::<BlobResponse>(...)
//      share the same retry code
//
// 4. Why keep only the LAST error?
//    - Earlier failures are already in the logs (debug! per retried attempt)
//    - The caller gets the one that finally made us give up
// -----------------------------------------------------------------------------
