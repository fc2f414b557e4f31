//! Network transport for request envelopes.

use std::fmt;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use thiserror::Error;

/// Default request timeout for API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
/// Header naming the security context; the service rejects requests without it.
const SECURITY_CONTEXT_HEADER: &str = "X-Replicon-Security-Context";
const SECURITY_CONTEXT: &str = "User";

/// Transport-level failures. The server was never reached or never answered.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The supplied credentials were unusable.
    #[error("invalid credentials: {reason}")]
    InvalidCredentials { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// Failed to start the runtime driving the HTTP client.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A raw HTTP answer, before any protocol interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Sends one serialized envelope and returns the raw answer.
pub trait Transport {
    fn post(&self, body: &str) -> Result<RawResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<RawResponse, TransportError>,
{
    fn post(&self, body: &str) -> Result<RawResponse, TransportError> {
        self(body)
    }
}

/// HTTP basic-auth credentials.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Blocking HTTPS transport.
///
/// Each call blocks the current thread on a single POST; there is no retry.
pub struct HttpTransport {
    http: reqwest::Client,
    runtime: tokio::runtime::Runtime,
    endpoint: String,
    credentials: Credentials,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the username or password is blank, or if the HTTP
    /// client or its runtime fails to build.
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        if credentials.username.trim().is_empty() {
            return Err(TransportError::InvalidCredentials {
                reason: "username cannot be empty",
            });
        }
        if credentials.password.is_empty() {
            return Err(TransportError::InvalidCredentials {
                reason: "password cannot be empty",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::ClientBuild)?;
        Self::with_client(http, endpoint.into(), credentials)
    }

    fn with_client(
        http: reqwest::Client,
        endpoint: String,
        credentials: Credentials,
    ) -> Result<Self, TransportError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(TransportError::Runtime)?;

        Ok(Self {
            http,
            runtime,
            endpoint,
            credentials,
        })
    }
}

impl Transport for HttpTransport {
    fn post(&self, body: &str) -> Result<RawResponse, TransportError> {
        self.runtime.block_on(async {
            let response = self
                .http
                .post(&self.endpoint)
                .basic_auth(&self.credentials.username, Some(&self.credentials.password))
                .header(SECURITY_CONTEXT_HEADER, SECURITY_CONTEXT)
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string())
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, TransportError>(RawResponse { status, body })
        })
    }
}
