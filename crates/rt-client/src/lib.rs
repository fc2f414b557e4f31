//! Replicon remote API client.
//!
//! Sends batches of actions inside `BeginSession`/`EndSession` envelopes and
//! interprets the server's `Status`/`Value` response convention:
//! - [`SessionExecutor`] performs one round trip per call
//! - [`Replicon`] resolves and holds the client and user identities
//! - [`Transport`] is the network seam, implemented by [`HttpTransport`]

mod executor;
mod session;
mod transport;

use thiserror::Error;

pub use executor::{Response, SessionExecutor};
pub use session::Replicon;
pub use transport::{
    Credentials, DEFAULT_TIMEOUT, HttpTransport, RawResponse, Transport, TransportError,
};

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered but reported failure.
    #[error("{message}\nrequest: {request}\nresponse: {response}")]
    Protocol {
        message: String,
        status: u16,
        request: String,
        response: String,
    },
    /// The server answered with something other than JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A named entity was absent from a query result.
    #[error("{kind} not found: {name}")]
    LookupNotFound { kind: &'static str, name: String },
    /// A required input was missing.
    #[error("missing {0}")]
    Configuration(&'static str),
    /// Failed to serialize the request envelope.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}
