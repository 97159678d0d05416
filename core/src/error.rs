//! Error types for the RW client.
//!
//! # Design
//! Every failure after the request leaves the client carries the method and
//! URL, and the status once one was received, so a failed call can be
//! diagnosed from its message alone. Wrapped causes stay reachable through
//! `std::error::Error::source`.

use std::time::Duration;

use thiserror::Error;

use crate::characters::ValidationError;
use crate::http::HttpMethod;

/// Errors returned by `RwClient`.
#[derive(Debug, Error)]
pub enum VestaboardError {
    /// Client configuration could not be assembled.
    #[error("configuration error: {0}")]
    Config(String),

    /// The HTTP client (TLS backend) could not be initialised.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The outgoing payload could not be serialized to JSON.
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The text was rejected before any request was made.
    #[error("invalid message: {0}")]
    InvalidText(#[from] ValidationError),

    /// The caller's cancellation token fired first.
    #[error("{method} {url}: request cancelled")]
    Cancelled { method: HttpMethod, url: String },

    /// The client's own timeout elapsed first.
    #[error("{method} {url}: request timed out after {timeout:?}")]
    TimedOut {
        method: HttpMethod,
        url: String,
        timeout: Duration,
    },

    /// DNS, TLS, connection or transport timeout failures.
    #[error("{method} {url}: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("{method} {url} - {status}: failed to read body: {source}")]
    ReadBody {
        method: HttpMethod,
        url: String,
        status: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(
        "{method} {url} - {status}: response content-type is not text/plain or application/json (got {content_type}): body: {body}"
    )]
    ContentType {
        method: HttpMethod,
        url: String,
        status: u16,
        content_type: String,
        body: String,
    },

    #[error("{method} {url} - {status}: failed to decode JSON response: {source}: body: {body}")]
    Decode {
        method: HttpMethod,
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The body decoded but the status was not 200.
    #[error("{method} {url}: unexpected status code: {status}")]
    UnexpectedStatus {
        method: HttpMethod,
        url: String,
        status: u16,
    },
}

impl VestaboardError {
    /// The HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            VestaboardError::ReadBody { status, .. }
            | VestaboardError::ContentType { status, .. }
            | VestaboardError::Decode { status, .. }
            | VestaboardError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors produced by an `HttpExchange`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Headers arrived but the body could not be read.
    #[error("failed to read body: {source}")]
    Body {
        status: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
