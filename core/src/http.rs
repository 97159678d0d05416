//! HTTP exchange types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `RwClient` builds an `HttpRequest`,
//! hands it to an `HttpExchange`, and parses the returned `HttpResponse`. The
//! exchange is the only piece that touches the network, so tests can swap in
//! an in-memory double and wrappers such as the wire dump can be stacked on
//! top of the real transport.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::TransportError;

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// HTTP method for a request. The RW endpoint only accepts writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `RwClient::build_*` methods. Note that `headers` carries the API
/// key in clear text; use `crate::transport::dump_request` for anything that
/// ends up in a log.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method.as_str())
            .field("url", &self.url)
            .field("headers", &self.headers.len())
            .field("body", &self.body)
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// `body` holds at most `MAX_BODY_SIZE` bytes when produced by
/// `ReqwestExchange`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Something that can execute one HTTP round-trip.
///
/// Implementations must be safe to share between concurrent calls; the client
/// keeps a single exchange behind an `Arc`.
pub trait HttpExchange: Send + Sync {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>>;
}
