//! `HttpExchange` implementations.
//!
//! `ReqwestExchange` talks to the network and bounds how much of a response
//! body it will buffer. `LoggingExchange` wraps any exchange and dumps each
//! round-trip through `tracing`; the client stacks it on top of the real
//! transport when `ClientConfig::dump_wire` is set.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use crate::client::RW_API_KEY_HEADER;
use crate::error::TransportError;
use crate::http::{BoxFuture, HttpExchange, HttpMethod, HttpRequest, HttpResponse};

/// Upper bound on buffered response bytes. Anything past it is dropped.
pub const MAX_BODY_SIZE: usize = 2_000_000;

const WIRE_TARGET: &str = "vestaboard_core::wire";

/// Network transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: reqwest::Client,
    max_body_size: usize,
}

impl ReqwestExchange {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    /// Use a preconfigured client, e.g. one with a custom root store.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            max_body_size: MAX_BODY_SIZE,
        }
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let mut response = builder.send().await.map_err(TransportError::Request)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let body = read_capped(&mut response, self.max_body_size)
            .await
            .map_err(|source| TransportError::Body {
                status,
                source: Box::new(source),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl HttpExchange for ReqwestExchange {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(self.round_trip(request))
    }
}

/// Read at most `limit` bytes of the body, chunk by chunk.
async fn read_capped(response: &mut reqwest::Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = limit - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            if chunk.len() > remaining {
                tracing::warn!(limit, "response body truncated");
            }
            break;
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Decorator that dumps every request and response it forwards.
pub struct LoggingExchange {
    inner: Arc<dyn HttpExchange>,
}

impl LoggingExchange {
    pub fn new(inner: Arc<dyn HttpExchange>) -> Self {
        Self { inner }
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request_dump = dump_request(&request);
        let result = self.inner.execute(request).await;
        match &result {
            Ok(response) => {
                tracing::info!(target: WIRE_TARGET, "{request_dump}\n{}", dump_response(response));
            }
            Err(err) => {
                tracing::info!(target: WIRE_TARGET, "{request_dump}\n<no response: {err}>");
            }
        }
        result
    }
}

impl HttpExchange for LoggingExchange {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(self.round_trip(request))
    }
}

/// Render a request roughly as it goes on the wire, with the API key masked.
pub fn dump_request(request: &HttpRequest) -> String {
    let mut out = format!("{} {}\n", request.method, request.url);
    for (name, value) in &request.headers {
        let value = if name.eq_ignore_ascii_case(RW_API_KEY_HEADER) {
            "[REDACTED]"
        } else {
            value.as_str()
        };
        let _ = writeln!(out, "{name}: {value}");
    }
    out.push('\n');
    if let Some(body) = &request.body {
        out.push_str(body);
        out.push('\n');
    }
    out
}

pub fn dump_response(response: &HttpResponse) -> String {
    let mut out = format!("HTTP {}\n", response.status);
    for (name, value) in &response.headers {
        let _ = writeln!(out, "{name}: {value}");
    }
    out.push('\n');
    out.push_str(&response.body_text());
    out
}
