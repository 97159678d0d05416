//! Read-write client for the board's message endpoint.
//!
//! # Design
//! `RwClient` carries no mutable state between calls. Each send is split into
//! a `build_*` method that produces an `HttpRequest`, the round-trip through
//! the configured `HttpExchange`, and `parse_send_message`, which consumes the
//! `HttpResponse`. The build and parse halves are pure and tested directly;
//! the `send_*` methods glue them to the transport under the caller's
//! cancellation token and the client's timeout.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::characters::valid_text;
use crate::config::ClientConfig;
use crate::error::{TransportError, VestaboardError};
use crate::http::{HttpExchange, HttpMethod, HttpRequest, HttpResponse};
use crate::secret::RwApiKey;
use crate::transport::{LoggingExchange, ReqwestExchange};
use crate::types::{MessageResponse, RwMessageResponse, TextMessage};

pub const RW_API_KEY_HEADER: &str = "X-Vestaboard-Read-Write-Key";

const ALLOWED_CONTENT_TYPES: [&str; 2] = ["text/plain", "application/json"];

/// Extra time the reqwest client gets past the client timeout, so a deadline
/// is always reported as `TimedOut`.
const TRANSPORT_TIMEOUT_MARGIN: Duration = Duration::from_secs(1);

/// Authenticated client allowed to change what the board displays.
///
/// Cheap to clone; clones share one transport.
#[derive(Clone)]
pub struct RwClient {
    api_key: RwApiKey,
    base_url: String,
    timeout: Duration,
    exchange: Arc<dyn HttpExchange>,
}

impl RwClient {
    /// Client for the public endpoint with the default 5 second timeout.
    pub fn new(api_key: impl Into<RwApiKey>) -> Result<Self, VestaboardError> {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, VestaboardError> {
        let exchange = ReqwestExchange::new(config.timeout + TRANSPORT_TIMEOUT_MARGIN)
            .map_err(VestaboardError::ClientBuild)?;
        Ok(Self::with_exchange(config, Arc::new(exchange)))
    }

    /// Client over a caller-supplied transport.
    pub fn with_exchange(config: ClientConfig, exchange: Arc<dyn HttpExchange>) -> Self {
        let exchange: Arc<dyn HttpExchange> = if config.dump_wire {
            Arc::new(LoggingExchange::new(exchange))
        } else {
            exchange
        };

        Self {
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            exchange,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the request that replaces the board with `layout`.
    pub fn build_send_layout<L>(&self, layout: &L) -> Result<HttpRequest, VestaboardError>
    where
        L: Serialize + ?Sized,
    {
        let body = serde_json::to_string(layout).map_err(VestaboardError::Encode)?;
        Ok(self.post(body))
    }

    /// Build the request that shows `text`. The text is upper-cased and
    /// validated first; invalid text never produces a request.
    ///
    /// Only ASCII letters change case, one character for one, so anything
    /// outside the board's set reaches `valid_text` unchanged.
    pub fn build_send_text(&self, text: &str) -> Result<HttpRequest, VestaboardError> {
        let text: String = text.chars().map(|c| c.to_ascii_uppercase()).collect();
        valid_text(&text, true)?;

        let body = serde_json::to_string(&TextMessage { text }).map_err(VestaboardError::Encode)?;
        Ok(self.post(body))
    }

    fn post(&self, body: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.base_url.clone(),
            headers: vec![
                ("Accept".to_string(), "text/plain".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
                (RW_API_KEY_HEADER.to_string(), self.api_key.expose().to_string()),
            ],
            body: Some(body),
        }
    }

    /// Validate and decode the response to a send.
    ///
    /// Checks run in order: content type, JSON envelope, then status, so a
    /// non-200 answer with a readable body is reported by its status code.
    pub fn parse_send_message(&self, response: HttpResponse) -> Result<MessageResponse, VestaboardError> {
        let method = HttpMethod::Post;
        let url = self.base_url.clone();
        let status = response.status;

        let content_type = response.header("content-type").unwrap_or_default();
        if !ALLOWED_CONTENT_TYPES
            .iter()
            .any(|allowed| content_type.starts_with(allowed))
        {
            return Err(VestaboardError::ContentType {
                method,
                url,
                status,
                content_type: content_type.to_string(),
                body: response.body_text(),
            });
        }

        let envelope: RwMessageResponse = match serde_json::from_slice(&response.body) {
            Ok(envelope) => envelope,
            Err(source) => {
                return Err(VestaboardError::Decode {
                    method,
                    url,
                    status,
                    source,
                    body: response.body_text(),
                })
            }
        };

        if status != 200 {
            return Err(VestaboardError::UnexpectedStatus {
                method,
                url,
                status,
            });
        }

        Ok(envelope.into())
    }

    /// Replace the whole board with `layout`.
    pub async fn send_layout<L>(
        &self,
        cancel: &CancellationToken,
        layout: &L,
    ) -> Result<MessageResponse, VestaboardError>
    where
        L: Serialize + ?Sized,
    {
        let request = self.build_send_layout(layout)?;
        self.dispatch(cancel, request).await
    }

    /// Show `text` on the board, upper-cased.
    pub async fn send_text(
        &self,
        cancel: &CancellationToken,
        text: &str,
    ) -> Result<MessageResponse, VestaboardError> {
        let request = self.build_send_text(text)?;
        self.dispatch(cancel, request).await
    }

    async fn dispatch(
        &self,
        cancel: &CancellationToken,
        request: HttpRequest,
    ) -> Result<MessageResponse, VestaboardError> {
        let method = request.method;
        let url = request.url.clone();

        if cancel.is_cancelled() {
            return Err(VestaboardError::Cancelled { method, url });
        }

        tracing::debug!(%method, %url, "sending message");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(%method, %url, "request cancelled");
                return Err(VestaboardError::Cancelled { method, url });
            }
            result = tokio::time::timeout(self.timeout, self.exchange.execute(request)) => result,
        };

        let response = match result {
            Err(_) => {
                tracing::warn!(%method, %url, timeout = ?self.timeout, "request timed out");
                return Err(VestaboardError::TimedOut {
                    method,
                    url,
                    timeout: self.timeout,
                });
            }
            Ok(Err(TransportError::Body { status, source })) => {
                tracing::warn!(%method, %url, status, "failed to read response body");
                return Err(VestaboardError::ReadBody {
                    method,
                    url,
                    status,
                    source,
                });
            }
            Ok(Err(source)) => {
                tracing::warn!(%method, %url, error = %source, "request failed");
                return Err(VestaboardError::Transport { method, url, source });
            }
            Ok(Ok(response)) => response,
        };

        let status = response.status;
        let parsed = self.parse_send_message(response);
        if let Err(err) = &parsed {
            tracing::warn!(%method, %url, status, error = %err, "message rejected");
        }
        parsed
    }
}

impl fmt::Debug for RwClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RwClient")
            .field("api_key", &self.api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
