//! Client for the Vestaboard read-write message endpoint.
//!
//! # Overview
//! `RwClient` posts either a full character grid (`send_layout`) or a line of
//! text (`send_text`) to the board's RW endpoint, authenticating with the
//! board's read-write key, and decodes the service's `{"status": ...}`
//! envelope into a `MessageResponse`.
//!
//! # Design
//! - Each send is `build_*` (pure, produces an `HttpRequest`), one round-trip
//!   through an `HttpExchange`, then `parse_send_message` (pure).
//! - The transport is a trait object so tests and callers can substitute
//!   their own; `ReqwestExchange` is the default and `LoggingExchange` adds a
//!   wire dump when `ClientConfig::dump_wire` is set.
//! - Calls take a `CancellationToken` and are also bounded by the client's
//!   timeout. Nothing is retried.
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use vestaboard_core::RwClient;
//!
//! # async fn run() -> Result<(), vestaboard_core::VestaboardError> {
//! let client = RwClient::new("my-rw-key")?;
//! let response = client.send_text(&CancellationToken::new(), "hello world").await?;
//! println!("{}", response.message.text);
//! # Ok(())
//! # }
//! ```

pub mod characters;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod secret;
pub mod transport;
pub mod types;

pub use characters::{char_code, valid_text, ValidationError, COLUMNS, MAX_TEXT_LENGTH, ROWS};
pub use client::{RwClient, RW_API_KEY_HEADER};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{TransportError, VestaboardError};
pub use http::{BoxFuture, HttpExchange, HttpMethod, HttpRequest, HttpResponse};
pub use secret::RwApiKey;
pub use transport::{LoggingExchange, ReqwestExchange, MAX_BODY_SIZE};
pub use types::{Layout, Message, MessageResponse, TextMessage};
