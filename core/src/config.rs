//! Client configuration.

use std::time::Duration;

use crate::error::VestaboardError;
use crate::secret::RwApiKey;

pub const DEFAULT_BASE_URL: &str = "https://rw.vestaboard.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const ENV_API_KEY: &str = "VESTABOARD_RW_KEY";
pub const ENV_BASE_URL: &str = "VESTABOARD_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "VESTABOARD_TIMEOUT_SECS";
pub const ENV_DUMP_WIRE: &str = "VESTABOARD_DUMP_WIRE";

/// Settings fixed at `RwClient` construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: RwApiKey,
    pub base_url: String,
    pub timeout: Duration,
    /// Wrap the transport in `LoggingExchange`.
    pub dump_wire: bool,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<RwApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            dump_wire: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_dump_wire(mut self, dump_wire: bool) -> Self {
        self.dump_wire = dump_wire;
        self
    }

    /// Read the configuration from `VESTABOARD_*` environment variables.
    pub fn from_env() -> Result<Self, VestaboardError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable lookup. Only the API key is
    /// required; the other settings fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VestaboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| VestaboardError::Config(format!("{ENV_API_KEY} is not set")))?;

        let mut config = ClientConfig::new(api_key.trim());

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(VestaboardError::Config(format!(
                    "{ENV_BASE_URL} must be an http(s) URL, got {base_url:?}"
                )));
            }
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let seconds: u64 = raw.trim().parse().map_err(|_| {
                VestaboardError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {raw:?}"
                ))
            })?;
            if seconds == 0 {
                return Err(VestaboardError::Config(format!(
                    "{ENV_TIMEOUT_SECS} must be greater than zero"
                )));
            }
            config = config.with_timeout(Duration::from_secs(seconds));
        }

        if let Some(raw) = lookup(ENV_DUMP_WIRE) {
            config = config.with_dump_wire(parse_flag(&raw));
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
