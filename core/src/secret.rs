//! Read-write API key with redacted output.

use std::fmt;

use serde::ser::Error as _;
use zeroize::Zeroize;

/// A read-write API key that never shows its value in logs or debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct RwApiKey {
    inner: String,
}

impl RwApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self { inner: key.into() }
    }

    /// The key itself, for the request header only.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for RwApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for RwApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Debug for RwApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RwApiKey([REDACTED])")
    }
}

impl fmt::Display for RwApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl Drop for RwApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Serializing the key would put it somewhere it was never meant to go.
impl serde::Serialize for RwApiKey {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(
            "RwApiKey cannot be serialized; use expose() for the request header",
        ))
    }
}
