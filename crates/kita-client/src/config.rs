//! Client configuration.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the import endpoints below the base URL.
const IMPORT_PATH: &str = "children/import";

/// Connection settings for the import backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `https://kita.example.org/api`.
    pub base_url: String,
    pub timeout: Duration,
    /// Bearer token sent with every request.
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Checks that the base URL is an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        let has_host = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .is_some_and(|rest| !rest.trim_matches('/').is_empty());
        if has_host {
            Ok(())
        } else {
            Err(ClientError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// URL of one import operation (`parse`, `preview` or `execute`).
    pub fn endpoint(&self, operation: &str) -> String {
        format!(
            "{}/{IMPORT_PATH}/{operation}",
            self.base_url.trim().trim_end_matches('/')
        )
    }
}
