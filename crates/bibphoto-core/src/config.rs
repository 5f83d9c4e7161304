//! Client configuration.
//!
//! One object covers every deployment of the page: whether the API lives on
//! the page's own origin or elsewhere, whether the bib lookup is gated by a
//! CAPTCHA, and how large a face payload may be.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compress::{CompressionSettings, DEFAULT_MAX_BYTES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid client configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("Maximum payload size must be positive")]
    ZeroPayloadLimit,
}

/// Settings the page passes in at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ClientConfig {
    /// API origin without a trailing slash. Empty means same origin, with
    /// endpoints requested as absolute paths.
    pub base_url: String,
    /// Require a CAPTCHA token on the bib lookup.
    pub captcha_enabled: bool,
    /// Byte ceiling for each face payload.
    pub max_payload_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            captcha_enabled: true,
            max_payload_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl ClientConfig {
    /// Configuration for an API served from the page's own origin,
    /// e.g. `for_origin("https:", "photos.example.com")`.
    pub fn for_origin(protocol: &str, host: &str) -> Self {
        Self {
            base_url: format!("{protocol}//{host}"),
            ..Self::default()
        }
    }

    /// Parse and validate page-supplied JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.is_empty()
            && !self.base_url.starts_with("http://")
            && !self.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.max_payload_bytes == 0 {
            return Err(ConfigError::ZeroPayloadLimit);
        }
        Ok(())
    }

    /// Full URL of an API path, joined with exactly one slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Default quality ladder with this deployment's payload ceiling.
    pub fn compression_settings(&self) -> CompressionSettings {
        CompressionSettings::with_max_bytes(self.max_payload_bytes)
    }
}
