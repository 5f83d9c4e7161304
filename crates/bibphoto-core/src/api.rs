//! Request and response bodies of the photo service.
//!
//! The service exposes three JSON endpoints, all `POST`:
//!
//! | Path        | Request               | Success response           |
//! |-------------|-----------------------|----------------------------|
//! | `/bib`      | `{code}`              | [`BibInfo`]                |
//! | `/thumb`    | `{images[], code}`    | `{thumbs[], "main-url"}`   |
//! | `/download` | `{thumbs[], code}`    | zip archive (binary)       |
//!
//! Any endpoint may instead answer `{"error": "..."}` with a 4xx status.
//! Transport stays with the page; this module only builds and parses bodies.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;

pub const BIB_PATH: &str = "/bib";
pub const THUMB_PATH: &str = "/thumb";
pub const DOWNLOAD_PATH: &str = "/download";

/// Header carrying the CAPTCHA response on the bib lookup.
pub const CAPTCHA_HEADER: &str = "X-Recaptcha-Token";

/// File name the downloaded archive is saved under.
pub const ARCHIVE_FILE_NAME: &str = "photo.zip";

/// Message shown when a failed download carries no error body.
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download files.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with an `{error}` body.
    #[error("{0}")]
    Server(String),

    /// The body was not valid JSON or did not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibRequest {
    pub code: String,
}

/// Bib and event details returned by `/bib`.
///
/// Expiry values are ISO-8601 timestamps as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(deserialize_with = "string_or_number")]
    pub bib: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub bib_expiry: String,
    pub event_name: String,
    pub event_expiry: String,
    /// Event switch as stored by the service (0 or 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<i64>,
}

impl BibInfo {
    /// Whether the bib expired before `now`.
    ///
    /// Both values are compared as ISO-8601 strings, which orders correctly
    /// as long as they share a format.
    pub fn is_bib_expired(&self, now: &str) -> bool {
        self.bib_expiry.as_str() < now
    }

    pub fn is_event_expired(&self, now: &str) -> bool {
        self.event_expiry.as_str() < now
    }

    /// One-line header shown above the face and photo tabs.
    pub fn display_line(&self) -> String {
        format!(
            "BIB: {} {} (Event: {})",
            self.bib,
            self.name.as_deref().unwrap_or(""),
            self.event_name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbRequest {
    /// Reference faces as `data:` URIs.
    pub images: Vec<String>,
    pub code: String,
}

/// Search results returned by `/thumb`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbResponse {
    /// Thumbnail paths relative to `main_url`.
    #[serde(default)]
    pub thumbs: Vec<String>,
    #[serde(rename = "main-url", default)]
    pub main_url: String,
}

impl ThumbResponse {
    /// Displayable URL of a thumbnail path. The service's `main-url` already
    /// ends with a separator, so the two are concatenated as-is.
    pub fn thumb_url(&self, thumb: &str) -> String {
        format!("{}{}", self.main_url, thumb)
    }

    pub fn thumb_urls(&self) -> Vec<String> {
        self.thumbs.iter().map(|t| self.thumb_url(t)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub thumbs: Vec<String>,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A fully built HTTP request for the page to send with `fetch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl PreparedRequest {
    /// `POST` of a JSON body to `path` on the configured API.
    pub fn post_json<T: Serialize>(
        config: &ClientConfig,
        path: &str,
        body: &T,
    ) -> Result<Self, ApiError> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Ok(Self {
            method: "POST",
            url: config.endpoint(path),
            headers,
            body: serde_json::to_string(body)?,
        })
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

/// Parse a JSON response body, turning an `{error}` body into
/// [`ApiError::Server`].
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ApiError::Server(message.to_string()));
    }
    Ok(serde_json::from_value(value)?)
}

/// Error message from a failed response body, or `fallback` when the body
/// carries none.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
