//! HTTP client for the content API
//!
//! A thin wrapper over `reqwest` that knows the API base URL and turns
//! non-success statuses into [`WatchError::HttpStatus`]. Requests are sent
//! exactly once: there is no retry, backoff or rate limiting.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, WatchError};

/// Default base URL of the content API
pub const DEFAULT_API_BASE: &str = "https://api.nestphim.site";

/// Default base URL of the embeddable player
pub const DEFAULT_PLAYER_BASE: &str = "https://nestphim.site";

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header for Vietnamese content
const DEFAULT_ACCEPT_LANGUAGE: &str = "vi-VN,vi;q=0.9,en;q=0.8";

const ENV_API_BASE: &str = "PHIMWATCH_API_BASE";
const ENV_PLAYER_BASE: &str = "PHIMWATCH_PLAYER_BASE";
const ENV_TIMEOUT_SECS: &str = "PHIMWATCH_TIMEOUT_SECS";

/// Configuration for the content API client and the player endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the content API (default: `https://api.nestphim.site`)
    pub api_base: String,
    /// Base URL of the player endpoint (default: `https://nestphim.site`)
    pub player_base: String,
    /// Request timeout in seconds (default: none, requests run to completion)
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            player_base: DEFAULT_PLAYER_BASE.to_string(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration with overrides taken from the environment.
    ///
    /// Reads `PHIMWATCH_API_BASE`, `PHIMWATCH_PLAYER_BASE` and
    /// `PHIMWATCH_TIMEOUT_SECS`. An unparseable timeout is ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }
        if let Some(base) = lookup(ENV_PLAYER_BASE).filter(|v| !v.trim().is_empty()) {
            config.player_base = base.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = Some(secs),
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }

        config
    }
}

/// Validate a base URL and strip its trailing slash.
pub(crate) fn normalize_base(base: &str) -> Result<String> {
    let parsed = Url::parse(base).map_err(|e| WatchError::InvalidUrl(format!("{}: {}", base, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(WatchError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            base,
            parsed.scheme()
        )));
    }
    Ok(base.trim_end_matches('/').to_string())
}

/// HTTP client for the content API
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `WatchError::InvalidUrl` - `api_base` is not an http(s) URL
    /// - `WatchError::Network` - the underlying client cannot be built
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let base_url = normalize_base(&config.api_base)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Base URL requests are resolved against, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a path on the content API and return the body text
    ///
    /// # Arguments
    /// * `path` - Path relative to the API base (e.g., "/api/episode/abc")
    ///
    /// # Errors
    /// - `WatchError::Network` - Transport failure
    /// - `WatchError::HttpStatus` - Any non-2xx status
    pub async fn fetch(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "content API returned an error status");
            return Err(WatchError::HttpStatus(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
