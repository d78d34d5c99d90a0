//! Embeddable player endpoint

use crate::client::{normalize_base, ClientConfig};
use crate::error::Result;

/// Builds player frame URLs of the form `{base}/hls?link={playbackLink}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEndpoint {
    base_url: String,
}

impl PlayerEndpoint {
    /// # Errors
    /// `WatchError::InvalidUrl` if `base` is not an http(s) URL.
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base(base)?,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(&config.player_base)
    }

    /// Frame source for a playback link.
    ///
    /// The link is opaque and already escaped by the content API, so it is
    /// appended as-is. An empty link yields an empty source.
    pub fn embed_url(&self, playback_link: &str) -> String {
        if playback_link.is_empty() {
            return String::new();
        }
        format!("{}/hls?link={}", self.base_url, playback_link)
    }
}
