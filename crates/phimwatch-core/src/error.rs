//! Error types for phimwatch
//!
//! Every failure of a fetch attempt ends up as one of these variants. The
//! display string is what the watch page shows to the viewer, so the messages
//! for HTTP status and payload failures are part of the page contract.
//! WatchError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for phimwatch operations
#[derive(Error, Debug)]
pub enum WatchError {
    /// Transport-level failure (DNS, connection reset, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The content API answered with a non-success HTTP status
    #[error("HTTP error! Status: {0}")]
    HttpStatus(u16),

    /// The body parsed but does not satisfy the episode listing contract
    #[error("Invalid API response")]
    InvalidResponse,

    /// The body is not JSON at all
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A configured base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A fetch was requested for a blank movie identifier
    #[error("Movie identifier cannot be empty")]
    EmptyIdentifier,
}

/// Serialize WatchError as a string for Tauri compatibility
impl Serialize for WatchError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for phimwatch operations
pub type Result<T> = std::result::Result<T, WatchError>;
