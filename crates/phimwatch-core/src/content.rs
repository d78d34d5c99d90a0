//! Content API
//!
//! High-level access to the streaming site's content API. It combines the HTTP
//! client with the episode listing parser.

use tracing::info;

use crate::client::{ApiClient, ClientConfig};
use crate::error::{Result, WatchError};
use crate::parser::parse_episode_listing;
use crate::types::TitleMetadata;

/// Content API for one streaming site
///
/// # Example
/// ```no_run
/// use phimwatch_core::ContentApi;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = ContentApi::new()?;
///
///     let title = api.get_episodes("tay-du-ky").await?;
///     println!("{} has {} servers", title.title, title.servers.len());
///
///     Ok(())
/// }
/// ```
pub struct ContentApi {
    client: ApiClient,
}

impl ContentApi {
    /// Create a content API with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a content API from a client configuration.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_client(ApiClient::with_config(config)?))
    }

    /// Create a content API with a custom client.
    ///
    /// # Arguments
    /// * `client` - Pre-configured ApiClient instance
    pub fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// Get the episode/server listing of a title.
    ///
    /// # Arguments
    /// * `movie_id` - Title identifier from the `movie` query parameter
    ///
    /// # Returns
    /// * `Ok(TitleMetadata)` with at least one server
    /// * `Err(WatchError::EmptyIdentifier)` if `movie_id` is blank
    /// * `Err(WatchError::HttpStatus)` for a non-success status
    /// * `Err(WatchError::InvalidResponse)` if the payload breaks the contract
    ///
    /// # Example
    /// ```no_run
    /// use phimwatch_core::ContentApi;
    ///
    /// # async fn example() -> Result<(), phimwatch_core::WatchError> {
    /// let api = ContentApi::new()?;
    /// let title = api.get_episodes("tay-du-ky").await?;
    /// for server in &title.servers {
    ///     println!("Server {}: {} episodes", server.server_id, server.episodes.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_episodes(&self, movie_id: &str) -> Result<TitleMetadata> {
        let movie_id = movie_id.trim();
        if movie_id.is_empty() {
            return Err(WatchError::EmptyIdentifier);
        }

        let path = format!("/api/episode/{}", urlencoding::encode(movie_id));
        let body = self.client.fetch(&path).await?;
        let title = parse_episode_listing(&body)?;

        info!(
            movie_id,
            title = %title.title,
            servers = title.servers.len(),
            "loaded episode listing"
        );
        Ok(title)
    }
}
