//! Phimwatch Core Library
//!
//! Headless watch page for a movie/episode streaming site. It fetches the
//! episode/server listing of a title from the content API, keeps the
//! selected server and episode, and resolves them into a player frame URL.
//!
//! # Features
//! - Typed content API client with strict payload validation
//! - Server/episode selection with automatic episode repair on server switch
//! - Watch view state machine with stale-response protection
//! - Serializable page model and HTML rendering
//! - "Watch Now" link button and shared query-parameter keys

pub mod client;
pub mod content;
pub mod error;
pub mod link_button;
pub mod parser;
pub mod player;
pub mod query_params;
pub mod render;
pub mod selection;
pub mod types;
pub mod watch;

// Re-export main types for convenience
pub use client::{ApiClient, ClientConfig};
pub use content::ContentApi;
pub use error::{Result, WatchError};
pub use link_button::{render_watch_link, WatchLinkButton};
pub use player::PlayerEndpoint;
pub use query_params::QueryParam;
pub use render::{PageBody, WatchPage};
pub use selection::SelectionState;
pub use types::{EpisodeEntry, EpisodeLabel, ServerId, ServerOffering, TitleKind, TitleMetadata};
pub use watch::{FetchTicket, NoPageTitle, PageTitle, ViewPhase, WatchView};
