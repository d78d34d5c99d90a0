//! Payload parsers for the content API
//!
//! - `episodes`: Parse the episode/server listing of a title

pub mod episodes;

pub use episodes::parse_episode_listing;
