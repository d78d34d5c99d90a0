//! Episode listing parser for the content API
//!
//! Converts the loosely shaped JSON body of `GET /api/episode/{movieId}` into
//! [`TitleMetadata`]. Anything that does not fit the contract is rejected here so
//! the view layer only ever sees well-formed data.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, WatchError};
use crate::types::{EpisodeEntry, EpisodeLabel, ServerId, ServerOffering, TitleKind, TitleMetadata};

/// Status code the API puts in the body of a successful answer.
const API_STATUS_OK: i64 = 200;

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    status: Option<i64>,
    data: Option<RawTitle>,
}

#[derive(Debug, Deserialize)]
struct RawTitle {
    title: String,
    #[serde(rename = "type")]
    kind: Option<i64>,
    #[serde(default)]
    episodes: Vec<RawServer>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    server_id: ServerId,
    episode: Vec<RawEpisode>,
}

#[derive(Debug, Deserialize)]
struct RawEpisode {
    episode: EpisodeLabel,
    linkphim: Option<String>,
}

/// Parse an episode listing response body.
///
/// # Arguments
/// * `body` - Raw response body
///
/// # Returns
/// * `Ok(TitleMetadata)` when `status` is 200 and at least one server is listed
/// * `Err(WatchError::Decode)` if the body is not JSON
/// * `Err(WatchError::InvalidResponse)` for any JSON that breaks the contract
///
/// # Examples
/// ```
/// use phimwatch_core::parser::parse_episode_listing;
///
/// let body = r#"{"status":200,"data":{"title":"Phim","type":0,
///     "episodes":[{"server_id":1,"episode":[{"episode":"Full","linkphim":"abc"}]}]}}"#;
/// let title = parse_episode_listing(body).unwrap();
/// assert_eq!(title.servers.len(), 1);
/// ```
pub fn parse_episode_listing(body: &str) -> Result<TitleMetadata> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| WatchError::Decode(e.to_string()))?;

    let envelope: ApiEnvelope =
        serde_json::from_value(value).map_err(|_| WatchError::InvalidResponse)?;

    if envelope.status != Some(API_STATUS_OK) {
        return Err(WatchError::InvalidResponse);
    }

    let data = envelope.data.ok_or(WatchError::InvalidResponse)?;
    if data.episodes.is_empty() {
        return Err(WatchError::InvalidResponse);
    }

    let servers = data
        .episodes
        .into_iter()
        .map(|server| ServerOffering {
            server_id: server.server_id,
            episodes: server
                .episode
                .into_iter()
                .map(|ep| EpisodeEntry {
                    label: ep.episode,
                    playback_link: ep.linkphim.unwrap_or_default(),
                })
                .collect(),
        })
        .collect();

    Ok(TitleMetadata {
        title: data.title,
        kind: TitleKind::from_flag(data.kind.unwrap_or_default()),
        servers,
    })
}
