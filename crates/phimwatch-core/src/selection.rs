//! Server and episode selection
//!
//! The selection is the only mutable state derived from a loaded title. The
//! playable link is never stored: [`resolve_link`] recomputes it from the title
//! and the selection every time it is needed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{EpisodeLabel, ServerId, TitleMetadata};

/// Every episode label offered by any server, deduplicated in first-seen order.
///
/// Not every label is guaranteed to be playable on every server.
pub fn available_episodes(title: &TitleMetadata) -> Vec<EpisodeLabel> {
    let mut seen = HashSet::new();
    title
        .servers
        .iter()
        .flat_map(|server| server.episodes.iter())
        .filter(|ep| seen.insert(&ep.label))
        .map(|ep| ep.label.clone())
        .collect()
}

/// Currently selected server and episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Always one of the title's servers
    pub server_id: ServerId,
    /// `None` only when no server lists any episode at all
    pub episode: Option<EpisodeLabel>,
}

impl SelectionState {
    /// First server and first available episode of a freshly loaded title.
    ///
    /// Returns `None` for a title without servers.
    pub fn initial(title: &TitleMetadata) -> Option<Self> {
        let server = title.servers.first()?;
        Some(Self {
            server_id: server.server_id.clone(),
            episode: available_episodes(title).into_iter().next(),
        })
    }

    /// Switch episode without checking the current server carries it.
    pub fn select_episode(&mut self, label: EpisodeLabel) {
        self.episode = Some(label);
    }

    /// Switch server, keeping the episode playable when possible.
    ///
    /// If the new server lacks the current episode, the episode becomes the
    /// server's first one. A server with no episodes leaves the episode as is.
    /// Returns whether the episode changed, or `None` without touching the
    /// selection when the title has no such server.
    pub fn select_server(&mut self, title: &TitleMetadata, server_id: ServerId) -> Option<bool> {
        let server = title.server(&server_id)?;

        let keeps_current = self
            .episode
            .as_ref()
            .is_some_and(|label| server.has_episode(label));
        let repaired = if keeps_current {
            None
        } else {
            server.first_label().cloned()
        };

        self.server_id = server_id;

        match repaired {
            Some(label) if self.episode.as_ref() != Some(&label) => {
                self.episode = Some(label);
                Some(true)
            }
            _ => Some(false),
        }
    }
}

/// Playback link for the selected (server, episode) pair.
///
/// `None` when the server is unknown, the server lacks the episode, or the
/// entry has an empty link.
pub fn resolve_link<'a>(title: &'a TitleMetadata, selection: &SelectionState) -> Option<&'a str> {
    let label = selection.episode.as_ref()?;
    title
        .server(&selection.server_id)?
        .episode(label)
        .map(|ep| ep.playback_link.as_str())
        .filter(|link| !link.is_empty())
}
