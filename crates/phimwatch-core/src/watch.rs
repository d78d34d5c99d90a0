//! Watch view state machine
//!
//! [`WatchView`] owns everything the watch page shows for one `movie`
//! identifier: the fetch lifecycle, the loaded title and the server/episode
//! selection.
//!
//! Fetching is split in two halves so the owner decides where the network call
//! runs. [`WatchView::set_movie_id`] (or [`WatchView::reload`]) hands out a
//! [`FetchTicket`]; the result is applied with [`WatchView::complete_fetch`],
//! which drops results for tickets that are no longer current. A late answer
//! for a previous identifier therefore never overwrites the page.

use tracing::{debug, info, warn};

use crate::content::ContentApi;
use crate::error::{Result, WatchError};
use crate::player::PlayerEndpoint;
use crate::render::WatchPage;
use crate::selection::{available_episodes, resolve_link, SelectionState};
use crate::types::{EpisodeLabel, ServerId, TitleMetadata};

/// Port for the host page title (document title, window title, ...).
pub trait PageTitle: Send {
    fn set_page_title(&mut self, title: &str);
}

/// Page title sink that discards every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPageTitle;

impl PageTitle for NoPageTitle {
    fn set_page_title(&mut self, _title: &str) {}
}

/// Identifies one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    movie_id: String,
    generation: u64,
}

impl FetchTicket {
    /// Identifier the fetch is for
    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }
}

/// A title that loaded successfully, with its selection.
#[derive(Debug, Clone)]
pub struct LoadedTitle {
    metadata: TitleMetadata,
    episodes: Vec<EpisodeLabel>,
    selection: SelectionState,
}

impl LoadedTitle {
    fn new(metadata: TitleMetadata) -> Result<Self> {
        let selection = SelectionState::initial(&metadata).ok_or(WatchError::InvalidResponse)?;
        let episodes = available_episodes(&metadata);
        Ok(Self {
            metadata,
            episodes,
            selection,
        })
    }

    pub fn metadata(&self) -> &TitleMetadata {
        &self.metadata
    }

    /// Deduplicated episode labels across all servers
    pub fn episodes(&self) -> &[EpisodeLabel] {
        &self.episodes
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Playback link for the current selection
    pub fn resolved_link(&self) -> Option<&str> {
        resolve_link(&self.metadata, &self.selection)
    }

    fn page_title(&self) -> String {
        self.metadata.page_title(self.selection.episode.as_ref())
    }
}

/// Where the view is in its lifecycle
#[derive(Debug, Clone)]
pub enum ViewPhase {
    /// No identifier; nothing is fetched
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch failed; carries the user-visible message
    Failed(String),
    /// Title loaded
    Ready(LoadedTitle),
}

/// Watch page for one title at a time
pub struct WatchView {
    movie_id: Option<String>,
    generation: u64,
    phase: ViewPhase,
    player: PlayerEndpoint,
    page_title: Box<dyn PageTitle>,
}

impl WatchView {
    /// Create an idle view.
    ///
    /// # Arguments
    /// * `player` - Endpoint used to build the player frame source
    /// * `page_title` - Receives page title updates
    pub fn new(player: PlayerEndpoint, page_title: Box<dyn PageTitle>) -> Self {
        Self {
            movie_id: None,
            generation: 0,
            phase: ViewPhase::Idle,
            player,
            page_title,
        }
    }

    /// Identifier currently shown, if any
    pub fn movie_id(&self) -> Option<&str> {
        self.movie_id.as_deref()
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn player(&self) -> &PlayerEndpoint {
        &self.player
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, ViewPhase::Loading)
    }

    /// Message of the last failed fetch
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            ViewPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedTitle> {
        match &self.phase {
            ViewPhase::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }

    /// Player frame source for the current selection; empty when unresolved.
    pub fn player_src(&self) -> String {
        self.loaded()
            .and_then(LoadedTitle::resolved_link)
            .map(|link| self.player.embed_url(link))
            .unwrap_or_default()
    }

    /// Point the view at a new identifier.
    ///
    /// A missing or blank identifier puts the view to idle and invalidates any
    /// fetch in flight. The identifier already shown does not trigger a new
    /// fetch. Otherwise the view enters loading and the returned ticket must
    /// be completed with [`WatchView::complete_fetch`].
    pub fn set_movie_id(&mut self, movie_id: Option<String>) -> Option<FetchTicket> {
        let movie_id = movie_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        match movie_id {
            None => {
                if self.movie_id.take().is_some() {
                    debug!("movie identifier cleared, view is idle");
                }
                self.generation += 1;
                self.phase = ViewPhase::Idle;
                None
            }
            Some(id) if self.movie_id.as_deref() == Some(id.as_str()) => {
                debug!(movie_id = %id, "identifier unchanged, keeping current state");
                None
            }
            Some(id) => {
                self.movie_id = Some(id);
                self.reload()
            }
        }
    }

    /// Start a new fetch attempt for the current identifier.
    pub fn reload(&mut self) -> Option<FetchTicket> {
        let movie_id = self.movie_id.clone()?;

        self.generation += 1;
        self.phase = ViewPhase::Loading;
        info!(movie_id = %movie_id, generation = self.generation, "fetching episode listing");

        Some(FetchTicket {
            movie_id,
            generation: self.generation,
        })
    }

    /// Apply the outcome of a fetch attempt.
    ///
    /// Returns `false` and leaves the view untouched when the ticket has been
    /// superseded by a later navigation or reload.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: Result<TitleMetadata>) -> bool {
        let current = self.generation == ticket.generation
            && self.movie_id.as_deref() == Some(ticket.movie_id.as_str());
        if !current {
            debug!(
                movie_id = %ticket.movie_id,
                generation = ticket.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        match result.and_then(LoadedTitle::new) {
            Ok(loaded) => {
                let title = loaded.page_title();
                self.page_title.set_page_title(&title);
                info!(movie_id = %ticket.movie_id, page_title = %title, "title ready");
                self.phase = ViewPhase::Ready(loaded);
            }
            Err(e) => {
                warn!(movie_id = %ticket.movie_id, error = %e, "fetch failed");
                self.phase = ViewPhase::Failed(e.to_string());
            }
        }
        true
    }

    /// Navigate to `movie_id` and run the fetch against `api` to completion.
    pub async fn navigate(&mut self, api: &ContentApi, movie_id: Option<String>) {
        if let Some(ticket) = self.set_movie_id(movie_id) {
            self.run_fetch(api, ticket).await;
        }
    }

    /// Reload the current identifier against `api`.
    pub async fn refresh(&mut self, api: &ContentApi) {
        if let Some(ticket) = self.reload() {
            self.run_fetch(api, ticket).await;
        }
    }

    async fn run_fetch(&mut self, api: &ContentApi, ticket: FetchTicket) {
        let result = api.get_episodes(ticket.movie_id()).await;
        self.complete_fetch(&ticket, result);
    }

    /// Select an episode.
    ///
    /// Any label is accepted; one the current server lacks leaves the player
    /// without a source. Returns `false` when no title is loaded.
    pub fn select_episode(&mut self, label: EpisodeLabel) -> bool {
        let ViewPhase::Ready(loaded) = &mut self.phase else {
            return false;
        };

        debug!(episode = %label, "episode selected");
        loaded.selection.select_episode(label);
        self.page_title.set_page_title(&loaded.page_title());
        true
    }

    /// Select a server, moving to its first episode if it lacks the current one.
    ///
    /// Returns `false` when no title is loaded or the title has no such server;
    /// the selection is left as it was.
    pub fn select_server(&mut self, server_id: ServerId) -> bool {
        let ViewPhase::Ready(loaded) = &mut self.phase else {
            return false;
        };

        debug!(server = %server_id, "server selected");
        let Some(episode_changed) = loaded.selection.select_server(&loaded.metadata, server_id)
        else {
            warn!("ignoring selection of a server the title does not offer");
            return false;
        };
        if episode_changed {
            self.page_title.set_page_title(&loaded.page_title());
        }
        true
    }

    /// Page model for the current state.
    pub fn render(&self) -> WatchPage {
        WatchPage::from_view(self)
    }
}
