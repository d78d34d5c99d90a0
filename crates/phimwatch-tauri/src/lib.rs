//! Phimwatch Tauri Integration
//!
//! This crate provides Tauri commands that drive the phimwatch watch view
//! from a webview frontend. The main window title plays the role of the page
//! title.
//!
//! # Usage
//!
//! ```rust,ignore
//! use phimwatch_tauri::{WatchState, WindowTitle};
//! use tauri::Manager;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             let title = WindowTitle::new(app.handle().clone(), "main");
//!             app.manage(WatchState::new(Box::new(title))?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             phimwatch_tauri::commands::open_title,
//!             phimwatch_tauri::commands::open_location,
//!             phimwatch_tauri::commands::reload_title,
//!             phimwatch_tauri::commands::current_page,
//!             phimwatch_tauri::commands::select_server,
//!             phimwatch_tauri::commands::select_episode,
//!             phimwatch_tauri::commands::watch_link,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `open_title` - Show a title by identifier (or go idle)
//! - `open_location` - Show the title named by a `?movie=` query string
//! - `reload_title` - Fetch the current title again
//! - `current_page` - Page model for the current state
//! - `select_server` - Switch server
//! - `select_episode` - Switch episode
//! - `watch_link` - "Watch Now" button for an identifier

pub mod commands;

use std::sync::Arc;
use tauri::{AppHandle, Manager, Runtime};
use tokio::sync::Mutex;
use tracing::warn;

use phimwatch_core::{
    ClientConfig, ContentApi, EpisodeLabel, FetchTicket, PageTitle, PlayerEndpoint, ServerId,
    WatchPage, WatchView,
};

/// Sets the title of one webview window.
pub struct WindowTitle<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> WindowTitle<R> {
    /// # Arguments
    /// * `app` - Application handle
    /// * `label` - Label of the window to retitle (usually `"main"`)
    pub fn new(app: AppHandle<R>, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
        }
    }
}

impl<R: Runtime> PageTitle for WindowTitle<R> {
    fn set_page_title(&mut self, title: &str) {
        match self.app.get_webview_window(&self.label) {
            Some(window) => {
                if let Err(e) = window.set_title(title) {
                    warn!(window = %self.label, error = %e, "failed to set window title");
                }
            }
            None => warn!(window = %self.label, "window not found, title not set"),
        }
    }
}

/// Watch view shared between commands.
///
/// The view lock is released while a fetch is in flight, so selections and
/// navigations stay responsive. A navigation made during the fetch wins over
/// the late result.
pub struct WatchState {
    api: ContentApi,
    view: Arc<Mutex<WatchView>>,
}

impl WatchState {
    /// Create a WatchState configured from the environment.
    ///
    /// # Errors
    /// Returns an error string if a configured URL is invalid.
    pub fn new(page_title: Box<dyn PageTitle>) -> Result<Self, String> {
        Self::with_config(&ClientConfig::from_env(), page_title)
    }

    /// Create a WatchState with an explicit configuration.
    pub fn with_config(config: &ClientConfig, page_title: Box<dyn PageTitle>) -> Result<Self, String> {
        let api = ContentApi::with_config(config).map_err(|e| e.to_string())?;
        let player = PlayerEndpoint::from_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            api,
            view: Arc::new(Mutex::new(WatchView::new(player, page_title))),
        })
    }

    /// Show `movie_id` (or go idle) and return the resulting page.
    pub async fn open(&self, movie_id: Option<String>) -> WatchPage {
        let ticket = self.view.lock().await.set_movie_id(movie_id);
        self.finish(ticket).await
    }

    /// Fetch the current title again.
    pub async fn reload(&self) -> WatchPage {
        let ticket = self.view.lock().await.reload();
        self.finish(ticket).await
    }

    pub async fn page(&self) -> WatchPage {
        self.view.lock().await.render()
    }

    pub async fn select_server(&self, server_id: ServerId) -> WatchPage {
        let mut view = self.view.lock().await;
        view.select_server(server_id);
        view.render()
    }

    pub async fn select_episode(&self, label: EpisodeLabel) -> WatchPage {
        let mut view = self.view.lock().await;
        view.select_episode(label);
        view.render()
    }

    async fn finish(&self, ticket: Option<FetchTicket>) -> WatchPage {
        if let Some(ticket) = ticket {
            let result = self.api.get_episodes(ticket.movie_id()).await;
            self.view.lock().await.complete_fetch(&ticket, result);
        }
        self.page().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phimwatch_core::{NoPageTitle, PageBody};

    fn state() -> WatchState {
        WatchState::with_config(&ClientConfig::default(), Box::new(NoPageTitle)).unwrap()
    }

    #[test]
    fn test_state_rejects_bad_config() {
        let config = ClientConfig {
            player_base: "nope".to_string(),
            ..ClientConfig::default()
        };
        let result = WatchState::with_config(&config, Box::new(NoPageTitle));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_without_identifier_is_idle() {
        let state = state();
        let page = state.open(None).await;
        assert_eq!(page.body, PageBody::Idle);
        assert_eq!(page.back_label, "Back");
    }

    #[tokio::test]
    async fn test_selection_before_load_keeps_idle() {
        let state = state();
        let page = state.select_server(ServerId::new("1")).await;
        assert_eq!(page.body, PageBody::Idle);
        let page = state.select_episode(EpisodeLabel::new("1")).await;
        assert_eq!(page.body, PageBody::Idle);
    }

    #[tokio::test]
    async fn test_reload_without_identifier_is_idle() {
        let state = state();
        assert_eq!(state.reload().await.body, PageBody::Idle);
    }
}
