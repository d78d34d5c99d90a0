//! Tauri commands for the watch page
//!
//! This module contains all Tauri commands that can be invoked from the frontend.
//! Every command that changes the view returns the new page model.

use tauri::State;

use crate::WatchState;
use phimwatch_core::query_params::{query_value, QueryParam};
use phimwatch_core::{EpisodeLabel, ServerId, WatchLinkButton, WatchPage};

/// Show a title by identifier.
///
/// # Arguments
/// * `movie_id` - Title identifier; `None` or blank puts the view to idle
///
/// # Returns
/// * `Ok(WatchPage)` after the fetch finished (fetch errors are in the page body)
#[tauri::command]
pub async fn open_title(
    state: State<'_, WatchState>,
    movie_id: Option<String>,
) -> Result<WatchPage, String> {
    Ok(state.open(movie_id).await)
}

/// Show the title named by the `movie` parameter of a query string.
///
/// # Arguments
/// * `query` - Query string of the current location, e.g. `?movie=abc`
#[tauri::command]
pub async fn open_location(
    state: State<'_, WatchState>,
    query: String,
) -> Result<WatchPage, String> {
    Ok(state.open(query_value(&query, QueryParam::Movie)).await)
}

/// Fetch the current title again.
#[tauri::command]
pub async fn reload_title(state: State<'_, WatchState>) -> Result<WatchPage, String> {
    Ok(state.reload().await)
}

/// Page model for the current state.
#[tauri::command]
pub async fn current_page(state: State<'_, WatchState>) -> Result<WatchPage, String> {
    Ok(state.page().await)
}

/// Switch to another server.
///
/// # Arguments
/// * `server_id` - Value of the clicked server selector item
#[tauri::command]
pub async fn select_server(
    state: State<'_, WatchState>,
    server_id: String,
) -> Result<WatchPage, String> {
    Ok(state.select_server(ServerId::new(server_id)).await)
}

/// Switch to another episode.
///
/// # Arguments
/// * `episode` - Value of the clicked episode selector item
#[tauri::command]
pub async fn select_episode(
    state: State<'_, WatchState>,
    episode: String,
) -> Result<WatchPage, String> {
    Ok(state.select_episode(EpisodeLabel::new(episode)).await)
}

/// "Watch Now" button for a title, `None` when there is no identifier.
#[tauri::command]
pub fn watch_link(movie_id: Option<String>) -> Option<WatchLinkButton> {
    WatchLinkButton::new(movie_id.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_watch_link_none() {
        assert_eq!(watch_link(None), None);
        assert_eq!(watch_link(Some(String::new())), None);
    }

    proptest! {
        #[test]
        fn prop_watch_link_targets_movie(id in "[a-z0-9-]{1,32}") {
            let button = watch_link(Some(id.clone())).unwrap();
            prop_assert_eq!(button.href, format!("watch?movie={}", id));
            prop_assert_eq!(button.title, "Watch Now");
        }
    }
}
