//! Page model and HTML rendering for the watch view
//!
//! [`WatchPage`] is what a frontend needs to draw the page. It serializes to
//! JSON for a webview and renders itself to markup with [`WatchPage::to_html`].

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::watch::{ViewPhase, WatchView};

/// Label of the back-navigation control, shown in every state
pub const BACK_LABEL: &str = "Back";

/// One clickable entry of a selector list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorItem {
    /// Server id or episode label passed back on click
    pub value: String,
    /// Display text
    pub label: String,
    pub selected: bool,
}

/// Embedded player frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFrame {
    /// Frame source; empty when the selection has no playable link
    pub src: String,
    pub title: String,
}

/// Player and selectors of a loaded title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub frame: PlayerFrame,
    pub servers: Vec<SelectorItem>,
    /// Present for series only
    pub episodes: Option<Vec<SelectorItem>>,
}

/// State-dependent part of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageBody {
    Idle,
    Loading,
    Error { message: String },
    Player(PlayerView),
}

/// Everything shown on the watch page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchPage {
    pub back_label: String,
    pub body: PageBody,
}

impl WatchPage {
    /// Build the page model from the current view state.
    pub fn from_view(view: &WatchView) -> Self {
        let body = match view.phase() {
            ViewPhase::Idle => PageBody::Idle,
            ViewPhase::Loading => PageBody::Loading,
            ViewPhase::Failed(message) => PageBody::Error {
                message: message.clone(),
            },
            ViewPhase::Ready(loaded) => {
                let metadata = loaded.metadata();
                let selection = loaded.selection();

                let servers: Vec<SelectorItem> = metadata
                    .servers
                    .iter()
                    .map(|server| SelectorItem {
                        value: server.server_id.to_string(),
                        label: format!("Server {}", server.server_id),
                        selected: server.server_id == selection.server_id,
                    })
                    .collect();

                let episodes: Option<Vec<SelectorItem>> = metadata.kind.is_series().then(|| {
                    loaded
                        .episodes()
                        .iter()
                        .map(|label| SelectorItem {
                            value: label.to_string(),
                            label: format!("Episode {}", label),
                            selected: selection.episode.as_ref() == Some(label),
                        })
                        .collect()
                });

                PageBody::Player(PlayerView {
                    frame: PlayerFrame {
                        src: view.player_src(),
                        title: metadata.title.clone(),
                    },
                    servers,
                    episodes,
                })
            }
        };

        Self {
            back_label: BACK_LABEL.to_string(),
            body,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.body, PageBody::Loading)
    }

    /// Render the page as an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"watch-page\">");

        match &self.body {
            PageBody::Idle | PageBody::Player(_) => {}
            PageBody::Loading => html.push_str("<p class=\"loading\">Loading...</p>"),
            PageBody::Error { message } => {
                html.push_str(&format!("<p class=\"error\">Error: {}</p>", encode_text(message)));
            }
        }

        html.push_str(&format!(
            "<button type=\"button\" class=\"back-button\" data-action=\"back\">{}</button>",
            encode_text(&self.back_label)
        ));

        if let PageBody::Player(player) = &self.body {
            html.push_str(&format!(
                "<div id=\"videoFrameContainer\"><iframe src=\"{}\" title=\"{}\" allowfullscreen></iframe></div>",
                encode_double_quoted_attribute(&player.frame.src),
                encode_double_quoted_attribute(&player.frame.title),
            ));

            html.push_str("<div class=\"selectors\"><h2>Chọn Server</h2>");
            push_selector(&mut html, "server-list", "data-server-id", &player.servers);

            if let Some(episodes) = &player.episodes {
                html.push_str("<h3>Chọn Tập</h3>");
                push_selector(&mut html, "episode-list", "data-episode", episodes);
            }
            html.push_str("</div>");
        }

        html.push_str("</div>");
        html
    }
}

fn push_selector(html: &mut String, class: &str, data_attr: &str, items: &[SelectorItem]) {
    html.push_str(&format!("<ul class=\"{}\">", class));
    for item in items {
        let selected = if item.selected { " class=\"selected\"" } else { "" };
        html.push_str(&format!(
            "<li {}=\"{}\"{}>{}</li>",
            data_attr,
            encode_double_quoted_attribute(&item.value),
            selected,
            encode_text(&item.label),
        ));
    }
    html.push_str("</ul>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchError;
    use crate::player::PlayerEndpoint;
    use crate::types::{EpisodeEntry, EpisodeLabel, ServerId, ServerOffering, TitleKind, TitleMetadata};
    use crate::watch::NoPageTitle;
    use scraper::{Html, Selector};

    fn title(kind: TitleKind) -> TitleMetadata {
        let server = |id: &str, labels: &[&str]| ServerOffering {
            server_id: ServerId::new(id),
            episodes: labels
                .iter()
                .map(|label| EpisodeEntry {
                    label: EpisodeLabel::new(*label),
                    playback_link: format!("{}-{}", id, label),
                })
                .collect(),
        };
        TitleMetadata {
            title: "Tom & Jerry <3>".to_string(),
            kind,
            servers: vec![server("1", &["1", "2"]), server("2", &["2", "3"])],
        }
    }

    fn view() -> WatchView {
        let player = PlayerEndpoint::new("https://player.test").unwrap();
        WatchView::new(player, Box::new(NoPageTitle))
    }

    fn loaded(kind: TitleKind) -> WatchView {
        let mut view = view();
        let ticket = view.set_movie_id(Some("tom".to_string())).unwrap();
        view.complete_fetch(&ticket, Ok(title(kind)));
        view
    }

    fn select_all(html: &str, css: &str) -> Vec<String> {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse(css).unwrap();
        document
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect()
    }

    #[test]
    fn test_idle_page_has_only_back_button() {
        let page = view().render();
        assert_eq!(page.body, PageBody::Idle);

        let html = page.to_html();
        assert_eq!(select_all(&html, "button.back-button"), vec!["Back"]);
        assert!(select_all(&html, "iframe").is_empty());
        assert!(select_all(&html, "p").is_empty());
    }

    #[test]
    fn test_loading_page() {
        let mut view = view();
        view.set_movie_id(Some("tom".to_string()));
        let page = view.render();
        assert!(page.is_loading());

        let html = page.to_html();
        assert_eq!(select_all(&html, "p.loading"), vec!["Loading..."]);
        assert_eq!(select_all(&html, "button.back-button").len(), 1);
        assert!(select_all(&html, "ul").is_empty());
    }

    #[test]
    fn test_error_page() {
        let mut view = view();
        let ticket = view.set_movie_id(Some("tom".to_string())).unwrap();
        view.complete_fetch(&ticket, Err(WatchError::HttpStatus(500)));

        let html = view.render().to_html();
        assert_eq!(select_all(&html, "p.error"), vec!["Error: HTTP error! Status: 500"]);
        assert_eq!(select_all(&html, "button.back-button").len(), 1);
        assert!(select_all(&html, "iframe").is_empty());
    }

    #[test]
    fn test_series_page_model() {
        let page = loaded(TitleKind::Series).render();
        let PageBody::Player(player) = page.body else {
            panic!("Expected player body");
        };

        assert_eq!(player.frame.src, "https://player.test/hls?link=1-1");
        assert_eq!(player.frame.title, "Tom & Jerry <3>");
        assert_eq!(player.servers.len(), 2);
        assert!(player.servers[0].selected);
        assert!(!player.servers[1].selected);

        let episodes = player.episodes.unwrap();
        let labels: Vec<&str> = episodes.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Episode 1", "Episode 2", "Episode 3"]);
        assert!(episodes[0].selected);
    }

    #[test]
    fn test_single_feature_has_no_episode_selector() {
        let page = loaded(TitleKind::SingleFeature).render();
        let PageBody::Player(player) = &page.body else {
            panic!("Expected player body");
        };
        assert!(player.episodes.is_none());

        let html = page.to_html();
        assert_eq!(select_all(&html, "h2"), vec!["Chọn Server"]);
        assert!(select_all(&html, "h3").is_empty());
        assert!(select_all(&html, "ul.episode-list").is_empty());
    }

    #[test]
    fn test_series_html() {
        let mut view = loaded(TitleKind::Series);
        view.select_episode(EpisodeLabel::new("2"));
        let html = view.render().to_html();

        let document = Html::parse_fragment(&html);
        let iframe = Selector::parse("#videoFrameContainer iframe").unwrap();
        let frame = document.select(&iframe).next().unwrap();
        assert_eq!(frame.value().attr("src"), Some("https://player.test/hls?link=1-2"));
        assert_eq!(frame.value().attr("title"), Some("Tom & Jerry <3>"));
        assert!(frame.value().attr("allowfullscreen").is_some());

        assert_eq!(select_all(&html, "ul.server-list li"), vec!["Server 1", "Server 2"]);
        assert_eq!(select_all(&html, "ul.server-list li.selected"), vec!["Server 1"]);
        assert_eq!(select_all(&html, "h3"), vec!["Chọn Tập"]);
        assert_eq!(select_all(&html, "ul.episode-list li.selected"), vec!["Episode 2"]);

        let ep = Selector::parse("ul.episode-list li").unwrap();
        let values: Vec<&str> = document
            .select(&ep)
            .filter_map(|li| li.value().attr("data-episode"))
            .collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_unresolved_link_renders_empty_source() {
        let mut view = loaded(TitleKind::Series);
        view.select_episode(EpisodeLabel::new("3"));
        let html = view.render().to_html();

        let document = Html::parse_fragment(&html);
        let iframe = Selector::parse("iframe").unwrap();
        let frame = document.select(&iframe).next().unwrap();
        assert_eq!(frame.value().attr("src"), Some(""));
    }

    #[test]
    fn test_page_body_serialization() {
        let json = serde_json::to_value(PageBody::Error {
            message: "Invalid API response".to_string(),
        })
        .unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], "Invalid API response");

        let json = serde_json::to_value(PageBody::Loading).unwrap();
        assert_eq!(json["state"], "loading");
    }
}
