//! "Watch Now" link to the watch page

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};

use crate::query_params::QueryParam;

/// Path of the watch page, relative to the current page
pub const WATCH_PATH: &str = "watch";

/// Button caption
pub const WATCH_LABEL: &str = "Watch Now";

/// Inline link glyph rendered after the caption
const LINK_ICON_SVG: &str = "<svg class=\"link-icon\" width=\"1em\" height=\"1em\" viewBox=\"0 0 24 24\" fill=\"currentColor\" aria-hidden=\"true\"><path d=\"M3.9 12a3.1 3.1 0 0 1 3.1-3.1h4V7H7a5 5 0 0 0 0 10h4v-1.9H7A3.1 3.1 0 0 1 3.9 12zM8 13h8v-2H8v2zm9-6h-4v1.9h4a3.1 3.1 0 0 1 0 6.2h-4V17h4a5 5 0 0 0 0-10z\"/></svg>";

/// Anchor-styled button that opens the watch page for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchLinkButton {
    pub href: String,
    pub rel: String,
    pub title: String,
}

impl WatchLinkButton {
    /// Button for `movie_id`, or `None` when there is no identifier to link to.
    pub fn new(movie_id: Option<&str>) -> Option<Self> {
        let movie_id = movie_id.filter(|id| !id.is_empty())?;
        Some(Self {
            href: watch_href(movie_id),
            rel: "noopener noreferrer".to_string(),
            title: WATCH_LABEL.to_string(),
        })
    }

    pub fn to_html(&self) -> String {
        format!(
            "<a class=\"anchor-button\" href=\"{}\" rel=\"{}\"><button type=\"button\">{}{}</button></a>",
            encode_double_quoted_attribute(&self.href),
            encode_double_quoted_attribute(&self.rel),
            encode_text(&self.title),
            LINK_ICON_SVG,
        )
    }
}

/// Markup for the button, empty when there is no identifier.
pub fn render_watch_link(movie_id: Option<&str>) -> String {
    WatchLinkButton::new(movie_id)
        .map(|button| button.to_html())
        .unwrap_or_default()
}

/// `watch?movie={id}` with the identifier percent-encoded.
pub fn watch_href(movie_id: &str) -> String {
    format!(
        "{}?{}={}",
        WATCH_PATH,
        QueryParam::Movie.key(),
        urlencoding::encode(movie_id)
    )
}
