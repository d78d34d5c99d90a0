//! Data types for phimwatch
//!
//! Strongly typed title metadata built from the content API payload. All types
//! implement Serialize and Deserialize for JSON compatibility with Tauri.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON scalar the content API uses interchangeably for ids and labels.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Number(number) => number.to_string(),
        }
    }
}

macro_rules! scalar_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                StringOrNumber::deserialize(deserializer).map(|value| Self(value.into_string()))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

scalar_id!(
    /// Identifier of a content server, unique among the servers of one title.
    ///
    /// The API sends it as a string or a number; both normalize to the same text.
    ServerId
);

scalar_id!(
    /// Episode label within a server's listing (e.g. `"1"`, `"Full"`).
    EpisodeLabel
);

/// Whether a title is a single feature or a series with selectable episodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleKind {
    /// One watchable unit (movie)
    SingleFeature,
    /// Multiple selectable episodes
    Series,
}

impl TitleKind {
    /// Map the API's integer type flag: 1 is a series, anything else a feature.
    pub fn from_flag(flag: i64) -> Self {
        if flag == 1 {
            TitleKind::Series
        } else {
            TitleKind::SingleFeature
        }
    }

    pub fn is_series(self) -> bool {
        matches!(self, TitleKind::Series)
    }
}

/// One playable unit offered by a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    /// Episode label within the server
    pub label: EpisodeLabel,
    /// Opaque token handed to the player endpoint; empty means unplayable
    pub playback_link: String,
}

/// One server's episode listing for a title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerOffering {
    pub server_id: ServerId,
    /// Episodes in API order
    pub episodes: Vec<EpisodeEntry>,
}

impl ServerOffering {
    /// Whether this server carries an entry with the given label.
    pub fn has_episode(&self, label: &EpisodeLabel) -> bool {
        self.episodes.iter().any(|ep| &ep.label == label)
    }

    /// Entry for the given label, if this server carries it.
    pub fn episode(&self, label: &EpisodeLabel) -> Option<&EpisodeEntry> {
        self.episodes.iter().find(|ep| &ep.label == label)
    }

    /// Label of the first listed episode.
    pub fn first_label(&self) -> Option<&EpisodeLabel> {
        self.episodes.first().map(|ep| &ep.label)
    }
}

/// Everything fetched for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMetadata {
    pub title: String,
    pub kind: TitleKind,
    /// Servers in API order, never empty
    pub servers: Vec<ServerOffering>,
}

impl TitleMetadata {
    /// Server with the given id.
    pub fn server(&self, id: &ServerId) -> Option<&ServerOffering> {
        self.servers.iter().find(|server| &server.server_id == id)
    }

    /// Page title for the given episode.
    ///
    /// Series titles carry the episode (`"<title> - Tập <episode>"`); single
    /// features use the bare title.
    pub fn page_title(&self, episode: Option<&EpisodeLabel>) -> String {
        match (self.kind, episode) {
            (TitleKind::Series, Some(label)) => format!("{} - Tập {}", self.title, label),
            _ => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, link: &str) -> EpisodeEntry {
        EpisodeEntry {
            label: EpisodeLabel::new(label),
            playback_link: link.to_string(),
        }
    }

    #[test]
    fn test_scalar_id_from_string_or_number() {
        let from_text: EpisodeLabel = serde_json::from_str("\"1\"").unwrap();
        let from_number: EpisodeLabel = serde_json::from_str("1").unwrap();
        assert_eq!(from_text, from_number);
        assert_eq!(from_number.as_str(), "1");

        let server: ServerId = serde_json::from_str("7").unwrap();
        assert_eq!(server, ServerId::new("7"));
    }

    #[test]
    fn test_scalar_id_serializes_as_string() {
        let json = serde_json::to_string(&ServerId::new("3")).unwrap();
        assert_eq!(json, "\"3\"");
    }

    #[test]
    fn test_scalar_id_rejects_non_scalar() {
        assert!(serde_json::from_str::<EpisodeLabel>("[1]").is_err());
        assert!(serde_json::from_str::<EpisodeLabel>("null").is_err());
    }

    #[test]
    fn test_title_kind_from_flag() {
        assert_eq!(TitleKind::from_flag(1), TitleKind::Series);
        assert_eq!(TitleKind::from_flag(0), TitleKind::SingleFeature);
        assert_eq!(TitleKind::from_flag(2), TitleKind::SingleFeature);
        assert!(TitleKind::Series.is_series());
        assert!(!TitleKind::SingleFeature.is_series());
    }

    #[test]
    fn test_server_lookups() {
        let server = ServerOffering {
            server_id: ServerId::new("1"),
            episodes: vec![entry("1", "a"), entry("2", "b")],
        };
        assert!(server.has_episode(&EpisodeLabel::new("2")));
        assert!(!server.has_episode(&EpisodeLabel::new("3")));
        assert_eq!(server.episode(&EpisodeLabel::new("2")).unwrap().playback_link, "b");
        assert_eq!(server.first_label(), Some(&EpisodeLabel::new("1")));

        let empty = ServerOffering {
            server_id: ServerId::new("2"),
            episodes: Vec::new(),
        };
        assert_eq!(empty.first_label(), None);
    }

    #[test]
    fn test_page_title() {
        let mut meta = TitleMetadata {
            title: "Tây Du Ký".to_string(),
            kind: TitleKind::Series,
            servers: Vec::new(),
        };
        assert_eq!(
            meta.page_title(Some(&EpisodeLabel::new("3"))),
            "Tây Du Ký - Tập 3"
        );

        meta.kind = TitleKind::SingleFeature;
        assert_eq!(meta.page_title(Some(&EpisodeLabel::new("3"))), "Tây Du Ký");
        assert_eq!(meta.page_title(None), "Tây Du Ký");
    }
}
