//! URL query-parameter keys shared by the site's pages
//!
//! The table is `'static` data with no mutating API, so every reader in the
//! process sees the same seven keys.

/// Logical name of a query parameter used somewhere on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryParam {
    Page,
    Category,
    Name,
    Id,
    SearchTerm,
    ListId,
    Movie,
}

impl QueryParam {
    /// Every parameter, in declaration order.
    pub const ALL: [QueryParam; 7] = [
        QueryParam::Page,
        QueryParam::Category,
        QueryParam::Name,
        QueryParam::Id,
        QueryParam::SearchTerm,
        QueryParam::ListId,
        QueryParam::Movie,
    ];

    /// Query-string key for this parameter.
    pub const fn key(self) -> &'static str {
        match self {
            QueryParam::Page => "page",
            QueryParam::Category => "category",
            QueryParam::Name => "name",
            QueryParam::Id => "id",
            QueryParam::SearchTerm => "searchTerm",
            QueryParam::ListId => "listId",
            QueryParam::Movie => "movie",
        }
    }

    /// Reverse lookup from a query-string key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.key() == key)
    }
}

/// Read the value of `param` from a raw query string.
///
/// Accepts the query with or without the leading `?`. The first occurrence
/// wins, `+` is treated as a space and the value is percent-decoded, with
/// invalid UTF-8 replaced rather than rejected. Returns `None` when the
/// parameter is missing or its value is empty.
///
/// # Examples
/// ```
/// use phimwatch_core::query_params::{query_value, QueryParam};
///
/// assert_eq!(query_value("?movie=one-piece", QueryParam::Movie).as_deref(), Some("one-piece"));
/// assert_eq!(query_value("page=2", QueryParam::Movie), None);
/// ```
pub fn query_value(query: &str, param: QueryParam) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == param.key())
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_keys() {
        let keys: Vec<&str> = QueryParam::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(
            keys,
            vec!["page", "category", "name", "id", "searchTerm", "listId", "movie"]
        );
    }

    #[test]
    fn test_keys_round_trip() {
        for param in QueryParam::ALL {
            assert_eq!(QueryParam::from_key(param.key()), Some(param));
        }

        let unique: HashSet<&str> = QueryParam::ALL.iter().map(|p| p.key()).collect();
        assert_eq!(unique.len(), QueryParam::ALL.len());
    }

    #[test]
    fn test_from_key() {
        assert_eq!(QueryParam::from_key("searchTerm"), Some(QueryParam::SearchTerm));
        assert_eq!(QueryParam::from_key("movie"), Some(QueryParam::Movie));
        assert_eq!(QueryParam::from_key("searchterm"), None);
        assert_eq!(QueryParam::from_key(""), None);
    }

    #[test]
    fn test_query_value_basic() {
        assert_eq!(
            query_value("?page=2&movie=tay-du-ky", QueryParam::Movie).as_deref(),
            Some("tay-du-ky")
        );
        assert_eq!(query_value("page=2", QueryParam::Page).as_deref(), Some("2"));
    }

    #[test]
    fn test_query_value_decodes() {
        assert_eq!(
            query_value("searchTerm=one%20piece", QueryParam::SearchTerm).as_deref(),
            Some("one piece")
        );
        assert_eq!(
            query_value("searchTerm=one+piece", QueryParam::SearchTerm).as_deref(),
            Some("one piece")
        );
    }

    #[test]
    fn test_query_value_missing_or_empty() {
        assert_eq!(query_value("", QueryParam::Movie), None);
        assert_eq!(query_value("?movie=", QueryParam::Movie), None);
        assert_eq!(query_value("?movie", QueryParam::Movie), None);
        assert_eq!(query_value("?movies=abc", QueryParam::Movie), None);
    }

    #[test]
    fn test_query_value_invalid_percent_encoding() {
        let value = query_value("movie=%FF", QueryParam::Movie);
        assert_eq!(value.as_deref(), Some("\u{FFFD}"));

        assert_eq!(
            query_value("movie=100%&page=2", QueryParam::Movie).as_deref(),
            Some("100%")
        );
    }

    #[test]
    fn test_query_value_first_occurrence_wins() {
        assert_eq!(
            query_value("movie=a&movie=b", QueryParam::Movie).as_deref(),
            Some("a")
        );
    }
}
