//! URL splitting and query-string helpers.
//!
//! Beautified URLs are usually handled as relative references
//! (`/search/shoe/q?page=2`). Absolute URLs are accepted too and are reduced to
//! their path and query with the `url` crate.

use std::collections::{BTreeMap, HashMap};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

use crate::error::Result;

/// Bytes percent-encoded in query keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b':')
    .remove(b',')
    .remove(b'\\');

/// Path and query of a URL, with the fragment removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParts {
    /// Path component, always starting with `/` unless empty.
    pub path: String,
    /// Query string without the `?`.
    pub query: Option<String>,
}

impl UrlParts {
    /// Reassemble `path?query`.
    pub fn to_relative(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }
}

/// Split a relative or absolute URL into path and query.
///
/// # Examples
///
/// ```
/// use url_beautifier::split_url;
///
/// let parts = split_url("/search/shoe/q?page=2#top").unwrap();
/// assert_eq!(parts.path, "/search/shoe/q");
/// assert_eq!(parts.query.as_deref(), Some("page=2"));
///
/// let parts = split_url("https://shop.example.com/details/dress/293014").unwrap();
/// assert_eq!(parts.path, "/details/dress/293014");
/// assert_eq!(parts.query, None);
/// ```
pub fn split_url(url: &str) -> Result<UrlParts> {
    if has_scheme(url) {
        let parsed = Url::parse(url)?;
        return Ok(UrlParts {
            path: parsed.path().to_string(),
            query: parsed.query().map(|q| q.to_string()),
        });
    }

    let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (without_fragment, None),
    };

    Ok(UrlParts {
        path: path.to_string(),
        query,
    })
}

fn has_scheme(url: &str) -> bool {
    match url.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Non-empty path segments, still encoded.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Decode a query string into a map; later duplicates win.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Render query parameters as `key=value&...`, ordered by key.
///
/// Only characters that would break the query string are percent-encoded, so
/// the refinement grammar (`:`, `,`, `..`, `\`) stays readable.
///
/// ```
/// use std::collections::BTreeMap;
/// use url_beautifier::build_query;
///
/// let params = BTreeMap::from([
///     ("refinements".to_string(), "price:20..40".to_string()),
///     ("page".to_string(), "2".to_string()),
/// ]);
/// assert_eq!(build_query(&params), "page=2&refinements=price:20..40");
/// ```
pub fn build_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_relative() {
        let parts = split_url("/search/a?b=c").unwrap();
        assert_eq!(parts.path, "/search/a");
        assert_eq!(parts.query.as_deref(), Some("b=c"));
        assert_eq!(parts.to_relative(), "/search/a?b=c");

        let parts = split_url("/navigation/Apples#section").unwrap();
        assert_eq!(parts.path, "/navigation/Apples");
        assert_eq!(parts.query, None);
    }

    #[test]
    fn test_split_absolute() {
        let parts = split_url("http://localhost:8080/search/shoe/q?page=3#x").unwrap();
        assert_eq!(parts.path, "/search/shoe/q");
        assert_eq!(parts.query.as_deref(), Some("page=3"));
    }

    #[test]
    fn test_split_absolute_invalid() {
        assert!(split_url("https://").is_err());
    }

    #[test]
    fn test_path_segments_skip_empty() {
        assert_eq!(path_segments("//a///b/"), vec!["a", "b"]);
        assert!(path_segments("/").is_empty());
    }

    #[test]
    fn test_parse_query_decodes() {
        let params = parse_query("refinements=brand:A%26B&page=2&page=3");
        assert_eq!(params.get("refinements").map(String::as_str), Some("brand:A&B"));
        assert_eq!(params.get("page").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_build_query_escapes_delimiters() {
        let params = BTreeMap::from([("refinements".to_string(), "brand:A&B=C+D".to_string())]);
        let query = build_query(&params);
        assert_eq!(query, "refinements=brand:A%26B%3DC%2BD");
        assert_eq!(
            build_query(&BTreeMap::from([("q".to_string(), r"é\,~".to_string())])),
            r"q=%C3%A9\,~"
        );
        assert_eq!(
            parse_query(&query).get("refinements").map(String::as_str),
            Some("brand:A&B=C+D")
        );
    }
}
