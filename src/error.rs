//! Error types for URL parsing and generation.

use std::fmt;

use thiserror::Error;

/// Why a reference-key token was rejected when a [`Beautifier`](crate::Beautifier)
/// was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// The token is not exactly one character long.
    Length,
    /// The token is a vowel (`a`, `e`, `i`, `o`, `u`, `y`).
    Vowel,
    /// The token is used more than once.
    Duplicate,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenRejection::Length => f.write_str("must be a single character"),
            TokenRejection::Vowel => f.write_str("must not be a vowel"),
            TokenRejection::Duplicate => f.write_str("must be unique"),
        }
    }
}

/// Errors that can occur while building or parsing a beautified URL.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BeautifierError {
    /// A refinement key or the query token failed alphabet validation.
    #[error("Invalid token '{token}': {reason}")]
    InvalidToken {
        /// The offending token as configured.
        token: String,
        /// What is wrong with it.
        reason: TokenRejection,
    },

    /// No configured route matches the URL, or the route name is unknown.
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// A navigation name or refinement field has no configured mapping.
    #[error("No mapping found for '{0}'")]
    NoMapping(String),

    /// A detail URL must contain at least a title and an id.
    #[error("Detail URL needs at least 2 path segments, found {0}")]
    TooFewParts(usize),

    /// Plain `value/field` paths must come in pairs.
    #[error("Path has an odd number of segments ({0}) where value/field pairs are expected")]
    OddPathLength(usize),

    /// A reference-key character is neither the query token nor a mapped key.
    #[error("Unknown reference key '{0}'")]
    UnknownToken(char),

    /// The reference string names more segments than the path contains.
    #[error("Reference string has {keys} keys but only {segments} path segments remain")]
    TokenReferenceInvalid {
        /// Number of keys in the reference string.
        keys: usize,
        /// Number of path segments available to them.
        segments: usize,
    },

    /// Range refinements cannot be placed in a reference-key path position.
    #[error("Range refinement on '{0}' cannot be stored in the path")]
    RangeRefinement(String),

    /// Navigation URLs consist of exactly one segment.
    #[error("Navigation URL must have a single path segment, found {0}")]
    MultiSegment(usize),

    /// `build` was handed a request that belongs to another route.
    #[error("Route '{route}' cannot build a {request} request")]
    RequestMismatch {
        /// Route that was asked to build.
        route: String,
        /// Kind of request that was supplied.
        request: String,
    },

    /// A `field:value` piece of the refinements parameter is malformed.
    #[error("Malformed refinement: {0}")]
    MalformedRefinement(String),

    /// A range bound is not a number.
    #[error("Invalid range bound: {0}")]
    InvalidRange(String),

    /// Percent-decoding produced something that is not UTF-8.
    #[error("Invalid percent-encoding: {0}")]
    InvalidEncoding(String),

    /// An absolute URL could not be parsed.
    #[error("URL parsing error: {0}")]
    UrlParseError(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BeautifierError>;

impl From<url::ParseError> for BeautifierError {
    fn from(err: url::ParseError) -> Self {
        BeautifierError::UrlParseError(err.to_string())
    }
}

impl From<serde_json::Error> for BeautifierError {
    fn from(err: serde_json::Error) -> Self {
        BeautifierError::Config(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for BeautifierError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        BeautifierError::InvalidEncoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BeautifierError::InvalidToken {
            token: "e".to_string(),
            reason: TokenRejection::Vowel,
        };
        assert_eq!(err.to_string(), "Invalid token 'e': must not be a vowel");

        assert_eq!(
            BeautifierError::TokenReferenceInvalid { keys: 3, segments: 1 }.to_string(),
            "Reference string has 3 keys but only 1 path segments remain"
        );
    }

    #[test]
    fn test_conversions() {
        let utf8_error = String::from_utf8(vec![0xf0, 0x28]).unwrap_err();
        assert!(matches!(
            BeautifierError::from(utf8_error),
            BeautifierError::InvalidEncoding(_)
        ));

        let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(
            BeautifierError::from(json_error),
            BeautifierError::Config(_)
        ));

        let absolute = crate::uri::split_url("https://").unwrap_err();
        assert!(matches!(absolute, BeautifierError::UrlParseError(_)));
    }
}
