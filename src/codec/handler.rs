//! Shared state and helpers of the route codecs.
//!
//! Every parser and generator holds a [`RouteHandler`], a cheap handle on the
//! validated configuration and the key lookups derived from it once.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Configuration;
use crate::error::{BeautifierError, Result};
use crate::tokens::{decode_chars, encode_chars};
use crate::types::{Refinement, ValueRefinement};

/// Validated configuration plus its derived lookup tables.
#[derive(Debug)]
struct HandlerConfig {
    config: Configuration,
    query_token: char,
    mapping: Vec<(char, String)>,
    keys: HashMap<String, char>,
    labels: HashMap<char, String>,
}

/// Path values and reference keys pulled out of a refinement pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Values to place in the path, in canonical order.
    pub values: Vec<String>,
    /// One reference key per value.
    pub keys: String,
    /// Refinements no mapping entry claimed.
    pub remaining: Vec<Refinement>,
}

/// Query and refinements recovered from a reference-key path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferencePath {
    /// Free-text query, when the reference string starts with the query token.
    pub query: Option<String>,
    /// One refinement per mapped key.
    pub refinements: Vec<ValueRefinement>,
}

/// Shared, read-only handle used by every route codec.
#[derive(Debug, Clone)]
pub struct RouteHandler {
    shared: Arc<HandlerConfig>,
}

impl RouteHandler {
    /// Create a handler over an already validated configuration.
    ///
    /// `mapping` and `query_token` are the character forms of the configured
    /// tokens; [`Beautifier::new`](crate::Beautifier::new) produces them while
    /// validating the alphabet.
    pub fn new(config: Configuration, query_token: char, mapping: Vec<(char, String)>) -> Self {
        let keys = Self::to_keys(&mapping);
        let labels = Self::to_object(&mapping);

        Self {
            shared: Arc::new(HandlerConfig {
                config,
                query_token,
                mapping,
                keys,
                labels,
            }),
        }
    }

    /// Map each navigation name to its reference key. Later entries win.
    pub fn to_keys(mapping: &[(char, String)]) -> HashMap<String, char> {
        mapping
            .iter()
            .map(|(key, label)| (label.clone(), *key))
            .collect()
    }

    /// Map each reference key to its navigation name. Later entries win.
    pub fn to_object(mapping: &[(char, String)]) -> HashMap<char, String> {
        mapping
            .iter()
            .map(|(key, label)| (*key, label.clone()))
            .collect()
    }

    /// The configuration this handler was built from.
    pub fn config(&self) -> &Configuration {
        &self.shared.config
    }

    /// Reference key marking a free-text query.
    pub fn query_token(&self) -> char {
        self.shared.query_token
    }

    /// Reference keys in canonical order.
    pub fn mapping(&self) -> &[(char, String)] {
        &self.shared.mapping
    }

    /// Reference key of a navigation name.
    pub fn key_for(&self, label: &str) -> Option<char> {
        self.shared.keys.get(label).copied()
    }

    /// Navigation name of a reference key.
    pub fn label_for(&self, key: char) -> Option<&str> {
        self.shared.labels.get(&key).map(String::as_str)
    }

    /// Partition `pool` by the refinement mapping.
    ///
    /// Mapping entries are visited in configured order; each claims every
    /// refinement on its navigation name, sorted by `(field, value)`. Range
    /// refinements cannot be claimed and fail with
    /// [`BeautifierError::RangeRefinement`].
    pub fn extract_reference_keys(&self, pool: Vec<Refinement>) -> Result<Extraction> {
        let mut extraction = Extraction {
            remaining: pool,
            ..Extraction::default()
        };

        for (key, label) in self.mapping() {
            let (matched, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut extraction.remaining)
                .into_iter()
                .partition(|refinement| refinement.field() == label);
            extraction.remaining = rest;

            let mut matched = matched
                .into_iter()
                .map(|refinement| match refinement {
                    Refinement::Value { field, value } => Ok(ValueRefinement { field, value }),
                    Refinement::Range { field, .. } => Err(BeautifierError::RangeRefinement(field)),
                })
                .collect::<Result<Vec<_>>>()?;
            matched.sort();

            for refinement in matched {
                extraction.values.push(refinement.value);
                extraction.keys.push(*key);
            }
        }

        Ok(extraction)
    }

    /// Recover the query and refinements from decoded path segments whose
    /// last element is the reference string.
    ///
    /// Leading segments beyond what the reference string accounts for are
    /// ignored. The query token is only honoured as the first key, and only
    /// when `allow_query` is set.
    pub fn decode_reference_keys(
        &self,
        mut segments: Vec<String>,
        allow_query: bool,
    ) -> Result<ReferencePath> {
        let Some(reference) = segments.pop() else {
            return Ok(ReferencePath::default());
        };
        let keys: Vec<char> = reference.chars().collect();

        if keys.len() > segments.len() {
            return Err(BeautifierError::TokenReferenceInvalid {
                keys: keys.len(),
                segments: segments.len(),
            });
        }
        let query_token = self.query_token();
        if let Some(key) = keys
            .iter()
            .find(|&&key| !(allow_query && key == query_token) && self.label_for(key).is_none())
        {
            return Err(BeautifierError::UnknownToken(*key));
        }

        let values = segments.split_off(segments.len() - keys.len());
        let mut pairs = keys.into_iter().zip(values).peekable();
        let mut path = ReferencePath::default();

        if allow_query {
            if let Some((_, query)) = pairs.next_if(|(key, _)| *key == query_token) {
                path.query = Some(query);
            }
        }

        for (key, value) in pairs {
            let field = self
                .label_for(key)
                .ok_or(BeautifierError::UnknownToken(key))?;
            path.refinements.push(ValueRefinement::new(field, value));
        }

        Ok(path)
    }
}

/// Turn plain `value/field` segment pairs into refinements.
pub fn decode_plain_pairs(segments: Vec<String>) -> Result<Vec<ValueRefinement>> {
    if segments.len() % 2 != 0 {
        return Err(BeautifierError::OddPathLength(segments.len()));
    }

    let mut refinements = Vec::with_capacity(segments.len() / 2);
    let mut segments = segments.into_iter();
    while let (Some(value), Some(field)) = (segments.next(), segments.next()) {
        refinements.push(ValueRefinement { field, value });
    }
    Ok(refinements)
}

/// Split a path into decoded, non-empty segments.
pub fn decode_segments(path: &str) -> Result<Vec<String>> {
    crate::uri::path_segments(path)
        .into_iter()
        .map(decode_chars)
        .collect()
}

/// Encode segments and join them into an absolute path.
pub fn encode_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let encoded: Vec<String> = segments.iter().map(|s| encode_chars(s.as_ref())).collect();
    format!("/{}", encoded.join("/"))
}
