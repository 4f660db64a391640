//! Navigation (category) route codec: a single encoded display name.

use crate::codec::handler::{decode_segments, encode_segments, RouteHandler};
use crate::codec::{UrlGenerator, UrlParser};
use crate::error::{BeautifierError, Result};
use crate::uri::split_url;

/// Builds navigation URLs from a display name.
#[derive(Debug, Clone)]
pub struct NavigationGenerator {
    handler: RouteHandler,
}

/// Parses navigation URLs into the configured payload.
#[derive(Debug, Clone)]
pub struct NavigationParser {
    handler: RouteHandler,
}

impl NavigationGenerator {
    /// Create a generator over the shared handler.
    pub fn new(handler: RouteHandler) -> Self {
        Self { handler }
    }
}

impl UrlGenerator for NavigationGenerator {
    type Input = str;

    fn build(&self, name: &str) -> Result<String> {
        if !self.handler.config().navigations.contains_key(name) {
            return Err(BeautifierError::NoMapping(name.to_string()));
        }
        Ok(encode_segments(&[name]))
    }
}

impl NavigationParser {
    /// Create a parser over the shared handler.
    pub fn new(handler: RouteHandler) -> Self {
        Self { handler }
    }
}

impl UrlParser for NavigationParser {
    type Output = serde_json::Value;

    fn parse(&self, url: &str) -> Result<serde_json::Value> {
        let parts = split_url(url)?;
        let segments = decode_segments(&parts.path)?;
        if segments.len() > 1 {
            return Err(BeautifierError::MultiSegment(segments.len()));
        }

        let name = segments.into_iter().next().unwrap_or_default();
        self.handler
            .config()
            .navigations
            .get(&name)
            .cloned()
            .ok_or(BeautifierError::NoMapping(name))
    }
}
