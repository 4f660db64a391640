//! The beautifier facade: token validation and route dispatch.

use std::collections::HashSet;

use tracing::debug;

use crate::codec::{CodecFactory, Codecs, RouteHandler, UrlGenerator, UrlParser};
use crate::config::{BeautifierSettings, Configuration, RouteKind, Routes};
use crate::error::{BeautifierError, Result, TokenRejection};
use crate::types::{DetailsRequest, ParsedUrl, RouteRequest, SearchRequest};
use crate::uri::{split_url, UrlParts};

/// Characters that may never be used as reference keys.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Converts between search state and readable URLs for a fixed set of routes.
///
/// A `Beautifier` is immutable once built and can be shared freely between
/// threads.
///
/// # Examples
///
/// ```
/// use url_beautifier::{Beautifier, Configuration, ParsedUrl, Refinement, Routes, SearchRequest};
///
/// let config = Configuration::new().with_mapping("c", "colour");
/// let beautifier = Beautifier::new(config, Routes::default())?;
///
/// let request = SearchRequest {
///     query: Some("shoe".to_string()),
///     refinements: vec![Refinement::value("colour", "blue")],
///     ..SearchRequest::default()
/// };
/// let url = beautifier.build_search(&request)?;
/// assert_eq!(url, "/search/shoe/blue/qc");
///
/// assert_eq!(beautifier.parse(&url)?, ParsedUrl::Search(request));
/// # Ok::<(), url_beautifier::BeautifierError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Beautifier {
    routes: Routes,
    handler: RouteHandler,
    codecs: Codecs,
}

impl Beautifier {
    /// Validate the configuration and build the route codecs.
    ///
    /// Fails with [`BeautifierError::InvalidToken`] when a refinement key or
    /// the query token is not a single character, is a vowel, or is used
    /// twice. Refinement keys are checked in order, then the query token.
    pub fn new(config: Configuration, routes: Routes) -> Result<Self> {
        let (query_token, mapping) = validate_tokens(&config)?;
        debug!(
            keys = mapping.len(),
            %query_token,
            reference_keys = config.use_reference_keys,
            "creating beautifier"
        );

        let handler = RouteHandler::new(config, query_token, mapping);
        let codecs = CodecFactory::create(&handler);

        Ok(Self {
            routes,
            handler,
            codecs,
        })
    }

    /// Build from a settings document.
    pub fn from_settings(settings: BeautifierSettings) -> Result<Self> {
        Self::new(settings.configuration, settings.routes)
    }

    /// Build from a JSON settings document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_settings(BeautifierSettings::from_json(json)?)
    }

    /// The configuration in use.
    pub fn config(&self) -> &Configuration {
        self.handler.config()
    }

    /// The route table in use.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Parse a relative (`/search/...`) or absolute URL.
    ///
    /// The first route whose mount path prefixes the URL path handles the
    /// rest of the URL.
    pub fn parse(&self, url: &str) -> Result<ParsedUrl> {
        let parts = split_url(url)?;
        let (kind, mount) = self
            .routes
            .iter()
            .find(|(_, mount)| parts.path.starts_with(mount))
            .ok_or_else(|| BeautifierError::InvalidRoute(parts.path.clone()))?;

        let remainder = UrlParts {
            path: parts.path[mount.len()..].to_string(),
            query: parts.query,
        }
        .to_relative();
        debug!(route = %kind, mount, "parsing url");

        Ok(match kind {
            RouteKind::Search => ParsedUrl::Search(self.codecs.search.parser.parse(&remainder)?),
            RouteKind::Details => ParsedUrl::Details(self.codecs.details.parser.parse(&remainder)?),
            RouteKind::Navigation => {
                ParsedUrl::Navigation(self.codecs.navigation.parser.parse(&remainder)?)
            }
        })
    }

    /// Build the URL of `request` on the route called `route_name`.
    pub fn build(&self, route_name: &str, request: &RouteRequest) -> Result<String> {
        let kind: RouteKind = route_name.parse()?;
        let mount = self.mount(kind)?;

        let path = match (kind, request) {
            (RouteKind::Search, RouteRequest::Search(request)) => {
                self.codecs.search.generator.build(request)?
            }
            (RouteKind::Details, RouteRequest::Details(request)) => {
                self.codecs.details.generator.build(request)?
            }
            (RouteKind::Navigation, RouteRequest::Navigation(name)) => {
                self.codecs.navigation.generator.build(name)?
            }
            (kind, request) => {
                return Err(BeautifierError::RequestMismatch {
                    route: kind.to_string(),
                    request: request.kind().to_string(),
                })
            }
        };

        debug!(route = %kind, mount, "built url");
        Ok(format!("{}{}", mount, path))
    }

    /// Build a search URL.
    pub fn build_search(&self, request: &SearchRequest) -> Result<String> {
        let mount = self.mount(RouteKind::Search)?;
        Ok(format!("{}{}", mount, self.codecs.search.generator.build(request)?))
    }

    /// Build an item-detail URL.
    pub fn build_details(&self, request: &DetailsRequest) -> Result<String> {
        let mount = self.mount(RouteKind::Details)?;
        Ok(format!("{}{}", mount, self.codecs.details.generator.build(request)?))
    }

    /// Build a navigation URL for a configured display name.
    pub fn build_navigation(&self, name: &str) -> Result<String> {
        let mount = self.mount(RouteKind::Navigation)?;
        Ok(format!("{}{}", mount, self.codecs.navigation.generator.build(name)?))
    }

    /// Mount path of a route, without a trailing `/` so generated paths
    /// can be appended directly.
    fn mount(&self, kind: RouteKind) -> Result<&str> {
        self.routes
            .mount(kind)
            .map(|mount| mount.trim_end_matches('/'))
            .ok_or_else(|| BeautifierError::InvalidRoute(kind.to_string()))
    }
}

/// Check the reference-key alphabet and return the query token and mapping
/// as characters.
fn validate_tokens(config: &Configuration) -> Result<(char, Vec<(char, String)>)> {
    let mut seen = HashSet::new();
    let mut mapping = Vec::with_capacity(config.refinement_mapping.len());

    for entry in &config.refinement_mapping {
        let key = validate_token(&entry.key, &mut seen)?;
        mapping.push((key, entry.navigation.clone()));
    }
    let query_token = validate_token(&config.query_token, &mut seen)?;

    Ok((query_token, mapping))
}

fn validate_token(token: &str, seen: &mut HashSet<char>) -> Result<char> {
    let reject = |reason| BeautifierError::InvalidToken {
        token: token.to_string(),
        reason,
    };

    let mut chars = token.chars();
    let key = match (chars.next(), chars.next()) {
        (Some(key), None) => key,
        _ => return Err(reject(TokenRejection::Length)),
    };
    if VOWELS.contains(&key.to_ascii_lowercase()) {
        return Err(reject(TokenRejection::Vowel));
    }
    if !seen.insert(key) {
        return Err(reject(TokenRejection::Duplicate));
    }

    Ok(key)
}
