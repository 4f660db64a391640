//! Beautifier configuration and the route table.
//!
//! Both are plain data: they are deserialized from JSON (camelCase keys) or
//! assembled with the `with_*` builders, and handed to
//! [`Beautifier::new`](crate::Beautifier::new), which validates them once.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BeautifierError, Result};

/// One `key → navigation name` entry of the refinement mapping.
///
/// Serialized as a single-entry object, e.g. `{"c": "colour"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct MappingEntry {
    /// Reference key, a single non-vowel character once validated.
    pub key: String,
    /// Navigation (field) name the key stands for.
    pub navigation: String,
}

impl MappingEntry {
    /// Create a mapping entry.
    pub fn new(key: impl Into<String>, navigation: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            navigation: navigation.into(),
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for MappingEntry {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> std::result::Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "refinement mapping entries must have exactly one key, found {}",
                map.len()
            ));
        }
        let (key, navigation) = map.into_iter().next().ok_or("empty mapping entry")?;
        Ok(Self { key, navigation })
    }
}

impl From<MappingEntry> for BTreeMap<String, String> {
    fn from(entry: MappingEntry) -> Self {
        BTreeMap::from([(entry.key, entry.navigation)])
    }
}

/// Literal query-string keys for the logical parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryParams {
    /// Page number key.
    pub page: String,
    /// Page size key.
    pub page_size: String,
    /// Key for refinements that cannot be stored in the path.
    pub refinements: String,
    /// Sort key.
    pub sort: String,
    /// Collection key.
    pub collection: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: "page".to_string(),
            page_size: "pageSize".to_string(),
            refinements: "refinements".to_string(),
            sort: "sort".to_string(),
            collection: "collection".to_string(),
        }
    }
}

/// Codec configuration, shared read-only by every route codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// Ordered reference keys; the order is the canonical path order.
    pub refinement_mapping: Vec<MappingEntry>,
    /// Reference key marking a free-text query segment.
    pub query_token: String,
    /// Compact reference-key paths instead of `value/field` pairs.
    pub use_reference_keys: bool,
    /// Literal path suffix such as `index.html`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Navigation display name to caller-defined payload.
    pub navigations: BTreeMap<String, serde_json::Value>,
    /// Query-string parameter names.
    pub params: QueryParams,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            refinement_mapping: Vec::new(),
            query_token: "q".to_string(),
            use_reference_keys: true,
            suffix: None,
            navigations: BTreeMap::new(),
            params: QueryParams::default(),
        }
    }
}

impl Configuration {
    /// Default configuration: query token `q`, reference keys on, no mappings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a refinement mapping entry.
    pub fn with_mapping(mut self, key: impl Into<String>, navigation: impl Into<String>) -> Self {
        self.refinement_mapping.push(MappingEntry::new(key, navigation));
        self
    }

    /// Set the query token.
    pub fn with_query_token(mut self, token: impl Into<String>) -> Self {
        self.query_token = token.into();
        self
    }

    /// Switch between reference-key and `value/field` paths.
    pub fn with_reference_keys(mut self, enabled: bool) -> Self {
        self.use_reference_keys = enabled;
        self
    }

    /// Set the literal path suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Register a navigation and its payload.
    pub fn with_navigation(mut self, name: impl Into<String>, payload: serde_json::Value) -> Self {
        self.navigations.insert(name.into(), payload);
        self
    }

    /// Override the query-string parameter names.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }
}

/// The three routes a beautifier can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Search results.
    Search,
    /// Item detail.
    Details,
    /// Category / navigation landing page.
    Navigation,
}

impl RouteKind {
    /// All route kinds.
    pub const ALL: [RouteKind; 3] = [RouteKind::Search, RouteKind::Details, RouteKind::Navigation];

    /// Route name as used in the route table.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Search => "search",
            RouteKind::Details => "details",
            RouteKind::Navigation => "navigation",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteKind {
    type Err = BeautifierError;

    fn from_str(name: &str) -> Result<Self> {
        RouteKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| BeautifierError::InvalidRoute(name.to_string()))
    }
}

/// Ordered route table: route kind to mount path.
///
/// Parsing picks the first route whose mount path prefixes the URL path, so
/// order matters when one mount path is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct Routes {
    entries: Vec<(RouteKind, String)>,
}

impl Routes {
    /// An empty route table.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Mount `kind` at `mount`, replacing an earlier mount of the same route.
    pub fn with(mut self, kind: RouteKind, mount: impl Into<String>) -> Self {
        let mount = mount.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = mount,
            None => self.entries.push((kind, mount)),
        }
        self
    }

    /// Mount path of a route, if configured.
    pub fn mount(&self, kind: RouteKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, mount)| mount.as_str())
    }

    /// Routes in matching order.
    pub fn iter(&self) -> impl Iterator<Item = (RouteKind, &str)> {
        self.entries.iter().map(|(kind, mount)| (*kind, mount.as_str()))
    }
}

impl Default for Routes {
    fn default() -> Self {
        Routes::new()
            .with(RouteKind::Search, "/search")
            .with(RouteKind::Details, "/details")
            .with(RouteKind::Navigation, "/navigation")
    }
}

impl TryFrom<BTreeMap<String, String>> for Routes {
    type Error = BeautifierError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        let entries = map
            .into_iter()
            .map(|(name, mount)| Ok((name.parse::<RouteKind>()?, mount)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }
}

impl From<Routes> for BTreeMap<String, String> {
    fn from(routes: Routes) -> Self {
        routes
            .entries
            .into_iter()
            .map(|(kind, mount)| (kind.to_string(), mount))
            .collect()
    }
}

/// A complete settings document: configuration fields plus a route table.
///
/// ```
/// use url_beautifier::BeautifierSettings;
///
/// let settings = BeautifierSettings::from_json(r#"{
///     "refinementMapping": [{"c": "colour"}],
///     "routes": {"search": "/s"}
/// }"#).unwrap();
/// assert_eq!(settings.configuration.query_token, "q");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeautifierSettings {
    /// Codec configuration.
    #[serde(flatten)]
    pub configuration: Configuration,
    /// Route table; defaults to `/search`, `/details`, `/navigation`.
    #[serde(default)]
    pub routes: Routes,
}

impl BeautifierSettings {
    /// Parse settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| BeautifierError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}
