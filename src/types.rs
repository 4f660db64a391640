//! Request and refinement types exchanged with callers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A selected filter.
///
/// Refinements are told apart by shape rather than by a tag, so the JSON form
/// is either `{"field": "colour", "value": "blue"}` or
/// `{"field": "price", "low": 20, "high": 40}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Refinement {
    /// A discrete value of a field.
    Value {
        /// Field (navigation) name.
        field: String,
        /// Selected value.
        value: String,
    },
    /// A numeric range over a field.
    Range {
        /// Field (navigation) name.
        field: String,
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
}

impl Refinement {
    /// Create a value refinement.
    pub fn value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Refinement::Value {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a range refinement.
    pub fn range(field: impl Into<String>, low: f64, high: f64) -> Self {
        Refinement::Range {
            field: field.into(),
            low,
            high,
        }
    }

    /// The field this refinement applies to.
    pub fn field(&self) -> &str {
        match self {
            Refinement::Value { field, .. } | Refinement::Range { field, .. } => field,
        }
    }

    /// Whether this is a range refinement.
    pub fn is_range(&self) -> bool {
        matches!(self, Refinement::Range { .. })
    }
}

impl fmt::Display for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Refinement::Value { field, value } => write!(f, "{}:{}", field, value),
            Refinement::Range { field, low, high } => write!(f, "{}:{}..{}", field, low, high),
        }
    }
}

/// A discrete refinement, as used by item-detail URLs to select a variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ValueRefinement {
    /// Field (navigation) name.
    pub field: String,
    /// Selected value.
    pub value: String,
}

impl ValueRefinement {
    /// Create a new value refinement.
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<ValueRefinement> for Refinement {
    fn from(refinement: ValueRefinement) -> Self {
        Refinement::Value {
            field: refinement.field,
            value: refinement.value,
        }
    }
}

/// Sort order of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort on.
    pub field: String,
    /// Sort descending instead of ascending.
    #[serde(default)]
    pub descending: bool,
}

impl Sort {
    /// Create a new sort.
    pub fn new(field: impl Into<String>, descending: bool) -> Self {
        Self {
            field: field.into(),
            descending,
        }
    }
}

/// State of a search results page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Page number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Results per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Sort order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// Collection (data set) searched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Selected filters.
    #[serde(default)]
    pub refinements: Vec<Refinement>,
}

impl SearchRequest {
    /// A request for the given free-text query.
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

/// State of an item-detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsRequest {
    /// Item identifier.
    pub id: String,
    /// Item title, used as the readable part of the URL.
    pub title: String,
    /// Variant-selecting attributes.
    #[serde(default)]
    pub refinements: Vec<ValueRefinement>,
}

impl DetailsRequest {
    /// Create a details request without refinements.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            refinements: Vec::new(),
        }
    }
}

/// Input to [`Beautifier::build`](crate::Beautifier::build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteRequest {
    /// Search state.
    Search(SearchRequest),
    /// Item-detail state.
    Details(DetailsRequest),
    /// Navigation display name.
    Navigation(String),
}

impl RouteRequest {
    /// Short name of the request kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteRequest::Search(_) => "search",
            RouteRequest::Details(_) => "details",
            RouteRequest::Navigation(_) => "navigation",
        }
    }
}

/// Result of [`Beautifier::parse`](crate::Beautifier::parse), discriminated by
/// the route that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsedUrl {
    /// A search URL.
    Search(SearchRequest),
    /// An item-detail URL.
    Details(DetailsRequest),
    /// A navigation URL, resolved to its configured payload.
    Navigation(serde_json::Value),
}
