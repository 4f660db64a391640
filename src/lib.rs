//! url-beautifier - readable URLs for faceted search state
//!
//! This crate converts search application state (free-text query, selected
//! refinements, paging, sorting, collection) into short, SEO-friendly URLs and
//! recovers the same state from an incoming URL.
//!
//! # Features
//!
//! - **Reference keys**: refinement values live in the path; a trailing segment
//!   of one-character keys says which field each value belongs to
//! - **Canonical**: the same request always produces the same URL, whatever the
//!   order of its refinements
//! - **Lossless**: ranges and unmapped fields fall back to an escaped query
//!   parameter, so every request survives a round trip
//! - **Three routes**: search, item detail and navigation, each mounted on a
//!   caller-supplied path
//!
//! # Quick Start
//!
//! ```
//! use url_beautifier::{Beautifier, Configuration, ParsedUrl, Refinement, RouteRequest, Routes, SearchRequest};
//!
//! let config = Configuration::new()
//!     .with_mapping("c", "colour")
//!     .with_mapping("b", "brand");
//! let beautifier = Beautifier::new(config, Routes::default())?;
//!
//! let request = SearchRequest {
//!     query: Some("running shoes".to_string()),
//!     refinements: vec![
//!         Refinement::value("brand", "Nike"),
//!         Refinement::value("colour", "red"),
//!         Refinement::range("price", 20.0, 40.0),
//!     ],
//!     ..SearchRequest::default()
//! };
//!
//! let url = beautifier.build("search", &RouteRequest::Search(request))?;
//! assert_eq!(url, "/search/running-shoes/red/Nike/qcb?refinements=price:20..40");
//!
//! match beautifier.parse(&url)? {
//!     ParsedUrl::Search(parsed) => assert_eq!(parsed.refinements.len(), 3),
//!     other => panic!("unexpected route: {:?}", other),
//! }
//! # Ok::<(), url_beautifier::BeautifierError>(())
//! ```
//!
//! # URL Format
//!
//! | Route | Path |
//! |------------|------|
//! | search     | `/{query}/{values...}/{keys}[/{suffix}]?{params}` |
//! | details    | `/{title}/{values...}/{keys}/{id}` |
//! | navigation | `/{name}` |
//!
//! With `use_reference_keys` off, values are written as `value/field` pairs
//! instead of a key segment.
//!
//! # Error Handling
//!
//! All functions return `Result<T, BeautifierError>`. Nothing is logged or
//! recovered internally; a failed parse never yields a partial request.

// Re-export the facade
pub use beautifier::Beautifier;

// Re-export configuration
pub use config::{BeautifierSettings, Configuration, MappingEntry, QueryParams, RouteKind, Routes};

// Re-export public types
pub use error::{BeautifierError, Result, TokenRejection};
pub use types::{DetailsRequest, ParsedUrl, Refinement, RouteRequest, SearchRequest, Sort, ValueRefinement};

// Re-export codecs
pub use codec::{CodecFactory, Codecs, RouteHandler, UrlGenerator, UrlParser};

// Re-export token and URL utilities
pub use tokens::{
    decode_array, decode_chars, decode_pair, encode_array, encode_chars, encode_pair,
    escape_separators, split_except_escaped, unescape, ArrayValue,
};
pub use uri::{build_query, parse_query, split_url, UrlParts};

// Module declarations
pub mod beautifier;
pub mod codec;
pub mod config;
pub mod error;
pub mod tokens;
pub mod types;
pub mod uri;
