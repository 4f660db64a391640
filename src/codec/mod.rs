//! Route codecs.
//!
//! Each route has a parser/generator pair:
//! - Search: query, refinements, paging, sorting and collection
//! - Details: item title and id with variant refinements
//! - Navigation: a configured category name
//!
//! All pairs share one [`RouteHandler`] and are built by the [`CodecFactory`].

pub mod details;
pub mod factory;
pub mod handler;
pub mod navigation;
pub mod search;

use crate::error::Result;

// Re-export main functionality
pub use details::{DetailsGenerator, DetailsParser};
pub use factory::{CodecFactory, Codecs};
pub use handler::RouteHandler;
pub use navigation::{NavigationGenerator, NavigationParser};
pub use search::{SearchGenerator, SearchParser};

/// Turns a route-relative URL into a structured request.
pub trait UrlParser {
    /// Structured result of parsing.
    type Output;

    /// Parse a URL with the route's mount path already removed.
    fn parse(&self, url: &str) -> Result<Self::Output>;
}

/// Turns a structured request into a route-relative URL.
pub trait UrlGenerator {
    /// Structured input to build from.
    type Input: ?Sized;

    /// Build the URL, starting with `/`, without the route's mount path.
    fn build(&self, input: &Self::Input) -> Result<String>;
}
