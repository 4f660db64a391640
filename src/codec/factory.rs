//! Construction of the three route codec pairs.

use crate::codec::details::{DetailsGenerator, DetailsParser};
use crate::codec::handler::RouteHandler;
use crate::codec::navigation::{NavigationGenerator, NavigationParser};
use crate::codec::search::{SearchGenerator, SearchParser};

/// A parser and the generator that inverts it.
#[derive(Debug, Clone)]
pub struct CodecPair<P, G> {
    /// URL to request.
    pub parser: P,
    /// Request to URL.
    pub generator: G,
}

/// Codec pairs for every route, bound to one shared handler.
#[derive(Debug, Clone)]
pub struct Codecs {
    /// Search route codec.
    pub search: CodecPair<SearchParser, SearchGenerator>,
    /// Item-detail route codec.
    pub details: CodecPair<DetailsParser, DetailsGenerator>,
    /// Navigation route codec.
    pub navigation: CodecPair<NavigationParser, NavigationGenerator>,
}

/// Builds [`Codecs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecFactory;

impl CodecFactory {
    /// Create all route codecs over `handler`.
    pub fn create(handler: &RouteHandler) -> Codecs {
        Codecs {
            search: CodecPair {
                parser: SearchParser::new(handler.clone()),
                generator: SearchGenerator::new(handler.clone()),
            },
            details: CodecPair {
                parser: DetailsParser::new(handler.clone()),
                generator: DetailsGenerator::new(handler.clone()),
            },
            navigation: CodecPair {
                parser: NavigationParser::new(handler.clone()),
                generator: NavigationGenerator::new(handler.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{UrlGenerator, UrlParser};
    use crate::config::Configuration;
    use crate::types::SearchRequest;

    #[test]
    fn test_codecs_share_configuration() {
        let config = Configuration::new()
            .with_mapping("c", "colour")
            .with_navigation("Apples", serde_json::json!(1));
        let handler = RouteHandler::new(config, 'q', vec![('c', "colour".to_string())]);
        let codecs = CodecFactory::create(&handler);

        let url = codecs.search.generator.build(&SearchRequest::with_query("pear")).unwrap();
        assert_eq!(url, "/pear/q");
        assert_eq!(codecs.search.parser.parse(&url).unwrap().query.as_deref(), Some("pear"));
        assert_eq!(codecs.navigation.generator.build("Apples").unwrap(), "/Apples");
    }
}
