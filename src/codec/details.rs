//! Item-detail route codec.
//!
//! `/{title}/{refinements...}/{id}`: the title and id bracket the same
//! reference-key or `value/field` refinement segments the search route uses.
//! Detail refinements are always discrete values.

use tracing::trace;

use crate::codec::handler::{decode_plain_pairs, decode_segments, encode_segments, RouteHandler};
use crate::codec::{UrlGenerator, UrlParser};
use crate::error::{BeautifierError, Result};
use crate::types::{DetailsRequest, Refinement};
use crate::uri::split_url;

/// Builds item-detail URLs.
#[derive(Debug, Clone)]
pub struct DetailsGenerator {
    handler: RouteHandler,
}

/// Parses item-detail URLs.
#[derive(Debug, Clone)]
pub struct DetailsParser {
    handler: RouteHandler,
}

impl DetailsGenerator {
    /// Create a generator over the shared handler.
    pub fn new(handler: RouteHandler) -> Self {
        Self { handler }
    }
}

impl UrlGenerator for DetailsGenerator {
    type Input = DetailsRequest;

    fn build(&self, request: &DetailsRequest) -> Result<String> {
        let mut path = vec![request.title.clone()];

        if self.handler.config().use_reference_keys {
            let pool: Vec<Refinement> = request.refinements.iter().cloned().map(Into::into).collect();
            let extraction = self.handler.extract_reference_keys(pool)?;
            if let Some(unmapped) = extraction.remaining.first() {
                return Err(BeautifierError::NoMapping(unmapped.field().to_string()));
            }
            path.extend(extraction.values);
            if !extraction.keys.is_empty() {
                path.push(extraction.keys);
            }
        } else {
            for refinement in &request.refinements {
                path.push(refinement.value.clone());
                path.push(refinement.field.clone());
            }
        }

        path.push(request.id.clone());
        Ok(encode_segments(&path))
    }
}

impl DetailsParser {
    /// Create a parser over the shared handler.
    pub fn new(handler: RouteHandler) -> Self {
        Self { handler }
    }
}

impl UrlParser for DetailsParser {
    type Output = DetailsRequest;

    fn parse(&self, url: &str) -> Result<DetailsRequest> {
        let parts = split_url(url)?;
        let mut segments = decode_segments(&parts.path)?;

        if segments.len() < 2 {
            return Err(BeautifierError::TooFewParts(segments.len()));
        }
        let id = segments.pop().unwrap_or_default();
        let title = segments.remove(0);

        let refinements = if self.handler.config().use_reference_keys {
            self.handler.decode_reference_keys(segments, false)?.refinements
        } else {
            decode_plain_pairs(segments)?
        };

        trace!(%id, refinements = refinements.len(), "parsed details url");
        Ok(DetailsRequest {
            id,
            title,
            refinements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use crate::types::ValueRefinement;

    fn codec(use_reference_keys: bool) -> (DetailsGenerator, DetailsParser) {
        let config = Configuration::new()
            .with_mapping("c", "colour")
            .with_mapping("s", "size")
            .with_reference_keys(use_reference_keys);
        let mapping = vec![('c', "colour".to_string()), ('s', "size".to_string())];
        let handler = RouteHandler::new(config, 'q', mapping);
        (DetailsGenerator::new(handler.clone()), DetailsParser::new(handler))
    }

    #[test]
    fn test_build_without_refinements() {
        let (generator, parser) = codec(true);
        let request = DetailsRequest::new("293014", "dress");

        assert_eq!(generator.build(&request).unwrap(), "/dress/293014");
        assert_eq!(parser.parse("/dress/293014").unwrap(), request);
    }

    #[test]
    fn test_reference_keys_round_trip() {
        let (generator, parser) = codec(true);
        let request = DetailsRequest {
            id: "293014".to_string(),
            title: "summer dress".to_string(),
            refinements: vec![ValueRefinement::new("size", "M"), ValueRefinement::new("colour", "red")],
        };

        let url = generator.build(&request).unwrap();
        assert_eq!(url, "/summer-dress/red/M/cs/293014");

        let parsed = parser.parse(&url).unwrap();
        assert_eq!(
            parsed.refinements,
            vec![ValueRefinement::new("colour", "red"), ValueRefinement::new("size", "M")]
        );
        assert_eq!(parsed.title, "summer dress");
    }

    #[test]
    fn test_plain_round_trip() {
        let (generator, parser) = codec(false);
        let request = DetailsRequest {
            id: "1".to_string(),
            title: "dress".to_string(),
            refinements: vec![ValueRefinement::new("size", "M")],
        };

        let url = generator.build(&request).unwrap();
        assert_eq!(url, "/dress/M/size/1");
        assert_eq!(parser.parse(&url).unwrap(), request);
    }

    #[test]
    fn test_unmapped_refinement_rejected() {
        let (generator, _) = codec(true);
        let mut request = DetailsRequest::new("1", "dress");
        request.refinements.push(ValueRefinement::new("material", "silk"));

        assert_eq!(
            generator.build(&request),
            Err(BeautifierError::NoMapping("material".to_string()))
        );
    }

    #[test]
    fn test_too_few_parts() {
        let (_, parser) = codec(true);
        assert_eq!(parser.parse("/dress"), Err(BeautifierError::TooFewParts(1)));
        assert_eq!(parser.parse("/"), Err(BeautifierError::TooFewParts(0)));
    }

    #[test]
    fn test_odd_plain_middle() {
        let (_, parser) = codec(false);
        assert_eq!(
            parser.parse("/dress/M/1"),
            Err(BeautifierError::OddPathLength(1))
        );
    }

    #[test]
    fn test_query_token_not_allowed() {
        let (_, parser) = codec(true);
        assert_eq!(
            parser.parse("/dress/shoe/q/1"),
            Err(BeautifierError::UnknownToken('q'))
        );
    }
}
