//! Search route codec.
//!
//! With reference keys the path is the free-text query, then the mapped
//! refinement values in canonical order, then one segment of reference keys:
//!
//! ```text
//! /shoe/blue/Nike/qcb?refinements=price:20..40&page=2
//! ```
//!
//! Without reference keys refinements are written as `value/field` pairs in
//! request order, after an optional query segment.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::codec::handler::{decode_plain_pairs, decode_segments, encode_segments, RouteHandler};
use crate::codec::{UrlGenerator, UrlParser};
use crate::config::Configuration;
use crate::error::Result;
use crate::tokens::{decode_array, decode_pair, encode_array, encode_pair, ArrayValue};
use crate::types::{Refinement, SearchRequest, Sort};
use crate::uri::{build_query, parse_query, split_url};

/// Builds search URLs.
#[derive(Debug, Clone)]
pub struct SearchGenerator {
    handler: RouteHandler,
}

/// Parses search URLs.
#[derive(Debug, Clone)]
pub struct SearchParser {
    handler: RouteHandler,
}

impl SearchGenerator {
    /// Create a generator over the shared handler.
    pub fn new(handler: RouteHandler) -> Self {
        Self { handler }
    }

    /// Place refinements in the path and return the ones left over.
    fn place_refinements(
        &self,
        path: &mut Vec<String>,
        pool: Vec<Refinement>,
        has_query: bool,
    ) -> Result<Vec<Refinement>> {
        if !self.handler.config().use_reference_keys {
            let (values, ranges): (Vec<_>, Vec<_>) =
                pool.into_iter().partition(|refinement| !refinement.is_range());
            for refinement in values {
                if let Refinement::Value { field, value } = refinement {
                    path.push(value);
                    path.push(field);
                }
            }
            return Ok(ranges);
        }

        let extraction = self.handler.extract_reference_keys(pool)?;
        path.extend(extraction.values);

        let mut reference = String::new();
        if has_query {
            reference.push(self.handler.query_token());
        }
        reference.push_str(&extraction.keys);
        if !reference.is_empty() {
            path.push(reference);
        }

        Ok(extraction.remaining)
    }
}

impl UrlGenerator for SearchGenerator {
    type Input = SearchRequest;

    fn build(&self, request: &SearchRequest) -> Result<String> {
        let config = self.handler.config();

        // Step 1: path starts with the query, when there is one
        let query = request.query.as_deref().filter(|q| !q.is_empty());
        let mut path: Vec<String> = query.map(str::to_string).into_iter().collect();

        // Step 2: refinements go to the path where the scheme allows it
        let remaining =
            self.place_refinements(&mut path, request.refinements.clone(), query.is_some())?;

        // Step 3: everything else is a query parameter
        let params = query_params(config, request, remaining);

        // Step 4: assemble
        let mut url = encode_segments(&path);
        if let Some(suffix) = config.suffix.as_deref().filter(|s| !s.is_empty()) {
            if !url.ends_with('/') {
                url.push('/');
            }
            url.push_str(suffix);
        }
        if !params.is_empty() {
            url.push('?');
            url.push_str(&build_query(&params));
        }

        trace!(segments = path.len(), params = params.len(), "built search url");
        Ok(url.replace("%20", "-").replace(' ', "-"))
    }
}

fn query_params(
    config: &Configuration,
    request: &SearchRequest,
    mut remaining: Vec<Refinement>,
) -> BTreeMap<String, String> {
    let names = &config.params;
    let mut params = BTreeMap::new();

    if !remaining.is_empty() {
        remaining.sort_by(compare_refinements);
        let entries: Vec<(String, ArrayValue)> = remaining
            .into_iter()
            .map(|refinement| match refinement {
                Refinement::Value { field, value } => (field, ArrayValue::Scalar(value)),
                Refinement::Range { field, low, high } => (field, ArrayValue::Range(low, high)),
            })
            .collect();
        params.insert(names.refinements.clone(), encode_array(&entries));
    }
    if let Some(page_size) = request.page_size {
        params.insert(names.page_size.clone(), page_size.to_string());
    }
    if let Some(page) = request.page {
        params.insert(names.page.clone(), page.to_string());
    }
    if let Some(sort) = &request.sort {
        params.insert(
            names.sort.clone(),
            encode_pair(&sort.field, &sort.descending.to_string()),
        );
    }
    if let Some(collection) = request.collection.as_deref().filter(|c| !c.is_empty()) {
        params.insert(names.collection.clone(), collection.to_string());
    }

    params
}

/// Canonical order of query-string refinements: by field, then ranges (by
/// bounds) before values (by value).
fn compare_refinements(a: &Refinement, b: &Refinement) -> Ordering {
    a.field().cmp(b.field()).then_with(|| match (a, b) {
        (Refinement::Range { low: al, high: ah, .. }, Refinement::Range { low: bl, high: bh, .. }) => al
            .partial_cmp(bl)
            .unwrap_or(Ordering::Equal)
            .then_with(|| ah.partial_cmp(bh).unwrap_or(Ordering::Equal)),
        (Refinement::Value { value: av, .. }, Refinement::Value { value: bv, .. }) => av.cmp(bv),
        (Refinement::Range { .. }, Refinement::Value { .. }) => Ordering::Less,
        (Refinement::Value { .. }, Refinement::Range { .. }) => Ordering::Greater,
    })
}

impl SearchParser {
    /// Create a parser over the shared handler.
    pub fn new(handler: RouteHandler) -> Self {
        Self { handler }
    }

    fn strip_suffix<'a>(&self, path: &'a str) -> &'a str {
        match self.handler.config().suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => path
                .strip_suffix(suffix)
                .filter(|rest| rest.is_empty() || rest.ends_with('/'))
                .unwrap_or(path),
            _ => path,
        }
    }

    fn apply_query_params(&self, request: &mut SearchRequest, query: &str) -> Result<()> {
        let names = &self.handler.config().params;
        let params: HashMap<String, String> = parse_query(query);

        if let Some(encoded) = params.get(&names.refinements) {
            for (field, value) in decode_array(encoded)? {
                request.refinements.push(match value {
                    ArrayValue::Scalar(value) => Refinement::Value { field, value },
                    ArrayValue::Range(low, high) => Refinement::Range { field, low, high },
                });
            }
        }
        request.page_size = params.get(&names.page_size).and_then(|v| parse_count(v));
        request.page = params.get(&names.page).and_then(|v| parse_count(v));
        if let Some(encoded) = params.get(&names.sort) {
            let (field, descending) = decode_pair(encoded)?;
            request.sort = Some(Sort::new(field, descending == "true"));
        }
        request.collection = params.get(&names.collection).cloned();

        Ok(())
    }
}

fn parse_count(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|count| *count != 0)
}

impl UrlParser for SearchParser {
    type Output = SearchRequest;

    fn parse(&self, url: &str) -> Result<SearchRequest> {
        let parts = split_url(url)?;
        let mut segments = decode_segments(self.strip_suffix(&parts.path))?;
        let mut request = SearchRequest::default();

        if self.handler.config().use_reference_keys {
            let decoded = self.handler.decode_reference_keys(segments, true)?;
            request.query = decoded.query;
            request.refinements = decoded.refinements.into_iter().map(Refinement::from).collect();
        } else {
            if segments.len() % 2 == 1 {
                request.query = Some(segments.remove(0));
            }
            request.refinements = decode_plain_pairs(segments)?
                .into_iter()
                .map(Refinement::from)
                .collect();
        }

        if let Some(query) = parts.query.as_deref() {
            self.apply_query_params(&mut request, query)?;
        }

        trace!(refinements = request.refinements.len(), "parsed search url");
        Ok(request)
    }
}
