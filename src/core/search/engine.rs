//! Query engine over the published document index.
//!
//! Each query term is looked up exactly; a miss falls back to the
//! closest vocabulary term above the similarity cutoff. Hits are the
//! union of the resolved terms' occurrences, without duplicates,
//! ordered by path then location.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::core::config::SearchConfig;
use crate::core::error::{DocSearchError, Result};
use crate::core::index::{IndexHandle, IndexSnapshot};
use crate::core::search::fuzzy::closest_term;
use crate::core::tokenizer::{query_terms, QueryMode};
use crate::core::types::{Occurrence, SearchHit, SearchRequest, SearchResponse, TermMatch};

/// Resolve one query term against a vocabulary
///
/// `contains` answers exact lookups; `vocabulary` is only walked on a
/// miss.
pub(crate) fn resolve_term<'a, I>(
    term: &str,
    contains: impl Fn(&str) -> bool,
    vocabulary: I,
    cutoff: f64,
) -> TermMatch
where
    I: IntoIterator<Item = &'a str>,
{
    if contains(term) {
        return TermMatch::Exact {
            term: term.to_string(),
        };
    }

    match closest_term(term, vocabulary, cutoff) {
        Some((closest, ratio)) => {
            tracing::debug!("'{}' resolved to '{}' (ratio {:.3})", term, closest, ratio);
            TermMatch::Approximate {
                term: term.to_string(),
                closest: closest.to_string(),
                ratio,
            }
        }
        None => TermMatch::Unmatched {
            term: term.to_string(),
        },
    }
}

/// Stateless search over whatever index the handle currently publishes
pub struct SearchService {
    handle: Arc<IndexHandle>,
    cutoff: f64,
    query_mode: QueryMode,
    max_query_length: usize,
    max_results: usize,
}

impl SearchService {
    /// Create a new search service
    ///
    /// # Arguments
    ///
    /// * `handle` - Published index to query
    /// * `config` - Cutoff, query splitting and limits
    pub fn new(handle: Arc<IndexHandle>, config: &SearchConfig) -> Self {
        Self {
            handle,
            cutoff: config.cutoff,
            query_mode: config.query_mode,
            max_query_length: config.max_query_length,
            max_results: config.max_results,
        }
    }

    pub fn query_mode(&self) -> QueryMode {
        self.query_mode
    }

    /// Check a raw query before it reaches the index
    pub fn validate_query(&self, query: &str) -> Result<()> {
        let length = query.chars().count();
        if length > self.max_query_length {
            return Err(DocSearchError::InvalidQuery(format!(
                "Query is {} characters long (max {})",
                length, self.max_query_length
            )));
        }
        Ok(())
    }

    /// Search the currently published index
    ///
    /// An empty query (no terms after splitting) returns an empty
    /// response without reading the index.
    pub fn search(&self, request: SearchRequest) -> Result<SearchResponse> {
        self.validate_query(&request.query)?;

        let limit = request
            .limit
            .unwrap_or(self.max_results)
            .min(self.max_results);

        let terms = query_terms(&request.query, self.query_mode);
        if terms.is_empty() {
            return Ok(SearchResponse {
                query: request.query,
                terms: Vec::new(),
                hits: Vec::new(),
                count: 0,
                duration_ms: 0,
            });
        }

        let snapshot = self.handle.snapshot();
        Ok(search_snapshot(
            &snapshot,
            request.query,
            &terms,
            self.cutoff,
            limit,
        ))
    }
}

/// Run already-split query terms against one snapshot
pub fn search_snapshot(
    snapshot: &IndexSnapshot,
    query: String,
    terms: &[String],
    cutoff: f64,
    limit: usize,
) -> SearchResponse {
    let start = Instant::now();
    let index = &snapshot.index;

    let resolved: Vec<TermMatch> = terms
        .iter()
        .map(|term| resolve_term(term, |t| index.contains(t), index.vocabulary(), cutoff))
        .collect();

    // First resolving term wins for an occurrence reached twice
    let mut union: BTreeMap<&Occurrence, &str> = BTreeMap::new();
    for key in resolved.iter().filter_map(TermMatch::resolved) {
        for occurrence in index.get(key).unwrap_or_default() {
            union.entry(occurrence).or_insert(key);
        }
    }

    let count = union.len();
    let hits: Vec<SearchHit> = union
        .into_iter()
        .take(limit)
        .map(|(occurrence, term)| {
            let line = occurrence.location.line();
            SearchHit {
                path: occurrence.path.clone(),
                location: occurrence.location,
                line: line.map(|n| n + 1),
                snippet: line
                    .and_then(|n| snapshot.line_map.line(&occurrence.path, n))
                    .map(str::to_string),
                matched_term: term.to_string(),
            }
        })
        .collect();

    let duration_ms = start.elapsed().as_millis() as u64;

    tracing::debug!(
        "Query '{}' -> {} hits ({} returned) in {}ms",
        query,
        count,
        hits.len(),
        duration_ms
    );

    SearchResponse {
        query,
        terms: resolved,
        hits,
        count,
        duration_ms,
    }
}
