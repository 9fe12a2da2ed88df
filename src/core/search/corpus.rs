//! Search over the fixed document corpus.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::config::SearchConfig;
use crate::core::search::engine::resolve_term;
use crate::core::storage::{Corpus, CorpusIndex};
use crate::core::tokenizer::{query_terms, QueryMode};
use crate::core::types::{CorpusSearchResponse, TermMatch};

/// Corpus documents together with their term index
pub struct CorpusSearch {
    corpus: Corpus,
    index: CorpusIndex,
    cutoff: f64,
    query_mode: QueryMode,
}

impl CorpusSearch {
    pub fn new(corpus: Corpus, index: CorpusIndex, config: &SearchConfig) -> Self {
        Self {
            corpus,
            index,
            cutoff: config.cutoff,
            query_mode: config.query_mode,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Ids matching any query term (exact or approximate), with text
    ///
    /// Ids in the index but missing from the corpus are dropped.
    pub fn search(&self, query: &str) -> CorpusSearchResponse {
        let terms = query_terms(query, self.query_mode);

        let resolved: Vec<TermMatch> = terms
            .iter()
            .map(|term| {
                resolve_term(
                    term,
                    |t| self.index.contains(t),
                    self.index.vocabulary(),
                    self.cutoff,
                )
            })
            .collect();

        let ids: BTreeSet<u64> = resolved
            .iter()
            .filter_map(TermMatch::resolved)
            .filter_map(|key| self.index.get(key))
            .flatten()
            .copied()
            .collect();

        let documents: BTreeMap<u64, String> = ids
            .into_iter()
            .filter_map(|id| self.corpus.get(id).map(|text| (id, text.to_string())))
            .collect();

        tracing::debug!("Corpus query '{}' -> {} documents", query, documents.len());

        CorpusSearchResponse {
            query: query.to_string(),
            terms: resolved,
            documents,
        }
    }
}
