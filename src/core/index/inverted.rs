//! Inverted index and line map.
//!
//! The inverted index maps each term to the occurrences recorded for
//! it, in file-then-line discovery order. The line map keeps the raw
//! text of every extracted body line so hits can be rendered with a
//! snippet.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::core::types::Occurrence;

/// Term -> occurrence list
///
/// Duplicated occurrences are kept as recorded. Empty terms are never
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    terms: BTreeMap<String, Vec<Occurrence>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the occurrence list of a term
    ///
    /// A missing term gets an empty list inserted. Returns `None` for
    /// the empty term, which is never indexed.
    pub fn entry_for(&mut self, term: impl Into<String>) -> Option<&mut Vec<Occurrence>> {
        let term = term.into();
        if term.is_empty() {
            return None;
        }
        Some(self.terms.entry(term).or_default())
    }

    /// Append one occurrence; returns false if the term was empty
    pub fn push(&mut self, term: impl Into<String>, occurrence: Occurrence) -> bool {
        match self.entry_for(term) {
            Some(list) => {
                list.push(occurrence);
                true
            }
            None => false,
        }
    }

    /// Occurrences of an exact term
    pub fn get(&self, term: &str) -> Option<&[Occurrence]> {
        self.terms.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// All terms, in lexicographic order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Iterate over (term, occurrences)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Occurrence])> {
        self.terms.iter().map(|(t, o)| (t.as_str(), o.as_slice()))
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total number of occurrences across all terms
    pub fn occurrence_count(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }

    /// Distinct documents referenced by any occurrence
    pub fn documents(&self) -> BTreeSet<&Path> {
        self.terms
            .values()
            .flatten()
            .map(|o| o.path.as_path())
            .collect()
    }

    /// Whether both indexes hold the same occurrences per term,
    /// ignoring order and duplicates
    pub fn same_contents(&self, other: &InvertedIndex) -> bool {
        fn as_sets(index: &InvertedIndex) -> BTreeMap<&str, BTreeSet<&Occurrence>> {
            index
                .terms
                .iter()
                .map(|(t, o)| (t.as_str(), o.iter().collect()))
                .collect()
        }
        as_sets(self) == as_sets(other)
    }

    /// Check invariants of a deserialized index
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.terms.contains_key("") {
            return Err("index contains an empty term".to_string());
        }
        Ok(())
    }
}

/// Document -> line number -> raw line text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineMap {
    documents: BTreeMap<PathBuf, BTreeMap<usize, String>>,
}

impl LineMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the raw text of a body line
    pub fn insert(&mut self, path: &Path, line: usize, text: impl Into<String>) {
        self.documents
            .entry(path.to_path_buf())
            .or_default()
            .insert(line, text.into());
    }

    /// Raw text of one line
    pub fn line(&self, path: &Path, line: usize) -> Option<&str> {
        self.documents
            .get(path)
            .and_then(|lines| lines.get(&line))
            .map(String::as_str)
    }

    /// All recorded lines of a document
    pub fn document(&self, path: &Path) -> Option<&BTreeMap<usize, String>> {
        self.documents.get(path)
    }

    /// Number of documents with recorded lines
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
