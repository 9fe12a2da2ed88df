//! Fixed document corpus and its persisted term index.
//!
//! A small in-memory set of `(id, text)` documents, indexed as term
//! -> set of document ids. The index is persisted as pretty-printed
//! JSON and reused on later runs; it is built and written once when
//! no readable copy exists.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::core::error::{DocSearchError, Result};
use crate::core::storage::store::{read_json, write_json_pretty};
use crate::core::tokenizer::tokenize;

pub const CORPUS_INDEX_FILE: &str = "corpus_index.json";

/// Document id -> full text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    documents: BTreeMap<u64, String>,
}

impl Corpus {
    pub fn new(documents: BTreeMap<u64, String>) -> Self {
        Self { documents }
    }

    /// Four short Korean documents about search
    pub fn demo() -> Self {
        let documents = [
            (1, "Flask는 Python으로 작성된 마이크로 웹 프레임워크입니다."),
            (2, "역색인은 정보 검색 시스템에서 자주 사용되는 기법입니다."),
            (3, "검색 엔진은 다양한 알고리즘을 사용하여 문서를 추천합니다."),
            (4, "유사도 매칭은 사용자의 오타나 변형된 표현을 처리하는데 유용합니다."),
        ]
        .into_iter()
        .map(|(id, text)| (id, text.to_string()))
        .collect();
        Self { documents }
    }

    /// Load a JSON object of `{"<id>": "<text>"}`
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DocSearchError::CorpusNotConfigured(format!(
                "Corpus file not found: {path:?}"
            )));
        }
        read_json(path)
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.documents.get(&id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.documents.iter().map(|(id, text)| (*id, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Term -> ids of the documents containing it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorpusIndex {
    terms: BTreeMap<String, BTreeSet<u64>>,
}

impl CorpusIndex {
    /// Index every document of the corpus
    pub fn build(corpus: &Corpus) -> Self {
        let mut terms: BTreeMap<String, BTreeSet<u64>> = BTreeMap::new();
        for (id, text) in corpus.iter() {
            for term in tokenize(text) {
                terms.entry(term).or_default().insert(id);
            }
        }
        Self { terms }
    }

    pub fn get(&self, term: &str) -> Option<&BTreeSet<u64>> {
        self.terms.get(term)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// All terms, in lexicographic order
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Persists a [`CorpusIndex`] under the index directory
#[derive(Debug, Clone)]
pub struct CorpusStore {
    path: PathBuf,
}

impl CorpusStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CORPUS_INDEX_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted index, or build it and persist it now
    ///
    /// An unreadable persisted index is rebuilt and overwritten.
    pub fn load_or_build(&self, corpus: &Corpus) -> Result<CorpusIndex> {
        if self.path.is_file() {
            match read_json::<CorpusIndex>(&self.path) {
                Ok(index) if !index.contains("") => {
                    tracing::debug!("Loaded corpus index from {:?}", self.path);
                    return Ok(index);
                }
                Ok(_) => tracing::warn!("Invalid corpus index {:?}, rebuilding", self.path),
                Err(e) => tracing::warn!("Unreadable corpus index {:?}: {}", self.path, e),
            }
        }

        let index = CorpusIndex::build(corpus);

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        write_json_pretty(&self.path, &index)?;

        tracing::info!(
            "Built corpus index ({} documents, {} terms) at {:?}",
            corpus.len(),
            index.len(),
            self.path
        );

        Ok(index)
    }
}
