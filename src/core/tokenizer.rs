//! Term extraction shared by indexing and querying.
//!
//! A term is a maximal run of Unicode letters (`\p{L}`), lower-cased.
//! Digits, punctuation and whitespace all act as separators, so
//! `"Q3-Report_v2"` yields `q`, `report`, `v`. No stemming and no
//! stop-word removal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

static LETTER_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+").unwrap());

/// Lazy iterator over the terms of a text
///
/// Cloning restarts from the clone point; calling [`tokenize`] again
/// restarts from the beginning.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let found = LETTER_RUN.find_at(self.text, self.pos)?;
        self.pos = found.end();
        Some(found.as_str().to_lowercase())
    }
}

/// Split text into normalized terms
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Terms of a file's base name without its extension
///
/// `"reports/Quarterly Report.docx"` yields `quarterly`, `report`.
/// Non UTF-8 names yield nothing.
pub fn title_terms(path: &Path) -> Tokens<'_> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    tokenize(stem)
}

/// How free-text queries are split into lookup terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Same letter-run tokenizer as indexing (`"beta,"` -> `beta`)
    #[default]
    Letters,
    /// Lower-case and split on whitespace only (`"beta,"` -> `beta,`)
    Whitespace,
}

impl std::str::FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letters" => Ok(QueryMode::Letters),
            "whitespace" => Ok(QueryMode::Whitespace),
            other => Err(format!(
                "unknown query mode '{other}' (expected 'letters' or 'whitespace')"
            )),
        }
    }
}

/// Split a query into lookup terms
///
/// Order follows the query; repeated terms are kept once.
pub fn query_terms(query: &str, mode: QueryMode) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();
    let mut push = |term: String| {
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    };

    match mode {
        QueryMode::Letters => tokenize(query).for_each(&mut push),
        QueryMode::Whitespace => query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .for_each(&mut push),
    }

    terms
}
