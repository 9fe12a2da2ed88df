//! Core data types for docsearch.
//!
//! This module defines the data structures shared across the
//! application: occurrence locations, search hits, build statistics,
//! and the request/response types used by the adapters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Persisted value of [`Location::Title`]
pub const TITLE_SENTINEL: i64 = -1;

/// Where a term occurred inside a document
///
/// Persisted as a signed integer: `-1` for a title match, the
/// zero-based line number otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Location {
    /// The file's base name matched, not its body
    Title,
    /// Zero-based body line
    Line(usize),
}

impl Location {
    /// Zero-based line number, if this is a body occurrence
    pub fn line(&self) -> Option<usize> {
        match self {
            Location::Title => None,
            Location::Line(n) => Some(*n),
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, Location::Title)
    }
}

impl From<Location> for i64 {
    fn from(location: Location) -> Self {
        match location {
            Location::Title => TITLE_SENTINEL,
            Location::Line(n) => n as i64,
        }
    }
}

impl TryFrom<i64> for Location {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            TITLE_SENTINEL => Ok(Location::Title),
            n if n >= 0 => Ok(Location::Line(n as usize)),
            n => Err(format!("invalid location {n}: expected -1 or a line number")),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Title => write!(f, "title"),
            Location::Line(n) => write!(f, "line {}", n + 1),
        }
    }
}

/// A single (document, location) pair recorded for a term
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    /// Source file path
    pub path: PathBuf,

    /// Title match or body line
    pub location: Location,
}

impl Occurrence {
    pub fn title(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            location: Location::Title,
        }
    }

    pub fn line(path: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            path: path.into(),
            location: Location::Line(line),
        }
    }
}

/// Statistics from an index build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of files processed (equals the number of input files)
    pub files_indexed: usize,

    /// Files indexed by title only (title-only formats)
    pub files_title_only: usize,

    /// Files whose extraction failed and were downgraded to title-only
    pub extraction_failures: usize,

    /// Distinct terms in the index
    pub terms: usize,

    /// Total occurrences across all terms
    pub occurrences: usize,

    /// Build duration in milliseconds
    pub duration_ms: u64,
}

/// How one query term was resolved against the vocabulary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "snake_case")]
pub enum TermMatch {
    /// The term is a vocabulary key
    Exact { term: String },

    /// The term missed; `closest` was the best candidate above the cutoff
    Approximate {
        term: String,
        closest: String,
        ratio: f64,
    },

    /// No exact key and no candidate above the cutoff
    Unmatched { term: String },
}

impl TermMatch {
    /// The vocabulary key whose occurrences were used, if any
    pub fn resolved(&self) -> Option<&str> {
        match self {
            TermMatch::Exact { term } => Some(term),
            TermMatch::Approximate { closest, .. } => Some(closest),
            TermMatch::Unmatched { .. } => None,
        }
    }
}

/// One search result entry (file + line or file + title match)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Source file path
    pub path: PathBuf,

    /// Title match or zero-based body line
    pub location: Location,

    /// One-based line number for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Raw line text from the line map
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,

    /// Vocabulary term that produced this hit
    pub matched_term: String,
}

/// Request to search the document index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,

    /// Maximum hits to return (optional)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response from a document index search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Per query term resolution
    pub terms: Vec<TermMatch>,

    /// Matching occurrences, ordered by path then location
    pub hits: Vec<SearchHit>,

    /// Total distinct hits before any limit was applied
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}

/// Response from a fixed-corpus search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusSearchResponse {
    /// Original query string
    pub query: String,

    /// Per query term resolution
    pub terms: Vec<TermMatch>,

    /// Matching document ids with their full text
    pub documents: BTreeMap<u64, String>,
}

/// Request to rebuild the index from a directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRequest {
    /// Root directory to crawl
    pub path: String,
}

/// Response after a background build was accepted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexAccepted {
    /// Canonical root being indexed
    pub path: String,

    /// Number of files discovered for this build
    pub files: usize,
}

/// Lifecycle of the published index as seen by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexState {
    /// No index loaded or built yet
    Idle,
    /// A background build is running
    Building,
    /// A complete index is published
    Ready,
}

/// Index status reported by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStatus {
    pub state: IndexState,

    /// Fraction of the running (or last) build, 0.0..=1.0
    pub progress: f64,

    /// Documents in the published index
    pub document_count: usize,

    /// Published index version (0 = nothing published)
    pub version: u64,

    /// Root of the published index, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
