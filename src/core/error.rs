//! Error types and error handling for docsearch.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific mapping (HTTP status codes) is
//! handled in the adapter modules.

use thiserror::Error;

/// Result type alias for docsearch operations
pub type Result<T> = std::result::Result<T, DocSearchError>;

/// Main error type for docsearch
#[derive(Error, Debug)]
pub enum DocSearchError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Index not ready: {0}")]
    IndexNotReady(String),

    #[error("Indexing already in progress (started for {0})")]
    IndexingInProgress(String),

    #[error("Index build failed: {0}")]
    BuildFailed(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("No corpus configured: {0}")]
    CorpusNotConfigured(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),
}

impl DocSearchError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocSearchError::InvalidPath(_)
                | DocSearchError::IndexNotReady(_)
                | DocSearchError::CorpusNotConfigured(_)
        )
    }

    /// Check if this is a conflict error (a build is already running)
    pub fn is_conflict(&self) -> bool {
        matches!(self, DocSearchError::IndexingInProgress(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            DocSearchError::InvalidQuery(_) | DocSearchError::ConfigError(_)
        )
    }
}
