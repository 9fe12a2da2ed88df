//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of the adapters (HTTP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **tokenizer**: Term extraction
//! - **indexer**: File discovery, text extraction, index builds
//! - **index**: Inverted index, line map, published handle
//! - **storage**: Persisted artifacts and the fixed corpus
//! - **search**: Approximate matching and query resolution
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod index;
pub mod indexer;
pub mod search;
pub mod services;
pub mod storage;
pub mod tokenizer;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{DocSearchError, Result};
pub use services::Services;
