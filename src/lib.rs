//! docsearch - Inverted-index search over office documents
//!
//! Crawls a directory of `.docx`, `.pptx`, `.xlsx` and `.pdf` files,
//! builds a term -> occurrence index with per-line snippets, and
//! answers free-text queries with exact lookups plus a fuzzy
//! fallback for misspelled terms. A second, fixed in-memory corpus
//! is searchable the same way by document id.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg, tokenizer
//!   - indexer (discovery, extraction, background builds)
//!   - index (inverted index, line map, versioned handle)
//!   - storage (JSON artifacts, fixed corpus)
//!   - search (approximate matcher, query engine)
//!   - services (unified service container)
//!
//! - **http**: HTML form + JSON adapter (depends on core)
//!   - handlers, middleware, html
//!
//! - **cli**: clap adapter (depends on core)
//!   - commands, output

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{DocSearchError, Result};
pub use core::services::Services;
pub use core::types::*;
