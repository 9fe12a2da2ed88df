//! Published index handle.
//!
//! Builders construct a complete [`IndexSnapshot`] off to the side and
//! publish it in a single pointer swap. Readers clone the current
//! `Arc` and keep a consistent version for as long as they hold it,
//! so a query never observes a partially built index.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::index::{InvertedIndex, LineMap};
use crate::core::indexer::BuildOutput;

/// One complete, immutable index version
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    pub index: InvertedIndex,
    pub line_map: LineMap,

    /// Number of files the build processed
    pub document_count: usize,

    /// Directory the index was built from, if known
    pub root: Option<PathBuf>,

    /// When the build finished, if known
    pub built_at: Option<DateTime<Utc>>,
}

impl IndexSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a finished build
    pub fn from_build(output: BuildOutput, root: Option<PathBuf>) -> Self {
        Self {
            index: output.index,
            line_map: output.line_map,
            document_count: output.document_count,
            root,
            built_at: Some(Utc::now()),
        }
    }
}

struct Published {
    version: u64,
    snapshot: Arc<IndexSnapshot>,
}

/// Shared, versioned pointer to the current index
pub struct IndexHandle {
    current: RwLock<Published>,
}

impl IndexHandle {
    /// Create a handle holding an empty, unpublished index (version 0)
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Published {
                version: 0,
                snapshot: Arc::new(IndexSnapshot::empty()),
            }),
        }
    }

    /// The currently published snapshot; stays valid after later publishes
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current.read().snapshot)
    }

    /// Current version number (0 = nothing published yet)
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Current snapshot together with its version
    pub fn current(&self) -> (u64, Arc<IndexSnapshot>) {
        let guard = self.current.read();
        (guard.version, Arc::clone(&guard.snapshot))
    }

    /// Replace the current index; returns the new version
    pub fn publish(&self, snapshot: IndexSnapshot) -> u64 {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.current.write();
        guard.version += 1;
        guard.snapshot = snapshot;
        tracing::debug!(
            "Published index version {} ({} terms)",
            guard.version,
            guard.snapshot.index.len()
        );
        guard.version
    }
}

impl Default for IndexHandle {
    fn default() -> Self {
        Self::new()
    }
}
