//! Index construction.
//!
//! Coordinates the per-file indexing workflow:
//! 1. Index the file's title terms
//! 2. Extract body text (unless the format is title-only)
//! 3. Index every line and record its raw text
//! 4. Report progress

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::core::config::IndexingConfig;
use crate::core::index::{InvertedIndex, LineMap};
use crate::core::indexer::extract::{OfficeExtractor, TextExtractor};
use crate::core::indexer::walker::{extension_of, normalize_extension};
use crate::core::tokenizer::{title_terms, tokenize};
use crate::core::types::{IndexStats, Occurrence};

/// Files processed so far out of the build's total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    pub processed: usize,
    pub total: usize,
}

impl BuildProgress {
    /// Completed fraction in `[0, 1]`; an empty build is complete
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Everything a finished build produced
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub index: InvertedIndex,
    pub line_map: LineMap,

    /// Number of files processed, including title-only ones
    pub document_count: usize,

    pub stats: IndexStats,
}

/// Builds an inverted index and line map from a list of files
#[derive(Clone)]
pub struct IndexBuilder {
    extractor: Arc<dyn TextExtractor>,

    /// Lower-cased extensions whose body is never extracted
    title_only: BTreeSet<String>,
}

impl IndexBuilder {
    /// Create a new builder
    ///
    /// # Arguments
    ///
    /// * `extractor` - Source of body text
    /// * `title_only_extensions` - Extensions indexed by file name only
    pub fn new(extractor: Arc<dyn TextExtractor>, title_only_extensions: &[String]) -> Self {
        Self {
            extractor,
            title_only: title_only_extensions
                .iter()
                .map(|e| normalize_extension(e))
                .collect(),
        }
    }

    /// Builder with the Office extractor and configured title-only formats
    pub fn from_config(config: &IndexingConfig) -> Self {
        Self::new(Arc::new(OfficeExtractor::new()), &config.title_only_extensions)
    }

    fn is_title_only(&self, path: &Path) -> bool {
        extension_of(path)
            .map(|ext| self.title_only.contains(&ext))
            .unwrap_or(false)
    }

    /// Index all files, reporting progress after each one
    ///
    /// Never fails: an extraction error downgrades that file to its
    /// title terms. Progress is reported once per file and reaches
    /// `processed == total` exactly once, after the last file. An
    /// empty file list reports a single completed event.
    pub fn build(&self, files: &[PathBuf], mut on_progress: impl FnMut(BuildProgress)) -> BuildOutput {
        let start = Instant::now();
        let total = files.len();
        let mut output = BuildOutput::default();

        tracing::info!("Building index over {} files", total);

        if total == 0 {
            on_progress(BuildProgress {
                processed: 0,
                total: 0,
            });
        }

        for (idx, path) in files.iter().enumerate() {
            self.index_file(path, &mut output);

            if (idx + 1) % 100 == 0 {
                tracing::info!("Progress: {}/{} files processed", idx + 1, total);
            }
            on_progress(BuildProgress {
                processed: idx + 1,
                total,
            });
        }

        output.document_count = total;
        output.stats.files_indexed = total;
        output.stats.terms = output.index.len();
        output.stats.occurrences = output.index.occurrence_count();
        output.stats.duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} files ({} title-only, {} extraction failures), \
             {} terms, {} occurrences in {}ms",
            output.stats.files_indexed,
            output.stats.files_title_only,
            output.stats.extraction_failures,
            output.stats.terms,
            output.stats.occurrences,
            output.stats.duration_ms
        );

        output
    }

    fn index_file(&self, path: &Path, output: &mut BuildOutput) {
        for term in title_terms(path) {
            output.index.push(term, Occurrence::title(path));
        }

        if self.is_title_only(path) {
            output.stats.files_title_only += 1;
            return;
        }

        let text = match self.extractor.extract(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("No text from {:?}: {}", path, e);
                output.stats.extraction_failures += 1;
                return;
            }
        };

        if text.is_empty() {
            return;
        }

        for (n, line) in text.split('\n').enumerate() {
            for term in tokenize(line) {
                output.index.push(term, Occurrence::line(path, n));
            }
            output.line_map.insert(path, n, line);
        }
    }
}

impl std::fmt::Debug for IndexBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexBuilder")
            .field("title_only", &self.title_only)
            .finish_non_exhaustive()
    }
}
