//! File discovery with an extension whitelist.
//!
//! Traverses directory trees and keeps files whose extension is on
//! the whitelist. Handles errors gracefully (permission denied,
//! broken links, etc.) by omitting the affected path.

use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{DocSearchError, Result};

/// File system walker that discovers indexable documents
pub struct FileWalker {
    /// Lower-cased extensions to include, without the dot
    extensions: BTreeSet<String>,

    /// Patterns to exclude (e.g., "**/.git/**", "**/~$*")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

/// Normalize a configured extension (`".DOCX"` -> `"docx"`)
pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Lower-cased extension of a path, if any
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

impl FileWalker {
    /// Create a new file walker
    ///
    /// # Arguments
    ///
    /// * `extensions` - File extensions to include (`"docx"` or `".docx"`)
    /// * `exclude_patterns` - Glob patterns for paths to exclude
    /// * `max_file_size_mb` - Maximum file size in megabytes
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if patterns are
    /// invalid
    pub fn new(
        extensions: Vec<String>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
    ) -> Result<Self> {
        let extensions: BTreeSet<String> = extensions
            .iter()
            .map(|e| normalize_extension(e))
            .filter(|e| !e.is_empty())
            .collect();

        if extensions.is_empty() {
            return Err(DocSearchError::ConfigError(
                "No file extensions to discover".to_string(),
            ));
        }

        let exclude = exclude_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    DocSearchError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            extensions,
            exclude_patterns: exclude,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Collect all indexable files under a directory
    ///
    /// Recurses the full subtree. Unreadable entries are logged and
    /// omitted. The result is sorted by path, so it is deterministic
    /// for a fixed filesystem state.
    pub fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_process_entry(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();

                    if !self.matches(path) {
                        continue;
                    }

                    match entry.metadata() {
                        Ok(metadata) if metadata.len() > self.max_file_size_bytes => {
                            tracing::debug!(
                                "Skipping large file: {:?} ({} bytes)",
                                path,
                                metadata.len()
                            );
                        }
                        Ok(_) => files.push(path.to_path_buf()),
                        Err(e) => tracing::warn!("Skipping {:?}: {}", path, e),
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        files.sort();
        files
    }

    /// Determine if a directory entry should be descended into
    ///
    /// Filters out hidden directories and excluded patterns.
    /// Never filters the root directory itself.
    fn should_process_entry(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        if path == root {
            return true;
        }

        if entry.file_type().is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }

            for pattern in &self.exclude_patterns {
                if pattern.matches_path(path) {
                    tracing::debug!("Skipping excluded directory: {:?}", path);
                    return false;
                }
            }
        }

        true
    }

    /// Check a file path against the whitelist and exclude patterns
    fn matches(&self, path: &Path) -> bool {
        // Paths that are not UTF-8 cannot be persisted as index keys
        let path_str = match path.to_str() {
            Some(s) => s,
            None => return false,
        };

        let whitelisted = extension_of(path)
            .map(|ext| self.extensions.contains(&ext))
            .unwrap_or(false);

        if !whitelisted {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| p.matches(path_str) || p.matches_path(path))
    }
}
