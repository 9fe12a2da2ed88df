//! Persisted index artifacts.
//!
//! The index and the line map are stored as two JSON files, plus an
//! informational `meta.json`. Both artifacts must be present and
//! parse for a load to succeed; anything else is treated as "no
//! persisted index" so the caller can decide to rebuild.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::{DocSearchError, Result};
use crate::core::index::{IndexSnapshot, InvertedIndex, LineMap};

pub const SCHEMA_VERSION: u32 = 1;

pub const INDEX_FILE: &str = "index.json";
pub const LINE_MAP_FILE: &str = "line_map.json";
pub const META_FILE: &str = "meta.json";

/// Summary of a persisted index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub schema_version: u32,
    pub root: Option<PathBuf>,
    pub document_count: usize,
    pub terms: usize,
    pub built_at: DateTime<Utc>,
}

/// Reads and writes the index artifacts in one directory
#[derive(Debug, Clone)]
pub struct IndexStore {
    dir: PathBuf,
}

impl IndexStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn line_map_path(&self) -> PathBuf {
        self.dir.join(LINE_MAP_FILE)
    }

    fn meta_path(&self) -> PathBuf {
        self.dir.join(META_FILE)
    }

    /// Whether both artifacts are on disk
    pub fn exists(&self) -> bool {
        self.index_path().is_file() && self.line_map_path().is_file()
    }

    /// Persist a snapshot, replacing any previous artifacts
    ///
    /// The previous artifacts are removed first, so a write that fails
    /// part way leaves an incomplete set that loads as absent rather
    /// than an index and a line map from different builds.
    pub fn save(&self, snapshot: &IndexSnapshot) -> Result<IndexMetadata> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            DocSearchError::StorageError(format!("Cannot create {:?}: {}", self.dir, e))
        })?;

        let metadata = IndexMetadata {
            schema_version: SCHEMA_VERSION,
            root: snapshot.root.clone(),
            document_count: snapshot.document_count,
            terms: snapshot.index.len(),
            built_at: snapshot.built_at.unwrap_or_else(Utc::now),
        };

        self.clear()?;
        write_json(&self.index_path(), &snapshot.index)?;
        write_json(&self.line_map_path(), &snapshot.line_map)?;
        write_json(&self.meta_path(), &metadata)?;

        tracing::info!(
            "Saved index to {:?} ({} terms, {} documents)",
            self.dir,
            metadata.terms,
            metadata.document_count
        );

        Ok(metadata)
    }

    /// Load the persisted snapshot
    ///
    /// Returns `Ok(None)` when either artifact is missing or fails to
    /// parse. A missing or unreadable `meta.json` only loses the
    /// informational fields.
    pub fn load(&self) -> Result<Option<IndexSnapshot>> {
        let (index_path, line_map_path) = (self.index_path(), self.line_map_path());

        if !index_path.is_file() || !line_map_path.is_file() {
            if index_path.exists() || line_map_path.exists() {
                tracing::warn!("Incomplete index in {:?}, ignoring it", self.dir);
            }
            return Ok(None);
        }

        let index: InvertedIndex = match read_json(&index_path) {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!("Unreadable index {:?}: {}", index_path, e);
                return Ok(None);
            }
        };

        if let Err(e) = index.validate() {
            tracing::warn!("Invalid index {:?}: {}", index_path, e);
            return Ok(None);
        }

        let line_map: LineMap = match read_json(&line_map_path) {
            Ok(line_map) => line_map,
            Err(e) => {
                tracing::warn!("Unreadable line map {:?}: {}", line_map_path, e);
                return Ok(None);
            }
        };

        let metadata = self.metadata();
        let document_count = metadata
            .as_ref()
            .map(|m| m.document_count)
            .unwrap_or_else(|| index.documents().len());

        tracing::info!(
            "Loaded index from {:?} ({} terms, {} documents)",
            self.dir,
            index.len(),
            document_count
        );

        Ok(Some(IndexSnapshot {
            index,
            line_map,
            document_count,
            root: metadata.as_ref().and_then(|m| m.root.clone()),
            built_at: metadata.map(|m| m.built_at),
        }))
    }

    /// Informational metadata, if present and readable
    pub fn metadata(&self) -> Option<IndexMetadata> {
        let path = self.meta_path();
        if !path.is_file() {
            return None;
        }
        match read_json(&path) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!("Unreadable metadata {:?}: {}", path, e);
                None
            }
        }
    }

    /// Remove all artifacts; missing files are not an error
    pub fn clear(&self) -> Result<()> {
        for path in [self.index_path(), self.line_map_path(), self.meta_path()] {
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!("Removed {:?}", path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Write JSON next to the target, then rename it into place
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, &serde_json::to_vec(value)?)
}

/// Same as [`write_json`], human-readable
pub(crate) fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, &serde_json::to_vec_pretty(value)?)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| DocSearchError::StorageError(format!("Invalid artifact path {path:?}")))?;
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let mut file = fs::File::create(&tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
