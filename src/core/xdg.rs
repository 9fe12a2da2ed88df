//! Where docsearch keeps things on disk
//!
//! The config file lives under the XDG config home, the persisted
//! index (and the fixed corpus index) under the XDG data home:
//!
//! ```text
//! ~/.config/docsearch/config.toml
//! ~/.local/share/docsearch/index/{index,line_map,meta,corpus_index}.json
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::core::storage::{CORPUS_INDEX_FILE, INDEX_FILE, LINE_MAP_FILE, META_FILE};

const APP_DIR: &str = "docsearch";

/// Resolved docsearch directories
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

/// `$own_var`, else `$xdg_var/docsearch`, else `~/<fallback>/docsearch`
fn resolve(own_var: &str, xdg_var: &str, fallback: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(own_var) {
        return PathBuf::from(dir);
    }
    if let Ok(base) = env::var(xdg_var) {
        return PathBuf::from(base).join(APP_DIR);
    }

    let mut dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.extend(fallback);
    dir.join(APP_DIR)
}

impl XdgDirs {
    /// `DOCSEARCH_CONFIG_DIR` / `DOCSEARCH_DATA_DIR` win over the XDG
    /// variables, which win over the home-relative defaults
    pub fn new() -> Self {
        Self {
            config_dir: resolve("DOCSEARCH_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("DOCSEARCH_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default `storage.index_dir`
    pub fn index_dir(&self) -> PathBuf {
        self.data_dir.join("index")
    }

    /// Every artifact a full index directory holds
    pub fn index_artifacts(&self) -> Vec<PathBuf> {
        let dir = self.index_dir();
        [INDEX_FILE, LINE_MAP_FILE, META_FILE, CORPUS_INDEX_FILE]
            .iter()
            .map(|name| dir.join(name))
            .collect()
    }

    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(self.index_dir())
    }

    pub fn log_paths(&self) {
        tracing::info!("Config file: {:?}", self.config_file());
        tracing::info!("Index directory: {:?}", self.index_dir());
        for artifact in self.index_artifacts() {
            tracing::debug!("  {:?} (present: {})", artifact, artifact.is_file());
        }
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
