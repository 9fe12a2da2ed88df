//! Configuration management for docsearch.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocSearchError, Result};
use crate::core::tokenizer::QueryMode;
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// File extensions to index (without the dot, case-insensitive)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Extensions indexed by file name only (body never extracted)
    #[serde(default = "default_title_only_extensions")]
    pub title_only_extensions: Vec<String>,

    /// Path patterns to exclude (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the persisted index artifacts
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Minimum similarity ratio for the approximate fallback
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    /// How queries are split into terms
    #[serde(default)]
    pub query_mode: QueryMode,

    /// Maximum query string length in characters
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,

    /// Maximum hits returned per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Fixed-corpus configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// JSON file of `{ "id": "text" }`; the built-in corpus is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_extensions() -> Vec<String> {
    vec![
        "docx".to_string(),
        "pptx".to_string(),
        "xlsx".to_string(),
        "pdf".to_string(),
    ]
}

fn default_title_only_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/.git/**".to_string(),
        "**/node_modules/**".to_string(),
        // Office lock files
        "**/~$*".to_string(),
    ]
}

fn default_max_file_size() -> usize {
    50
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_cutoff() -> f64 {
    0.6
}

fn default_max_query_length() -> usize {
    500
}

fn default_max_results() -> usize {
    1000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            title_only_extensions: default_title_only_extensions(),
            exclude_patterns: default_exclude_patterns(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cutoff: default_cutoff(),
            query_mode: QueryMode::default(),
            max_query_length: default_max_query_length(),
            max_results: default_max_results(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocSearchError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCSEARCH_CONFIG env var
    /// 2. XDG config file (~/.config/docsearch/config.toml)
    /// 3. ./docsearch.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCSEARCH_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("docsearch.toml").exists() {
                Self::from_file("docsearch.toml")?
            } else {
                Self::default()
            }
        };

        // Use the XDG data directory unless a location was chosen explicitly
        if env::var("DOCSEARCH_DATA_DIR").is_err() && config.storage.index_dir == default_index_dir()
        {
            config.storage.index_dir = xdg.index_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Indexing configuration
        if let Ok(max_size) = env::var("DOCSEARCH_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_file_size_mb = size;
            }
        }

        // Storage configuration
        if let Ok(data_dir) = env::var("DOCSEARCH_DATA_DIR") {
            self.storage.index_dir = PathBuf::from(data_dir).join("index");
        }

        // Search configuration
        if let Ok(cutoff) = env::var("DOCSEARCH_CUTOFF") {
            if let Ok(c) = cutoff.parse() {
                self.search.cutoff = c;
            }
        }
        if let Ok(mode) = env::var("DOCSEARCH_QUERY_MODE") {
            match mode.parse() {
                Ok(m) => self.search.query_mode = m,
                Err(e) => tracing::warn!("Ignoring DOCSEARCH_QUERY_MODE: {}", e),
            }
        }

        // Server configuration
        if let Ok(host) = env::var("DOCSEARCH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("DOCSEARCH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Corpus configuration
        if let Ok(corpus) = env::var("DOCSEARCH_CORPUS") {
            self.corpus.path = Some(PathBuf::from(corpus));
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.extensions.is_empty() {
            return Err(DocSearchError::ConfigError(
                "At least one file extension must be indexed".to_string(),
            ));
        }

        if self
            .indexing
            .extensions
            .iter()
            .chain(&self.indexing.title_only_extensions)
            .any(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(DocSearchError::ConfigError(
                "Extensions must be non-empty".to_string(),
            ));
        }

        for pattern in &self.indexing.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                DocSearchError::ConfigError(format!("Invalid exclude pattern '{pattern}': {e}"))
            })?;
        }

        if self.indexing.max_file_size_mb == 0 {
            return Err(DocSearchError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.search.cutoff) {
            return Err(DocSearchError::ConfigError(format!(
                "Cutoff must be between 0.0 and 1.0, got {}",
                self.search.cutoff
            )));
        }

        if self.search.max_query_length == 0 {
            return Err(DocSearchError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.search.max_results == 0 {
            return Err(DocSearchError::ConfigError(
                "Max results must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Extensions: {}", self.indexing.extensions.join(", "));
        tracing::info!(
            "  Title-only extensions: {}",
            self.indexing.title_only_extensions.join(", ")
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.indexing.exclude_patterns.len()
        );
        tracing::info!("  Max file size: {} MB", self.indexing.max_file_size_mb);
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
        tracing::info!("  Cutoff: {}", self.search.cutoff);
        tracing::info!("  Query mode: {:?}", self.search.query_mode);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        tracing::info!("  Max results: {}", self.search.max_results);
        tracing::info!("  Server: {}:{}", self.server.host, self.server.port);
        match &self.corpus.path {
            Some(path) => tracing::info!("  Corpus: {:?}", path),
            None => tracing::info!("  Corpus: built-in"),
        }
    }
}
