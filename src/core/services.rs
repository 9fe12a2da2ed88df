//! Unified service container for docsearch
//!
//! Provides shared access to all core services.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crate::core::config::Config;
use crate::core::error::{DocSearchError, Result};
use crate::core::index::{IndexHandle, IndexSnapshot};
use crate::core::indexer::{spawn_build, BuildProgress, FileWalker, IndexBuilder};
use crate::core::search::{CorpusSearch, SearchService};
use crate::core::storage::{Corpus, CorpusStore, IndexStore};
use crate::core::types::{IndexAccepted, IndexState, IndexStats, IndexStatus};

/// Progress of the background build, if any
#[derive(Debug, Default)]
struct BuildTracker {
    building: bool,
    progress: f64,
    root: Option<PathBuf>,
}

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Persisted index artifacts
    pub store: Arc<IndexStore>,

    /// Currently published index
    pub handle: Arc<IndexHandle>,

    /// Search over the published index
    pub search: Arc<SearchService>,

    tracker: Arc<Mutex<BuildTracker>>,
    corpus: Arc<OnceCell<Arc<CorpusSearch>>>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Starts with an empty, unpublished index; see
    /// [`Services::load_persisted`].
    pub fn new(config: Config) -> Self {
        let store = Arc::new(IndexStore::new(config.storage.index_dir.clone()));
        let handle = Arc::new(IndexHandle::new());
        let search = Arc::new(SearchService::new(Arc::clone(&handle), &config.search));

        Self {
            config: Arc::new(config),
            store,
            handle,
            search,
            tracker: Arc::new(Mutex::new(BuildTracker::default())),
            corpus: Arc::new(OnceCell::new()),
        }
    }

    /// Publish the persisted index, if a complete one exists
    ///
    /// Returns whether an index was loaded.
    pub fn load_persisted(&self) -> Result<bool> {
        match self.store.load()? {
            Some(snapshot) => {
                let version = self.handle.publish(snapshot);
                tracing::info!("Published persisted index as version {}", version);
                Ok(true)
            }
            None => {
                tracing::info!("No persisted index in {:?}", self.store.dir());
                Ok(false)
            }
        }
    }

    /// Create a FileWalker from the indexing configuration
    pub fn create_walker(&self) -> Result<FileWalker> {
        let indexing = &self.config.indexing;
        FileWalker::new(
            indexing.extensions.clone(),
            indexing.exclude_patterns.clone(),
            indexing.max_file_size_mb,
        )
    }

    /// Create an IndexBuilder with the Office extractor
    pub fn create_builder(&self) -> IndexBuilder {
        IndexBuilder::from_config(&self.config.indexing)
    }

    /// Canonical directory to index, or `InvalidPath`
    pub fn resolve_root(path: &Path) -> Result<PathBuf> {
        let root = path
            .canonicalize()
            .map_err(|e| DocSearchError::InvalidPath(format!("{}: {}", path.display(), e)))?;

        if !root.is_dir() {
            return Err(DocSearchError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        Ok(root)
    }

    /// Build an index of `root` on a background thread and wait for it
    ///
    /// The caller's thread only drains progress events. Nothing is
    /// published or persisted.
    pub fn build_index(
        &self,
        root: &Path,
        on_progress: impl FnMut(BuildProgress),
    ) -> Result<(IndexSnapshot, IndexStats)> {
        let root = Self::resolve_root(root)?;
        let files = self.create_walker()?.collect_files(&root);
        tracing::info!("Found {} files to index under {:?}", files.len(), root);

        let output = spawn_build(self.create_builder(), files)?.wait(on_progress)?;
        let stats = output.stats.clone();
        Ok((IndexSnapshot::from_build(output, Some(root)), stats))
    }

    /// Start rebuilding the index from `root` in the background
    ///
    /// Returns as soon as the build is running. On completion the new
    /// index is published and persisted. Only one build runs at a
    /// time; a second request fails with `IndexingInProgress`.
    pub fn start_rebuild(&self, root: &Path) -> Result<IndexAccepted> {
        let root = Self::resolve_root(root)?;

        {
            let mut tracker = self.tracker.lock();
            if tracker.building {
                let running = tracker
                    .root
                    .as_ref()
                    .map(|r| r.display().to_string())
                    .unwrap_or_default();
                return Err(DocSearchError::IndexingInProgress(running));
            }
            *tracker = BuildTracker {
                building: true,
                progress: 0.0,
                root: Some(root.clone()),
            };
        }

        let job = self
            .create_walker()
            .map(|walker| walker.collect_files(&root))
            .and_then(|files| spawn_build(self.create_builder(), files));

        let job = match job {
            Ok(job) => job,
            Err(e) => {
                self.tracker.lock().building = false;
                return Err(e);
            }
        };

        let files = job.total();
        tracing::info!("Rebuilding index from {:?} ({} files)", root, files);

        let tracker = Arc::clone(&self.tracker);
        let handle = Arc::clone(&self.handle);
        let store = Arc::clone(&self.store);
        let build_root = root.clone();

        let spawned = thread::Builder::new()
            .name("docsearch-publish".to_string())
            .spawn(move || {
                let result = job.wait(|progress| tracker.lock().progress = progress.fraction());

                match result {
                    Ok(output) => {
                        let snapshot = IndexSnapshot::from_build(output, Some(build_root));
                        if let Err(e) = store.save(&snapshot) {
                            tracing::error!("Failed to persist index: {}", e);
                        }
                        let version = handle.publish(snapshot);
                        tracing::info!("Published index version {}", version);
                        let mut tracker = tracker.lock();
                        tracker.building = false;
                        tracker.progress = 1.0;
                    }
                    Err(e) => {
                        tracing::error!("Index build failed: {}", e);
                        tracker.lock().building = false;
                    }
                }
            });

        if let Err(e) = spawned {
            self.tracker.lock().building = false;
            return Err(e.into());
        }

        Ok(IndexAccepted {
            path: root.display().to_string(),
            files,
        })
    }

    /// Whether a background build is running
    pub fn is_building(&self) -> bool {
        self.tracker.lock().building
    }

    /// Current index state for status reporting
    pub fn status(&self) -> IndexStatus {
        let (version, snapshot) = self.handle.current();
        let tracker = self.tracker.lock();

        let (state, progress) = if tracker.building {
            (IndexState::Building, tracker.progress)
        } else if version > 0 {
            (IndexState::Ready, 1.0)
        } else {
            (IndexState::Idle, 0.0)
        };

        IndexStatus {
            state,
            progress,
            document_count: snapshot.document_count,
            version,
            root: snapshot.root.clone(),
        }
    }

    /// Search over the fixed corpus, loaded on first use
    ///
    /// Uses the configured corpus file, or the built-in demo corpus
    /// when none is configured.
    pub fn corpus(&self) -> Result<Arc<CorpusSearch>> {
        self.corpus
            .get_or_try_init(|| {
                let corpus = match &self.config.corpus.path {
                    Some(path) => Corpus::from_file(path)?,
                    None => Corpus::demo(),
                };
                let index =
                    CorpusStore::new(&self.config.storage.index_dir).load_or_build(&corpus)?;
                Ok::<_, DocSearchError>(Arc::new(CorpusSearch::new(
                    corpus,
                    index,
                    &self.config.search,
                )))
            })
            .map(Arc::clone)
    }
}
