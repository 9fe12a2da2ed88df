//! Off-thread index builds.
//!
//! A build runs on its own thread and talks back over a channel:
//! zero or more progress events followed by exactly one completion
//! event carrying the finished artifacts. The caller never sees a
//! partially built index.
//!
//! Builds cannot be cancelled. Once started a build runs to
//! completion even if the receiving side goes away.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use crate::core::error::{DocSearchError, Result};
use crate::core::indexer::builder::{BuildOutput, BuildProgress, IndexBuilder};

/// Message from a running build
#[derive(Debug)]
pub enum BuildEvent {
    Progress(BuildProgress),
    Completed(Box<BuildOutput>),
}

/// Handle on a build running in the background
pub struct BuildJob {
    events: Receiver<BuildEvent>,
    total: usize,
    worker: Option<JoinHandle<()>>,
}

/// Start building an index over `files` on a dedicated thread
pub fn spawn_build(builder: IndexBuilder, files: Vec<PathBuf>) -> Result<BuildJob> {
    let (tx, rx) = mpsc::channel();
    let total = files.len();

    let worker = thread::Builder::new()
        .name("docsearch-build".to_string())
        .spawn(move || {
            let output = builder.build(&files, |progress| {
                // Receiver may be gone; the build still finishes
                let _ = tx.send(BuildEvent::Progress(progress));
            });
            let _ = tx.send(BuildEvent::Completed(Box::new(output)));
        })?;

    Ok(BuildJob {
        events: rx,
        total,
        worker: Some(worker),
    })
}

impl BuildJob {
    /// Number of files the build will process
    pub fn total(&self) -> usize {
        self.total
    }

    /// Block for the next event; `None` once the build thread is gone
    pub fn next_event(&self) -> Option<BuildEvent> {
        self.events.recv().ok()
    }

    /// Drain events until completion
    ///
    /// Progress events are handed to `on_progress`. Fails only if the
    /// build thread died before completing.
    pub fn wait(mut self, mut on_progress: impl FnMut(BuildProgress)) -> Result<BuildOutput> {
        while let Some(event) = self.next_event() {
            match event {
                BuildEvent::Progress(progress) => on_progress(progress),
                BuildEvent::Completed(output) => {
                    if let Some(worker) = self.worker.take() {
                        let _ = worker.join();
                    }
                    return Ok(*output);
                }
            }
        }

        Err(DocSearchError::BuildFailed(
            "build thread exited without a result".to_string(),
        ))
    }
}
