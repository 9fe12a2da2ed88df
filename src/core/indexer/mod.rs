//! Indexing pipeline for document trees.
//!
//! - **walker**: discovers whitelisted files under a root
//! - **extract**: pulls body text out of Office documents
//! - **builder**: turns files into an inverted index and line map
//! - **background**: runs a build off the caller's thread

pub mod background;
pub mod builder;
pub mod extract;
pub mod walker;

pub use background::{spawn_build, BuildEvent, BuildJob};
pub use builder::{BuildOutput, BuildProgress, IndexBuilder};
pub use extract::{OfficeExtractor, TextExtractor};
pub use walker::FileWalker;
