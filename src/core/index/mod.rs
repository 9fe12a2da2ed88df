//! In-memory index structures.
//!
//! - **InvertedIndex**: term -> occurrences
//! - **LineMap**: document -> line -> raw text, for snippets
//! - **IndexHandle**: versioned, atomically published snapshot

mod handle;
mod inverted;

pub use handle::{IndexHandle, IndexSnapshot};
pub use inverted::{InvertedIndex, LineMap};
