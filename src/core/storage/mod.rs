//! Persistence for built indexes.
//!
//! # Layout
//!
//! ```text
//! {index_dir}/
//! ├── index.json          # term -> [{path, location}]
//! ├── line_map.json       # path -> line -> raw text
//! ├── meta.json           # schema version, root, counts, build time
//! └── corpus_index.json   # fixed corpus: term -> [document id]
//! ```

mod corpus;
mod store;

pub use corpus::{Corpus, CorpusIndex, CorpusStore, CORPUS_INDEX_FILE};
pub use store::{IndexMetadata, IndexStore, INDEX_FILE, LINE_MAP_FILE, META_FILE, SCHEMA_VERSION};
