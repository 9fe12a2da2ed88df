//! Search over the built indexes.
//!
//! - **fuzzy**: closest vocabulary term under a similarity cutoff
//! - **engine**: exact-or-approximate lookup over the published index
//! - **corpus**: the same lookup over the fixed document corpus

mod corpus;
mod engine;
mod fuzzy;

pub use corpus::CorpusSearch;
pub use engine::{search_snapshot, SearchService};
pub use fuzzy::{closest_term, similarity, DEFAULT_CUTOFF};
