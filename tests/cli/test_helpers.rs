//! CLI test helpers
//!
//! Arc<Services> wrappers matching CLI execute() signatures.

use docsearch::core::config::Config;
use docsearch::core::services::Services;
use std::sync::Arc;
use tempfile::TempDir;

/// Create test services wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.index_dir = temp_dir.path().to_path_buf();

    let services = Arc::new(Services::new(config));
    (services, temp_dir)
}

/// Fresh services over an existing index directory, as a second CLI
/// invocation would see it
pub fn reopen(services: &Services) -> Arc<Services> {
    Arc::new(Services::new((*services.config).clone()))
}
