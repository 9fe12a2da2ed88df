// Test helper functions

use docsearch::core::config::Config;
use docsearch::core::services::Services;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Create test services with temporary storage
///
/// The returned TempDir holds the index directory; keep it alive for
/// the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> (Services, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.index_dir = temp_dir.path().to_path_buf();

    (Services::new(config), temp_dir)
}

/// Block until no background build is running
#[allow(dead_code)] // Used in integration tests
pub fn wait_until_idle(services: &Services) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while services.is_building() {
        assert!(Instant::now() < deadline, "background build did not finish");
        std::thread::sleep(Duration::from_millis(10));
    }
}
