//! Tests for the index command

use super::test_helpers::{create_cli_test_services, reopen};
use crate::common::TestRepo;
use docsearch::cli::commands::{index, status, IndexArgs, StatusArgs};
use docsearch::cli::OutputFormat;

#[test]
fn test_index_persists_artifacts() {
    let (services, _temp) = create_cli_test_services();
    let repo = TestRepo::small();

    let args = IndexArgs {
        path: repo.path().to_path_buf(),
        quiet: true,
    };
    index::execute(args, &services, OutputFormat::Json).unwrap();

    assert!(services.store.exists());
    let meta = services.store.metadata().unwrap();
    assert_eq!(meta.document_count, 4);

    let next = reopen(&services);
    assert!(next.load_persisted().unwrap());
    assert!(next.handle.snapshot().index.contains("quarterly"));
}

#[test]
fn test_index_invalid_path() {
    let (services, temp) = create_cli_test_services();

    let args = IndexArgs {
        path: temp.path().join("nope"),
        quiet: true,
    };
    let err = index::execute(args, &services, OutputFormat::Human).unwrap_err();
    assert!(err.to_string().contains("Make sure the path exists"));
    assert!(!services.store.exists());
}

#[test]
fn test_status_before_and_after_index() {
    let (services, _temp) = create_cli_test_services();
    status::execute(StatusArgs {}, &services, OutputFormat::Json).unwrap();

    let repo = TestRepo::small();
    index::execute(
        IndexArgs {
            path: repo.path().to_path_buf(),
            quiet: true,
        },
        &services,
        OutputFormat::Json,
    )
    .unwrap();

    status::execute(StatusArgs {}, &services, OutputFormat::Human).unwrap();
}
