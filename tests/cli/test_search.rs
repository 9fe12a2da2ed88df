//! Tests for the search and corpus-search commands

use super::test_helpers::{create_cli_test_services, reopen};
use crate::common::TestRepo;
use docsearch::cli::commands::{corpus, index, search, CorpusArgs, IndexArgs, SearchArgs};
use docsearch::cli::OutputFormat;
use docsearch::DocSearchError;

fn search_args(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        limit: None,
        files_only: false,
    }
}

#[test]
fn test_search_without_index_fails() {
    let (services, _temp) = create_cli_test_services();

    let err = search::execute(search_args("revenue"), &services, OutputFormat::Human).unwrap_err();
    let err = err.downcast::<DocSearchError>().unwrap();
    assert!(matches!(*err, DocSearchError::IndexNotReady(_)));
}

#[test]
fn test_search_after_index() {
    let (services, _temp) = create_cli_test_services();
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

    let next = reopen(&services);
    search::execute(search_args("revenu"), &next, OutputFormat::Human).unwrap();
    search::execute(
        SearchArgs {
            query: "budget".to_string(),
            limit: Some(1),
            files_only: true,
        },
        &next,
        OutputFormat::Json,
    )
    .unwrap();
}

#[test]
fn test_corpus_search_demo() {
    let (services, _temp) = create_cli_test_services();

    let args = CorpusArgs {
        query: "검색".to_string(),
        corpus: None,
    };
    corpus::execute(args, &services, OutputFormat::Json).unwrap();
}

#[test]
fn test_corpus_search_explicit_file() {
    let (services, temp) = create_cli_test_services();
    let path = temp.path().join("corpus.json");
    std::fs::write(&path, r#"{"1": "alpha beta", "2": "beta gamma"}"#).unwrap();

    let args = CorpusArgs {
        query: "alph".to_string(),
        corpus: Some(path),
    };
    corpus::execute(args, &services, OutputFormat::Human).unwrap();
}

#[test]
fn test_corpus_search_missing_file() {
    let (services, temp) = create_cli_test_services();

    let args = CorpusArgs {
        query: "alpha".to_string(),
        corpus: Some(temp.path().join("missing.json")),
    };
    assert!(corpus::execute(args, &services, OutputFormat::Human).is_err());
}
