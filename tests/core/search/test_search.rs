// Document search tests against a published index

use crate::common::{create_test_services, TestRepo};
use docsearch::core::services::Services;
use docsearch::core::types::{Location, SearchRequest, TermMatch};
use docsearch::DocSearchError;
use tempfile::TempDir;

fn published_small() -> (Services, TestRepo, TempDir) {
    let repo = TestRepo::small();
    let (services, data) = create_test_services();
    let (snapshot, _) = services.build_index(repo.path(), |_| {}).unwrap();
    services.handle.publish(snapshot);
    (services, repo, data)
}

fn request(query: &str) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        limit: None,
    }
}

#[test]
fn test_exact_term_hits_every_document() {
    let (services, _repo, _data) = published_small();

    let response = services.search.search(request("revenue")).unwrap();

    assert_eq!(
        response.terms,
        vec![TermMatch::Exact {
            term: "revenue".to_string()
        }]
    );
    // docx line 1, pptx line 2, xlsx line 1
    assert_eq!(response.count, 3);
    let lines: Vec<_> = response.hits.iter().map(|h| h.line).collect();
    assert_eq!(lines, vec![Some(1), Some(1), Some(2)]);
    assert!(response.hits.iter().all(|h| h.snippet.is_some()));
}

#[test]
fn test_title_hit_has_no_snippet() {
    let (services, _repo, _data) = published_small();

    let response = services.search.search(request("annual")).unwrap();

    assert_eq!(response.hits.len(), 1);
    let hit = &response.hits[0];
    assert_eq!(hit.location, Location::Title);
    assert_eq!(hit.line, None);
    assert_eq!(hit.snippet, None);
    assert!(hit.path.ends_with("Annual Budget.pdf"));
}

#[test]
fn test_misspelled_term_is_corrected() {
    let (services, _repo, _data) = published_small();

    let response = services.search.search(request("revenu")).unwrap();

    match &response.terms[0] {
        TermMatch::Approximate { closest, .. } => assert_eq!(closest, "revenue"),
        other => panic!("expected approximate match, got {other:?}"),
    }
    assert_eq!(response.count, 3);
}

#[test]
fn test_multi_term_union_is_deduplicated() {
    let (services, _repo, _data) = published_small();

    let response = services.search.search(request("budget annual")).unwrap();

    // Budget.xlsx title + Annual Budget.pdf title, the pdf reached twice
    assert_eq!(response.count, 2);
    assert!(response.hits.iter().all(|h| h.location == Location::Title));
}

#[test]
fn test_no_match_and_empty_query() {
    let (services, _repo, _data) = published_small();

    let response = services.search.search(request("xylophone")).unwrap();
    assert!(response.hits.is_empty());
    assert!(matches!(response.terms[0], TermMatch::Unmatched { .. }));

    let response = services.search.search(request("  ... 123 ")).unwrap();
    assert!(response.hits.is_empty());
    assert!(response.terms.is_empty());
}

#[test]
fn test_limit_caps_hits_not_count() {
    let (services, _repo, _data) = published_small();

    let response = services
        .search
        .search(SearchRequest {
            query: "revenue".to_string(),
            limit: Some(1),
        })
        .unwrap();

    assert_eq!(response.hits.len(), 1);
    assert_eq!(response.count, 3);
}

#[test]
fn test_overlong_query_rejected() {
    let (services, _repo, _data) = published_small();
    let query = "a".repeat(services.config.search.max_query_length + 1);

    let result = services.search.search(request(&query));
    assert!(matches!(result, Err(DocSearchError::InvalidQuery(_))));
}

#[test]
fn test_unpublished_index_returns_nothing() {
    let (services, _data) = create_test_services();

    let response = services.search.search(request("revenue")).unwrap();
    assert!(response.hits.is_empty());
}
