// Fixed corpus search tests

use std::collections::BTreeMap;

use docsearch::core::config::SearchConfig;
use docsearch::core::search::CorpusSearch;
use docsearch::core::storage::{Corpus, CorpusIndex};
use docsearch::core::types::TermMatch;

fn alpha_beta() -> CorpusSearch {
    let corpus = Corpus::new(BTreeMap::from([
        (1, "alpha beta".to_string()),
        (2, "beta gamma".to_string()),
    ]));
    let index = CorpusIndex::build(&corpus);
    CorpusSearch::new(corpus, index, &SearchConfig::default())
}

fn ids(search: &CorpusSearch, query: &str) -> Vec<u64> {
    search.search(query).documents.keys().copied().collect()
}

#[test]
fn test_exact_term() {
    assert_eq!(ids(&alpha_beta(), "beta"), vec![1, 2]);
}

#[test]
fn test_approximate_term() {
    assert_eq!(ids(&alpha_beta(), "alph"), vec![1]);
}

#[test]
fn test_unrelated_term() {
    assert!(ids(&alpha_beta(), "xylophone").is_empty());
}

// A score exactly at the cutoff still matches: "zzeta" resolves to
// "beta" at 0.6 (difflib gives the same pair 0.667)
#[test]
fn test_term_at_cutoff_matches() {
    let response = alpha_beta().search("zzeta");

    match &response.terms[..] {
        [TermMatch::Approximate {
            term,
            closest,
            ratio,
        }] => {
            assert_eq!(term, "zzeta");
            assert_eq!(closest, "beta");
            assert!((ratio - 0.6).abs() < 1e-9, "ratio {ratio}");
        }
        other => panic!("expected one approximate match, got {other:?}"),
    }
    assert_eq!(response.documents.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_results_carry_document_text() {
    let response = alpha_beta().search("gamma");
    assert_eq!(response.documents.get(&2).map(String::as_str), Some("beta gamma"));
}

#[test]
fn test_demo_corpus_korean_lookup() {
    let corpus = Corpus::demo();
    let index = CorpusIndex::build(&corpus);
    let search = CorpusSearch::new(corpus, index, &SearchConfig::default());

    let term = search.corpus().iter().next().map(|(_, text)| {
        text.split_whitespace()
            .next()
            .unwrap()
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect::<String>()
            .to_lowercase()
    });

    let response = search.search(&term.unwrap());
    assert!(!response.documents.is_empty());
}
