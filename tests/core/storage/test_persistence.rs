// Persisted index artifact tests

use std::path::PathBuf;

use crate::common::{create_test_services, TestRepo};
use docsearch::core::index::{IndexSnapshot, InvertedIndex, LineMap};
use docsearch::core::storage::{
    Corpus, CorpusIndex, CorpusStore, IndexStore, CORPUS_INDEX_FILE, INDEX_FILE, LINE_MAP_FILE,
    META_FILE,
};
use docsearch::core::types::Occurrence;
use tempfile::TempDir;

fn unicode_snapshot() -> IndexSnapshot {
    let doc = PathBuf::from("/문서/분기 보고서.docx");
    let mut index = InvertedIndex::new();
    let mut line_map = LineMap::new();

    index.push("분기", Occurrence::title(&doc));
    index.push("매출", Occurrence::line(&doc, 0));
    line_map.insert(&doc, 0, "매출이 증가했습니다");

    IndexSnapshot {
        index,
        line_map,
        document_count: 1,
        root: Some(PathBuf::from("/문서")),
        built_at: None,
    }
}

#[test]
fn test_round_trip_preserves_title_sentinel_and_unicode() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path());
    let snapshot = unicode_snapshot();

    let meta = store.save(&snapshot).unwrap();
    assert_eq!(meta.document_count, 1);
    assert_eq!(meta.terms, 2);

    let loaded = store.load().unwrap().expect("index should load");
    assert!(loaded.index.same_contents(&snapshot.index));
    assert_eq!(loaded.line_map, snapshot.line_map);
    assert_eq!(loaded.document_count, 1);

    // Title matches are stored as -1
    let raw = std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
    assert!(raw.contains("-1"));
    assert!(raw.contains("분기"));
}

#[test]
fn test_built_index_round_trip() {
    let repo = TestRepo::small();
    let (services, _data) = create_test_services();
    let (snapshot, _) = services.build_index(repo.path(), |_| {}).unwrap();

    services.store.save(&snapshot).unwrap();
    let loaded = services.store.load().unwrap().unwrap();

    assert!(loaded.index.same_contents(&snapshot.index));
    assert_eq!(loaded.line_map, snapshot.line_map);
    assert_eq!(loaded.root, snapshot.root);
}

#[test]
fn test_missing_artifacts_load_as_none() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path());

    assert!(!store.exists());
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_partial_artifacts_load_as_none() {
    for missing in [INDEX_FILE, LINE_MAP_FILE] {
        let dir = TempDir::new().unwrap();
        let store = IndexStore::new(dir.path());
        store.save(&unicode_snapshot()).unwrap();

        std::fs::remove_file(dir.path().join(missing)).unwrap();
        assert!(store.load().unwrap().is_none(), "{missing} removed");
    }
}

#[test]
fn test_missing_metadata_still_loads() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path());
    store.save(&unicode_snapshot()).unwrap();

    std::fs::remove_file(dir.path().join(META_FILE)).unwrap();
    let loaded = store.load().unwrap().expect("index should load");
    assert_eq!(loaded.document_count, 1);
    assert_eq!(loaded.root, None);
}

#[test]
fn test_corrupt_artifact_loads_as_none() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path());
    store.save(&unicode_snapshot()).unwrap();

    std::fs::write(dir.path().join(INDEX_FILE), b"{ not json").unwrap();
    assert!(store.load().unwrap().is_none());
}

#[test]
fn test_clear_removes_artifacts() {
    let dir = TempDir::new().unwrap();
    let store = IndexStore::new(dir.path());
    store.save(&unicode_snapshot()).unwrap();

    store.clear().unwrap();
    assert!(!store.exists());
    assert!(store.metadata().is_none());
}

#[test]
fn test_corpus_index_is_persisted_and_reused() {
    let dir = TempDir::new().unwrap();
    let store = CorpusStore::new(dir.path());
    let corpus = Corpus::demo();

    let built = store.load_or_build(&corpus).unwrap();
    assert!(dir.path().join(CORPUS_INDEX_FILE).exists());

    let reloaded = store.load_or_build(&corpus).unwrap();
    assert_eq!(built, reloaded);
    assert_eq!(built, CorpusIndex::build(&corpus));
}
