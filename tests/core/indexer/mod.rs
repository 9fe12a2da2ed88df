// Indexer integration tests

mod test_discovery;
