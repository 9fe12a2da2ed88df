// Search integration tests

mod test_corpus;
mod test_search;
