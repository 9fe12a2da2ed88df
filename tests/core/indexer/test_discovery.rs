// File discovery tests

use crate::common::TestRepo;
use docsearch::core::config::Config;
use docsearch::core::indexer::FileWalker;

fn default_walker() -> FileWalker {
    let indexing = Config::default().indexing;
    FileWalker::new(
        indexing.extensions,
        indexing.exclude_patterns,
        indexing.max_file_size_mb,
    )
    .unwrap()
}

#[test]
fn test_discovers_supported_formats_sorted() {
    let mut repo = TestRepo::small();
    repo.add_file("notes.txt", b"plain text is not indexed");

    let files = default_walker().collect_files(repo.path());
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(
        names,
        vec![
            "Annual Budget.pdf",
            "Budget.xlsx",
            "Quarterly Report.docx",
            "Team Slides.pptx"
        ]
    );
}

#[test]
fn test_recurses_and_matches_extension_case_insensitively() {
    let mut repo = TestRepo::empty();
    repo.add_file("2024/q1/Scan.PDF", b"%PDF");
    repo.add_file("2024/Other.Pdf", b"%PDF");

    let files = default_walker().collect_files(repo.path());
    assert_eq!(files.len(), 2);
}

#[test]
fn test_skips_hidden_and_excluded() {
    let mut repo = TestRepo::empty();
    repo.add_file(".cache/Hidden.pdf", b"%PDF");
    repo.add_file("node_modules/pkg/Vendored.pdf", b"%PDF");
    repo.add_file("~$Report.docx", b"lock");
    repo.add_file("Kept.pdf", b"%PDF");

    let files = default_walker().collect_files(repo.path());
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("Kept.pdf"));
}

#[test]
fn test_empty_directory() {
    let repo = TestRepo::empty();
    assert!(default_walker().collect_files(repo.path()).is_empty());
}
