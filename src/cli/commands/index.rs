//! Index command - build and persist the index of a directory

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Directory to crawl
    pub path: PathBuf,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub path: String,
    pub index_dir: String,
    pub files_indexed: usize,
    pub files_title_only: usize,
    pub extraction_failures: usize,
    pub terms: usize,
    pub occurrences: usize,
    pub duration_secs: f64,
}

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░  "),
    );
    pb
}

/// Execute the index command
pub fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Services::resolve_root(&args.path)
        .map_err(|e| format!("{e}. Make sure the path exists and is a directory."))?;

    let show_progress = !args.quiet && format == OutputFormat::Human;

    if show_progress {
        eprintln!(
            "Indexing {}...",
            colors::file_path(&path.display().to_string())
        );
    }

    let pb = if show_progress {
        progress_bar()
    } else {
        ProgressBar::hidden()
    };

    let (snapshot, stats) = services.build_index(&path, |progress| {
        pb.set_length(progress.total as u64);
        pb.set_position(progress.processed as u64);
    })?;
    pb.finish_and_clear();

    services.store.save(&snapshot)?;

    let response = IndexResponse {
        path: path.to_string_lossy().into_owned(),
        index_dir: services.store.dir().to_string_lossy().into_owned(),
        files_indexed: stats.files_indexed,
        files_title_only: stats.files_title_only,
        extraction_failures: stats.extraction_failures,
        terms: stats.terms,
        occurrences: stats.occurrences,
        duration_secs: stats.duration_ms as f64 / 1000.0,
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} files ({} terms, {} occurrences) in {}",
                colors::success("Indexed"),
                colors::number(&response.files_indexed.to_string()),
                colors::number(&response.terms.to_string()),
                colors::number(&response.occurrences.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.files_title_only > 0 {
                println!(
                    "  {} indexed by file name only",
                    colors::number(&response.files_title_only.to_string())
                );
            }
            if response.extraction_failures > 0 {
                println!(
                    "  {} could not be read; their file names were still indexed",
                    colors::warning(&response.extraction_failures.to_string())
                );
            }
            println!("Saved to {}", colors::file_path(&response.index_dir));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
