//! Corpus search command - search the fixed document corpus

use crate::cli::output::{colors, describe_term};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::search::CorpusSearch;
use crate::core::services::Services;
use crate::core::storage::{Corpus, CorpusIndex};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the corpus-search command
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Free-text query; each word is looked up separately
    pub query: String,

    /// JSON corpus file (`{"1": "text", ...}`) instead of the configured one
    #[arg(long, short = 'c')]
    pub corpus: Option<PathBuf>,
}

/// A one-off corpus is indexed in memory and never persisted
fn explicit_corpus(path: &Path, config: &Config) -> Result<CorpusSearch, Box<dyn std::error::Error>> {
    let corpus = Corpus::from_file(path)?;
    let index = CorpusIndex::build(&corpus);
    Ok(CorpusSearch::new(corpus, index, &config.search))
}

/// Execute the corpus-search command
pub fn execute(
    args: CorpusArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let search = match &args.corpus {
        Some(path) => Arc::new(explicit_corpus(path, &services.config)?),
        None => services.corpus()?,
    };

    let response = search.search(&args.query);

    match format {
        OutputFormat::Human => {
            for term in &response.terms {
                println!("{}", describe_term(term));
            }

            if response.documents.is_empty() {
                println!("No documents match '{}'", colors::label(&args.query));
            } else {
                println!();
                for (id, text) in &response.documents {
                    println!(
                        "{} {}",
                        colors::position(&format!("[{id}]")),
                        text
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
