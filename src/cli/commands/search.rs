//! Search command - search the persisted index

use crate::cli::output::{colors, describe_term, format_location, truncate};
use crate::cli::OutputFormat;
use crate::core::error::DocSearchError;
use crate::core::services::Services;
use crate::core::types::SearchRequest;
use clap::Args;
use std::sync::Arc;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query; each word is looked up separately
    pub query: String,

    /// Maximum number of hits to show
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,

    /// Only show file paths (no snippets)
    #[arg(long)]
    pub files_only: bool,
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !services.load_persisted()? {
        return Err(DocSearchError::IndexNotReady(format!(
            "no index in {}. Run 'docsearch index <dir>' first.",
            services.store.dir().display()
        ))
        .into());
    }

    let response = services.search.search(SearchRequest {
        query: args.query.clone(),
        limit: args.limit,
    })?;

    match format {
        OutputFormat::Human => {
            for term in &response.terms {
                println!("{}", describe_term(term));
            }

            if response.hits.is_empty() {
                println!("No results found for '{}'", colors::label(&args.query));
                return Ok(());
            }

            println!(
                "\nFound {} result(s):\n",
                colors::number(&response.count.to_string())
            );

            if args.files_only {
                let mut last = None;
                for hit in &response.hits {
                    if last != Some(&hit.path) {
                        println!("{}", colors::file_path(&hit.path.display().to_string()));
                        last = Some(&hit.path);
                    }
                }
            } else {
                for hit in &response.hits {
                    println!(
                        "{} {}",
                        colors::file_path(&hit.path.display().to_string()),
                        colors::position(&format!("({})", format_location(hit.location)))
                    );
                    if let Some(snippet) = &hit.snippet {
                        println!("    {}", colors::dim(&truncate(snippet, 100)));
                    }
                }
            }

            if response.hits.len() < response.count {
                println!(
                    "\n{}",
                    colors::dim(&format!(
                        "showing {} of {} results",
                        response.hits.len(),
                        response.count
                    ))
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
