//! Status command - summarize the persisted index

use crate::cli::output::{colors, format_relative_time};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::storage::IndexMetadata;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub index_dir: String,
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<IndexMetadata>,
}

/// Execute the status command
pub fn execute(
    _args: StatusArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let response = StatusResponse {
        index_dir: services.store.dir().to_string_lossy().into_owned(),
        ready: services.store.exists(),
        metadata: services.store.metadata(),
    };

    match format {
        OutputFormat::Human => {
            println!(
                "{} {}",
                colors::label("Index:"),
                colors::file_path(&response.index_dir)
            );
            if !response.ready {
                println!("  {}", colors::warning("not built"));
                println!("  Run 'docsearch index <dir>' to build it.");
                return Ok(());
            }
            match &response.metadata {
                Some(meta) => {
                    if let Some(root) = &meta.root {
                        println!(
                            "  Root:      {}",
                            colors::file_path(&root.display().to_string())
                        );
                    }
                    println!(
                        "  Documents: {}",
                        colors::number(&meta.document_count.to_string())
                    );
                    println!("  Terms:     {}", colors::number(&meta.terms.to_string()));
                    println!(
                        "  Built:     {} {}",
                        meta.built_at.format("%Y-%m-%d %H:%M:%S UTC"),
                        colors::dim(&format!("({})", format_relative_time(&meta.built_at)))
                    );
                }
                None => println!("  {}", colors::dim("no metadata recorded")),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
