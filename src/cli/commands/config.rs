//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show the XDG config and data directories
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(flatten)]
    pub config: crate::core::config::Config,
}

/// Execute the config command
pub fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let xdg = XdgDirs::new();
    let (config_file, data_dir) = if args.all {
        (
            Some(xdg.config_file().to_string_lossy().into_owned()),
            Some(xdg.data_dir.to_string_lossy().into_owned()),
        )
    } else {
        (None, None)
    };

    let response = ConfigResponse {
        config_file,
        data_dir,
        config: (*services.config).clone(),
    };

    match format {
        OutputFormat::Human => {
            let config = &response.config;
            println!("Configuration:");
            if let Some(file) = &response.config_file {
                println!("  config_file: {file}");
            }
            if let Some(dir) = &response.data_dir {
                println!("  data_dir: {dir}");
            }
            println!("  indexing:");
            println!("    extensions: {:?}", config.indexing.extensions);
            println!(
                "    title_only_extensions: {:?}",
                config.indexing.title_only_extensions
            );
            println!("    exclude_patterns: {:?}", config.indexing.exclude_patterns);
            println!("    max_file_size_mb: {}", config.indexing.max_file_size_mb);
            println!("  storage:");
            println!("    index_dir: {}", config.storage.index_dir.display());
            println!("  search:");
            println!("    cutoff: {}", config.search.cutoff);
            println!("    query_mode: {:?}", config.search.query_mode);
            println!("    max_query_length: {}", config.search.max_query_length);
            println!("    max_results: {}", config.search.max_results);
            println!("  server:");
            println!("    host: {}", config.server.host);
            println!("    port: {}", config.server.port);
            println!("  corpus:");
            match &config.corpus.path {
                Some(path) => println!("    path: {}", path.display()),
                None => println!("    path: (built-in demo corpus)"),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
