//! CLI adapter for docsearch
//!
//! Provides the command-line interface for indexing document trees
//! and searching them. This module is parallel to `http/` - both
//! depend on `core/` but not on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// docsearch - Office document search
///
/// Index a directory of Word, PowerPoint, Excel and PDF files, then
/// search it with free-text queries. Misspelled terms fall back to
/// the closest indexed term.
#[derive(Parser, Debug)]
#[command(name = "docsearch")]
#[command(version)]
#[command(about = "Inverted-index search over office documents", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the index from a directory and persist it
    Index(commands::IndexArgs),

    /// Search the persisted index
    Search(commands::SearchArgs),

    /// Search the fixed document corpus
    #[command(name = "corpus-search")]
    CorpusSearch(commands::CorpusArgs),

    /// Show the persisted index summary
    Status(commands::StatusArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  docsearch completions bash > ~/.local/share/bash-completion/completions/docsearch
    ///   zsh:   docsearch completions zsh > ~/.zfunc/_docsearch
    ///   fish:  docsearch completions fish > ~/.config/fish/completions/docsearch.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    if let Err(e) = xdg.ensure_dirs_exist() {
        output::print_warning(&format!("Cannot create data directories: {e}"));
    }

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;

    // Create services
    let services = Arc::new(Services::new(config));

    // Execute command
    match cli.command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::CorpusSearch(args) => commands::corpus::execute(args, &services, cli.format),
        Commands::Status(args) => commands::status::execute(args, &services, cli.format),
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
