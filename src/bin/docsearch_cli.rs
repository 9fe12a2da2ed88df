//! docsearch CLI - index and search office documents from the shell
//!
//! # Examples
//!
//! ```bash
//! # Index a directory
//! docsearch index ~/Documents/reports
//!
//! # Search it
//! docsearch search "quarterly revenue"
//!
//! # Search the fixed corpus
//! docsearch corpus-search "검색 엔진"
//!
//! # Show configuration
//! docsearch show-config
//! ```

use clap::Parser;
use docsearch::cli::output::colors;
use docsearch::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docsearch=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {e}", colors::error("Error:"));
        std::process::exit(1);
    }
}
