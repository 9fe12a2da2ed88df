//! docsearch HTTP server entry point
//!
//! Serves the browser search forms and the JSON API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use docsearch::core::config::Config;
use docsearch::core::services::Services;
use docsearch::core::xdg::XdgDirs;
use docsearch::http;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "docsearch=info,tower_http=debug".into());

    let json = std::env::var("DOCSEARCH_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    tracing::info!("Starting docsearch server");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let services = Arc::new(Services::new(config));
    if !services.load_persisted()? {
        tracing::info!("Searches return no results until an index is built (POST /api/v1/index)");
    }

    let app = http::router(services);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - search form at http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
