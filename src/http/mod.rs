//! HTTP adapter
//!
//! Depends only on core/. Serves the browser search forms and the
//! JSON API via the Axum web framework.

pub mod error;
pub mod handlers;
pub mod html;
pub mod middleware;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::core::services::Services;

pub use handlers::*;

/// Build the application router with all routes and layers
pub fn router(services: Arc<Services>) -> Router {
    Router::new()
        .route("/", get(search_page_handler).post(search_form_handler))
        .route("/corpus", get(corpus_page_handler).post(corpus_form_handler))
        .route("/health", get(health_handler))
        .route("/api/v1/search", post(search_handler))
        .route("/api/v1/corpus/search", post(corpus_search_handler))
        .route("/api/v1/index", post(index_handler))
        .route("/api/v1/index/status", get(status_handler))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(CorsLayer::permissive())
        .with_state(services)
}
