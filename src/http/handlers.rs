//! HTTP request handlers for the docsearch server
//!
//! Browser form pages for the document index and the fixed corpus,
//! plus JSON endpoints for search, rebuild and status.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;

use crate::core::error::{DocSearchError, Result};
use crate::core::services::Services;
use crate::core::types::*;
use crate::http::error::status_code;
use crate::http::html;

/// Form body posted by the search pages
#[derive(Debug, Default, Deserialize)]
pub struct QueryForm {
    #[serde(default)]
    pub query: String,
}

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Empty document search form
pub async fn search_page_handler() -> Html<String> {
    Html(html::search_page("", None))
}

/// Document search form submission
pub async fn search_form_handler(
    State(services): State<Arc<Services>>,
    Form(form): Form<QueryForm>,
) -> Response {
    let request = SearchRequest {
        query: form.query.clone(),
        limit: None,
    };

    match services.search.search(request) {
        Ok(response) => Html(html::search_page(&form.query, Some(&response))).into_response(),
        Err(e) => {
            let page = html::error_page("Document Search", "/", &form.query, &e.message());
            (status_code(&e), Html(page)).into_response()
        }
    }
}

/// Empty corpus search form
pub async fn corpus_page_handler() -> Html<String> {
    Html(html::corpus_page("", None))
}

/// Corpus search form submission
pub async fn corpus_form_handler(
    State(services): State<Arc<Services>>,
    Form(form): Form<QueryForm>,
) -> Result<Html<String>> {
    let corpus = services.corpus()?;
    let response = corpus.search(&form.query);
    Ok(Html(html::corpus_page(&form.query, Some(&response))))
}

/// Search handler
///
/// Searches the published index. An empty or unmatched query yields
/// an empty hit list.
pub async fn search_handler(
    State(services): State<Arc<Services>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>> {
    let response = services.search.search(request)?;
    Ok(Json(response))
}

/// Corpus search handler (JSON)
pub async fn corpus_search_handler(
    State(services): State<Arc<Services>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<CorpusSearchResponse>> {
    let corpus = services.corpus()?;
    Ok(Json(corpus.search(&request.query)))
}

/// Rebuild handler
///
/// Starts a background build of the requested directory and returns
/// 202 immediately. The previous index keeps serving searches until
/// the new one is published.
pub async fn index_handler(
    State(services): State<Arc<Services>>,
    Json(request): Json<IndexRequest>,
) -> Result<(StatusCode, Json<IndexAccepted>)> {
    let root = PathBuf::from(&request.path);

    // The file walk happens before the build thread starts
    let accepted = tokio::task::spawn_blocking(move || services.start_rebuild(&root))
        .await
        .map_err(|e| DocSearchError::BuildFailed(e.to_string()))??;

    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

/// Index status handler
pub async fn status_handler(State(services): State<Arc<Services>>) -> Json<IndexStatus> {
    Json(services.status())
}
