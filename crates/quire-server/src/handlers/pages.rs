//! Pages API endpoint.
//!
//! Renders a document and returns its HTML, front matter and digest as JSON.
//! The digest doubles as a strong `ETag`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use quire_meta::FrontMatter;
use quire_site::PageRenderResult;
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/pages/{identifier}.
#[derive(Serialize)]
struct PageResponse<'a> {
    html: &'a str,
    metadata: &'a FrontMatter,
    digest: String,
}

/// Handle GET /api/pages/{identifier} in the default language.
pub(crate) async fn get_page(
    Path(identifier): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let language = state.site.default_language().to_owned();
    get_page_impl(&state, language, identifier, &headers).await
}

/// Handle GET /api/{language}/pages/{identifier}.
pub(crate) async fn get_localized_page(
    Path((language, identifier)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(&state, language, identifier, &headers).await
}

async fn get_page_impl(
    state: &AppState,
    language: String,
    identifier: String,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let site = Arc::clone(&state.site);
    let result =
        tokio::task::spawn_blocking(move || site.render(&language, &identifier)).await??;

    let etag = format!("\"{}\"", result.digest);
    if matches_etag(headers, &etag) {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok(([(header::ETAG, etag)], Json(page_response(&result))).into_response())
}

fn page_response(result: &PageRenderResult) -> PageResponse<'_> {
    PageResponse {
        html: &result.artifact.html,
        metadata: &result.artifact.metadata,
        digest: result.digest.to_hex(),
    }
}

/// Whether any tag in `If-None-Match` equals `etag` (or is `*`).
fn matches_etag(headers: &HeaderMap, etag: &str) -> bool {
    headers
        .get_all(header::IF_NONE_MATCH)
        .iter()
        .filter_map(|value: &HeaderValue| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .any(|tag| tag == "*" || tag == etag || tag.strip_prefix("W/") == Some(etag))
}
