//! Cache administration endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use quire_cache::CacheStats;

use crate::state::AppState;

/// Handle GET /api/cache.
pub(crate) async fn get_stats(State(state): State<Arc<AppState>>) -> Json<CacheStats> {
    Json(state.site.cache_stats())
}

/// Handle DELETE /api/cache.
pub(crate) async fn clear(State(state): State<Arc<AppState>>) -> StatusCode {
    state.site.clear_cache();
    StatusCode::NO_CONTENT
}
