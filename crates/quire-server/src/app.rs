//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use quire_site::Site;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router for `site`.
pub fn create_router(site: Arc<Site>) -> Router {
    let state = Arc::new(AppState { site });

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/cache",
            get(handlers::cache::get_stats).delete(handlers::cache::clear),
        )
        .route("/api/pages/{*identifier}", get(handlers::pages::get_page))
        .route(
            "/api/{language}/pages/{*identifier}",
            get(handlers::pages::get_localized_page),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
