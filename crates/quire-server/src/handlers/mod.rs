//! HTTP request handlers.

pub(crate) mod cache;
pub(crate) mod pages;

/// Handle GET /health.
pub(crate) async fn health() -> &'static str {
    "ok"
}
