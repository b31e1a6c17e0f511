//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use quire_site::RenderError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Rendering failed.
    #[error("{0}")]
    Render(#[from] RenderError),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Render(
                RenderError::NotFound {
                    language,
                    identifier,
                }
                | RenderError::InvalidPath {
                    language,
                    identifier,
                },
            ) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Page not found",
                    "language": language,
                    "identifier": identifier,
                }),
            ),
            Self::Render(e) => {
                tracing::error!(error = %e, "Page render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": e.to_string()}),
                )
            }
            Self::Task(e) => {
                tracing::error!(error = %e, "Render task failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
