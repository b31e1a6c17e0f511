//! Application state.

use std::sync::Arc;

use quire_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Render pipeline for the served content tree.
    pub(crate) site: Arc<Site>,
}
