//! Rendered page artifacts.

use quire_meta::FrontMatter;
use serde::Serialize;

/// HTML and metadata produced from one document.
///
/// Immutable once built and shared as `Arc<RenderedArtifact>` between the
/// cache and every caller that rendered the same bytes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedArtifact {
    /// Rendered body HTML.
    pub html: String,
    /// Front matter, empty when absent or malformed.
    pub metadata: FrontMatter,
}

impl RenderedArtifact {
    /// Split front matter from `source` and render the body.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let (body, metadata) = quire_meta::split(source);
        Self {
            html: quire_renderer::render(body),
            metadata,
        }
    }

    /// Decode raw document bytes and build the artifact.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD.
    #[must_use]
    pub fn from_bytes(raw: &[u8]) -> Self {
        Self::from_source(&String::from_utf8_lossy(raw))
    }
}
