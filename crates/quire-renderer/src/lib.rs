//! Markdown to HTML renderer with pluggable backends.
//!
//! [`MarkdownRenderer`] walks `pulldown-cmark` events and writes HTML through
//! a [`RenderBackend`]. [`HtmlBackend`] produces semantic HTML5; other
//! dialects only need to override the elements whose markup differs.
//!
//! For the common case, [`render`] converts a markdown body to HTML with the
//! default options:
//!
//! ```
//! assert_eq!(quire_renderer::render("Hello *world*"), "<p>Hello <em>world</em></p>");
//! ```

mod backend;
mod html;
mod renderer;
mod state;
mod util;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use util::{escape_html, slugify};

/// Render markdown to HTML with GFM extensions enabled.
///
/// Pure and deterministic: identical input always yields identical output.
#[must_use]
pub fn render(markdown: &str) -> String {
    MarkdownRenderer::<HtmlBackend>::new()
        .render_markdown(markdown)
        .html
}
