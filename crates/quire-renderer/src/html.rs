//! HTML backend for markdown rendering.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::fmt::Write;

use pulldown_cmark::BlockQuoteKind;

use crate::backend::RenderBackend;
use crate::util::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code class="language-*">` for code blocks
/// - `<blockquote>` for blockquotes, with a `markdown-alert-*` class for GFM alerts
/// - `<img>` for images
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlBackend;

fn alert_class(kind: BlockQuoteKind) -> &'static str {
    match kind {
        BlockQuoteKind::Note => "note",
        BlockQuoteKind::Tip => "tip",
        BlockQuoteKind::Important => "important",
        BlockQuoteKind::Warning => "warning",
        BlockQuoteKind::Caution => "caution",
    }
}

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        match lang {
            Some(lang) => {
                let _ = write!(
                    out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(content)
                );
            }
            None => {
                let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
            }
        }
    }

    fn blockquote_start(kind: Option<BlockQuoteKind>, out: &mut String) {
        match kind {
            Some(kind) => {
                let _ = write!(
                    out,
                    r#"<blockquote class="markdown-alert markdown-alert-{}">"#,
                    alert_class(kind)
                );
            }
            None => out.push_str("<blockquote>"),
        }
    }

    fn blockquote_end(_kind: Option<BlockQuoteKind>, out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let _ = write!(out, r#"<img src="{}" alt="{}""#, escape_html(src), escape_html(alt));
        if !title.is_empty() {
            let _ = write!(out, r#" title="{}""#, escape_html(title));
        }
        out.push('>');
    }
}
