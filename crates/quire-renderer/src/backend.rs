//! Output format hooks for [`MarkdownRenderer`](crate::MarkdownRenderer).

use pulldown_cmark::BlockQuoteKind;

/// Format-specific rendering operations.
///
/// The renderer handles structure shared by every HTML dialect (paragraphs,
/// lists, tables, inline formatting) and delegates the elements whose markup
/// varies between targets to the backend.
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Language from the fence info string (e.g., "rust")
    /// * `content` - Raw code, not yet escaped
    /// * `out` - Output buffer
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render a blockquote opening tag.
    ///
    /// `kind` is set for GFM alerts (`> [!NOTE]`).
    fn blockquote_start(kind: Option<BlockQuoteKind>, out: &mut String);

    /// Render a blockquote closing tag.
    fn blockquote_end(kind: Option<BlockQuoteKind>, out: &mut String);

    /// Render an image. All arguments are unescaped.
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a hard line break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a thematic break.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list checkbox.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
