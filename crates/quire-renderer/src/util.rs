//! Text helpers shared by the renderer and backends.

use pulldown_cmark::HeadingLevel;

/// Escape text for use in HTML content and quoted attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Convert heading text to an anchor slug.
///
/// Lowercases ASCII alphanumerics, collapses runs of whitespace, `-` and `_`
/// into a single dash, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    // Starts true so no leading dash is emitted.
    let mut pending_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else if !pending_dash && (c.is_whitespace() || c == '-' || c == '_') {
            slug.push('-');
            pending_dash = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
