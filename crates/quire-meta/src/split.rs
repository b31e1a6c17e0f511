//! Splitting a leading `---` block from a document body.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

use crate::FrontMatter;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// Separate front matter from the document body.
///
/// A block is recognized when the first line is exactly `---` and a later line
/// is exactly `---`. Trailing spaces, tabs and `\r` on delimiter lines are
/// ignored, as is a leading byte order mark. The body starts right after the
/// closing delimiter's line terminator.
///
/// Without a complete block the whole input is returned as the body. A
/// complete block that isn't a YAML mapping yields empty metadata but is
/// still removed from the body.
///
/// # Example
///
/// ```
/// let (body, meta) = quire_meta::split("---\ntitle: Hi\n---\n\nHello *world*");
///
/// assert_eq!(body, "\nHello *world*");
/// assert_eq!(meta.title(), Some("Hi"));
/// ```
#[must_use]
pub fn split(raw: &str) -> (&str, FrontMatter) {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);

    let Some((first, mut rest_start)) = next_line(text, 0) else {
        return (raw, FrontMatter::default());
    };
    if !is_delimiter(first) {
        return (raw, FrontMatter::default());
    }

    let yaml_start = rest_start;
    while let Some((line, next)) = next_line(text, rest_start) {
        if is_delimiter(line) {
            let yaml = &text[yaml_start..rest_start];
            return (&text[next..], parse(yaml));
        }
        rest_start = next;
    }

    (raw, FrontMatter::default())
}

/// Return the line starting at `start` (without terminator) and the offset
/// of the following line.
fn next_line(text: &str, start: usize) -> Option<(&str, usize)> {
    if start >= text.len() {
        return None;
    }
    let rest = &text[start..];
    Some(match rest.find('\n') {
        Some(end) => (&rest[..end], start + end + 1),
        None => (rest, text.len()),
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches([' ', '\t', '\r']) == DELIMITER
}

fn parse(yaml: &str) -> FrontMatter {
    if yaml.trim().is_empty() {
        return FrontMatter::default();
    }

    match serde_yaml::from_str::<Yaml>(yaml) {
        Ok(Yaml::Mapping(mapping)) => mapping
            .into_iter()
            .filter_map(|(key, value)| Some((scalar_key(&key)?, to_json(value))))
            .collect(),
        Ok(Yaml::Null) => FrontMatter::default(),
        Ok(other) => {
            tracing::debug!(kind = yaml_kind(&other), "Front matter is not a mapping");
            FrontMatter::default()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Malformed front matter");
            FrontMatter::default()
        }
    }
}

fn scalar_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_owned()),
        Yaml::Tagged(tagged) => scalar_key(&tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => {
            tracing::debug!("Skipping front matter entry with non-scalar key");
            None
        }
    }
}

fn to_json(value: Yaml) -> Value {
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(to_json).collect()),
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .filter_map(|(key, value)| Some((scalar_key(&key)?, to_json(value))))
                .collect::<Map<String, Value>>(),
        ),
        Yaml::Tagged(tagged) => to_json(tagged.value),
    }
}

fn yaml_kind(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Bool(_) => "bool",
        Yaml::Number(_) => "number",
        Yaml::String(_) => "string",
        Yaml::Sequence(_) => "sequence",
        Yaml::Mapping(_) => "mapping",
        Yaml::Tagged(_) => "tagged",
    }
}
