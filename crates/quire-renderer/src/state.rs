//! Context tracked while walking markdown events.

use std::collections::{HashMap, HashSet};

use pulldown_cmark::Alignment;

use crate::util::slugify;

/// Buffered code block content.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// Finish the block, returning `(language, content)`.
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Column alignment and header/body position inside a table.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Tag name for the current cell.
    pub(crate) fn cell_tag(&self) -> &'static str {
        if self.in_head { "th" } else { "td" }
    }

    /// `style` attribute for the current cell, or an empty string.
    pub(crate) fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Image whose alt text is still being collected.
#[derive(Default)]
pub(crate) struct ImageState {
    pending: Option<(String, String)>,
    alt: String,
    /// Images opened inside the pending image's alt text.
    nested: usize,
}

impl ImageState {
    /// Begin an image. Inside another image only its alt text is kept.
    pub(crate) fn start(&mut self, src: String, title: String) {
        if self.pending.is_some() {
            self.nested += 1;
            return;
        }
        self.pending = Some((src, title));
        self.alt.clear();
    }

    /// Finish the image, returning `(src, title, alt)`.
    ///
    /// Returns `None` when closing an image nested in another's alt text.
    pub(crate) fn end(&mut self) -> Option<(String, String, String)> {
        if self.nested > 0 {
            self.nested -= 1;
            return None;
        }
        let (src, title) = self.pending.take()?;
        Some((src, title, std::mem::take(&mut self.alt)))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt.push_str(text);
    }
}

/// A finished heading ready to be written.
pub(crate) struct Heading {
    pub(crate) level: u8,
    pub(crate) id: String,
    pub(crate) html: String,
}

/// Heading capture, unique anchor ids and title extraction.
pub(crate) struct HeadingState {
    extract_title: bool,
    title: Option<String>,
    current_level: Option<u8>,
    /// Plain text of the current heading, used for the slug and title.
    text: String,
    /// Markup of the current heading, including inline formatting.
    html: String,
    id_counts: HashMap<String, usize>,
    used_ids: HashSet<String>,
}

impl HeadingState {
    pub(crate) fn new(extract_title: bool) -> Self {
        Self {
            extract_title,
            title: None,
            current_level: None,
            text: String::new(),
            html: String::new(),
            id_counts: HashMap::new(),
            used_ids: HashSet::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    pub(crate) fn complete(&mut self) -> Option<Heading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);

        if self.extract_title && level == 1 && self.title.is_none() {
            self.title = Some(text.trim().to_owned());
        }

        Some(Heading {
            level,
            id: self.unique_id(&text),
            html: html.trim().to_owned(),
        })
    }

    /// Slug for `text`, suffixed with `-1`, `-2`, ... until it is unused.
    fn unique_id(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base.push_str("section");
        }
        let count = self.id_counts.entry(base.clone()).or_default();
        let mut id = match *count {
            0 => base.clone(),
            n => format!("{base}-{n}"),
        };
        while self.used_ids.contains(&id) {
            *count += 1;
            id = format!("{base}-{count}");
        }
        *count += 1;
        self.used_ids.insert(id.clone());
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }
}
