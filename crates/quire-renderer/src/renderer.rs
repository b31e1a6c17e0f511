//! Generic markdown renderer with pluggable backend.

use std::fmt::Write;
use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::backend::RenderBackend;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState};
use crate::util::{escape_html, heading_level_to_num};

/// Result of rendering markdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML, without a trailing newline.
    pub html: String,
    /// Text of the first H1 heading (if title extraction was enabled).
    pub title: Option<String>,
}

/// Generic markdown renderer with pluggable backend.
///
/// Walks `pulldown-cmark` events and writes HTML, delegating code blocks,
/// blockquotes, images and a few void elements to the [`RenderBackend`].
/// Output depends only on the input text and the renderer options.
///
/// # Example
///
/// ```
/// use quire_renderer::{HtmlBackend, MarkdownRenderer};
///
/// let result = MarkdownRenderer::<HtmlBackend>::new()
///     .with_title_extraction()
///     .render_markdown("# Hello\n\n**Bold** text");
///
/// assert_eq!(result.title.as_deref(), Some("Hello"));
/// assert_eq!(
///     result.html,
///     r#"<h1 id="hello">Hello</h1><p><strong>Bold</strong> text</p>"#
/// );
/// ```
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    extract_title: bool,
    gfm: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with GFM extensions enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(false),
            extract_title: false,
            gfm: true,
            _backend: PhantomData,
        }
    }

    /// Report the first H1 heading as [`RenderResult::title`].
    ///
    /// The heading is still rendered.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Enable or disable GitHub Flavored Markdown extensions (tables,
    /// strikethrough, task lists, alerts).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options matching this renderer's configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Create a parser for `markdown` using [`parser_options`](Self::parser_options).
    #[must_use]
    pub fn create_parser<'a>(&self, markdown: &'a str) -> Parser<'a> {
        Parser::new_ext(markdown, self.parser_options())
    }

    /// Parse and render markdown text.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = self.create_parser(markdown);
        self.render(parser)
    }

    /// Render markdown events and return the result.
    ///
    /// State from a previous call (heading ids, extracted title) is reset, so
    /// a renderer can be reused.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        self.output.clear();
        self.code = CodeBlockState::default();
        self.table = TableState::default();
        self.image = ImageState::default();
        self.heading = HeadingState::new(self.extract_title);

        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.heading.take_title(),
        }
    }

    /// Write inline markup to the heading buffer or the output.
    ///
    /// Dropped inside image alt text, which is plain text only.
    fn push_inline(&mut self, markup: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.html_buffer().push_str(markup);
        } else {
            self.output.push_str(markup);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.push_inline(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => {
                let mut markup = String::new();
                B::hard_break(&mut markup);
                self.push_inline(&markup);
            }
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            // Footnotes and math are never enabled in the parser options.
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            // The opening tag is written at the end, once the id is known.
            Tag::Heading { level, .. } => self.heading.start(heading_level_to_num(level)),
            Tag::BlockQuote(kind) => B::blockquote_start(kind, &mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(start)) => {
                let _ = write!(self.output, r#"<ol start="{start}">"#);
            }
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let _ = write!(
                    self.output,
                    "<{}{}>",
                    self.table.cell_tag(),
                    self.table.alignment_style()
                );
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut markup = format!(r#"<a href="{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(markup, r#" title="{}""#, escape_html(&title));
                }
                markup.push('>');
                self.push_inline(&markup);
            }
            Tag::Image {
                dest_url, title, ..
            } => self.image.start(dest_url.into_string(), title.into_string()),
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::HtmlBlock | Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete() {
                    let _ = write!(
                        self.output,
                        r#"<h{level} id="{id}">{html}</h{level}>"#,
                        level = heading.level,
                        id = heading.id,
                        html = heading.html,
                    );
                }
            }
            TagEnd::BlockQuote(kind) => B::blockquote_end(kind, &mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                let _ = write!(self.output, "</{}>", self.table.cell_tag());
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some((src, title, alt)) = self.image.end() {
                    let mut markup = String::new();
                    B::image(&src, &alt, &title, &mut markup);
                    self.push_inline(&markup);
                }
            }
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::HtmlBlock | TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image alt > heading > normal text
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.html_buffer().push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.heading.is_active() {
            self.heading.push_text(" ");
            self.heading.html_buffer().push('\n');
        } else {
            self.output.push('\n');
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}
