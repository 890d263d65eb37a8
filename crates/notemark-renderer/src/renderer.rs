//! Generic dialect renderer with pluggable backend.

use std::borrow::Cow;
use std::fmt::Write;
use std::marker::PhantomData;

use crate::backend::{CalloutKind, RenderBackend};
use crate::event::{Event, Tag, TagEnd};
use crate::features::Features;
use crate::parser::Parser;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, TocEntry, escape_html};

/// Result of rendering a document.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Title extracted from the first H1 (if `with_title_extraction` was
    /// enabled).
    pub title: Option<String>,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Warnings recorded during parsing (malformed tables, unterminated
    /// fences).
    pub warnings: Vec<String>,
}

/// Generic dialect renderer with pluggable backend.
///
/// Walks the parser's event stream, handling common structure (paragraphs,
/// headings, lists, tables, inline spans) generically and delegating
/// format-specific elements to the [`RenderBackend`].
///
/// # Example
///
/// ```
/// use notemark_renderer::{HtmlBackend, MarkdownRenderer};
///
/// let mut renderer = MarkdownRenderer::<HtmlBackend>::new().with_title_extraction();
/// let result = renderer.render_source("# Post\n\nBody");
/// assert_eq!(result.title.as_deref(), Some("Post"));
/// ```
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<String>,
    /// Stack of callout kinds for nested blockquotes (plain blockquote uses
    /// None).
    callout_stack: Vec<Option<CalloutKind>>,
    features: Features,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer with every dialect construct enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(false),
            pending_image: None,
            callout_stack: Vec::new(),
            features: Features::default(),
            _backend: PhantomData,
        }
    }

    /// Enable title extraction from the first H1 heading.
    ///
    /// The heading is still rendered but excluded from the table of
    /// contents; its text becomes [`RenderResult::title`].
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.heading = HeadingState::new(true);
        self
    }

    /// Restrict the recognized construct set.
    ///
    /// Disabled constructs pass through as literal text.
    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// The configured feature set.
    #[must_use]
    pub fn features(&self) -> Features {
        self.features
    }

    /// Create a configured parser for the given source text.
    #[must_use]
    pub fn create_parser<'a>(&self, source: &'a str) -> Parser<'a> {
        Parser::new_ext(source, self.features)
    }

    /// Parse and render source text, carrying parse warnings into the
    /// result.
    pub fn render_source(&mut self, source: &str) -> RenderResult {
        let (events, mut warnings) = self.create_parser(source).into_parts();
        let mut result = self.render(events);
        warnings.append(&mut result.warnings);
        result.warnings = warnings;
        result
    }

    /// Render a stream of events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.heading.take_title(),
            toc: self.heading.take_toc(),
            warnings: Vec::new(),
        }
    }

    /// Push content to output or heading buffer based on context.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::HardBreak => B::hard_break(&mut self.output),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading(level) => {
                // Opening tag is written in end_tag once the ID is known.
                self.heading.start_heading(level);
            }
            Tag::BlockQuote(kind) => {
                self.callout_stack.push(kind);
                match kind {
                    Some(callout) => B::callout_start(callout, &mut self.output),
                    None => B::blockquote_start(&mut self.output),
                }
            }
            Tag::CodeBlock(lang) => self.code.start(lang.map(Cow::into_owned)),
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => write!(self.output, r#"<ol start="{n}">"#).unwrap(),
                None => self.output.push_str("<ul>"),
            },
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
                let align = self.table.current_alignment_style();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Highlight => self.push_inline("<mark>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link { url } => {
                let mut open = String::new();
                B::link_open(&url, &mut open);
                self.push_inline(&open);
            }
            Tag::Image { url } => {
                // Start collecting alt text; the figure is rendered in end_tag.
                self.image.start();
                self.pending_image = Some(url.into_owned());
            }
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some((level, id, html)) = self.heading.complete_heading() {
                    write!(
                        self.output,
                        r#"<h{level} id="{id}">{}</h{level}>"#,
                        html.trim()
                    )
                    .unwrap();
                }
            }
            TagEnd::BlockQuote => match self.callout_stack.pop() {
                Some(Some(callout)) => B::callout_end(callout, &mut self.output),
                _ => B::blockquote_end(&mut self.output),
            },
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Highlight => self.push_inline("</mark>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some(src) = self.pending_image.take() {
                    B::image(&src, &alt, &mut self.output);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.push_html(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.heading.is_active() {
            self.heading.push_text(code);
            write!(
                self.heading.html_buffer(),
                "<code>{}</code>",
                escape_html(code)
            )
            .unwrap();
        } else {
            write!(self.output, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}
