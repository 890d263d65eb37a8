//! Note-flavored markdown renderer with pluggable backends.
//!
//! This crate parses a restricted, note-taking-flavored markdown dialect
//! (headings, emphasis, strikethrough, highlight, superscript/subscript,
//! inline code, callout blockquotes, task lists, tables, fenced code,
//! figures, links) and renders it through the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! Parsing is a two-phase pipeline rather than ordered text substitution:
//!
//! - A block pass classifies lines into block-level units. Fenced code is
//!   captured verbatim here, so inline rules never touch code content.
//! - An inline pass scans non-code text left to right. At each marker
//!   position the longer form wins (`**` before `*`, `~~` before `~`),
//!   which resolves the classic delimiter ambiguities structurally.
//!
//! The parser emits a flat [`Event`] stream; [`MarkdownRenderer`] walks the
//! events and delegates format-specific output to the backend
//! ([`HtmlBackend`] today).
//!
//! Rendering never fails: malformed constructs degrade to literal text,
//! optionally recording a warning in the [`RenderResult`].
//!
//! # Example
//!
//! ```
//! use notemark_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
//! let result = renderer.render_source("# Hello\n\n**Bold** text");
//! assert!(result.html.contains("<strong>Bold</strong>"));
//! ```

mod backend;
mod event;
mod features;
mod html;
mod parser;
mod renderer;
mod state;

pub use backend::{CalloutKind, RenderBackend};
pub use event::{Alignment, Event, Tag, TagEnd};
pub use features::Features;
pub use html::HtmlBackend;
pub use parser::Parser;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
