//! Render backend trait for format-specific output.
//!
//! The generic renderer handles structure (paragraphs, headings, lists,
//! tables, inline spans); format-specific elements (code blocks, callouts,
//! figures, links) are delegated to a [`RenderBackend`] implementation.

use std::fmt::Write;

use crate::state::escape_html;

/// Callout variant keyed by the bracket tag in a blockquote
/// (`> [!NOTE] …`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalloutKind {
    Note,
    Tip,
    Warning,
    Info,
}

impl CalloutKind {
    /// Parse a bracket tag body (ASCII case-insensitive).
    pub(crate) fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("NOTE") {
            Some(Self::Note)
        } else if tag.eq_ignore_ascii_case("TIP") {
            Some(Self::Tip)
        } else if tag.eq_ignore_ascii_case("WARNING") {
            Some(Self::Warning)
        } else if tag.eq_ignore_ascii_case("INFO") {
            Some(Self::Info)
        } else {
            None
        }
    }

    /// Display title shown in the callout header.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }

    /// CSS class suffix (`callout-note`, `callout-tip`, ...).
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// Backend trait for format-specific rendering operations.
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language token from the fence info line
    /// * `content` - The literal code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render callout start, including its title header.
    fn callout_start(kind: CalloutKind, out: &mut String);

    /// Render callout end.
    fn callout_end(kind: CalloutKind, out: &mut String);

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text (literal, unescaped)
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, out: &mut String);

    /// Render a link opening tag.
    ///
    /// Default emits a plain anchor. Override for format-specific link
    /// behavior (target attributes, URL rewriting).
    fn link_open(url: &str, out: &mut String) {
        write!(out, r#"<a href="{}">"#, escape_html(url)).unwrap();
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
