//! Event stream emitted by the dialect parser.

use std::borrow::Cow;

use crate::backend::CalloutKind;

/// Column alignment parsed from a table separator row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// No explicit alignment.
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// Opening tag for a block or span construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tag<'a> {
    Paragraph,
    /// Heading with level 1-3.
    Heading(u8),
    /// Blockquote, optionally promoted to a callout by a bracket tag.
    BlockQuote(Option<CalloutKind>),
    /// Fenced code block with optional language token.
    ///
    /// Content arrives as a single [`Event::Text`] and is literal: inline
    /// rules never run over it.
    CodeBlock(Option<Cow<'a, str>>),
    /// List container; `Some(n)` is an ordered list starting at `n`.
    List(Option<u64>),
    Item,
    /// Table with per-column alignments from the separator row.
    Table(Vec<Alignment>),
    /// Header row of a table.
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Highlight,
    Superscript,
    Subscript,
    Link { url: Cow<'a, str> },
    /// Image; alt text arrives as a literal [`Event::Text`] before the end tag.
    Image { url: Cow<'a, str> },
}

/// Closing tag matching a [`Tag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagEnd {
    Paragraph,
    Heading(u8),
    BlockQuote,
    CodeBlock,
    /// `true` for ordered lists.
    List(bool),
    Item,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Highlight,
    Superscript,
    Subscript,
    Link,
    Image,
}

/// A parse event.
///
/// Text is borrowed from the source wherever possible; only multi-line
/// captures (fenced code content) are owned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event<'a> {
    Start(Tag<'a>),
    End(TagEnd),
    /// Plain text. Escaping happens at render time.
    Text(Cow<'a, str>),
    /// Inline code span; content is literal.
    Code(Cow<'a, str>),
    /// Line break within a paragraph (a single newline in the source).
    HardBreak,
    /// Horizontal rule.
    Rule,
    /// Task list checkbox state, emitted right after `Start(Item)`.
    TaskListMarker(bool),
}
