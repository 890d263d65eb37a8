//! Inline span scanning within non-code text.
//!
//! A single left-to-right pass. At each marker position the longer form is
//! tried first (`**` before `*`, `~~` before `~`), so delimiter ambiguities
//! are resolved structurally instead of by substitution order. A marker
//! with no matching closer, or with empty content, passes through as
//! literal text.

use std::borrow::Cow;

use crate::event::{Event, Tag, TagEnd};
use crate::features::Features;

/// Maximum nesting depth for spans inside spans.
const MAX_SPAN_DEPTH: usize = 16;

/// Closer searches that already failed for the rest of the segment.
///
/// Absence of a closing marker is monotone: once a search comes up empty,
/// every later opener of the same kind would search a subset. Recording the
/// failure keeps adversarial marker soup from re-scanning the tail at every
/// position.
#[derive(Default)]
struct Exhausted {
    code: bool,
    bracket: bool,
    strong: bool,
    emphasis: bool,
    strikethrough: bool,
    subscript: bool,
    highlight: bool,
    superscript: bool,
}

#[derive(Clone, Copy)]
enum SpanKind {
    Strong,
    Emphasis,
    Strikethrough,
    Subscript,
    Highlight,
    Superscript,
}

impl SpanKind {
    fn tag<'a>(self) -> Tag<'a> {
        match self {
            Self::Strong => Tag::Strong,
            Self::Emphasis => Tag::Emphasis,
            Self::Strikethrough => Tag::Strikethrough,
            Self::Subscript => Tag::Subscript,
            Self::Highlight => Tag::Highlight,
            Self::Superscript => Tag::Superscript,
        }
    }

    fn end(self) -> TagEnd {
        match self {
            Self::Strong => TagEnd::Strong,
            Self::Emphasis => TagEnd::Emphasis,
            Self::Strikethrough => TagEnd::Strikethrough,
            Self::Subscript => TagEnd::Subscript,
            Self::Highlight => TagEnd::Highlight,
            Self::Superscript => TagEnd::Superscript,
        }
    }
}

enum InlineMatch<'a> {
    Code(&'a str),
    Image { url: &'a str, alt: &'a str },
    Link { url: &'a str, label: &'a str },
    Span { kind: SpanKind, inner: &'a str },
}

/// Parse inline constructs in `text`, appending events.
pub(crate) fn parse<'a>(text: &'a str, features: Features, events: &mut Vec<Event<'a>>) {
    parse_nested(text, features, 0, events);
}

fn parse_nested<'a>(text: &'a str, features: Features, depth: usize, events: &mut Vec<Event<'a>>) {
    if depth >= MAX_SPAN_DEPTH {
        push_text(events, text);
        return;
    }

    let bytes = text.as_bytes();
    let mut exhausted = Exhausted::default();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        // All marker bytes are ASCII, so a matching `pos` is always a char
        // boundary; non-marker bytes just advance.
        let matched = match bytes[pos] {
            b'`' => code_span(text, pos, &mut exhausted),
            b'!' => image(text, pos, &mut exhausted),
            b'[' => link(text, pos, &mut exhausted),
            b'*' => star(text, pos, &mut exhausted),
            b'~' => tilde(text, pos, features, &mut exhausted),
            b'=' if features.contains(Features::HIGHLIGHT) => {
                span(text, pos, "==", SpanKind::Highlight, &mut exhausted.highlight)
            }
            b'^' if features.contains(Features::SUPER_SUB) => {
                span(text, pos, "^", SpanKind::Superscript, &mut exhausted.superscript)
            }
            _ => None,
        };

        match matched {
            Some((inline, end)) => {
                if plain_start < pos {
                    events.push(Event::Text(Cow::Borrowed(&text[plain_start..pos])));
                }
                emit(inline, features, depth, events);
                pos = end;
                plain_start = end;
            }
            None => pos += 1,
        }
    }

    push_text(events, &text[plain_start..]);
}

fn emit<'a>(inline: InlineMatch<'a>, features: Features, depth: usize, events: &mut Vec<Event<'a>>) {
    match inline {
        InlineMatch::Code(content) => events.push(Event::Code(Cow::Borrowed(content))),
        InlineMatch::Image { url, alt } => {
            events.push(Event::Start(Tag::Image {
                url: Cow::Borrowed(url),
            }));
            push_text(events, alt);
            events.push(Event::End(TagEnd::Image));
        }
        InlineMatch::Link { url, label } => {
            events.push(Event::Start(Tag::Link {
                url: Cow::Borrowed(url),
            }));
            parse_nested(label, features, depth + 1, events);
            events.push(Event::End(TagEnd::Link));
        }
        InlineMatch::Span { kind, inner } => {
            events.push(Event::Start(kind.tag()));
            parse_nested(inner, features, depth + 1, events);
            events.push(Event::End(kind.end()));
        }
    }
}

fn push_text<'a>(events: &mut Vec<Event<'a>>, text: &'a str) {
    if !text.is_empty() {
        events.push(Event::Text(Cow::Borrowed(text)));
    }
}

/// Match `marker…marker` at `pos`. Empty content does not match.
fn delimited<'a>(
    text: &'a str,
    pos: usize,
    marker: &str,
    exhausted: &mut bool,
) -> Option<(&'a str, usize)> {
    let after = text[pos..].strip_prefix(marker)?;
    if *exhausted {
        return None;
    }
    match after.find(marker) {
        None => {
            *exhausted = true;
            None
        }
        Some(0) => None,
        Some(close) => Some((
            &after[..close],
            pos + marker.len() + close + marker.len(),
        )),
    }
}

fn span<'a>(
    text: &'a str,
    pos: usize,
    marker: &str,
    kind: SpanKind,
    exhausted: &mut bool,
) -> Option<(InlineMatch<'a>, usize)> {
    let (inner, end) = delimited(text, pos, marker, exhausted)?;
    Some((InlineMatch::Span { kind, inner }, end))
}

/// `**strong**` wins over `*emphasis*` at the same position.
fn star<'a>(
    text: &'a str,
    pos: usize,
    exhausted: &mut Exhausted,
) -> Option<(InlineMatch<'a>, usize)> {
    span(text, pos, "**", SpanKind::Strong, &mut exhausted.strong)
        .or_else(|| span(text, pos, "*", SpanKind::Emphasis, &mut exhausted.emphasis))
}

/// `~~strikethrough~~` wins over `~subscript~`, and a single-tilde closer
/// that is half of a `~~` pair is left for strikethrough to claim.
fn tilde<'a>(
    text: &'a str,
    pos: usize,
    features: Features,
    exhausted: &mut Exhausted,
) -> Option<(InlineMatch<'a>, usize)> {
    if features.contains(Features::STRIKETHROUGH)
        && let Some(matched) = span(
            text,
            pos,
            "~~",
            SpanKind::Strikethrough,
            &mut exhausted.strikethrough,
        )
    {
        return Some(matched);
    }
    if features.contains(Features::SUPER_SUB)
        && let Some((inline, end)) = span(text, pos, "~", SpanKind::Subscript, &mut exhausted.subscript)
        && !text[end..].starts_with('~')
    {
        return Some((inline, end));
    }
    None
}

fn code_span<'a>(
    text: &'a str,
    pos: usize,
    exhausted: &mut Exhausted,
) -> Option<(InlineMatch<'a>, usize)> {
    if exhausted.code {
        return None;
    }
    let after = &text[pos + 1..];
    match after.find('`') {
        None => {
            exhausted.code = true;
            None
        }
        Some(0) => None,
        Some(close) => Some((InlineMatch::Code(&after[..close]), pos + 1 + close + 1)),
    }
}

/// Parse `[label](url)` with the `[` at `open`.
///
/// Returns `(label, url, end)`. The first `]` closes the label; nested
/// brackets are not part of the dialect.
fn bracket_parts<'a>(
    text: &'a str,
    open: usize,
    exhausted: &mut Exhausted,
) -> Option<(&'a str, &'a str, usize)> {
    if exhausted.bracket {
        return None;
    }
    let after = &text[open + 1..];
    let Some(close_bracket) = after.find(']') else {
        exhausted.bracket = true;
        return None;
    };
    let label = &after[..close_bracket];
    let rest = after[close_bracket + 1..].strip_prefix('(')?;
    let close_paren = rest.find(')')?;
    let url = &rest[..close_paren];
    Some((label, url, open + close_bracket + close_paren + 4))
}

/// `![alt](url)`, checked before links so the `!` prefix is never dropped.
fn image<'a>(
    text: &'a str,
    pos: usize,
    exhausted: &mut Exhausted,
) -> Option<(InlineMatch<'a>, usize)> {
    if text.as_bytes().get(pos + 1) != Some(&b'[') {
        return None;
    }
    let (alt, url, end) = bracket_parts(text, pos + 1, exhausted)?;
    Some((InlineMatch::Image { url, alt }, end))
}

fn link<'a>(
    text: &'a str,
    pos: usize,
    exhausted: &mut Exhausted,
) -> Option<(InlineMatch<'a>, usize)> {
    let (label, url, end) = bracket_parts(text, pos, exhausted)?;
    Some((InlineMatch::Link { url, label }, end))
}
