//! Block-level parsing: line classification and run grouping.
//!
//! The source is split into lines and classified most-specific-first:
//! fenced code, horizontal rule, heading, blockquote/callout, list items
//! (task syntax before plain bullets), table runs, paragraph. Adjacent
//! lines of the same kind are grouped into one container. Fenced code is
//! captured verbatim here so the inline pass never sees it.

mod inline;
mod table;

use std::borrow::Cow;

use crate::backend::CalloutKind;
use crate::event::{Event, Tag, TagEnd};
use crate::features::Features;

/// Maximum blockquote nesting depth re-parsed as blocks. Deeper `>` runs
/// degrade to literal paragraph text so pathological nesting stays cheap.
const MAX_QUOTE_DEPTH: usize = 8;

/// Dialect parser producing a flat event stream.
///
/// Parsing never fails; malformed constructs degrade to literal text and
/// may record a warning.
///
/// ```
/// use notemark_renderer::{Event, Parser, Tag};
///
/// let parser = Parser::new("**hi**");
/// let events: Vec<_> = parser.into_iter().collect();
/// assert_eq!(events[0], Event::Start(Tag::Paragraph));
/// ```
pub struct Parser<'a> {
    events: Vec<Event<'a>>,
    warnings: Vec<String>,
}

impl<'a> Parser<'a> {
    /// Parse with every recognized construct enabled.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::new_ext(source, Features::default())
    }

    /// Parse with an explicit feature subset.
    #[must_use]
    pub fn new_ext(source: &'a str, features: Features) -> Self {
        let mut parser = Self {
            events: Vec::new(),
            warnings: Vec::new(),
        };
        let lines: Vec<&str> = source.lines().collect();
        parser.parse_blocks(&lines, features, 0, 0);
        parser
    }

    /// Warnings recorded while parsing (malformed tables, unterminated
    /// fences).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The parsed event stream.
    #[must_use]
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// Split the parser into its events and warnings.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Event<'a>>, Vec<String>) {
        (self.events, self.warnings)
    }

    /// `offset` is the source line index of `lines[0]`, used for warning
    /// positions inside nested blocks.
    fn parse_blocks(&mut self, lines: &[&'a str], features: Features, depth: usize, offset: usize) {
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            if line.trim().is_empty() {
                i += 1;
            } else if fence_open(line).is_some() {
                i = self.parse_fence(lines, i, offset);
            } else if line.trim() == "---" {
                self.events.push(Event::Rule);
                i += 1;
            } else if let Some((level, rest)) = heading(line) {
                self.events.push(Event::Start(Tag::Heading(level)));
                inline::parse(rest, features, &mut self.events);
                self.events.push(Event::End(TagEnd::Heading(level)));
                i += 1;
            } else if is_quote_line(line) {
                i = self.parse_quote(lines, i, features, depth, offset);
            } else if list_item(line, features).is_some() {
                i = self.parse_list(lines, i, features);
            } else if features.contains(Features::TABLES) && table::is_table_line(line) {
                i = self.parse_table(lines, i, features, offset);
            } else {
                i = self.parse_paragraph(lines, i, features);
            }
        }
    }

    fn parse_fence(&mut self, lines: &[&'a str], start: usize, offset: usize) -> usize {
        let Some((open_len, lang)) = fence_open(lines[start]) else {
            return start + 1;
        };

        let mut end = start + 1;
        while end < lines.len() && !fence_close(lines[end], open_len) {
            end += 1;
        }

        let mut content = lines[start + 1..end].join("\n");
        if !content.is_empty() {
            content.push('\n');
        }

        if end == lines.len() {
            self.warnings
                .push(format!("line {}: unterminated code fence", offset + start + 1));
        } else {
            end += 1; // consume the closing fence
        }

        self.events
            .push(Event::Start(Tag::CodeBlock(lang.map(Cow::Borrowed))));
        if !content.is_empty() {
            self.events.push(Event::Text(Cow::Owned(content)));
        }
        self.events.push(Event::End(TagEnd::CodeBlock));
        end
    }

    fn parse_quote(
        &mut self,
        lines: &[&'a str],
        start: usize,
        features: Features,
        depth: usize,
        offset: usize,
    ) -> usize {
        let mut end = start;
        while end < lines.len() && is_quote_line(lines[end]) {
            end += 1;
        }

        if depth >= MAX_QUOTE_DEPTH {
            self.paragraph_from(&lines[start..end], features);
            return end;
        }

        let mut inner: Vec<&'a str> = lines[start..end]
            .iter()
            .copied()
            .map(quote_content)
            .collect();

        let mut kind = None;
        if features.contains(Features::CALLOUTS)
            && let Some((tag_kind, rest)) = callout_tag(inner[0])
        {
            kind = Some(tag_kind);
            if rest.is_empty() {
                inner.remove(0);
            } else {
                inner[0] = rest;
            }
        }

        self.events.push(Event::Start(Tag::BlockQuote(kind)));
        self.parse_blocks(&inner, features, depth + 1, offset + start);
        self.events.push(Event::End(TagEnd::BlockQuote));
        end
    }

    fn parse_list(&mut self, lines: &[&'a str], start: usize, features: Features) -> usize {
        let Some(first) = list_item(lines[start], features) else {
            return start + 1;
        };
        let numbered = first.is_numbered();
        let list_start = match first {
            ListItem::Numbered { number, .. } => Some(number),
            ListItem::Bullet { .. } => None,
        };

        let mut items = vec![first];
        let mut end = start + 1;
        while end < lines.len() {
            match list_item(lines[end], features) {
                Some(item) if item.is_numbered() == numbered => {
                    items.push(item);
                    end += 1;
                }
                _ => break,
            }
        }

        self.events.push(Event::Start(Tag::List(list_start)));
        for item in items {
            self.events.push(Event::Start(Tag::Item));
            let content = match item {
                ListItem::Bullet { task, content } => {
                    if let Some(checked) = task {
                        self.events.push(Event::TaskListMarker(checked));
                    }
                    content
                }
                ListItem::Numbered { content, .. } => content,
            };
            inline::parse(content, features, &mut self.events);
            self.events.push(Event::End(TagEnd::Item));
        }
        self.events.push(Event::End(TagEnd::List(numbered)));
        end
    }

    fn parse_table(
        &mut self,
        lines: &[&'a str],
        start: usize,
        features: Features,
        offset: usize,
    ) -> usize {
        let mut end = start;
        while end < lines.len() && table::is_table_line(lines[end]) {
            end += 1;
        }

        match table::parse_run(&lines[start..end]) {
            Some(run) => {
                self.events.push(Event::Start(Tag::Table(run.alignments)));
                self.events.push(Event::Start(Tag::TableHead));
                for cell in run.head {
                    self.events.push(Event::Start(Tag::TableCell));
                    inline::parse(cell, features, &mut self.events);
                    self.events.push(Event::End(TagEnd::TableCell));
                }
                self.events.push(Event::End(TagEnd::TableHead));
                for row in run.body {
                    self.events.push(Event::Start(Tag::TableRow));
                    for cell in row {
                        self.events.push(Event::Start(Tag::TableCell));
                        inline::parse(cell, features, &mut self.events);
                        self.events.push(Event::End(TagEnd::TableCell));
                    }
                    self.events.push(Event::End(TagEnd::TableRow));
                }
                self.events.push(Event::End(TagEnd::Table));
            }
            None => {
                self.warnings.push(format!(
                    "line {}: table is missing a valid separator row; rendered as text",
                    offset + start + 1
                ));
                self.paragraph_from(&lines[start..end], features);
            }
        }
        end
    }

    fn parse_paragraph(&mut self, lines: &[&'a str], start: usize, features: Features) -> usize {
        let mut end = start + 1;
        while end < lines.len() && !is_block_start(lines[end], features) {
            end += 1;
        }
        self.paragraph_from(&lines[start..end], features);
        end
    }

    /// Emit `lines` as one paragraph with hard breaks between lines.
    fn paragraph_from(&mut self, lines: &[&'a str], features: Features) {
        self.events.push(Event::Start(Tag::Paragraph));
        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                self.events.push(Event::HardBreak);
            }
            inline::parse(line, features, &mut self.events);
        }
        self.events.push(Event::End(TagEnd::Paragraph));
    }
}

impl<'a> IntoIterator for Parser<'a> {
    type Item = Event<'a>;
    type IntoIter = std::vec::IntoIter<Event<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Detect an opening fence. Returns `(fence_len, language)`.
///
/// Backtick fences only: tildes belong to strikethrough/subscript in this
/// dialect.
fn fence_open(line: &str) -> Option<(usize, Option<&str>)> {
    let trimmed = line.trim_start();
    let count = trimmed.chars().take_while(|&c| c == '`').count();
    if count < 3 {
        return None;
    }
    let info = trimmed[count..].trim();
    if info.contains('`') {
        return None;
    }
    Some((count, (!info.is_empty()).then_some(info)))
}

/// A closing fence is at least as long as the opener, with nothing after.
fn fence_close(line: &str, min_len: usize) -> bool {
    let trimmed = line.trim_start();
    let count = trimmed.chars().take_while(|&c| c == '`').count();
    count >= min_len && trimmed[count..].trim().is_empty()
}

/// Heading markers, longest prefix first; the marker must be followed by a
/// space. `####` and beyond are not part of the dialect.
fn heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_start();
    for (marker, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            return Some((level, rest.trim()));
        }
    }
    None
}

fn is_quote_line(line: &str) -> bool {
    line.trim_start().starts_with('>')
}

/// Strip one level of quote marker: `>` plus at most one space.
fn quote_content(line: &str) -> &str {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix('>').unwrap_or(trimmed);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Parse a `[!TAG]` callout marker at the start of quote content.
fn callout_tag(content: &str) -> Option<(CalloutKind, &str)> {
    let rest = content.strip_prefix("[!")?;
    let close = rest.find(']')?;
    let kind = CalloutKind::from_tag(&rest[..close])?;
    Some((kind, rest[close + 1..].trim_start()))
}

enum ListItem<'a> {
    Bullet { task: Option<bool>, content: &'a str },
    Numbered { number: u64, content: &'a str },
}

impl ListItem<'_> {
    fn is_numbered(&self) -> bool {
        matches!(self, Self::Numbered { .. })
    }
}

/// Classify a list item line. Task syntax is checked before plain bullets
/// so `[x]` / `[ ]` never leak into item text.
fn list_item<'a>(line: &'a str, features: Features) -> Option<ListItem<'a>> {
    let trimmed = line.trim_start();

    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        let (task, content) = if features.contains(Features::TASK_LISTS) {
            match task_marker(rest) {
                Some((checked, content)) => (Some(checked), content),
                None => (None, rest),
            }
        } else {
            (None, rest)
        };
        return Some(ListItem::Bullet { task, content });
    }

    let digits_end = trimmed.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let content = trimmed[digits_end..].strip_prefix(". ")?;
    let number = trimmed[..digits_end].parse().ok()?;
    Some(ListItem::Numbered { number, content })
}

fn task_marker(rest: &str) -> Option<(bool, &str)> {
    if let Some(content) = rest.strip_prefix("[x] ").or_else(|| rest.strip_prefix("[X] ")) {
        Some((true, content))
    } else if let Some(content) = rest.strip_prefix("[ ] ") {
        Some((false, content))
    } else if rest == "[x]" || rest == "[X]" {
        Some((true, ""))
    } else if rest == "[ ]" {
        Some((false, ""))
    } else {
        None
    }
}

/// Whether a line terminates the current paragraph by starting another
/// block.
fn is_block_start(line: &str, features: Features) -> bool {
    line.trim().is_empty()
        || fence_open(line).is_some()
        || line.trim() == "---"
        || heading(line).is_some()
        || is_quote_line(line)
        || list_item(line, features).is_some()
        || (features.contains(Features::TABLES) && table::is_table_line(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Alignment;
    use pretty_assertions::assert_eq;
    use std::borrow::Cow;

    fn events(source: &str) -> Vec<Event<'_>> {
        Parser::new(source).into_iter().collect()
    }

    fn text_event(s: &str) -> Event<'_> {
        Event::Text(Cow::Borrowed(s))
    }

    #[test]
    fn test_heading_levels_longest_prefix_first() {
        assert_eq!(
            events("### Three"),
            vec![
                Event::Start(Tag::Heading(3)),
                text_event("Three"),
                Event::End(TagEnd::Heading(3)),
            ]
        );
        assert_eq!(
            events("# One"),
            vec![
                Event::Start(Tag::Heading(1)),
                text_event("One"),
                Event::End(TagEnd::Heading(1)),
            ]
        );
    }

    #[test]
    fn test_four_hashes_is_not_a_heading() {
        let parsed = events("#### deep");
        assert_eq!(parsed[0], Event::Start(Tag::Paragraph));
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let parsed = events("#nospace");
        assert_eq!(parsed[0], Event::Start(Tag::Paragraph));
        assert!(parsed.contains(&text_event("#nospace")));
    }

    #[test]
    fn test_horizontal_rule_is_exactly_three_dashes() {
        assert_eq!(events("---"), vec![Event::Rule]);
        assert_eq!(events("  ---  "), vec![Event::Rule]);
        assert_eq!(events("----")[0], Event::Start(Tag::Paragraph));
    }

    #[test]
    fn test_fenced_code_block() {
        assert_eq!(
            events("```rust\nlet x = 1;\n```"),
            vec![
                Event::Start(Tag::CodeBlock(Some(Cow::Borrowed("rust")))),
                Event::Text(Cow::Owned("let x = 1;\n".to_owned())),
                Event::End(TagEnd::CodeBlock),
            ]
        );
    }

    #[test]
    fn test_fence_content_is_literal() {
        let parsed = events("```\n**not bold** and ~sub~\n```");
        assert!(!parsed.contains(&Event::Start(Tag::Strong)));
        assert!(!parsed.contains(&Event::Start(Tag::Subscript)));
        assert!(parsed.contains(&Event::Text(Cow::Owned(
            "**not bold** and ~sub~\n".to_owned()
        ))));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end_with_warning() {
        let parser = Parser::new("```\ncode");
        assert_eq!(parser.warnings().len(), 1);
        assert!(parser.warnings()[0].contains("unterminated"));
        let parsed: Vec<_> = parser.into_iter().collect();
        assert!(parsed.contains(&Event::Text(Cow::Owned("code\n".to_owned()))));
    }

    #[test]
    fn test_longer_closing_fence_closes() {
        let parsed = events("```\ncode\n````");
        assert_eq!(parsed.last(), Some(&Event::End(TagEnd::CodeBlock)));
    }

    #[test]
    fn test_plain_blockquote() {
        assert_eq!(
            events("> hello"),
            vec![
                Event::Start(Tag::BlockQuote(None)),
                Event::Start(Tag::Paragraph),
                text_event("hello"),
                Event::End(TagEnd::Paragraph),
                Event::End(TagEnd::BlockQuote),
            ]
        );
    }

    #[test]
    fn test_multiline_blockquote_coalesces() {
        let parsed = events("> a\n> b");
        let quotes = parsed
            .iter()
            .filter(|e| matches!(e, Event::Start(Tag::BlockQuote(_))))
            .count();
        assert_eq!(quotes, 1);
    }

    #[test]
    fn test_callout_with_body_on_tag_line() {
        assert_eq!(
            events("> [!WARNING] careful"),
            vec![
                Event::Start(Tag::BlockQuote(Some(CalloutKind::Warning))),
                Event::Start(Tag::Paragraph),
                text_event("careful"),
                Event::End(TagEnd::Paragraph),
                Event::End(TagEnd::BlockQuote),
            ]
        );
    }

    #[test]
    fn test_callout_with_body_on_following_lines() {
        let parsed = events("> [!TIP]\n> stay hydrated");
        assert_eq!(
            parsed[0],
            Event::Start(Tag::BlockQuote(Some(CalloutKind::Tip)))
        );
        assert!(parsed.contains(&text_event("stay hydrated")));
    }

    #[test]
    fn test_callout_tag_is_case_insensitive() {
        let parsed = events("> [!note] hi");
        assert_eq!(
            parsed[0],
            Event::Start(Tag::BlockQuote(Some(CalloutKind::Note)))
        );
    }

    #[test]
    fn test_unknown_callout_tag_stays_a_blockquote() {
        let parsed = events("> [!DANGER] x");
        assert_eq!(parsed[0], Event::Start(Tag::BlockQuote(None)));
        assert!(parsed.contains(&text_event("[!DANGER] x")));
    }

    #[test]
    fn test_nested_blockquote() {
        let parsed = events("> > deep");
        let quotes = parsed
            .iter()
            .filter(|e| matches!(e, Event::Start(Tag::BlockQuote(_))))
            .count();
        assert_eq!(quotes, 2);
    }

    #[test]
    fn test_quote_nesting_is_depth_capped() {
        let source = format!("{} x", ">".repeat(24));
        let parsed = events(&source);
        let quotes = parsed
            .iter()
            .filter(|e| matches!(e, Event::Start(Tag::BlockQuote(_))))
            .count();
        assert_eq!(quotes, MAX_QUOTE_DEPTH);
    }

    #[test]
    fn test_unordered_list_coalesces_both_markers() {
        let parsed = events("- a\n* b");
        assert_eq!(
            parsed[0],
            Event::Start(Tag::List(None)),
            "one list: {parsed:?}"
        );
        let items = parsed
            .iter()
            .filter(|e| matches!(e, Event::Start(Tag::Item)))
            .count();
        assert_eq!(items, 2);
        assert_eq!(parsed.last(), Some(&Event::End(TagEnd::List(false))));
    }

    #[test]
    fn test_ordered_list_keeps_start_number() {
        let parsed = events("3. a\n4. b");
        assert_eq!(parsed[0], Event::Start(Tag::List(Some(3))));
        assert_eq!(parsed.last(), Some(&Event::End(TagEnd::List(true))));
    }

    #[test]
    fn test_adjacent_lists_of_different_kind_split() {
        let parsed = events("- a\n1. b");
        let lists = parsed
            .iter()
            .filter(|e| matches!(e, Event::Start(Tag::List(_))))
            .count();
        assert_eq!(lists, 2);
    }

    #[test]
    fn test_task_items_are_not_plain_bullets() {
        let parsed = events("- [x] done\n- [ ] todo");
        assert!(parsed.contains(&Event::TaskListMarker(true)));
        assert!(parsed.contains(&Event::TaskListMarker(false)));
        assert!(parsed.contains(&text_event("done")));
        assert!(parsed.contains(&text_event("todo")));
        assert!(!parsed.contains(&text_event("[ ] todo")));
    }

    #[test]
    fn test_task_item_without_text() {
        let parsed = events("- [ ]");
        assert!(parsed.contains(&Event::TaskListMarker(false)));
    }

    #[test]
    fn test_number_without_dot_space_is_paragraph() {
        let parsed = events("1.no space");
        assert_eq!(parsed[0], Event::Start(Tag::Paragraph));
    }

    #[test]
    fn test_valid_table() {
        let parser = Parser::new("| A | B |\n| --- | :-: |\n| 1 | 2 |");
        assert!(parser.warnings().is_empty());
        let parsed: Vec<_> = parser.into_iter().collect();
        assert_eq!(
            parsed[0],
            Event::Start(Tag::Table(vec![Alignment::None, Alignment::Center]))
        );
        assert!(parsed.contains(&Event::Start(Tag::TableHead)));
        assert!(parsed.contains(&text_event("A")));
        assert!(parsed.contains(&text_event("2")));
        assert_eq!(parsed.last(), Some(&Event::End(TagEnd::Table)));
    }

    #[test]
    fn test_malformed_table_degrades_to_text() {
        let parser = Parser::new("| a | b |\n| c | d |");
        assert_eq!(parser.warnings().len(), 1);
        assert!(parser.warnings()[0].contains("separator"));
        let parsed: Vec<_> = parser.into_iter().collect();
        assert_eq!(parsed[0], Event::Start(Tag::Paragraph));
        assert!(parsed.contains(&text_event("| a | b |")));
    }

    #[test]
    fn test_tables_disabled_gives_plain_paragraph_without_warning() {
        let parser = Parser::new_ext(
            "| a | b |\n| --- | --- |",
            Features::default().difference(Features::TABLES),
        );
        assert!(parser.warnings().is_empty());
        let parsed: Vec<_> = parser.into_iter().collect();
        assert_eq!(parsed[0], Event::Start(Tag::Paragraph));
    }

    #[test]
    fn test_paragraph_and_line_breaks() {
        assert_eq!(
            events("a\nb\n\nc"),
            vec![
                Event::Start(Tag::Paragraph),
                text_event("a"),
                Event::HardBreak,
                text_event("b"),
                Event::End(TagEnd::Paragraph),
                Event::Start(Tag::Paragraph),
                text_event("c"),
                Event::End(TagEnd::Paragraph),
            ]
        );
    }

    #[test]
    fn test_paragraph_ends_at_block_start() {
        let parsed = events("text\n# Heading");
        assert_eq!(
            parsed[..3],
            [
                Event::Start(Tag::Paragraph),
                text_event("text"),
                Event::End(TagEnd::Paragraph),
            ]
        );
    }

    #[test]
    fn test_empty_source_has_no_events() {
        assert!(events("").is_empty());
        assert!(events("\n\n\n").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let parsed = events("# Title\r\n\r\ntext");
        assert!(parsed.contains(&text_event("Title")));
        assert!(parsed.contains(&text_event("text")));
    }
}
