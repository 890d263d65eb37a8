//! Table run parsing: header + separator + body contract.
//!
//! A run of pipe lines is a table only when its second line is a valid
//! separator row with the same cell count as the header. Anything else is
//! left for the caller to degrade to paragraph text.

use crate::event::Alignment;

pub(crate) struct TableRun<'a> {
    pub alignments: Vec<Alignment>,
    pub head: Vec<&'a str>,
    pub body: Vec<Vec<&'a str>>,
}

/// A table line starts with `|` after indentation.
pub(crate) fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Parse a run of table lines, or `None` if the run is not a well-formed
/// table. Body rows are normalized to the header width.
pub(crate) fn parse_run<'a>(lines: &[&'a str]) -> Option<TableRun<'a>> {
    if lines.len() < 2 {
        return None;
    }
    let head = split_cells(lines[0]);
    let alignments = parse_separator(lines[1], head.len())?;
    let body = lines[2..]
        .iter()
        .map(|line| {
            let mut cells = split_cells(line);
            cells.resize(head.len(), "");
            cells
        })
        .collect();
    Some(TableRun {
        alignments,
        head,
        body,
    })
}

/// Split a pipe row into trimmed cells, dropping the outer delimiters.
fn split_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn parse_separator(line: &str, columns: usize) -> Option<Vec<Alignment>> {
    let cells = split_cells(line);
    if cells.len() != columns {
        return None;
    }
    cells.iter().map(|cell| separator_alignment(cell)).collect()
}

/// `---`, `:---`, `---:` or `:---:` with any dash count.
fn separator_alignment(cell: &str) -> Option<Alignment> {
    let (left, rest) = match cell.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, cell),
    };
    let (right, dashes) = match rest.strip_suffix(':') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
        return None;
    }
    Some(match (left, right) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Left,
        (false, true) => Alignment::Right,
        (false, false) => Alignment::None,
    })
}
