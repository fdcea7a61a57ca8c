//! Turns raw markdown into a [`SectionTree`].
//!
//! The tree-sitter block grammar finds the fenced code blocks; every column-0 `#{1,6}\s+` line
//! outside them is a heading, whatever other block (HTML, comments) the grammar places it in.
//! Heading events are handed, in line order, to [`SectionTree::build`]. Unterminated fences are
//! not errors; they are recorded as warnings and everything after the opening fence is treated
//! as code.

use crate::error::{Result, SectionError};
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use crate::section::{HeadingLine, ParseWarning, SectionTree};
use std::fs;
use std::ops::Range;
use std::path::Path;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};

/// Parse a markdown document into its section tree.
///
/// # Errors
///
/// Returns [`SectionError::Parser`] if the grammar or its queries cannot be loaded.
pub fn parse_document(text: &str) -> Result<SectionTree> {
    parse_with_format(text, &MarkdownFormat)
}

/// Parse a document using the grammar and queries of `format`.
///
/// # Errors
///
/// Returns [`SectionError::Parser`] if the grammar or its queries cannot be loaded.
pub fn parse_with_format(text: &str, format: &impl Format) -> Result<SectionTree> {
    let language = format.language();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| SectionError::Parser(format!("Failed to set language: {e}")))?;

    let tree = parser
        .parse(text, None)
        .ok_or_else(|| SectionError::Parser("Failed to parse document".to_string()))?;

    let headings = extract_headings(&tree, text, format)?;
    let warnings = find_unterminated_fences(&tree, text, format)?;

    tracing::debug!(
        headings = headings.len(),
        warnings = warnings.len(),
        "parsed document"
    );

    Ok(SectionTree::build(text, headings, warnings))
}

/// Read a document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_document(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Run `query_source` and hand every captured node to `visit`.
fn for_each_capture<'tree>(
    tree: &'tree Tree,
    text: &str,
    language: &tree_sitter::Language,
    query_source: &str,
    mut visit: impl FnMut(Node<'tree>),
) -> Result<()> {
    let query = Query::new(language, query_source)
        .map_err(|e| SectionError::Parser(format!("Invalid query: {e}")))?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), text.as_bytes());

    while let Some(found) = matches.next() {
        for capture in found.captures {
            visit(capture.node);
        }
    }
    Ok(())
}

fn extract_headings(tree: &Tree, text: &str, format: &impl Format) -> Result<Vec<HeadingLine>> {
    let mut fences: Vec<Range<usize>> = Vec::new();
    for_each_capture(tree, text, &format.language(), format.fence_query(), |node| {
        fences.push(node.byte_range());
    })?;

    let mut headings = Vec::new();
    let mut offset = 0;
    for (line_index, line) in text.split_inclusive('\n').enumerate() {
        let fenced = fences.iter().any(|fence| fence.contains(&offset));
        if !fenced {
            if let Some(heading) = heading_line(line, line_index) {
                headings.push(heading);
            }
        }
        offset += line.len();
    }
    Ok(headings)
}

/// Build a heading event from a line matching `#{1,6}\s+` at column 0.
///
/// Headings nested in block quotes or list items do not start at column 0 and are skipped.
fn heading_line(line: &str, line_index: usize) -> Option<HeadingLine> {
    let line = line.trim_end_matches(['\n', '\r']);
    let level = line.chars().take_while(|c| *c == '#').count();
    let rest = &line[level..];
    if !(1..=6).contains(&level) || !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(HeadingLine {
        level,
        title: strip_closing_sequence(rest).to_string(),
        line_index,
        raw_header_text: line.trim().to_string(),
    })
}

/// Drop an optional closing `#` sequence (`## Title ##` becomes `Title`).
fn strip_closing_sequence(title: &str) -> &str {
    let title = title.trim();
    let without = title.trim_end_matches('#');
    if without.len() < title.len() && (without.is_empty() || without.ends_with(char::is_whitespace))
    {
        without.trim_end()
    } else {
        title
    }
}

fn find_unterminated_fences(
    tree: &Tree,
    text: &str,
    format: &impl Format,
) -> Result<Vec<ParseWarning>> {
    let mut warnings = Vec::new();
    for_each_capture(tree, text, &format.language(), format.fence_query(), |node| {
        let mut walker = node.walk();
        let delimiters = node
            .children(&mut walker)
            .filter(|child| child.kind() == format.fence_delimiter_kind())
            .count();
        if delimiters < 2 {
            let line = node.start_position().row;
            tracing::warn!(line = line + 1, "unterminated code fence, treating rest as code");
            warnings.push(ParseWarning::UnterminatedFence { line });
        }
    })?;
    Ok(warnings)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
