//! Markdown format implementation using tree-sitter-md.
//!
//! The block grammar only has to locate fenced code: headings are ATX lines at column 0, and
//! Setext headings never open sections.

use crate::formats::Format;

/// Tree-sitter queries for fenced code in markdown.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn fence_query(&self) -> &'static str {
        "(fenced_code_block) @fence"
    }

    fn fence_delimiter_kind(&self) -> &'static str {
        "fenced_code_block_delimiter"
    }
}
