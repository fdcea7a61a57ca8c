//! Format trait and implementations for different document types.
//!
//! A format supplies the tree-sitter grammar together with the query for the verbatim regions
//! (code fences) that must never produce headings.

pub mod markdown;

/// Grammar and queries describing how a document format marks up its sections.
pub trait Format {
    /// Tree-sitter grammar for the block structure of the format.
    fn language(&self) -> tree_sitter::Language;
    /// Query capturing every verbatim block as `@fence`.
    fn fence_query(&self) -> &str;
    /// Node kind delimiting a verbatim block, used to spot unterminated fences.
    fn fence_delimiter_kind(&self) -> &str;
}
