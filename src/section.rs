//! Section representation for tree-sitter parsed documents.
//!
//! A section represents a hierarchical division of a document, corresponding to an ATX heading in
//! markdown. Sections live in a flat arena owned by [`SectionTree`]: each one records the index
//! of its parent (used only to rebuild hierarchical paths) and the indices of its direct
//! children, alongside precise line and byte coordinates for content extraction and mutation.

/// Separator placed between ancestors in a hierarchical path.
pub const PATH_SEPARATOR: &str = " / ";

#[derive(Clone, Debug, PartialEq, Eq)]
/// One heading line detected outside fenced code.
pub struct HeadingLine {
    /// Number of `#` markers (1 to 6).
    pub level: usize,
    /// Heading text without markup symbols.
    pub title: String,
    /// Zero-based line index of the heading in the document.
    pub line_index: usize,
    /// The heading line as written, trimmed.
    pub raw_header_text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Hierarchical document division with precise coordinates for extraction and modification.
pub struct Section {
    /// The heading line as written, trimmed (e.g. `## 1. Description`).
    pub header_text: String,
    /// Section heading text without markup symbols.
    pub title: String,
    /// Nesting depth in the document hierarchy (1 for `#`).
    pub level: usize,
    /// Line of the section heading (inclusive).
    pub line_start: usize,
    /// Line where the next sibling or ancestor section begins, or the line count (exclusive).
    pub line_end: usize,
    /// Byte offset of the start of the heading line.
    pub byte_start: usize,
    /// Byte offset just past the heading line terminator, where the body begins.
    pub body_start: usize,
    /// Byte offset where the section span ends.
    pub byte_end: usize,
    /// Index of the containing section in the arena.
    pub parent_index: Option<usize>,
    /// Indices of directly nested subsections, in document order.
    pub children_indices: Vec<usize>,
}

impl Section {
    #[must_use]
    /// Whether this section owns nested subsections.
    pub fn has_children(&self) -> bool {
        !self.children_indices.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Non-fatal problems noticed while parsing.
pub enum ParseWarning {
    /// A code fence opened at `line` is never closed; the rest of the document is treated as code.
    UnterminatedFence {
        /// Zero-based line index of the opening fence.
        line: usize,
    },
}

#[derive(Clone, Debug)]
/// Parsed view of one document: the preamble plus an arena of sections in document order.
///
/// The arena order is a pre-order traversal of the heading hierarchy, so iterating
/// [`SectionTree::sections`] reproduces the document's heading sequence exactly.
pub struct SectionTree {
    text: String,
    line_offsets: Vec<usize>,
    sections: Vec<Section>,
    roots: Vec<usize>,
    warnings: Vec<ParseWarning>,
}

impl SectionTree {
    #[must_use]
    /// Assemble the tree from heading events sorted by line.
    ///
    /// Keeps a stack of open sections: each heading closes every open section whose level is not
    /// strictly smaller, then becomes a child of whatever remains on top (or a root).
    pub fn build(text: &str, headings: Vec<HeadingLine>, warnings: Vec<ParseWarning>) -> Self {
        let line_offsets = line_offsets(text);
        let line_count = line_offsets.len();

        let mut sections: Vec<Section> = Vec::with_capacity(headings.len());
        let mut roots = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for heading in headings {
            while let Some(&top) = open.last() {
                if sections[top].level < heading.level {
                    break;
                }
                sections[top].line_end = heading.line_index;
                open.pop();
            }

            let index = sections.len();
            let parent_index = open.last().copied();
            match parent_index {
                Some(parent) => sections[parent].children_indices.push(index),
                None => roots.push(index),
            }

            sections.push(Section {
                header_text: heading.raw_header_text,
                title: heading.title,
                level: heading.level,
                line_start: heading.line_index,
                line_end: line_count,
                byte_start: 0,
                body_start: 0,
                byte_end: 0,
                parent_index,
                children_indices: Vec::new(),
            });
            open.push(index);
        }

        let byte_of = |line: usize| line_offsets.get(line).copied().unwrap_or(text.len());
        for section in &mut sections {
            section.byte_start = byte_of(section.line_start);
            section.body_start = byte_of(section.line_start + 1);
            section.byte_end = byte_of(section.line_end);
        }

        Self {
            text: text.to_string(),
            line_offsets,
            sections,
            roots,
            warnings,
        }
    }

    #[must_use]
    /// The document this tree was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    /// Number of lines in the document (a trailing newline does not start a new line).
    pub fn line_count(&self) -> usize {
        self.line_offsets.len()
    }

    #[must_use]
    /// All sections, flattened in pre-order (document order).
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    /// Section at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    #[must_use]
    /// Number of sections in the tree.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    /// Whether the document has no headings at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    /// Indices of the top-level sections.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    #[must_use]
    /// Non-fatal problems found while parsing.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    #[must_use]
    /// Text before the first heading (the root pseudo-section's own content).
    pub fn preamble(&self) -> &str {
        let end = self
            .sections
            .first()
            .map_or(self.text.len(), |section| section.byte_start);
        &self.text[..end]
    }

    #[must_use]
    /// Raw body of a section: everything after its heading line up to the end of its span.
    ///
    /// For a section with children this includes their headings and bodies verbatim.
    pub fn body(&self, index: usize) -> &str {
        self.sections
            .get(index)
            .map_or("", |section| &self.text[section.body_start..section.byte_end])
    }

    #[must_use]
    /// Body with surrounding blank lines removed.
    pub fn content(&self, index: usize) -> &str {
        trim_body(self.body(index))
    }

    #[must_use]
    /// Character count of [`SectionTree::content`].
    pub fn content_length(&self, index: usize) -> usize {
        self.content(index).chars().count()
    }

    /// Indices from the top-level ancestor down to and including `index`.
    fn lineage(&self, index: usize) -> Vec<usize> {
        let mut chain = Vec::new();
        let mut cursor = self.sections.get(index).map(|_| index);
        while let Some(current) = cursor {
            chain.push(current);
            cursor = self.sections[current].parent_index;
        }
        chain.reverse();
        chain
    }

    #[must_use]
    /// Ancestor header texts down to this section, joined with `" / "`.
    pub fn hierarchical_path(&self, index: usize) -> String {
        self.join_lineage(index, |section| section.header_text.as_str())
    }

    #[must_use]
    /// Ancestor titles down to this section, joined with `" / "`.
    pub fn title_path(&self, index: usize) -> String {
        self.join_lineage(index, |section| section.title.as_str())
    }

    fn join_lineage(&self, index: usize, field: impl Fn(&Section) -> &str) -> String {
        self.lineage(index)
            .into_iter()
            .map(|i| field(&self.sections[i]))
            .collect::<Vec<_>>()
            .join(PATH_SEPARATOR)
    }

    #[must_use]
    /// Number of ancestors above this section (0 for top-level sections).
    pub fn depth(&self, index: usize) -> usize {
        self.lineage(index).len().saturating_sub(1)
    }

    #[must_use]
    /// All nested subsections of `index` in pre-order, excluding `index` itself.
    pub fn descendants(&self, index: usize) -> Vec<usize> {
        let mut found = Vec::new();
        let mut pending: Vec<usize> = self
            .sections
            .get(index)
            .map(|section| section.children_indices.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(current) = pending.pop() {
            found.push(current);
            pending.extend(self.sections[current].children_indices.iter().rev());
        }
        found
    }
}

/// Byte offset of the start of every line.
fn line_offsets(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut position = 0;
    for line in text.split_inclusive('\n') {
        offsets.push(position);
        position += line.len();
    }
    offsets
}

/// Strip leading and trailing blank lines from a section body.
///
/// Indentation of the first line and trailing spaces of the last line are kept, so content written
/// by an edit reads back unchanged.
pub(crate) fn trim_body(body: &str) -> &str {
    let mut span: Option<(usize, usize)> = None;
    let mut offset = 0;
    for line in body.split_inclusive('\n') {
        if !line.trim().is_empty() {
            let end = offset + line.trim_end_matches(['\n', '\r']).len();
            span = Some(span.map_or((offset, end), |(start, _)| (start, end)));
        }
        offset += line.len();
    }
    span.map_or("", |(start, end)| &body[start..end])
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
