//! Output renders section results into payloads and something readable.
//!
//! Every payload is serialisable for JSON callers; the `render_*` functions produce the text
//! shown by the CLI. The list view shows the section hierarchy using box-drawing characters.

use crate::edit_plan::UpdateMode;
use crate::error::ErrorPayload;
use crate::section::SectionTree;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// One row of a section listing.
pub struct SectionListing {
    /// The heading line as written.
    pub header_text: String,
    /// Heading text without markup.
    pub title: String,
    /// Number of `#` markers.
    pub level: usize,
    /// Header texts from the top-level ancestor down to this section.
    pub hierarchical_path: String,
    /// Character count of the section content, nested subsections included.
    pub content_length: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Content of a single section.
pub struct SectionView {
    /// Header texts from the top-level ancestor down to this section.
    pub hierarchical_path: String,
    /// Section body without surrounding blank lines.
    pub content: String,
    /// Character count of `content`.
    pub content_length: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Confirmation of an applied update.
pub struct UpdateSummary {
    /// Header texts from the top-level ancestor down to the updated section.
    pub hierarchical_path: String,
    /// How the content was combined.
    pub operation: UpdateMode,
    /// Character count of the section content after the update.
    pub new_content_length: usize,
}

#[must_use]
/// Flatten the tree into listing rows in document order.
pub fn list_payload(tree: &SectionTree) -> Vec<SectionListing> {
    tree.sections()
        .iter()
        .enumerate()
        .map(|(index, section)| SectionListing {
            header_text: section.header_text.clone(),
            title: section.title.clone(),
            level: section.level,
            hierarchical_path: tree.hierarchical_path(index),
            content_length: tree.content_length(index),
        })
        .collect()
}

#[must_use]
/// Content view of section `index`.
pub fn get_payload(tree: &SectionTree, index: usize) -> SectionView {
    SectionView {
        hierarchical_path: tree.hierarchical_path(index),
        content: tree.content(index).to_string(),
        content_length: tree.content_length(index),
    }
}

/// Generate box-drawing prefix for tree structure
fn tree_prefix(depth: usize, is_last: bool, open_ancestors: &[bool]) -> String {
    let mut prefix = String::new();

    for open in open_ancestors.iter().take(depth) {
        if *open {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

#[must_use]
/// Render the hierarchy as an indented tree, one section per line with its content length.
pub fn render_tree(tree: &SectionTree) -> String {
    if tree.is_empty() {
        return "No sections found\n".to_string();
    }

    let mut out = String::new();
    // open_ancestors[d] is true while the ancestor at depth d still has siblings below it.
    let mut open_ancestors: Vec<bool> = Vec::new();
    let mut pending: Vec<(usize, usize, bool)> = tree
        .roots()
        .iter()
        .enumerate()
        .rev()
        .map(|(position, &index)| (index, 0, position + 1 == tree.roots().len()))
        .collect();

    while let Some((index, depth, is_last)) = pending.pop() {
        let section = &tree.sections()[index];
        open_ancestors.truncate(depth);

        out.push_str(&format!(
            "{}{} ({} chars)\n",
            tree_prefix(depth, is_last, &open_ancestors),
            section.header_text,
            tree.content_length(index)
        ));

        open_ancestors.push(!is_last);
        let children = &section.children_indices;
        for (position, &child) in children.iter().enumerate().rev() {
            pending.push((child, depth + 1, position + 1 == children.len()));
        }
    }

    out
}

#[must_use]
/// Render a section's content between horizontal rules.
pub fn render_view(view: &SectionView) -> String {
    format!(
        "Section: {}\nContent Length: {} characters\n\n---\n\n{}\n\n---\n",
        view.hierarchical_path, view.content_length, view.content
    )
}

#[must_use]
/// One-line confirmation of an update.
pub fn render_update(summary: &UpdateSummary) -> String {
    format!(
        "Updated section '{}' ({}), new content length: {} characters\n",
        summary.hierarchical_path, summary.operation, summary.new_content_length
    )
}

#[must_use]
/// Render an error payload with its retry hints.
pub fn render_error(payload: &ErrorPayload) -> String {
    let mut out = format!("{}: {}\n", payload.kind, payload.message);

    if let Some(headers) = &payload.data.available_headers {
        if headers.is_empty() {
            out.push_str("\nThe document has no sections.\n");
        } else {
            out.push_str("\nDid you mean:\n");
            for header in headers {
                out.push_str(&format!("  - {header}\n"));
            }
        }
    }

    if let Some(candidates) = &payload.data.candidates {
        out.push_str("\nMatching sections (use one of these paths):\n");
        for candidate in candidates {
            out.push_str(&format!("  - {candidate}\n"));
        }
    }

    out
}

#[cfg(test)]
#[path = "tests/output.rs"]
mod tests;
