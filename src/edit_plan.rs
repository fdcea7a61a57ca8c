//! The edit plan rewrites the body of a single resolved section.
//!
//! An [`Edit`] pairs an [`UpdateMode`] with new content and splices it into the span of one
//! section, returning the complete new document. Only bytes between the end of the section's
//! heading line and the end of its span change; everything else is copied through untouched.

use crate::error::{Result, SectionError};
use crate::section::{trim_body, SectionTree};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// How new content is combined with a section's existing body.
pub enum UpdateMode {
    /// Discard the whole body, nested subsections included, and write the new content.
    Replace,
    /// Add the new content after the existing body, nested subsections included.
    Append,
    /// Add the new content right after the heading line, before any existing body.
    Prepend,
}

impl UpdateMode {
    #[must_use]
    /// Lowercase name as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Append => "append",
            Self::Prepend => "prepend",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UpdateMode {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "append" => Ok(Self::Append),
            "prepend" => Ok(Self::Prepend),
            other => Err(SectionError::Validation(format!(
                "Unknown update mode '{other}' (expected replace, append or prepend)"
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// New content and the way it lands in the target section.
pub struct Edit {
    /// Combination strategy.
    pub mode: UpdateMode,
    /// Markdown to write into the section body.
    pub content: String,
}

impl Edit {
    #[must_use]
    /// Create an edit.
    pub fn new(mode: UpdateMode, content: impl Into<String>) -> Self {
        Self {
            mode,
            content: content.into(),
        }
    }

    /// Apply the edit to section `index` of `tree`, returning the full new document.
    ///
    /// Leading and trailing blank lines of the content are dropped so the result keeps one blank
    /// line between the heading, the body and the next heading. Appending or prepending empty
    /// content leaves the document unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Validation`] if `index` is not a section of `tree`.
    pub fn apply(&self, tree: &SectionTree, index: usize) -> Result<String> {
        let section = tree
            .get(index)
            .ok_or_else(|| SectionError::Validation(format!("No section at index {index}")))?;
        let text = tree.text();
        let content = trim_body(&self.content);

        let head = &text[..section.body_start];
        let body = &text[section.body_start..section.byte_end];
        let tail = &text[section.byte_end..];

        tracing::debug!(
            section = %section.header_text,
            mode = %self.mode,
            nested = section.has_children(),
            "applying edit"
        );

        let mut updated = String::with_capacity(text.len() + content.len() + 4);
        updated.push_str(head);
        match self.mode {
            UpdateMode::Replace => {
                if !head.ends_with('\n') {
                    updated.push('\n');
                }
                if !content.is_empty() {
                    updated.push('\n');
                    updated.push_str(content);
                    updated.push('\n');
                }
                if !tail.is_empty() {
                    updated.push('\n');
                }
            }
            UpdateMode::Append => {
                updated.push_str(body);
                if !content.is_empty() {
                    let existing = &text[..section.byte_end];
                    for _ in trailing_newlines(existing).min(2)..2 {
                        updated.push('\n');
                    }
                    updated.push_str(content);
                    updated.push('\n');
                    if !tail.is_empty() {
                        updated.push('\n');
                    }
                }
            }
            UpdateMode::Prepend => {
                if !content.is_empty() {
                    if !head.ends_with('\n') {
                        updated.push('\n');
                    }
                    updated.push('\n');
                    updated.push_str(content);
                    updated.push('\n');
                    let rest = &text[section.body_start..];
                    if !rest.is_empty() && !starts_with_blank_line(rest) {
                        updated.push('\n');
                    }
                }
                updated.push_str(body);
            }
        }
        updated.push_str(tail);

        Ok(updated)
    }
}

/// Newlines in the trailing run of line-ending characters.
fn trailing_newlines(text: &str) -> usize {
    let kept = text.trim_end_matches(|c: char| c == '\n' || c == '\r').len();
    text[kept..].matches('\n').count()
}

fn starts_with_blank_line(text: &str) -> bool {
    text.split_inclusive('\n')
        .next()
        .is_some_and(|line| line.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/edit_plan.rs"]
mod tests;
