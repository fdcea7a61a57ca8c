//! Operation dispatch: list, get and update against one document.
//!
//! The engine is stateless. Each call parses the document it is given, answers the request and
//! drops the tree; persisting an updated document (and serialising concurrent updates of the same
//! document) is left to the caller.

use crate::edit_plan::{Edit, UpdateMode};
use crate::error::{Result, SectionError};
use crate::input::parse_document;
use crate::output::{self, SectionListing, SectionView, UpdateSummary};
use crate::resolver::{resolve_with_limit, DEFAULT_MAX_SUGGESTIONS};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Requested operation.
pub enum Operation {
    /// Enumerate every section.
    List,
    /// Read one section.
    Get,
    /// Rewrite one section.
    Update,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// A request as received from the protocol layer.
pub struct Request {
    /// Operation to run.
    pub op: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Section identifier, required for `get` and `update`.
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// `replace`, `append` or `prepend`, required for `update`.
    pub update_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// New content, required for `update`.
    pub content: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// Result of an update: the new document plus a summary for the caller.
pub struct UpdateOutcome {
    /// Complete updated document, to be persisted by the caller.
    pub document: String,
    /// What changed.
    pub summary: UpdateSummary,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "lowercase")]
/// Successful answer to a [`Request`].
pub enum Response {
    /// Every section in document order.
    List {
        /// Listing rows.
        sections: Vec<SectionListing>,
    },
    /// One section's content.
    Get {
        /// The resolved section.
        section: SectionView,
    },
    /// The rewritten document.
    Update {
        /// New document and summary.
        outcome: UpdateOutcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Stateless section engine; holds only presentation limits.
pub struct Engine {
    max_suggestions: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SUGGESTIONS)
    }
}

impl Engine {
    #[must_use]
    /// Engine attaching at most `max_suggestions` headers to not-found errors.
    pub fn new(max_suggestions: usize) -> Self {
        Self { max_suggestions }
    }

    /// Run a protocol request against `document`.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Validation`] when a required field is missing, and the resolver
    /// errors when the identifier does not name exactly one section.
    pub fn execute(&self, document: &str, request: &Request) -> Result<Response> {
        match request.op {
            Operation::List => Ok(Response::List {
                sections: self.list(document)?,
            }),
            Operation::Get => {
                let identifier = required(request.identifier.as_deref(), "identifier")?;
                Ok(Response::Get {
                    section: self.get(document, identifier)?,
                })
            }
            Operation::Update => {
                let identifier = required(request.identifier.as_deref(), "identifier")?;
                let mode: UpdateMode = request
                    .update_mode
                    .as_deref()
                    .ok_or_else(|| missing("updateMode"))?
                    .parse()?;
                let content = request.content.as_deref().ok_or_else(|| missing("content"))?;
                Ok(Response::Update {
                    outcome: self.update(document, identifier, mode, content)?,
                })
            }
        }
    }

    /// List every section of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::Parser`] if the grammar cannot be loaded.
    #[allow(clippy::unused_self)]
    pub fn list(&self, document: &str) -> Result<Vec<SectionListing>> {
        Ok(output::list_payload(&parse_document(document)?))
    }

    /// Read the section named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns a validation, not-found or ambiguity error.
    pub fn get(&self, document: &str, identifier: &str) -> Result<SectionView> {
        let identifier = required(Some(identifier), "identifier")?;
        let tree = parse_document(document)?;
        let index =
            resolve_with_limit(&tree, identifier, self.max_suggestions).into_index(identifier)?;
        Ok(output::get_payload(&tree, index))
    }

    /// Rewrite the section named by `identifier` and return the new document.
    ///
    /// # Errors
    ///
    /// Returns a validation, not-found or ambiguity error.
    pub fn update(
        &self,
        document: &str,
        identifier: &str,
        mode: UpdateMode,
        content: &str,
    ) -> Result<UpdateOutcome> {
        let identifier = required(Some(identifier), "identifier")?;
        let tree = parse_document(document)?;
        let index =
            resolve_with_limit(&tree, identifier, self.max_suggestions).into_index(identifier)?;

        let updated = Edit::new(mode, content).apply(&tree, index)?;

        // The heading line keeps its position, so the section is found again by line.
        let line_start = tree.sections()[index].line_start;
        let reparsed = parse_document(&updated)?;
        let new_content_length = reparsed
            .sections()
            .iter()
            .position(|section| section.line_start == line_start)
            .map_or(0, |i| reparsed.content_length(i));

        Ok(UpdateOutcome {
            document: updated,
            summary: UpdateSummary {
                hierarchical_path: tree.hierarchical_path(index),
                operation: mode,
                new_content_length,
            },
        })
    }
}

fn missing(field: &str) -> SectionError {
    SectionError::Validation(format!("'{field}' is required for this operation"))
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(missing(field)),
    }
}

#[cfg(test)]
#[path = "tests/engine.rs"]
mod tests;
