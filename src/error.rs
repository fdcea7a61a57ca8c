//! Error taxonomy shared by every engine operation.
//!
//! Operations never panic across the engine boundary: each one returns either a payload or a
//! `SectionError`, and callers turn the error into an [`ErrorPayload`] for display or transport.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
/// Everything that can go wrong while listing, reading or updating sections.
pub enum SectionError {
    /// A required request field was missing or empty.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The identifier matched no section.
    #[error("Section '{identifier}' not found")]
    NotFound {
        /// Identifier exactly as supplied by the caller.
        identifier: String,
        /// Closest header texts, best first.
        suggestions: Vec<String>,
    },

    /// The identifier matched more than one section.
    #[error("Section '{identifier}' is ambiguous ({} matches)", .candidates.len())]
    Ambiguous {
        /// Identifier exactly as supplied by the caller.
        identifier: String,
        /// Hierarchical path of every match, in document order.
        candidates: Vec<String>,
    },

    /// The markdown grammar or one of its queries could not be loaded.
    #[error("Parser setup failed: {0}")]
    Parser(String),

    /// Reading or writing a document failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A request or payload could not be (de)serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SectionError>;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Wire shape of an error returned to the caller.
pub struct ErrorPayload {
    /// `NotFound`, `Ambiguous`, `ValidationError`, or the name of an internal failure.
    pub kind: String,
    /// Human readable summary.
    pub message: String,
    /// Structured hints for retrying the request.
    pub data: ErrorData,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Retry hints attached to an [`ErrorPayload`].
pub struct ErrorData {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Headers the caller may have meant (not-found only).
    pub available_headers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Exact hierarchical paths that disambiguate the request (ambiguous only).
    pub candidates: Option<Vec<String>>,
}

impl SectionError {
    #[must_use]
    /// Short machine-readable name of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::NotFound { .. } => "NotFound",
            Self::Ambiguous { .. } => "Ambiguous",
            Self::Parser(_) => "ParserError",
            Self::Io(_) => "IoError",
            Self::Json(_) => "JsonError",
        }
    }

    #[must_use]
    /// Convert into the payload handed back to callers.
    pub fn payload(&self) -> ErrorPayload {
        let data = match self {
            Self::NotFound { suggestions, .. } => ErrorData {
                available_headers: Some(suggestions.clone()),
                candidates: None,
            },
            Self::Ambiguous { candidates, .. } => ErrorData {
                available_headers: None,
                candidates: Some(candidates.clone()),
            },
            _ => ErrorData::default(),
        };

        ErrorPayload {
            kind: self.kind().to_string(),
            message: self.to_string(),
            data,
        }
    }
}
