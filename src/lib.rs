//! mdsection: resolve, read and rewrite markdown sections by loosely-formatted identifiers.
//!
//! A document is parsed into a tree of ATX-headed sections (headings in code fences are ignored),
//! an identifier such as `"## 1. Description"`, `"Description"` or
//! `"## 1. Description / ### Notes"` is resolved to exactly one section, and that section's body
//! can be replaced, appended to or prepended to without touching any other byte.
//!
//! ```no_run
//! use mdsection::edit_plan::UpdateMode;
//! use mdsection::engine::Engine;
//!
//! let document = "## 1. Description\nold\n\n## 2. Solution\nbaz\n";
//! let engine = Engine::default();
//! let outcome = engine
//!     .update(document, "Description", UpdateMode::Replace, "new")
//!     .unwrap();
//! assert!(outcome.document.contains("new"));
//! ```

pub mod config;
pub mod edit_plan;
pub mod engine;
pub mod error;
pub mod formats;
pub mod input;
pub mod output;
pub mod resolver;
pub mod section;

pub use error::{Result, SectionError};
