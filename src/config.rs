//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find an mdsection.toml, and if present we load settings from there.
//! This provides the suggestion limit for unresolved identifiers and the default output format.

use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "mdsection.toml";

#[derive(Facet, Clone, Debug, PartialEq, Eq)]
/// User preferences loaded from mdsection.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 5)]
    /// Maximum number of headers suggested when an identifier matches nothing.
    pub max_suggestions: usize,
    #[facet(default = "text".to_string())]
    /// Output format: `text` or `json`.
    pub output: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_suggestions: crate::resolver::DEFAULT_MAX_SUGGESTIONS,
            output: "text".to_string(),
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from mdsection.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|| {
                tracing::warn!(path = %path.display(), "ignoring unreadable config");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    /// Parse configuration from TOML text, `None` if it does not describe a `Config`.
    pub fn from_toml(contents: &str) -> Option<Self> {
        facet_toml::from_str::<Self>(contents).ok()
    }

    #[must_use]
    /// Whether results should be printed as JSON.
    pub fn wants_json(&self) -> bool {
        self.output.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
