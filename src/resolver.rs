//! Resolves a loosely-formatted section identifier to exactly one section.
//!
//! Matching runs as a fixed sequence of passes, strictest first. The first pass that matches
//! anything decides the outcome: one hit is [`MatchResult::Found`], several are
//! [`MatchResult::Ambiguous`] (the resolver never picks among them), and if every pass comes up
//! empty the result is [`MatchResult::NotFound`] with a short list of nearby headers.

use crate::error::{Result, SectionError};
use crate::section::{SectionTree, PATH_SEPARATOR};

/// Default bound on the number of suggestions attached to a not-found result.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A section that matched, with the path that names it unambiguously.
pub struct Candidate {
    /// Arena index of the section in its tree.
    pub index: usize,
    /// Header texts from the top-level ancestor down to the section.
    pub hierarchical_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of resolving an identifier against a tree.
pub enum MatchResult {
    /// Exactly one section matched; holds its arena index.
    Found(usize),
    /// Nothing matched.
    NotFound {
        /// Closest header texts, best first.
        suggestions: Vec<String>,
    },
    /// More than one section matched in the deciding pass.
    Ambiguous {
        /// Every match in document order.
        candidates: Vec<Candidate>,
    },
}

impl MatchResult {
    /// Turn the outcome into the index of the single match.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::NotFound`] or [`SectionError::Ambiguous`] carrying the retry hints.
    pub fn into_index(self, identifier: &str) -> Result<usize> {
        match self {
            Self::Found(index) => Ok(index),
            Self::NotFound { suggestions } => Err(SectionError::NotFound {
                identifier: identifier.to_string(),
                suggestions,
            }),
            Self::Ambiguous { candidates } => Err(SectionError::Ambiguous {
                identifier: identifier.to_string(),
                candidates: candidates
                    .into_iter()
                    .map(|candidate| candidate.hierarchical_path)
                    .collect(),
            }),
        }
    }
}

/// Identifier forms precomputed once per resolution.
struct Identifier<'a> {
    /// Caller input with surrounding whitespace removed.
    exact: &'a str,
    /// Lowercased, with leading `#` markers and whitespace removed.
    loose: String,
}

impl<'a> Identifier<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            exact: raw.trim(),
            loose: normalize_identifier(raw),
        }
    }
}

type Pass = fn(&SectionTree, usize, &Identifier) -> bool;

/// Matching passes in priority order.
const PASSES: [(&str, Pass); 4] = [
    ("raw header", matches_raw_header),
    ("hierarchical path", matches_path),
    ("title", matches_title),
    ("title substring", matches_title_substring),
];

fn matches_raw_header(tree: &SectionTree, index: usize, id: &Identifier) -> bool {
    tree.sections()[index].header_text == id.exact
}

fn matches_path(tree: &SectionTree, index: usize, id: &Identifier) -> bool {
    id.exact.contains(PATH_SEPARATOR)
        && (tree.hierarchical_path(index) == id.exact || tree.title_path(index) == id.exact)
}

fn matches_title(tree: &SectionTree, index: usize, id: &Identifier) -> bool {
    if id.loose.is_empty() {
        return false;
    }
    let title = tree.sections()[index].title.to_lowercase();
    if title == id.loose {
        return true;
    }
    // A bare title may omit the numbering; a numbered identifier must match it exactly.
    strip_numeric_prefix(&id.loose) == id.loose && strip_numeric_prefix(&title) == id.loose
}

fn matches_title_substring(tree: &SectionTree, index: usize, id: &Identifier) -> bool {
    // Every title contains the empty string.
    !id.loose.is_empty()
        && tree.sections()[index]
            .title
            .to_lowercase()
            .contains(&id.loose)
}

/// Lowercase an identifier and drop any leading `#` markers.
#[must_use]
pub fn normalize_identifier(identifier: &str) -> String {
    identifier
        .trim()
        .trim_start_matches('#')
        .trim()
        .to_lowercase()
}

/// Remove a leading section number such as `1.`, `2.3` or `4)` from a title.
///
/// Bare integers (`2024 Roadmap`) are left alone; the prefix needs a dot or closing parenthesis.
#[must_use]
pub fn strip_numeric_prefix(title: &str) -> &str {
    let title = title.trim();
    let prefix_len = title
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ')'))
        .unwrap_or(title.len());
    let (prefix, rest) = title.split_at(prefix_len);

    let numbered = prefix.starts_with(|c: char| c.is_ascii_digit())
        && (prefix.contains('.') || prefix.ends_with(')'));
    if numbered && rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        title
    }
}

/// Resolve `identifier` with the default suggestion bound.
#[must_use]
pub fn resolve(tree: &SectionTree, identifier: &str) -> MatchResult {
    resolve_with_limit(tree, identifier, DEFAULT_MAX_SUGGESTIONS)
}

/// Resolve `identifier`, attaching at most `max_suggestions` headers when nothing matches.
#[must_use]
pub fn resolve_with_limit(tree: &SectionTree, identifier: &str, max_suggestions: usize) -> MatchResult {
    let id = Identifier::new(identifier);

    if !id.exact.is_empty() {
        for (name, pass) in PASSES {
            let hits: Vec<usize> = (0..tree.len()).filter(|&i| pass(tree, i, &id)).collect();
            match hits.len() {
                0 => continue,
                1 => {
                    let index = hits[0];
                    tracing::debug!(identifier, pass = name, index, "resolved section");
                    return MatchResult::Found(index);
                }
                _ => {
                    tracing::debug!(identifier, pass = name, matches = hits.len(), "ambiguous");
                    let candidates = hits
                        .into_iter()
                        .map(|index| Candidate {
                            index,
                            hierarchical_path: tree.hierarchical_path(index),
                        })
                        .collect();
                    return MatchResult::Ambiguous { candidates };
                }
            }
        }
    }

    MatchResult::NotFound {
        suggestions: suggest(tree, &id.loose, max_suggestions),
    }
}

/// Closest header texts by edit distance on the title, ties broken by document order.
fn suggest(tree: &SectionTree, loose: &str, limit: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, usize)> = tree
        .sections()
        .iter()
        .enumerate()
        .map(|(index, section)| (levenshtein(loose, &section.title.to_lowercase()), index))
        .collect();
    ranked.sort_unstable();

    let mut suggestions: Vec<String> = Vec::with_capacity(limit);
    for (_, index) in ranked {
        if suggestions.len() == limit {
            break;
        }
        let header = &tree.sections()[index].header_text;
        if !suggestions.contains(header) {
            suggestions.push(header.clone());
        }
    }
    suggestions
}

/// Number of single-character insertions, deletions or substitutions turning `a` into `b`.
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
#[path = "tests/resolver.rs"]
mod tests;
