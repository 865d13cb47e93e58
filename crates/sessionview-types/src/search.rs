//! Search configuration, match ranges and block edits.

use serde::{Deserialize, Serialize};

/// How a search query is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    pub query: String,
    #[serde(default)]
    pub case_sensitive: bool,
    /// Treat `query` as a regular expression
    #[serde(default)]
    pub use_regex: bool,
}

impl SearchConfig {
    /// Case-insensitive literal search.
    pub fn literal(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            case_sensitive: false,
            use_regex: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    /// Empty or whitespace-only queries match nothing.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }
}

/// Half-open byte range `[start, end)` of a match within a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A replacement text addressed to an original block index of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEdit {
    /// Index into the source event's content, as given by `block_index_map`
    pub index: usize,
    pub text: String,
}
