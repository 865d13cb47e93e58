//! Match finding strategies for search highlighting.
//!
//! All strategies return byte ranges that are sorted, non-overlapping,
//! non-empty and aligned to char boundaries of the searched text.

use regex::{Regex, RegexBuilder};
use sessionview_types::{MatchRange, SearchConfig};
use tracing::debug;

/// A compiled search query.
#[derive(Debug, Clone)]
pub enum MatchFinder {
    /// User-supplied pattern
    Regex(Regex),
    /// Exact substring
    Literal(String),
    /// Substring compared on lower-cased text; holds the lower-cased needle
    CaseInsensitive(String),
}

impl MatchFinder {
    /// Build a finder for `config`.
    ///
    /// Returns `None` when there is nothing to search for: a blank query or a
    /// pattern that does not compile. Callers treat both the same way.
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        if config.is_blank() {
            return None;
        }

        if config.use_regex {
            return match RegexBuilder::new(&config.query)
                .case_insensitive(!config.case_sensitive)
                .build()
            {
                Ok(regex) => Some(MatchFinder::Regex(regex)),
                Err(e) => {
                    debug!(
                        target: "sessionview::finder",
                        "Ignoring invalid search pattern {:?}: {}",
                        config.query,
                        e
                    );
                    None
                }
            };
        }

        if config.case_sensitive {
            Some(MatchFinder::Literal(config.query.clone()))
        } else {
            Some(MatchFinder::CaseInsensitive(fold_case(&config.query)))
        }
    }

    /// All matches in `text`, in ascending order.
    pub fn find(&self, text: &str) -> Vec<MatchRange> {
        match self {
            MatchFinder::Regex(regex) => find_regex(regex, text),
            MatchFinder::Literal(needle) => find_literal(text, needle),
            MatchFinder::CaseInsensitive(needle) => find_case_insensitive(text, needle),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            MatchFinder::Regex(_) => !self.find(text).is_empty(),
            MatchFinder::Literal(needle) => text.contains(needle.as_str()),
            MatchFinder::CaseInsensitive(needle) => fold_case(text).contains(needle.as_str()),
        }
    }
}

/// Per-char lower-casing. Used for both needle and haystack so the two fold
/// identically (unlike `str::to_lowercase`, which special-cases final sigma).
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

fn find_literal(text: &str, needle: &str) -> Vec<MatchRange> {
    text.match_indices(needle)
        .map(|(start, m)| MatchRange::new(start, start + m.len()))
        .collect()
}

fn find_case_insensitive(text: &str, needle: &str) -> Vec<MatchRange> {
    if text.is_ascii() {
        // ASCII folding keeps byte offsets unchanged
        return find_literal(&text.to_ascii_lowercase(), needle);
    }

    // Lowering may change byte lengths, so remember for every byte of the
    // folded text which original char produced it.
    let mut folded = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let end = start + ch.len_utf8();
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.extend(std::iter::repeat_n((start, end), lower.len_utf8()));
        }
    }

    let mut ranges = Vec::new();
    let mut last_end = 0;
    for (start, m) in folded.match_indices(needle) {
        let range = MatchRange::new(origin[start].0, origin[start + m.len() - 1].1);
        // Two matches inside one expanded char would overlap
        if range.start < last_end {
            continue;
        }
        last_end = range.end;
        ranges.push(range);
    }
    ranges
}

fn find_regex(regex: &Regex, text: &str) -> Vec<MatchRange> {
    let mut ranges = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = regex.find_at(text, pos) else {
            break;
        };
        if m.start() == m.end() {
            // Zero-width: step over one char and keep scanning
            pos = text[m.end()..]
                .chars()
                .next()
                .map_or(text.len() + 1, |c| m.end() + c.len_utf8());
            continue;
        }
        ranges.push(MatchRange::new(m.start(), m.end()));
        pos = m.end();
    }
    ranges
}
