//! Search-match highlighting over a rendered content tree.
//!
//! Every text node with matches is replaced, in its parent's child list, by
//! the sequence of plain segments and marked segments it splits into. Child
//! lists are rebuilt rather than spliced, so replacing one child with several
//! never disturbs the positions of its siblings.

use crate::finder::MatchFinder;
use serde_json::{Map, Value};
use sessionview_types::{ContentNode, SearchConfig};
use tracing::trace;

/// Element used to wrap a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    /// Tag name of the wrapping element
    pub tag: String,
    /// Optional `className` put on the wrapping element
    pub class_name: Option<String>,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            tag: "mark".to_string(),
            class_name: None,
        }
    }
}

/// Tree transform built from a search configuration.
///
/// Construction never fails: a blank query or an invalid pattern produces a
/// highlighter that leaves every tree untouched.
#[derive(Debug, Clone)]
pub struct Highlighter {
    finder: Option<MatchFinder>,
    style: HighlightStyle,
}

impl Highlighter {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            finder: MatchFinder::from_config(config),
            style: HighlightStyle::default(),
        }
    }

    pub fn with_style(mut self, style: HighlightStyle) -> Self {
        self.style = style;
        self
    }

    /// True when applying this highlighter cannot change a tree.
    pub fn is_noop(&self) -> bool {
        self.finder.is_none()
    }

    /// Mark matches in `tree` in place. Returns the number of marks inserted.
    ///
    /// A bare text node at the top has no parent list to splice into and is
    /// left as is.
    pub fn apply(&self, tree: &mut ContentNode) -> usize {
        let Some(finder) = &self.finder else {
            return 0;
        };
        let marks = match tree.children_mut() {
            Some(children) => self.rewrite_children(finder, children),
            None => 0,
        };
        trace!(target: "sessionview::highlight", "Inserted {} marks", marks);
        marks
    }

    /// Owned variant of [`apply`](Self::apply).
    pub fn highlight(&self, mut tree: ContentNode) -> ContentNode {
        self.apply(&mut tree);
        tree
    }

    fn rewrite_children(&self, finder: &MatchFinder, children: &mut Vec<ContentNode>) -> usize {
        let mut marks = 0;
        let original = std::mem::take(children);
        let mut rebuilt = Vec::with_capacity(original.len());
        for child in original {
            match child {
                ContentNode::Text { value } => {
                    marks += self.expand_text(finder, value, &mut rebuilt);
                }
                mut container => {
                    if let Some(grandchildren) = container.children_mut() {
                        marks += self.rewrite_children(finder, grandchildren);
                    }
                    rebuilt.push(container);
                }
            }
        }
        *children = rebuilt;
        marks
    }

    /// Push the replacement sequence for one text node onto `out`.
    fn expand_text(&self, finder: &MatchFinder, value: String, out: &mut Vec<ContentNode>) -> usize {
        let ranges = finder.find(&value);
        if ranges.is_empty() {
            out.push(ContentNode::Text { value });
            return 0;
        }

        let mut cursor = 0;
        for range in &ranges {
            if range.start > cursor {
                out.push(ContentNode::text(&value[cursor..range.start]));
            }
            out.push(self.mark(&value[range.start..range.end]));
            cursor = range.end;
        }
        if cursor < value.len() {
            out.push(ContentNode::text(&value[cursor..]));
        }
        ranges.len()
    }

    fn mark(&self, text: &str) -> ContentNode {
        let mut properties = Map::new();
        if let Some(class_name) = &self.style.class_name {
            properties.insert(
                "className".to_string(),
                Value::Array(vec![Value::from(class_name.as_str())]),
            );
        }
        ContentNode::Element {
            tag_name: self.style.tag.clone(),
            properties,
            children: vec![ContentNode::text(text)],
        }
    }
}
