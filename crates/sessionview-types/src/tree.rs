//! Rendered content tree (hast-shaped) consumed by the highlighter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node of a rendered content tree.
///
/// Only text nodes carry matchable text; element and root nodes are containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentNode {
    Text {
        value: String,
    },
    Element {
        #[serde(rename = "tagName")]
        tag_name: String,
        #[serde(default)]
        properties: Map<String, Value>,
        #[serde(default)]
        children: Vec<ContentNode>,
    },
    Root {
        #[serde(default)]
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text {
            value: value.into(),
        }
    }

    pub fn element(tag_name: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Element {
            tag_name: tag_name.into(),
            properties: Map::new(),
            children,
        }
    }

    pub fn root(children: Vec<ContentNode>) -> Self {
        ContentNode::Root { children }
    }

    /// Child list of element and root nodes.
    pub fn children(&self) -> Option<&[ContentNode]> {
        match self {
            ContentNode::Text { .. } => None,
            ContentNode::Element { children, .. } | ContentNode::Root { children } => {
                Some(children)
            }
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ContentNode>> {
        match self {
            ContentNode::Text { .. } => None,
            ContentNode::Element { children, .. } | ContentNode::Root { children } => {
                Some(children)
            }
        }
    }

    /// Concatenated text of this node and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text { value } => out.push_str(value),
            ContentNode::Element { children, .. } | ContentNode::Root { children } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
