//! Display-layer types produced by the transformer.
//!
//! These are independent of the raw records: nothing here borrows from a
//! [`RawEvent`](crate::RawEvent), and the raw records are never modified to
//! produce them.

use crate::ContentBlock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Visual category of a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    Assistant,
    CompactSummary,
    System,
    User,
    ToolResult,
}

/// Sub-type of a system message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemLabel {
    /// Skill context injected by the CLI
    Skill,
    /// Dispatched plan execution
    Plan,
    /// Anything else injected by automation
    System,
}

/// One UI-addressable item derived from a source event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayUnit {
    /// Id of the source event, used to address edits and deletes
    pub source_id: String,
    /// Unique id within one transformed session
    pub display_id: String,
    pub display_category: DisplayCategory,
    pub timestamp: String,
    pub content: Vec<ContentBlock>,
    pub editable: bool,
    /// `content[i]` is `original_content[block_index_map[i]]`
    pub block_index_map: Vec<usize>,

    /// Model identifier (assistant only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token usage (assistant only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_label: Option<SystemLabel>,
    /// Transcript path referenced by a plan-execution message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_source_path: Option<String>,

    /// Working directory at the time of the source event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl DisplayUnit {
    /// Create a unit with no content and no optional metadata.
    pub fn new(
        source_id: impl Into<String>,
        display_id: impl Into<String>,
        display_category: DisplayCategory,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            display_id: display_id.into(),
            display_category,
            timestamp: timestamp.into(),
            content: Vec::new(),
            editable: false,
            block_index_map: Vec::new(),
            model: None,
            usage: None,
            tool_use_result: None,
            todos: None,
            system_label: None,
            plan_source_path: None,
            cwd: None,
        }
    }

    /// Set the content together with its original block indices.
    pub fn with_content(mut self, content: Vec<ContentBlock>, block_index_map: Vec<usize>) -> Self {
        debug_assert_eq!(content.len(), block_index_map.len());
        self.content = content;
        self.block_index_map = block_index_map;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_cwd(mut self, cwd: Option<String>) -> Self {
        self.cwd = cwd;
        self
    }
}

/// Name and arguments of a tool invocation, keyed by tool-use id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolUseInfo {
    /// Tool name (Read, Bash, Edit, ...)
    pub name: String,
    /// Tool input parameters
    pub input: Value,
}

/// Token usage summed over all assistant events of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStats {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_input_tokens: u64,
    pub cache_read_input_tokens: u64,
}

impl TokenStats {
    /// Add one message's `usage` object. Missing counters count as zero;
    /// totals saturate at `u64::MAX`.
    pub fn accumulate(&mut self, usage: Option<&Value>) {
        let Some(usage) = usage else {
            return;
        };
        let count = |key: &str| usage.get(key).and_then(Value::as_u64).unwrap_or(0);
        self.input_tokens = self.input_tokens.saturating_add(count("input_tokens"));
        self.output_tokens = self.output_tokens.saturating_add(count("output_tokens"));
        self.cache_creation_input_tokens = self
            .cache_creation_input_tokens
            .saturating_add(count("cache_creation_input_tokens"));
        self.cache_read_input_tokens = self
            .cache_read_input_tokens
            .saturating_add(count("cache_read_input_tokens"));
    }

    pub fn total(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_creation_input_tokens)
            .saturating_add(self.cache_read_input_tokens)
    }
}

/// Result of transforming one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedSession {
    /// Display units in source order
    pub units: Vec<DisplayUnit>,
    /// tool-use id -> tool name and input
    pub tool_index: HashMap<String, ToolUseInfo>,
    pub token_stats: TokenStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_unit_wire_format() {
        let unit = DisplayUnit::new("u1", "u1-tool-0", DisplayCategory::ToolResult, "t")
            .with_content(vec![ContentBlock::tool_result("t1", "ok")], vec![2])
            .editable(true);
        let value = serde_json::to_value(&unit).unwrap();

        assert_eq!(value["sourceId"], "u1");
        assert_eq!(value["displayId"], "u1-tool-0");
        assert_eq!(value["displayCategory"], "tool_result");
        assert_eq!(value["blockIndexMap"], json!([2]));
        assert!(value.get("systemLabel").is_none());
        assert!(value.get("model").is_none());
    }

    #[test]
    fn test_system_label_serialization() {
        assert_eq!(serde_json::to_value(SystemLabel::Plan).unwrap(), "plan");
        assert_eq!(
            serde_json::to_value(DisplayCategory::CompactSummary).unwrap(),
            "compact_summary"
        );
    }

    #[test]
    fn test_token_stats_accumulate() {
        let mut stats = TokenStats::default();
        stats.accumulate(Some(&json!({"input_tokens": 10, "output_tokens": 5})));
        stats.accumulate(Some(&json!({"cache_read_input_tokens": 7, "input_tokens": "bad"})));
        stats.accumulate(None);

        assert_eq!(stats.input_tokens, 10);
        assert_eq!(stats.output_tokens, 5);
        assert_eq!(stats.cache_read_input_tokens, 7);
        assert_eq!(stats.total(), 22);
    }

    #[test]
    fn test_token_stats_saturate() {
        let mut stats = TokenStats::default();
        stats.accumulate(Some(&json!({"input_tokens": u64::MAX, "output_tokens": 1})));
        stats.accumulate(Some(&json!({"input_tokens": 1})));

        assert_eq!(stats.input_tokens, u64::MAX);
        assert_eq!(stats.total(), u64::MAX);
    }
}
