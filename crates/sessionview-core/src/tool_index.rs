//! Tool-use lookup built in a single pass over a session.

use sessionview_types::{BlockView, EventKind, MessageContent, RawEvent, ToolUseInfo};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Name recorded for a `tool_use` block that carries none.
pub const UNKNOWN_TOOL: &str = "unknown";

/// Map every tool-use id in assistant events to its name and input.
///
/// Blocks without a non-empty id are ignored. A repeated id keeps the last
/// definition seen.
pub fn build_tool_index(events: &[RawEvent]) -> HashMap<String, ToolUseInfo> {
    let mut index = HashMap::new();
    for event in events.iter().filter(|e| e.kind() == EventKind::Assistant) {
        let Some(MessageContent::Blocks(blocks)) = event.content() else {
            continue;
        };
        for block in blocks {
            let BlockView::ToolUse { id, name, input } = block.view() else {
                continue;
            };
            let Some(id) = id.filter(|id| !id.is_empty()) else {
                continue;
            };
            index.insert(
                id.to_string(),
                ToolUseInfo {
                    name: name.unwrap_or(UNKNOWN_TOOL).to_string(),
                    input: input.cloned().unwrap_or_else(|| Value::Object(Map::new())),
                },
            );
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sessionview_types::ContentBlock;

    #[test]
    fn test_indexes_assistant_tool_uses() {
        let events = vec![RawEvent::assistant(
            "a1",
            vec![
                ContentBlock::text("let me look"),
                ContentBlock::tool_use("t1", "Read", json!({"file_path": "/x"})),
            ],
        )];
        let index = build_tool_index(&events);

        assert_eq!(index.len(), 1);
        assert_eq!(index["t1"].name, "Read");
        assert_eq!(index["t1"].input, json!({"file_path": "/x"}));
    }

    #[test]
    fn test_missing_name_and_input_get_defaults() {
        let events = vec![RawEvent::assistant(
            "a1",
            vec![ContentBlock::new(json!({"type": "tool_use", "id": "t1"}))],
        )];
        let index = build_tool_index(&events);

        assert_eq!(index["t1"].name, UNKNOWN_TOOL);
        assert_eq!(index["t1"].input, json!({}));
    }

    #[test]
    fn test_skips_empty_ids_and_user_events() {
        let events = vec![
            RawEvent::assistant(
                "a1",
                vec![ContentBlock::new(json!({"type": "tool_use", "id": "", "name": "Bash"}))],
            ),
            RawEvent::user("u1", vec![ContentBlock::tool_use("t9", "Bash", json!({}))]),
        ];
        assert!(build_tool_index(&events).is_empty());
    }

    #[test]
    fn test_last_definition_wins() {
        let events = vec![
            RawEvent::assistant("a1", vec![ContentBlock::tool_use("t1", "Read", json!({}))]),
            RawEvent::assistant("a2", vec![ContentBlock::tool_use("t1", "Write", json!({"n": 1}))]),
        ];
        let index = build_tool_index(&events);

        assert_eq!(index["t1"].name, "Write");
        assert_eq!(index["t1"].input, json!({"n": 1}));
    }
}
