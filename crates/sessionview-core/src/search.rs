//! Session-wide search over display units.

use crate::finder::MatchFinder;
use serde_json::Value;
use sessionview_types::{ContentBlock, SearchConfig, TransformedSession};
use tracing::debug;

/// Searchable text of every unit of a transformed session.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    /// (display id, searchable text), in unit order
    entries: Vec<(String, String)>,
}

impl SearchIndex {
    pub fn build(session: &TransformedSession) -> Self {
        let entries = session
            .units
            .iter()
            .map(|unit| (unit.display_id.clone(), searchable_text(&unit.content)))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display ids of the units matching `config`, in unit order.
    ///
    /// A blank query or an invalid pattern matches nothing.
    pub fn search(&self, config: &SearchConfig) -> Vec<String> {
        let Some(finder) = MatchFinder::from_config(config) else {
            return Vec::new();
        };

        let hits: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, text)| finder.is_match(text))
            .map(|(id, _)| id.clone())
            .collect();

        debug!(
            target: "sessionview::search",
            "Query {:?} matched {} of {} units",
            config.query,
            hits.len(),
            self.entries.len()
        );
        hits
    }
}

/// Text, thinking, tool-result output and tool-use input of a block list,
/// one line per piece.
fn searchable_text(blocks: &[ContentBlock]) -> String {
    let mut buf = String::new();
    let mut push = |s: &str| {
        buf.push_str(s);
        buf.push('\n');
    };

    for block in blocks {
        let value = block.as_value();
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            push(text);
        }
        if let Some(thinking) = value.get("thinking").and_then(Value::as_str) {
            push(thinking);
        }
        match value.get("content") {
            Some(Value::String(s)) => push(s),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.get("text").and_then(Value::as_str))
                .for_each(&mut push),
            _ => {}
        }
        if block.block_type() == Some("tool_use") {
            if let Some(input) = value.get("input") {
                push(&input.to_string());
            }
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform;
    use serde_json::json;
    use sessionview_types::RawEvent;

    fn session() -> TransformedSession {
        transform(&[
            RawEvent::user("u1", "Where is the Config loader?"),
            RawEvent::assistant(
                "a1",
                vec![
                    ContentBlock::new(json!({"type": "thinking", "thinking": "look in src/config.rs"})),
                    ContentBlock::tool_use("t1", "Grep", json!({"pattern": "load_config"})),
                ],
            ),
            RawEvent::user(
                "u2",
                vec![
                    ContentBlock::text("thanks"),
                    ContentBlock::new(json!({
                        "type": "tool_result",
                        "tool_use_id": "t1",
                        "content": [{"type": "text", "text": "src/config.rs:12"}]
                    })),
                ],
            ),
        ])
    }

    #[test]
    fn test_search_returns_display_ids_in_order() {
        let index = SearchIndex::build(&session());
        assert_eq!(index.len(), 4);

        assert_eq!(
            index.search(&SearchConfig::literal("config")),
            vec!["u1", "a1", "u2-tool-0"]
        );
    }

    #[test]
    fn test_search_covers_tool_input_and_thinking() {
        let index = SearchIndex::build(&session());
        assert_eq!(index.search(&SearchConfig::literal("load_config")), vec!["a1"]);
        assert_eq!(index.search(&SearchConfig::literal("look in")), vec!["a1"]);
    }

    #[test]
    fn test_search_case_and_regex() {
        let index = SearchIndex::build(&session());
        assert_eq!(
            index.search(&SearchConfig::literal("Config").case_sensitive(true)),
            vec!["u1"]
        );
        assert_eq!(
            index.search(&SearchConfig::literal(r"config\.rs:\d+").regex(true)),
            vec!["u2-tool-0"]
        );
    }

    #[test]
    fn test_blank_or_invalid_query_matches_nothing() {
        let index = SearchIndex::build(&session());
        assert!(index.search(&SearchConfig::literal(" ")).is_empty());
        assert!(index.search(&SearchConfig::literal("(").regex(true)).is_empty());
    }
}
