//! In-memory edits over raw events.
//!
//! Edits address blocks by their original index, the value a display unit
//! carries in `block_index_map`, so they land in the right place even for
//! units split out of a larger event.

use crate::{Result, SessionViewError};
use serde_json::{Map, Value};
use sessionview_types::{BlockEdit, MessageContent, RawEvent};
use std::collections::HashSet;
use tracing::{debug, info};

/// Write `edits` into the content of the event with id `source_id`.
///
/// String content is replaced by the first edit's text. For block content,
/// each edit targets one block by original index; indices past the end are
/// ignored. Returns the number of blocks changed.
pub fn apply_block_edits(
    events: &mut [RawEvent],
    source_id: &str,
    edits: &[BlockEdit],
) -> Result<usize> {
    let event = events
        .iter_mut()
        .find(|e| e.id == source_id)
        .ok_or_else(|| SessionViewError::EventNotFound(source_id.to_string()))?;

    let changed = match event.content_mut() {
        Some(MessageContent::Text(text)) => match edits.first() {
            Some(edit) => {
                *text = edit.text.clone();
                1
            }
            None => 0,
        },
        Some(MessageContent::Blocks(blocks)) => {
            let mut changed = 0;
            for edit in edits {
                let Some(block) = blocks.get_mut(edit.index) else {
                    debug!(
                        target: "sessionview::edit",
                        "Ignoring edit for block {} of {} ({} blocks)",
                        edit.index,
                        source_id,
                        blocks.len()
                    );
                    continue;
                };
                if let Value::Object(fields) = block.as_value_mut() {
                    if edit_block(fields, &edit.text) {
                        changed += 1;
                    }
                }
            }
            changed
        }
        Some(MessageContent::Other(_)) | None => 0,
    };

    debug!(
        target: "sessionview::edit",
        "Applied {} of {} edits to {}",
        changed,
        edits.len(),
        source_id
    );
    Ok(changed)
}

/// Apply one edit to a block object according to its type.
fn edit_block(fields: &mut Map<String, Value>, text: &str) -> bool {
    let block_type = fields
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let key = match block_type.as_str() {
        "text" => "text",
        "thinking" if fields.contains_key("thinking") => "thinking",
        "thinking" => "text",
        "tool_use" => {
            // Input must stay structured; text that is not JSON is dropped
            return match serde_json::from_str::<Value>(text) {
                Ok(input) => {
                    fields.insert("input".to_string(), input);
                    true
                }
                Err(e) => {
                    debug!(
                        target: "sessionview::edit",
                        "Ignoring tool_use edit with invalid JSON input: {}",
                        e
                    );
                    false
                }
            };
        }
        "tool_result" => "content",
        _ if fields.contains_key("text") => "text",
        _ => return false,
    };
    fields.insert(key.to_string(), Value::String(text.to_string()));
    true
}

/// Remove every event whose id is in `ids`. Events without an id are kept.
///
/// Returns the number of events removed.
pub fn remove_events(events: &mut Vec<RawEvent>, ids: &[&str]) -> usize {
    let targets: HashSet<&str> = ids.iter().copied().collect();
    let before = events.len();
    events.retain(|e| e.id.is_empty() || !targets.contains(e.id.as_str()));
    let removed = before - events.len();
    info!(target: "sessionview::edit", "Removed {} events", removed);
    removed
}

/// Remove `thinking` and `redacted_thinking` blocks from every event.
///
/// Returns the number of events that changed.
pub fn strip_thinking_blocks(events: &mut [RawEvent]) -> usize {
    let mut affected = 0;
    for event in events.iter_mut() {
        let Some(MessageContent::Blocks(blocks)) = event.content_mut() else {
            continue;
        };
        let before = blocks.len();
        blocks.retain(|b| !matches!(b.block_type(), Some("thinking" | "redacted_thinking")));
        if blocks.len() != before {
            affected += 1;
        }
    }
    info!(
        target: "sessionview::edit",
        "Stripped thinking blocks from {} events",
        affected
    );
    affected
}
