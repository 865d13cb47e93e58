//! Common test utilities for integration tests.

#![allow(dead_code)]

use sessionview_core::parse_jsonl;
use sessionview_types::{ContentBlock, MessageContent, RawEvent};
use std::path::PathBuf;

/// Path of a transcript fixture in the fixtures directory.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(format!("{}.jsonl", name))
}

/// Load and parse a transcript fixture.
pub fn load_session_fixture(name: &str) -> Vec<RawEvent> {
    let path = fixture_path(name);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    parse_jsonl(&content)
}

/// Find an event by id, panicking with a readable message when absent.
pub fn event<'a>(events: &'a [RawEvent], id: &str) -> &'a RawEvent {
    events
        .iter()
        .find(|e| e.id == id)
        .unwrap_or_else(|| panic!("No event with id {}", id))
}

/// The content of an event as a block list, the way the transformer sees it.
pub fn original_blocks(event: &RawEvent) -> Vec<ContentBlock> {
    match event.content() {
        Some(MessageContent::Text(text)) => vec![ContentBlock::text(text.as_str())],
        Some(MessageContent::Blocks(blocks)) => blocks.clone(),
        _ => Vec::new(),
    }
}
