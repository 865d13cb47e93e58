//! End-to-end tests of the display pipeline on a recorded transcript.
//!
//! These tests verify:
//! - Parsing of a mixed JSONL transcript (snapshots, malformed lines)
//! - Classification of every event kind into display units
//! - Tool-use indexing and tool-result splitting
//! - Block index round-trip from units back to source events
//! - Search, edit and export on top of the transformed session

mod common;

use common::{event, load_session_fixture, original_blocks};
use sessionview_core::{
    Classification, SearchIndex, UNKNOWN_TOOL, apply_block_edits, classify, strip_thinking_blocks,
    to_markdown, transform,
};
use sessionview_types::{
    BlockEdit, ContentBlock, DisplayCategory, SearchConfig, SystemLabel, TransformedSession,
};

fn session() -> TransformedSession {
    transform(&load_session_fixture("session"))
}

fn display_ids(session: &TransformedSession) -> Vec<&str> {
    session.units.iter().map(|u| u.display_id.as_str()).collect()
}

// ============================================================================
// PARSING
// ============================================================================

#[test]
fn test_fixture_parses_valid_lines_only() {
    let events = load_session_fixture("session");
    // 12 lines: one malformed, one blank
    assert_eq!(events.len(), 10);
    assert_eq!(events[0].kind, "file-history-snapshot");
    assert_eq!(events[9].kind, "summary");
}

// ============================================================================
// CLASSIFICATION AND UNITS
// ============================================================================

#[test]
fn test_unit_sequence() {
    let session = session();
    assert_eq!(
        display_ids(&session),
        vec!["u1", "a1", "u2", "u2-tool-0", "u2-tool-1", "u3", "u4", "u5", "u6", "a2"]
    );

    let categories: Vec<DisplayCategory> =
        session.units.iter().map(|u| u.display_category).collect();
    assert_eq!(
        categories,
        vec![
            DisplayCategory::User,
            DisplayCategory::Assistant,
            DisplayCategory::User,
            DisplayCategory::ToolResult,
            DisplayCategory::ToolResult,
            DisplayCategory::User,
            DisplayCategory::CompactSummary,
            DisplayCategory::System,
            DisplayCategory::System,
            DisplayCategory::Assistant,
        ]
    );
}

#[test]
fn test_slash_command_unit() {
    let session = session();
    let unit = &session.units[5];
    assert_eq!(unit.source_id, "u3");
    assert_eq!(unit.content, vec![ContentBlock::text("/compact")]);
    assert!(!unit.editable);
}

#[test]
fn test_compact_summary_unit() {
    let session = session();
    let unit = &session.units[6];
    assert_eq!(
        unit.content,
        vec![ContentBlock::text(
            "This session is being continued. Summary: read the manifest."
        )]
    );
    assert!(!unit.editable);
}

#[test]
fn test_system_units() {
    let session = session();

    let caveat = &session.units[7];
    assert_eq!(caveat.system_label, Some(SystemLabel::System));
    assert!(caveat.plan_source_path.is_none());

    let plan = &session.units[8];
    assert_eq!(plan.system_label, Some(SystemLabel::Plan));
    assert_eq!(
        plan.plan_source_path.as_deref(),
        Some("/home/me/.claude/projects/-work-app/abc.jsonl")
    );
}

#[test]
fn test_assistant_metadata() {
    let session = session();
    let unit = &session.units[1];
    assert_eq!(unit.model.as_deref(), Some("claude-sonnet-4"));
    assert_eq!(unit.cwd.as_deref(), Some("/work/app"));
    assert_eq!(unit.content.len(), 4);
    assert!(unit.editable);

    assert_eq!(session.token_stats.input_tokens, 320);
    assert_eq!(session.token_stats.output_tokens, 80);
    assert_eq!(session.token_stats.cache_read_input_tokens, 100);
}

// ============================================================================
// TOOL INDEX AND TOOL RESULTS
// ============================================================================

#[test]
fn test_tool_index() {
    let session = session();
    assert_eq!(session.tool_index.len(), 2);
    assert_eq!(session.tool_index["toolu_1"].name, "Read");
    assert_eq!(
        session.tool_index["toolu_1"].input["file_path"],
        "/work/app/Cargo.toml"
    );
    assert_eq!(session.tool_index["toolu_2"].name, UNKNOWN_TOOL);
}

#[test]
fn test_tool_results_split_in_block_order() {
    let session = session();

    assert_eq!(session.units[2].block_index_map, vec![1]);
    assert_eq!(session.units[3].block_index_map, vec![0]);
    assert_eq!(session.units[4].block_index_map, vec![2]);

    for unit in session
        .units
        .iter()
        .filter(|u| u.display_category == DisplayCategory::ToolResult)
    {
        assert_eq!(unit.content.len(), 1);
        assert!(unit.content[0].is_tool_result());
        assert_eq!(unit.source_id, "u2");
    }
}

#[test]
fn test_block_index_round_trip() {
    let events = load_session_fixture("session");
    let session = transform(&events);

    for unit in &session.units {
        let source = event(&events, &unit.source_id);
        if matches!(classify(source), Classification::SlashCommand(_)) {
            continue;
        }
        let original = original_blocks(source);
        for (i, block) in unit.content.iter().enumerate() {
            assert_eq!(
                block, &original[unit.block_index_map[i]],
                "unit {} block {}",
                unit.display_id, i
            );
        }
    }
}

#[test]
fn test_transform_is_deterministic() {
    let events = load_session_fixture("session");
    assert_eq!(transform(&events), transform(&events));
}

// ============================================================================
// SEARCH, EDIT, EXPORT
// ============================================================================

#[test]
fn test_search_over_fixture() {
    let index = SearchIndex::build(&session());
    assert_eq!(
        index.search(&SearchConfig::literal("serde")),
        vec!["a1", "u2", "u2-tool-1"]
    );
    assert_eq!(
        index.search(&SearchConfig::literal(r"name = .app.").regex(true)),
        vec!["u2-tool-0"]
    );
}

#[test]
fn test_edit_through_block_index_map() {
    let mut events = load_session_fixture("session");
    let session = transform(&events);

    // Edit the second tool result as the UI would: via its unit's map
    let unit = &session.units[4];
    let edits = vec![BlockEdit {
        index: unit.block_index_map[0],
        text: "redacted".into(),
    }];
    assert_eq!(apply_block_edits(&mut events, &unit.source_id, &edits).unwrap(), 1);

    let session = transform(&events);
    assert_eq!(session.units[4].content[0].as_value()["content"], "redacted");
    // Neighbouring blocks untouched
    assert_eq!(
        session.units[2].content,
        vec![ContentBlock::text("also check serde")]
    );
}

#[test]
fn test_strip_thinking_then_transform() {
    let mut events = load_session_fixture("session");
    assert_eq!(strip_thinking_blocks(&mut events), 1);

    let session = transform(&events);
    assert_eq!(session.units[1].content.len(), 3);
    assert_eq!(session.units[1].block_index_map, vec![0, 1, 2]);
}

#[test]
fn test_markdown_export_of_fixture() {
    let events = load_session_fixture("session");
    let md = to_markdown(&events, "app", chrono::Utc::now());

    assert!(md.contains("## User (2025-06-01T09:00:00Z)\n\nPlease read the Cargo manifest"));
    assert!(md.contains("Reading it now."));
    // 6 user events and 2 assistant events
    assert_eq!(md.matches("\n## ").count(), 8);
}
