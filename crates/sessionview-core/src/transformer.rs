//! Raw events -> display units.
//!
//! The tool index is built over the whole batch first, then every event is
//! classified and turned into zero or more units, preserving source order.

use crate::classifier::{Classification, classify};
use crate::splitter::{normalize_blocks, split_user_content, tool_result_display_id, unit_for};
use crate::text::extract_text;
use crate::tool_index::build_tool_index;
use sessionview_types::{
    ContentBlock, DisplayCategory, DisplayUnit, EventKind, RawEvent, TokenStats,
    TransformedSession,
};
use std::collections::HashSet;
use tracing::debug;

/// Transform a full session into display units.
///
/// Total: unknown event kinds and malformed content are skipped, never
/// reported. Calling it twice on the same input yields equal output.
///
/// Display ids are unique. An event whose id is empty, or whose ids were
/// already emitted, is keyed by its position instead (`#<index>`); its
/// `source_id` is left as is.
pub fn transform(events: &[RawEvent]) -> TransformedSession {
    let tool_index = build_tool_index(events);

    let mut token_stats = TokenStats::default();
    let mut units = Vec::with_capacity(events.len());

    let mut seen = HashSet::new();

    for (index, event) in events.iter().enumerate() {
        if event.kind() == EventKind::Assistant {
            token_stats.accumulate(event.usage());
        }
        let start = units.len();
        build_units(&mut units, classify(event), event);
        assign_unique_ids(&mut units[start..], index, &mut seen);
    }

    debug!(
        target: "sessionview::transform",
        "Transformed {} events into {} units ({} tool uses indexed)",
        events.len(),
        units.len(),
        tool_index.len()
    );

    TransformedSession {
        units,
        tool_index,
        token_stats,
    }
}

/// Make the display ids of one event's units unique against `seen`.
fn assign_unique_ids(units: &mut [DisplayUnit], index: usize, seen: &mut HashSet<String>) {
    let clashes = |ids: &[String], seen: &HashSet<String>| {
        ids.iter().any(|id| id.is_empty() || seen.contains(id))
    };

    let current: Vec<String> = units.iter().map(|u| u.display_id.clone()).collect();
    if !clashes(&current, seen) {
        seen.extend(current);
        return;
    }

    let mut attempt = 0;
    let ids = loop {
        let base = match attempt {
            0 => format!("#{index}"),
            n => format!("#{index}.{n}"),
        };
        let ids = positional_ids(units, &base);
        if !clashes(&ids, seen) {
            break ids;
        }
        attempt += 1;
    };

    debug!(
        target: "sessionview::transform",
        "Event {} ({:?}) re-keyed as {:?}",
        index,
        units.first().map(|u| u.source_id.as_str()),
        ids
    );
    for (unit, id) in units.iter_mut().zip(&ids) {
        unit.display_id = id.clone();
    }
    seen.extend(ids);
}

/// Ids for `units` derived from `base`, keeping the tool-result suffixes.
fn positional_ids(units: &[DisplayUnit], base: &str) -> Vec<String> {
    let mut seq = 0;
    units
        .iter()
        .map(|unit| {
            if unit.display_category == DisplayCategory::ToolResult {
                seq += 1;
                tool_result_display_id(base, seq - 1)
            } else {
                base.to_string()
            }
        })
        .collect()
}

fn build_units(
    out: &mut Vec<DisplayUnit>,
    classification: Classification,
    event: &RawEvent,
) {
    match classification {
        Classification::Skip => {}

        Classification::Assistant => {
            let (blocks, map) = normalize_blocks(event.content());
            let mut unit = unit_for(event, event.id.clone(), DisplayCategory::Assistant)
                .with_content(blocks, map)
                .editable(true);
            unit.model = event.model().map(str::to_string);
            unit.usage = event.usage().cloned();
            unit.tool_use_result = event.tool_use_result.clone();
            unit.todos = event.todos.clone();
            out.push(unit);
        }

        Classification::CompactSummary => {
            let text = extract_text(event.content());
            out.push(
                unit_for(event, event.id.clone(), DisplayCategory::CompactSummary)
                    .with_content(vec![ContentBlock::text(text)], vec![0]),
            );
        }

        Classification::SlashCommand(cmd) => {
            out.push(
                unit_for(event, event.id.clone(), DisplayCategory::User)
                    .with_content(vec![ContentBlock::text(cmd)], vec![0]),
            );
        }

        Classification::System {
            label,
            plan_source_path,
        } => {
            let (blocks, map) = normalize_blocks(event.content());
            let mut unit = unit_for(event, event.id.clone(), DisplayCategory::System)
                .with_content(blocks, map);
            unit.system_label = Some(label);
            unit.plan_source_path = plan_source_path;
            out.push(unit);
        }

        Classification::User => out.extend(split_user_content(event)),
    }
}
