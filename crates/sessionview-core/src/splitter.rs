//! Splitting of ordinary user events into a message unit and tool-result units.

use sessionview_types::{ContentBlock, DisplayCategory, DisplayUnit, MessageContent, RawEvent};

/// Display id of the `seq`-th tool result split out of `source_id`.
pub(crate) fn tool_result_display_id(source_id: &str, seq: usize) -> String {
    format!("{source_id}-tool-{seq}")
}

/// Normalize content into a block list with identity index map.
///
/// A bare string becomes a single text block; missing or malformed content
/// becomes an empty list.
pub(crate) fn normalize_blocks(content: Option<&MessageContent>) -> (Vec<ContentBlock>, Vec<usize>) {
    match content {
        Some(MessageContent::Text(text)) => (vec![ContentBlock::text(text.as_str())], vec![0]),
        Some(MessageContent::Blocks(blocks)) => (blocks.clone(), (0..blocks.len()).collect()),
        Some(MessageContent::Other(_)) | None => (Vec::new(), Vec::new()),
    }
}

/// Base unit for `event` with id, category, timestamp and cwd filled in.
pub(crate) fn unit_for(event: &RawEvent, display_id: String, category: DisplayCategory) -> DisplayUnit {
    DisplayUnit::new(event.id.as_str(), display_id, category, event.timestamp.as_str())
        .with_cwd(event.cwd.clone())
}

/// Build display units for an ordinary user event.
///
/// Non-tool-result blocks form one `user` unit (omitted when there are none);
/// each `tool_result` block becomes its own `tool_result` unit, after the user
/// unit, in original order. Every unit records the original index of each of
/// its blocks. Missing or malformed content yields no units.
pub fn split_user_content(event: &RawEvent) -> Vec<DisplayUnit> {
    match event.content() {
        Some(MessageContent::Text(text)) => vec![
            unit_for(event, event.id.clone(), DisplayCategory::User)
                .with_content(vec![ContentBlock::text(text.as_str())], vec![0])
                .editable(true),
        ],
        Some(MessageContent::Blocks(blocks)) => {
            let (tool_results, messages): (Vec<_>, Vec<_>) = blocks
                .iter()
                .enumerate()
                .partition(|(_, block)| block.is_tool_result());

            let mut units = Vec::with_capacity(tool_results.len() + 1);
            if !messages.is_empty() {
                let (map, content): (Vec<usize>, Vec<ContentBlock>) = messages
                    .into_iter()
                    .map(|(index, block)| (index, block.clone()))
                    .unzip();
                units.push(
                    unit_for(event, event.id.clone(), DisplayCategory::User)
                        .with_content(content, map)
                        .editable(true),
                );
            }
            for (seq, (index, block)) in tool_results.into_iter().enumerate() {
                units.push(
                    unit_for(
                        event,
                        tool_result_display_id(&event.id, seq),
                        DisplayCategory::ToolResult,
                    )
                    .with_content(vec![block.clone()], vec![index])
                    .editable(true),
                );
            }
            units
        }
        Some(MessageContent::Other(_)) | None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_content_single_unit() {
        let units = split_user_content(&RawEvent::user("u1", "hello"));

        assert_eq!(units.len(), 1);
        assert_eq!(units[0].display_category, DisplayCategory::User);
        assert_eq!(units[0].display_id, "u1");
        assert_eq!(units[0].content, vec![ContentBlock::text("hello")]);
        assert_eq!(units[0].block_index_map, vec![0]);
        assert!(units[0].editable);
    }

    #[test]
    fn test_interleaved_blocks_keep_original_indices() {
        let blocks = vec![
            ContentBlock::tool_result("t1", "one"),
            ContentBlock::text("question"),
            ContentBlock::tool_result("t2", "two"),
            ContentBlock::new(json!({"type": "image", "source": {}})),
        ];
        let units = split_user_content(&RawEvent::user("u1", blocks.clone()));

        assert_eq!(units.len(), 3);
        assert_eq!(units[0].display_category, DisplayCategory::User);
        assert_eq!(units[0].content, vec![blocks[1].clone(), blocks[3].clone()]);
        assert_eq!(units[0].block_index_map, vec![1, 3]);

        assert_eq!(units[1].display_id, "u1-tool-0");
        assert_eq!(units[1].display_category, DisplayCategory::ToolResult);
        assert_eq!(units[1].content, vec![blocks[0].clone()]);
        assert_eq!(units[1].block_index_map, vec![0]);

        assert_eq!(units[2].display_id, "u1-tool-1");
        assert_eq!(units[2].block_index_map, vec![2]);
        assert!(units.iter().all(|u| u.editable));
    }

    #[test]
    fn test_only_tool_results_has_no_user_unit() {
        let units = split_user_content(&RawEvent::user(
            "u1",
            vec![ContentBlock::tool_result("t1", "ok")],
        ));
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].display_category, DisplayCategory::ToolResult);
    }

    #[test]
    fn test_empty_or_missing_content_yields_nothing() {
        assert!(split_user_content(&RawEvent::user("u1", Vec::<ContentBlock>::new())).is_empty());
        assert!(split_user_content(&RawEvent::user("u1", MessageContent::Other(json!(7)))).is_empty());

        let mut event = RawEvent::user("u1", "x");
        event.message = None;
        assert!(split_user_content(&event).is_empty());
    }

    #[test]
    fn test_normalize_blocks() {
        let (blocks, map) = normalize_blocks(Some(&MessageContent::from("hi")));
        assert_eq!(blocks, vec![ContentBlock::text("hi")]);
        assert_eq!(map, vec![0]);

        let (blocks, map) = normalize_blocks(None);
        assert!(blocks.is_empty() && map.is_empty());
    }
}
