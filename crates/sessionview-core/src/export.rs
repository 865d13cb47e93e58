//! Session export as Markdown or JSON.

use crate::Result;
use crate::text::extract_text;
use chrono::{DateTime, SecondsFormat, Utc};
use sessionview_types::{EventKind, RawEvent};

/// Render user and assistant events as a Markdown document.
///
/// Only plain text is exported; tool calls and other event kinds are left out.
pub fn to_markdown(events: &[RawEvent], title: &str, exported_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = vec![
        format!("# {}", title),
        String::new(),
        format!(
            "Exported: {}",
            exported_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        String::new(),
        "---".into(),
        String::new(),
    ];

    for event in events {
        let role = match event.kind() {
            EventKind::User => "User",
            EventKind::Assistant => "Assistant",
            EventKind::Other => continue,
        };
        let time = if event.timestamp.is_empty() {
            "unknown time"
        } else {
            event.timestamp.as_str()
        };

        lines.push(format!("## {} ({})", role, time));
        lines.push(String::new());
        let text = extract_text(event.content());
        if !text.is_empty() {
            lines.push(text.into_owned());
        }
        lines.push(String::new());
        lines.push("---".into());
        lines.push(String::new());
    }

    lines.join("\n")
}

/// Serialize events as pretty-printed JSON, preserving every field.
pub fn to_json(events: &[RawEvent]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}
