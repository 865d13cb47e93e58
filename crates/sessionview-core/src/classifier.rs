//! Display classification of raw events.
//!
//! Assistant events map straight to assistant units. User events run through
//! an ordered rule chain where the first rule that fires decides:
//!
//! 1. compact summary (`isCompactSummary`)
//! 2. slash command (`<command-name>/...</command-name>`)
//! 3. system message (field markers, plan execution, protocol tags)
//!
//! When no rule fires the event is ordinary user input and is split by
//! [`split_user_content`](crate::split_user_content).

use crate::text::extract_text;
use once_cell::sync::Lazy;
use regex::Regex;
use sessionview_types::{EventKind, RawEvent, SystemLabel};
use tracing::trace;

/// How a raw event is turned into display units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a chat event (file-history-snapshot, queue-operation, ...)
    Skip,
    Assistant,
    CompactSummary,
    /// Slash command with the extracted command token, e.g. "/compact"
    SlashCommand(String),
    System {
        label: SystemLabel,
        plan_source_path: Option<String>,
    },
    /// Ordinary user input; tool results are split out
    User,
}

/// Protocol tags that mark content injected by the CLI. The text must start
/// with the opening tag and contain the closing tag.
const SYSTEM_TAGS: &[&str] = &[
    "local-command-stdout",
    "local-command-caveat",
    "system-reminder",
    "user-prompt-submit-hook",
    "task-notification",
];

const SKILL_PREFIX: &str = "Base directory for this skill:";

const PLAN_PREFIX: &str = "Implement the following plan:\n\n#";

static PLAN_TRANSCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"read the full transcript at:\s*(.+?\.jsonl)").expect("Invalid plan transcript regex")
});

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,2}\s").expect("Invalid heading regex"));

/// What a rule sees: the event and its extracted plain text.
struct RuleInput<'a> {
    event: &'a RawEvent,
    text: &'a str,
}

struct Rule {
    name: &'static str,
    apply: fn(&RuleInput<'_>) -> Option<Classification>,
}

/// User-event rules in priority order.
const USER_RULES: &[Rule] = &[
    Rule {
        name: "compact_summary",
        apply: compact_summary,
    },
    Rule {
        name: "slash_command",
        apply: slash_command,
    },
    Rule {
        name: "system_message",
        apply: system_message,
    },
];

/// Classify one raw event.
pub fn classify(event: &RawEvent) -> Classification {
    match event.kind() {
        EventKind::Other => Classification::Skip,
        EventKind::Assistant => Classification::Assistant,
        EventKind::User => {
            let text = extract_text(event.content());
            let input = RuleInput {
                event,
                text: &text,
            };
            USER_RULES
                .iter()
                .find_map(|rule| {
                    let result = (rule.apply)(&input)?;
                    trace!(
                        target: "sessionview::classifier",
                        "Event {} matched rule {}",
                        event.id,
                        rule.name
                    );
                    Some(result)
                })
                .unwrap_or(Classification::User)
        }
    }
}

fn compact_summary(input: &RuleInput<'_>) -> Option<Classification> {
    input
        .event
        .is_compact_summary
        .then_some(Classification::CompactSummary)
}

fn slash_command(input: &RuleInput<'_>) -> Option<Classification> {
    extract_slash_command(input.text).map(|cmd| Classification::SlashCommand(cmd.to_string()))
}

fn system_message(input: &RuleInput<'_>) -> Option<Classification> {
    let RuleInput { event, text } = *input;
    let system = |label| Classification::System {
        label,
        plan_source_path: None,
    };

    if event.is_meta {
        let label = if text.starts_with(SKILL_PREFIX) {
            SystemLabel::Skill
        } else {
            SystemLabel::System
        };
        return Some(system(label));
    }

    if event.source_tool_use_id.is_some() {
        return Some(system(SystemLabel::Skill));
    }

    if let Some(path) = plan_source_path(text) {
        return Some(Classification::System {
            label: SystemLabel::Plan,
            plan_source_path: Some(path.to_string()),
        });
    }

    if event.caller.is_some() {
        return Some(system(SystemLabel::System));
    }

    SYSTEM_TAGS
        .iter()
        .any(|tag| has_tag_pair(text, tag))
        .then(|| system(SystemLabel::System))
}

/// Payload of the first `<command-name>` tag pair that starts with '/'.
fn extract_slash_command(text: &str) -> Option<&str> {
    const OPEN: &str = "<command-name>";
    const CLOSE: &str = "</command-name>";
    let mut rest = text;
    while let Some(pos) = rest.find(OPEN) {
        let after = &rest[pos + OPEN.len()..];
        let end = after.find(CLOSE)?;
        let cmd = &after[..end];
        if cmd.starts_with('/') {
            return Some(cmd);
        }
        rest = &after[end + CLOSE.len()..];
    }
    None
}

/// `text` starts with `<tag>` and contains `</tag>` after it.
fn has_tag_pair(text: &str, tag: &str) -> bool {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    text.strip_prefix(&open)
        .is_some_and(|rest| rest.contains(&close))
}

/// Plan-execution check. Returns the referenced transcript path when the text
/// has the plan prefix, a transcript reference and a `#`/`##` heading line.
fn plan_source_path(text: &str) -> Option<&str> {
    if !text.starts_with(PLAN_PREFIX) {
        return None;
    }
    let path = PLAN_TRANSCRIPT_RE.captures(text)?.get(1)?.as_str();
    HEADING_RE.is_match(text).then_some(path)
}
