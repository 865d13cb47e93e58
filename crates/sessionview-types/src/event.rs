//! Raw session events as recorded in Claude Code transcript JSONL files.
//!
//! Only the fields the engine reads are typed. Everything else is kept in
//! `extra` maps so a record survives a parse/serialize round trip.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value, json};

/// Coarse event type. Only user and assistant events are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    User,
    Assistant,
    /// file-history-snapshot, queue-operation, summary, ...
    Other,
}

/// One line of a session transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Raw `type` field ("user", "assistant", ...)
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Event identifier
    #[serde(rename = "uuid", alias = "id", default)]
    pub id: String,
    /// ISO 8601 timestamp
    #[serde(default)]
    pub timestamp: String,
    /// Message envelope holding the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<EventMessage>,
    #[serde(
        rename = "isMeta",
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "is_false"
    )]
    pub is_meta: bool,
    #[serde(
        rename = "isCompactSummary",
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "is_false"
    )]
    pub is_compact_summary: bool,
    /// Set by hooks and other automation. Presence is what matters, `null` included.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub caller: Option<Value>,
    /// Tool invocation that injected this event (skill expansion)
    #[serde(
        rename = "sourceToolUseID",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_tool_use_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(rename = "toolUseResult", default, skip_serializing_if = "Option::is_none")]
    pub tool_use_result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<Value>>,
    /// Fields the engine does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `message` envelope of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Message content: a bare string or an ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    /// Anything else. Treated as "no content".
    Other(Value),
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        MessageContent::Blocks(blocks)
    }
}

/// A single content block.
///
/// Blocks are kept as raw JSON so unknown shapes pass through untouched and
/// compare structurally against the source record. Use [`ContentBlock::view`]
/// for typed access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentBlock(Value);

/// Typed, borrowed view over a [`ContentBlock`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockView<'a> {
    /// `text` block whose `text` field is a string
    Text(&'a str),
    ToolUse {
        id: Option<&'a str>,
        name: Option<&'a str>,
        input: Option<&'a Value>,
    },
    ToolResult { tool_use_id: Option<&'a str> },
    Other,
}

impl ContentBlock {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Create a `{"type": "text", "text": ...}` block.
    pub fn text(text: impl Into<String>) -> Self {
        Self(json!({ "type": "text", "text": text.into() }))
    }

    /// Create a `tool_use` block.
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self(json!({ "type": "tool_use", "id": id.into(), "name": name.into(), "input": input }))
    }

    /// Create a `tool_result` block with string output.
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self(json!({ "type": "tool_result", "tool_use_id": tool_use_id.into(), "content": content.into() }))
    }

    /// The block's `type` tag, if any.
    pub fn block_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    pub fn is_tool_result(&self) -> bool {
        self.block_type() == Some("tool_result")
    }

    pub fn view(&self) -> BlockView<'_> {
        let str_field = |key: &str| self.0.get(key).and_then(Value::as_str);
        match self.block_type() {
            Some("text") => match str_field("text") {
                Some(text) => BlockView::Text(text),
                None => BlockView::Other,
            },
            Some("tool_use") => BlockView::ToolUse {
                id: str_field("id"),
                name: str_field("name"),
                input: self.0.get("input"),
            },
            Some("tool_result") => BlockView::ToolResult {
                tool_use_id: str_field("tool_use_id"),
            },
            _ => BlockView::Other,
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl RawEvent {
    /// Create an event of the given raw type with content.
    pub fn new(kind: &str, id: &str, content: impl Into<MessageContent>) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
            message: Some(EventMessage {
                content: Some(content.into()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn user(id: &str, content: impl Into<MessageContent>) -> Self {
        Self::new("user", id, content)
    }

    pub fn assistant(id: &str, content: impl Into<MessageContent>) -> Self {
        Self::new("assistant", id, content)
    }

    pub fn kind(&self) -> EventKind {
        match self.kind.as_str() {
            "user" => EventKind::User,
            "assistant" => EventKind::Assistant,
            _ => EventKind::Other,
        }
    }

    /// The message content, if the event carries one.
    pub fn content(&self) -> Option<&MessageContent> {
        self.message.as_ref().and_then(|m| m.content.as_ref())
    }

    pub fn content_mut(&mut self) -> Option<&mut MessageContent> {
        self.message.as_mut().and_then(|m| m.content.as_mut())
    }

    pub fn model(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.model.as_deref())
    }

    pub fn usage(&self) -> Option<&Value> {
        self.message.as_ref().and_then(|m| m.usage.as_ref())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Deserialize a present field as `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accept any JSON value; only a literal `true` counts.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_bool().unwrap_or(false))
}
