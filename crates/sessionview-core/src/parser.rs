//! Parser for session transcript JSONL text.
//!
//! Works on text the caller has already read; no file access happens here.

use crate::{Result, SessionViewError};
use sessionview_types::RawEvent;

/// Line-oriented parser for transcript events.
#[derive(Debug, Default)]
pub struct EventParser {
    /// Buffer for an incomplete trailing line.
    buffer: String,
}

impl EventParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one line. Blank lines yield `None`; anything other than a JSON
    /// object is an error.
    pub fn parse_line(&self, line: &str) -> Result<Option<RawEvent>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if !trimmed.starts_with('{') {
            return Err(SessionViewError::ParseError(format!(
                "expected a JSON object, got {:?}",
                truncate(trimmed, 20)
            )));
        }
        Ok(Some(serde_json::from_str::<RawEvent>(trimmed)?))
    }

    /// Parse streaming data that may end in a partial line.
    ///
    /// Complete lines are parsed; malformed ones are skipped. The trailing
    /// partial line is kept until the next chunk or [`finish`](Self::finish).
    pub fn parse_chunk(&mut self, chunk: &str) -> Vec<RawEvent> {
        self.buffer.push_str(chunk);
        let mut events = Vec::new();

        while let Some(newline_pos) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline_pos).collect();
            if let Some(event) = self.parse_lenient(&line) {
                events.push(event);
            }
        }

        events
    }

    /// Parse whatever is left in the buffer as a final line.
    pub fn finish(&mut self) -> Option<RawEvent> {
        let rest = std::mem::take(&mut self.buffer);
        self.parse_lenient(&rest)
    }

    /// Reset the parser state.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    fn parse_lenient(&self, line: &str) -> Option<RawEvent> {
        match self.parse_line(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(
                    target: "sessionview::parser",
                    "Skipping malformed transcript line: {}: {}",
                    e,
                    truncate(line.trim(), 100)
                );
                None
            }
        }
    }
}

/// Parse a whole transcript, skipping blank and malformed lines.
pub fn parse_jsonl(text: &str) -> Vec<RawEvent> {
    let mut parser = EventParser::new();
    let mut events = parser.parse_chunk(text);
    events.extend(parser.finish());
    events
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
