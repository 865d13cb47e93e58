//! Error types for sessionview.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionViewError {
    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
