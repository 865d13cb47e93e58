//! Session content processing for sessionview.
//!
//! Two independent engines live here:
//! - the display pipeline ([`transform`]), which turns raw transcript events
//!   into ordered, typed display units;
//! - the highlight engine ([`Highlighter`]), which marks search matches inside
//!   a rendered content tree.
//!
//! Around them sit helpers for parsing transcript text ([`parse_jsonl`]),
//! session search ([`SearchIndex`]), edits and repair, and export.
//!
//! Everything is synchronous and performs no I/O.

mod classifier;
mod edit;
mod error;
mod export;
mod finder;
mod highlight;
mod parser;
mod paths;
mod search;
mod splitter;
mod text;
mod tool_index;
mod transformer;

pub use classifier::{Classification, classify};
pub use edit::{apply_block_edits, remove_events, strip_thinking_blocks};
pub use error::SessionViewError;
pub use export::{to_json, to_markdown};
pub use finder::MatchFinder;
pub use highlight::{HighlightStyle, Highlighter};
pub use parser::{EventParser, parse_jsonl};
pub use paths::{decode_project_path, relativize};
pub use search::SearchIndex;
pub use splitter::split_user_content;
pub use text::extract_text;
pub use tool_index::{UNKNOWN_TOOL, build_tool_index};
pub use transformer::transform;

/// Result type for sessionview operations.
pub type Result<T> = std::result::Result<T, SessionViewError>;
