//! Plain-text extraction from message content.

use sessionview_types::{BlockView, MessageContent};
use std::borrow::Cow;

/// Reduce message content to a single string.
///
/// A string is returned as is (borrowed). For a block list, the text of every
/// `text` block is joined with `\n`; all other blocks contribute nothing.
/// Missing or malformed content yields `""`.
pub fn extract_text(content: Option<&MessageContent>) -> Cow<'_, str> {
    match content {
        Some(MessageContent::Text(text)) => Cow::Borrowed(text.as_str()),
        Some(MessageContent::Blocks(blocks)) => {
            let mut buf = String::new();
            let texts = blocks.iter().filter_map(|block| match block.view() {
                BlockView::Text(text) => Some(text),
                _ => None,
            });
            for (i, text) in texts.enumerate() {
                if i > 0 {
                    buf.push('\n');
                }
                buf.push_str(text);
            }
            Cow::Owned(buf)
        }
        Some(MessageContent::Other(_)) | None => Cow::Borrowed(""),
    }
}
