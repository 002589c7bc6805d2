//! Table chat log.

use serde::{Deserialize, Serialize};

/// Hard cap on the length of a chat line, in characters.
pub const MAX_CHAT_CHARS: usize = 160;

/// One chat line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    #[serde(rename = "from")]
    pub speaker: String,
    /// What was said, at most [`MAX_CHAT_CHARS`] characters.
    pub text: String,
}

/// Append-only chat for the current hand.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Appends a line, truncating the text to [`MAX_CHAT_CHARS`].
    pub fn post(&mut self, speaker: impl Into<String>, text: &str) {
        self.messages.push(ChatMessage {
            speaker: speaker.into(),
            text: truncate(text, MAX_CHAT_CHARS),
        });
    }

    /// Messages in the order they were posted.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Truncates to at most `max` characters on a char boundary.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
