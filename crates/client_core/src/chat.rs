use chrono::{DateTime, Local};
use shared::domain::ChatSender;

pub const REPLY_ERROR_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";
pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting. Please check your internet connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    /// Blank input; nothing was appended or sent.
    Ignored,
    Replied,
    Apologized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub sender: ChatSender,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// Transcript for the current page load. The typing placeholder is tracked
/// separately and never becomes an entry.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    entries: Vec<ChatEntry>,
    typing: bool,
}

impl ChatLog {
    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    pub fn push(&mut self, sender: ChatSender, text: impl Into<String>) -> &ChatEntry {
        self.entries.push(ChatEntry {
            sender,
            text: text.into(),
            timestamp: Local::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.typing = false;
    }
}
