//! Chat message log.
//!
//! DESIGN
//! ======
//! Append-only. The log assigns each entry a monotonically increasing id and
//! a wall-clock timestamp; entries are never edited or removed, and readers
//! always see insertion order. Concurrent writers must serialize through the
//! lock that owns the log (see `AppState::log`).

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

/// Message body. `Rich` content is an HTML fragment built by this crate's
/// templates around model output; sanitizing it is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageContent {
    Plain { text: String },
    Rich { html: String },
}

impl MessageContent {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain { text: text.into() }
    }

    pub fn rich(html: impl Into<String>) -> Self {
        Self::Rich { html: html.into() }
    }

    #[must_use]
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Rich { .. })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain { text } => text,
            Self::Rich { html } => html,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: MessageContent,
    pub is_html: bool,
    pub created_at_ms: i64,
}

#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log pre-populated with rich AI messages (the welcome text).
    #[must_use]
    pub fn with_greeting<'a>(greeting: impl IntoIterator<Item = &'a str>) -> Self {
        let mut log = Self::new();
        for html in greeting {
            log.append(Role::Ai, MessageContent::rich(html));
        }
        log
    }

    /// Append an entry at the tail and return a copy of it.
    pub fn append(&mut self, role: Role, content: MessageContent) -> ChatMessage {
        self.next_id += 1;
        let message = ChatMessage {
            id: self.next_id,
            role,
            is_html: content.is_html(),
            content,
            created_at_ms: now_ms(),
        };
        self.messages.push(message.clone());
        message
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

#[cfg(test)]
impl ChatLog {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
