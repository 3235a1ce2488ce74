//! Chat transcript view model
//!
//! The feed is owned by the hosting environment and replaced wholesale on
//! every update. Rendering is a pure function of the feed and the viewer;
//! [`TranscriptStore`] only remembers enough to decide when the view should
//! jump to the newest message.

use crate::identity::Identity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const EMPTY_HEADLINE: &str = "No messages yet.";
pub const EMPTY_GUIDANCE: &str = "Start the conversation to meet the Founding Members!";

/// A single chat message, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "user")]
    pub author: Identity,
    pub text: String,
    /// Display timestamp, opaque to this crate
    pub timestamp: String,
}

impl ChatMessage {
    pub fn new(
        id: impl Into<String>,
        author: Identity,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Whether the viewer wrote a message. Controls alignment only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Authorship {
    Own,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub id: String,
    pub text: String,
    pub picture: String,
    pub authorship: Authorship,
    /// "{author}, {timestamp}"
    pub byline: String,
}

/// Rendered transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptView {
    /// No messages; callers show placeholder guidance instead of a list
    Empty {
        headline: &'static str,
        guidance: &'static str,
    },
    Messages { messages: Vec<RenderedMessage> },
}

impl TranscriptView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, TranscriptView::Empty { .. })
    }

    #[must_use]
    pub fn messages(&self) -> &[RenderedMessage] {
        match self {
            TranscriptView::Empty { .. } => &[],
            TranscriptView::Messages { messages } => messages,
        }
    }
}

/// Render the feed for a viewer. Order is the feed order, never changed.
#[must_use]
pub fn render(messages: &[ChatMessage], viewer: &Identity) -> TranscriptView {
    if messages.is_empty() {
        return TranscriptView::Empty {
            headline: EMPTY_HEADLINE,
            guidance: EMPTY_GUIDANCE,
        };
    }

    let messages = messages
        .iter()
        .map(|msg| RenderedMessage {
            id: msg.id.clone(),
            text: msg.text.clone(),
            picture: msg.author.picture.clone(),
            authorship: if msg.author.key() == viewer.key() {
                Authorship::Own
            } else {
                Authorship::Other
            },
            byline: format!("{}, {}", msg.author.name, msg.timestamp),
        })
        .collect();

    TranscriptView::Messages { messages }
}

/// Auto-scroll decision for one feed observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSignal {
    ScrollToNewest,
    Hold,
}

/// Tracks the previously observed feed to emit one scroll signal per growth
#[derive(Debug, Default)]
pub struct TranscriptStore {
    seen_len: usize,
    seen_ids: HashSet<String>,
}

impl TranscriptStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a feed observation.
    ///
    /// Signals when the feed got longer, or when its newest message was not
    /// part of the previous observation. Shrinks, reorders and identical
    /// re-observations hold.
    pub fn observe(&mut self, messages: &[ChatMessage]) -> ScrollSignal {
        let grew = messages.len() > self.seen_len;
        let new_tail = messages
            .last()
            .is_some_and(|m| !self.seen_ids.contains(&m.id));

        self.seen_len = messages.len();
        self.seen_ids = messages.iter().map(|m| m.id.clone()).collect();

        if grew || new_tail {
            tracing::debug!(len = self.seen_len, "New message at tail, scrolling to newest");
            ScrollSignal::ScrollToNewest
        } else {
            ScrollSignal::Hold
        }
    }
}
