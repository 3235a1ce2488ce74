//! Research hub page model
//!
//! Ties the transcript, roster and chat composer together. The host calls
//! [`ResearchHub::refresh`] whenever any of its feeds change and renders the
//! returned [`HubView`].

use crate::identity::Identity;
use crate::roster::{self, RosterEntry};
use crate::submission::{self, ChatSubmission, MessageSink, SubmitError};
use crate::transcript::{self, ChatMessage, ScrollSignal, TranscriptStore, TranscriptView};
use serde::Serialize;

pub const CAPABILITIES: [&str; 3] = ["RAG Enabled", "Context Aware", "Persona Simulation"];

/// Static page context for one community
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubContext {
    pub community_name: String,
    pub theme_description: String,
}

impl HubContext {
    #[must_use]
    pub fn new(community_name: &str, theme_description: &str) -> Self {
        Self {
            community_name: community_name.to_string(),
            theme_description: theme_description.to_string(),
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("{} Research Hub", self.community_name)
    }

    #[must_use]
    pub fn input_placeholder(&self) -> String {
        submission::channel_placeholder(&self.community_name)
    }
}

/// Inputs supplied by the host, replaced wholesale on every change
#[derive(Debug, Clone)]
pub struct HubFeed {
    pub viewer: Identity,
    pub messages: Vec<ChatMessage>,
    pub online: Vec<Identity>,
}

/// Everything the page needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct HubView {
    pub transcript: TranscriptView,
    pub roster: Vec<RosterEntry>,
    #[serde(skip)]
    pub scroll: ScrollSignal,
}

pub struct ResearchHub<S: MessageSink> {
    context: HubContext,
    transcript: TranscriptStore,
    composer: ChatSubmission<S>,
}

impl<S: MessageSink> ResearchHub<S> {
    pub fn new(context: HubContext, sink: S) -> Self {
        Self {
            context,
            transcript: TranscriptStore::new(),
            composer: ChatSubmission::new(sink),
        }
    }

    pub fn context(&self) -> &HubContext {
        &self.context
    }

    /// Re-derive the page from the latest feed
    pub fn refresh(&mut self, feed: &HubFeed) -> HubView {
        HubView {
            transcript: transcript::render(&feed.messages, &feed.viewer),
            roster: roster::merge(&feed.viewer, &feed.online),
            scroll: self.transcript.observe(&feed.messages),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.composer.set_input(text);
    }

    pub fn input(&self) -> &str {
        self.composer.input()
    }

    /// Submit the chat box.
    ///
    /// # Errors
    ///
    /// Rejects blank input without touching the buffer.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        let result = self.composer.submit();
        if let Err(e) = &result {
            tracing::info!(community = %self.context.community_name, error = %e, "Chat submission rejected");
        }
        result
    }
}
