//! Outgoing chat message composer

use std::sync::Arc;
use thiserror::Error;

/// Collaborator that appends a message to the shared transcript feed.
///
/// Called synchronously and never awaited; any latency or failure in the
/// append belongs to the implementor.
pub trait MessageSink: Send + Sync {
    fn append_message(&self, text: String);
}

impl<T: MessageSink + ?Sized> MessageSink for Arc<T> {
    fn append_message(&self, text: String) {
        (**self).append_message(text);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Message is empty")]
    EmptyMessage,
}

/// Input buffer plus submit action for the chat box
pub struct ChatSubmission<S: MessageSink> {
    sink: S,
    input: String,
}

impl<S: MessageSink> ChatSubmission<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            input: String::new(),
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Forward the trimmed input to the sink exactly once and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::EmptyMessage`] when the input is blank. Nothing
    /// is forwarded and the buffer is left as it was.
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        let text = self.input.trim();
        if text.is_empty() {
            tracing::debug!("Rejected empty chat submission");
            return Err(SubmitError::EmptyMessage);
        }

        self.sink.append_message(text.to_string());
        self.input.clear();
        Ok(())
    }
}

/// Placeholder for the chat input, e.g. `Message #open-science-lab`
#[must_use]
pub fn channel_placeholder(community_name: &str) -> String {
    let slug = community_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("Message #{slug}")
}
