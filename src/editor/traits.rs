//! Collaborator seams for the editor
//!
//! Intents are parameterless, fire-and-forget requests owned by the host.

use std::sync::Arc;

/// Requests the editor forwards to its host without observing the outcome
pub trait EditorIntents: Send + Sync {
    fn request_autonomy_engagement(&self);
    fn request_community_management(&self);
}

impl<T: EditorIntents + ?Sized> EditorIntents for Arc<T> {
    fn request_autonomy_engagement(&self) {
        (**self).request_autonomy_engagement();
    }

    fn request_community_management(&self) {
        (**self).request_community_management();
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Host without autonomy or community screens; records the request in logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingIntents;

impl EditorIntents for LoggingIntents {
    fn request_autonomy_engagement(&self) {
        tracing::info!(intent = "autonomy", "No autonomy controller attached");
    }

    fn request_community_management(&self) {
        tracing::info!(intent = "community", "No community manager attached");
    }
}
