//! Settings editor runtime
//!
//! One tokio task per open editor owns the working copy and the persister
//! state, and processes edits, snapshot replacements and timer events
//! strictly one at a time. Callers talk to it through a cloneable
//! [`SettingsEditorHandle`].

mod executor;
mod timer;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SettingsEditorRuntime;
pub use timer::ScheduledTask;
pub use traits::{EditorIntents, LoggingIntents};

use crate::persister::{Event, PersisterContext, SaveStatus};
use crate::settings::store::SettingsStore;
use crate::settings::{Settings, SettingsField, StoragePresentation};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Settings editor is closed")]
pub struct EditorClosed;

/// Handle to interact with a running settings editor
#[derive(Clone)]
pub struct SettingsEditorHandle {
    event_tx: mpsc::Sender<Event>,
    status_rx: watch::Receiver<SaveStatus>,
    settings_rx: watch::Receiver<Settings>,
    intents: Arc<dyn EditorIntents>,
}

impl SettingsEditorHandle {
    /// Edit one field of the working copy.
    ///
    /// # Errors
    ///
    /// Fails once the editor has been torn down.
    pub async fn set_field(&self, field: SettingsField) -> Result<(), EditorClosed> {
        self.send(Event::Edit(field)).await
    }

    /// Discard local edits in favour of a fresh snapshot (e.g. reopened).
    ///
    /// # Errors
    ///
    /// Fails once the editor has been torn down.
    pub async fn replace_snapshot(&self, snapshot: Settings) -> Result<(), EditorClosed> {
        self.send(Event::SnapshotReplaced(snapshot)).await
    }

    /// Close the editor. A pending save is dropped, not flushed.
    ///
    /// # Errors
    ///
    /// Fails if the editor was already closed.
    pub async fn teardown(&self) -> Result<(), EditorClosed> {
        self.send(Event::Teardown).await
    }

    #[must_use]
    pub fn save_status(&self) -> SaveStatus {
        *self.status_rx.borrow()
    }

    /// Watch the "Saved" signal
    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<SaveStatus> {
        self.status_rx.clone()
    }

    /// Current working copy
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings_rx.borrow().clone()
    }

    #[must_use]
    pub fn storage_presentation(&self) -> StoragePresentation {
        self.settings_rx.borrow().storage_presentation()
    }

    pub fn engage_autonomy(&self) {
        tracing::info!("Forwarding autonomy engagement request");
        self.intents.request_autonomy_engagement();
    }

    pub fn open_community_manager(&self) {
        tracing::info!("Forwarding community management request");
        self.intents.request_community_management();
    }

    async fn send(&self, event: Event) -> Result<(), EditorClosed> {
        self.event_tx.send(event).await.map_err(|_| EditorClosed)
    }
}

/// Spawn an editor for `snapshot` on the current tokio runtime.
///
/// Dropping every handle tears the editor down.
pub fn spawn_settings_editor<S: SettingsStore + 'static>(
    snapshot: Settings,
    store: S,
    intents: Arc<dyn EditorIntents>,
    context: PersisterContext,
) -> (SettingsEditorHandle, JoinHandle<()>) {
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let (status_tx, status_rx) = watch::channel(SaveStatus::Idle);
    let (settings_tx, settings_rx) = watch::channel(snapshot.clone());

    let runtime = SettingsEditorRuntime::new(
        context,
        snapshot,
        store,
        event_rx,
        status_tx,
        settings_tx,
    );
    let join = tokio::spawn(runtime.run());

    let handle = SettingsEditorHandle {
        event_tx,
        status_rx,
        settings_rx,
        intents,
    };
    (handle, join)
}
