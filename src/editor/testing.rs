//! Mock implementations for testing
//!
//! These mocks let the editor runtime run against recorded collaborators.

use super::traits::EditorIntents;
use super::{spawn_settings_editor, SettingsEditorHandle};
use crate::persister::PersisterContext;
use crate::settings::store::SettingsStore;
use crate::settings::Settings;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

// ============================================================================
// Mock Settings Store
// ============================================================================

/// Records every save; optionally reports failure after recording
#[derive(Default)]
pub struct MockSettingsStore {
    saves: Mutex<Vec<Settings>>,
    fail: bool,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            saves: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn recorded_saves(&self) -> Vec<Settings> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn save(&self, settings: &Settings) -> Result<(), String> {
        self.saves.lock().unwrap().push(settings.clone());
        if self.fail {
            Err("storage backend unavailable".to_string())
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// Recording Intents
// ============================================================================

#[derive(Default)]
pub struct RecordingIntents {
    pub autonomy: AtomicUsize,
    pub community: AtomicUsize,
}

impl EditorIntents for RecordingIntents {
    fn request_autonomy_engagement(&self) {
        self.autonomy.fetch_add(1, Ordering::SeqCst);
    }

    fn request_community_management(&self) {
        self.community.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Test Editor
// ============================================================================

/// A spawned editor plus handles on its mocks
pub struct TestEditor {
    pub handle: SettingsEditorHandle,
    pub store: Arc<MockSettingsStore>,
    pub intents: Arc<RecordingIntents>,
    pub join: JoinHandle<()>,
}

impl TestEditor {
    pub fn open(snapshot: Settings) -> Self {
        Self::open_with_store(snapshot, MockSettingsStore::new())
    }

    pub fn open_with_store(snapshot: Settings, store: MockSettingsStore) -> Self {
        let store = Arc::new(store);
        let intents = Arc::new(RecordingIntents::default());
        let (handle, join) = spawn_settings_editor(
            snapshot,
            Arc::clone(&store),
            Arc::clone(&intents) as Arc<dyn EditorIntents>,
            PersisterContext::default(),
        );
        Self {
            handle,
            store,
            intents,
            join,
        }
    }

    pub fn saves(&self) -> Vec<Settings> {
        self.store.recorded_saves()
    }

    /// Let the runtime drain queued events (virtual time advances 1ms)
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}
