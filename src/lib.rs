//! PARC research hub client state
//!
//! Client-side state for the research community chat surface and its
//! settings editor: a debounced settings persister, plus pure view models
//! for the chat transcript and the online member roster.

pub mod config;
pub mod editor;
pub mod hub;
pub mod identity;
pub mod persister;
pub mod roster;
pub mod settings;
pub mod submission;
pub mod transcript;

pub use editor::{spawn_settings_editor, EditorClosed, SettingsEditorHandle};
pub use hub::{HubContext, HubFeed, HubView, ResearchHub};
pub use identity::{Identity, IdentityKey, IdentityKind};
pub use settings::{AiProvider, Settings, SettingsField, StorageProvider};
pub use transcript::ChatMessage;
