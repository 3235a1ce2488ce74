//! PARC hub terminal driver
//!
//! Runs the settings editor against a JSON settings file and a research hub
//! backed by an in-process transcript. Reads one command per line on stdin.

use parc_hub::config::HubConfig;
use parc_hub::editor::LoggingIntents;
use parc_hub::settings::store::{JsonFileStore, StoreError};
use parc_hub::submission::MessageSink;
use parc_hub::{
    spawn_settings_editor, ChatMessage, EditorClosed, HubFeed, Identity, ResearchHub, SettingsEditorHandle,
    SettingsField,
};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "commands: say <text> | provider <gemini|ollama> | model <name> | \
storage <google-drive|local-storage|dropbox|one-drive> | path <dir> | settings | show | \
reload | autonomy | community | quit";

/// Transcript feed owned by this process
#[derive(Clone)]
struct LocalFeed {
    author: Identity,
    messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl LocalFeed {
    fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl MessageSink for LocalFeed {
    fn append_message(&self, text: String) {
        let message = ChatMessage::new(
            uuid::Uuid::new_v4().to_string(),
            self.author.clone(),
            text,
            chrono::Local::now().format("%H:%M").to_string(),
        );
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message),
            Err(e) => tracing::error!(error = %e, "Transcript feed lock poisoned"),
        }
    }
}

fn founding_members() -> Vec<Identity> {
    vec![
        Identity::simulated(
            "fm-vega",
            "Dr. Lena Vega",
            "Soil chemist focused on carbon sequestration in degraded farmland.",
            "avatars/vega.png",
        ),
        Identity::simulated(
            "fm-orin",
            "Orin Hale",
            "Hydrologist modelling groundwater recharge under shifting rainfall regimes.",
            "avatars/orin.png",
        ),
    ]
}

fn parse_field(command: &str, arg: &str) -> Result<Option<SettingsField>, String> {
    Ok(Some(match command {
        "provider" => SettingsField::AiProvider(arg.parse()?),
        "model" => SettingsField::OllamaModel(arg.to_string()),
        "storage" => SettingsField::StorageProvider(arg.parse()?),
        "path" => SettingsField::StoragePath(arg.to_string()),
        _ => return Ok(None),
    }))
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::error!(error = %e, "Failed to render view"),
    }
}

fn print_settings(editor: &SettingsEditorHandle) {
    let settings = editor.settings();
    let storage = editor.storage_presentation();
    print_json(&serde_json::json!({
        "settings": settings,
        "status": editor.save_status(),
        "aiProviderLabel": settings.ai_provider.label(),
        "modelFieldVisible": settings.model_field_visible(),
        "storageLabel": settings.storage_provider.label(),
        "storage": storage,
    }));
}

/// Replace the editor snapshot from disk. An unreadable file keeps the
/// current session.
async fn reload(
    store: &JsonFileStore,
    editor: &SettingsEditorHandle,
) -> Result<Result<(), StoreError>, EditorClosed> {
    match store.load().await {
        Ok(fresh) => editor.replace_snapshot(fresh).await.map(Ok),
        Err(e) => {
            tracing::warn!(error = %e, "Reload failed, keeping current settings");
            Ok(Err(e))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parc_hub=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Configuration
    let config = HubConfig::from_env();
    let store = JsonFileStore::new(&config.settings_path);
    tracing::info!(path = %store.path().display(), "Loading settings");
    let snapshot = store.load().await?;

    let (editor, editor_task) = spawn_settings_editor(
        snapshot,
        store.clone(),
        Arc::new(LoggingIntents),
        config.persister_context(),
    );

    let viewer = Identity::human(
        "local-user",
        std::env::var("USER").unwrap_or_else(|_| "Researcher".to_string()),
        "researcher@localhost",
        "avatars/you.png",
    );
    let feed = LocalFeed {
        author: viewer.clone(),
        messages: Arc::new(Mutex::new(Vec::new())),
    };
    let online = founding_members();
    let mut hub = ResearchHub::new(config.hub_context(), feed.clone());

    println!("{}", hub.context().title());
    println!("Discussing: {}", hub.context().theme_description);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match command {
            "" => {}
            "quit" | "exit" => break,
            "say" => {
                hub.set_input(arg);
                if let Err(e) = hub.submit() {
                    println!("{e}");
                    continue;
                }
                let view = hub.refresh(&HubFeed {
                    viewer: viewer.clone(),
                    messages: feed.snapshot(),
                    online: online.clone(),
                });
                print_json(&view.transcript);
            }
            "show" => {
                let view = hub.refresh(&HubFeed {
                    viewer: viewer.clone(),
                    messages: feed.snapshot(),
                    online: online.clone(),
                });
                print_json(&view);
            }
            "settings" => print_settings(&editor),
            "reload" => {
                if let Err(e) = reload(&store, &editor).await? {
                    println!("{e}");
                }
            }
            "autonomy" => editor.engage_autonomy(),
            "community" => editor.open_community_manager(),
            _ => match parse_field(command, arg) {
                Ok(Some(field)) => editor.set_field(field).await?,
                Ok(None) => println!("{HELP}"),
                Err(e) => println!("{e}"),
            },
        }
    }

    // Pending edits inside the quiet period are dropped, not flushed
    editor.teardown().await?;
    editor_task.await?;
    Ok(())
}
