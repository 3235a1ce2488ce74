//! Editable hub settings
//!
//! `Settings` is a single flat struct: every field is always present, so a
//! value entered for one provider survives switching to another and back.

pub mod store;

use serde::{Deserialize, Serialize};

pub const OLLAMA_HELP: &str =
    "Ensure your local Ollama server is running at http://localhost:11434.";
pub const OLLAMA_MODEL_PLACEHOLDER: &str = "e.g., llama3, codellama";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiProvider {
    #[default]
    Gemini,
    Ollama,
}

impl AiProvider {
    pub const ALL: [AiProvider; 2] = [AiProvider::Gemini, AiProvider::Ollama];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AiProvider::Gemini => "Gemini",
            AiProvider::Ollama => "Ollama (Local)",
        }
    }
}

/// Conceptual storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageProvider {
    #[default]
    GoogleDrive,
    LocalStorage,
    Dropbox,
    OneDrive,
}

/// Display hints for the storage path input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoragePresentation {
    pub prefix: &'static str,
    pub placeholder: &'static str,
    pub help: &'static str,
}

impl StorageProvider {
    pub const ALL: [StorageProvider; 4] = [
        StorageProvider::GoogleDrive,
        StorageProvider::LocalStorage,
        StorageProvider::Dropbox,
        StorageProvider::OneDrive,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StorageProvider::GoogleDrive => "Google Drive (Conceptual)",
            StorageProvider::LocalStorage => "Local Storage (Conceptual)",
            StorageProvider::Dropbox => "Dropbox (Conceptual)",
            StorageProvider::OneDrive => "OneDrive (Conceptual)",
        }
    }

    #[must_use]
    pub fn presentation(self) -> StoragePresentation {
        match self {
            StorageProvider::GoogleDrive => StoragePresentation {
                prefix: "/My Drive/",
                placeholder: "e.g., PARC_Projects/Data",
                help: "The Google Drive folder where PARC will store project data.",
            },
            StorageProvider::LocalStorage => StoragePresentation {
                prefix: "/Local/",
                placeholder: "e.g., Documents/PARC_Data",
                help: "The local directory path for storing project data.",
            },
            StorageProvider::Dropbox => StoragePresentation {
                prefix: "/Dropbox/",
                placeholder: "e.g., Apps/PARC_Data",
                help: "The Dropbox folder where PARC will store project data.",
            },
            StorageProvider::OneDrive => StoragePresentation {
                prefix: "/OneDrive/",
                placeholder: "e.g., Documents/PARC",
                help: "The OneDrive folder where PARC will store project data.",
            },
        }
    }
}

impl std::str::FromStr for StorageProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google-drive" => Ok(StorageProvider::GoogleDrive),
            "local-storage" => Ok(StorageProvider::LocalStorage),
            "dropbox" => Ok(StorageProvider::Dropbox),
            "one-drive" => Ok(StorageProvider::OneDrive),
            other => Err(format!("unknown storage provider: {other}")),
        }
    }
}

impl std::str::FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(AiProvider::Gemini),
            "ollama" => Ok(AiProvider::Ollama),
            other => Err(format!("unknown AI provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub ai_provider: AiProvider,
    /// Only meaningful for [`AiProvider::Ollama`], but always retained
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    #[serde(default)]
    pub storage_provider: StorageProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

fn default_ollama_model() -> String {
    DEFAULT_OLLAMA_MODEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai_provider: AiProvider::default(),
            ollama_model: default_ollama_model(),
            storage_provider: StorageProvider::default(),
            storage_path: None,
        }
    }
}

impl Settings {
    /// Whether the model name input is shown for the current provider
    #[must_use]
    pub fn model_field_visible(&self) -> bool {
        self.ai_provider == AiProvider::Ollama
    }

    #[must_use]
    pub fn storage_presentation(&self) -> StoragePresentation {
        self.storage_provider.presentation()
    }
}

/// A single-field edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsField {
    AiProvider(AiProvider),
    OllamaModel(String),
    StorageProvider(StorageProvider),
    StoragePath(String),
}

impl SettingsField {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SettingsField::AiProvider(_) => "ai_provider",
            SettingsField::OllamaModel(_) => "ollama_model",
            SettingsField::StorageProvider(_) => "storage_provider",
            SettingsField::StoragePath(_) => "storage_path",
        }
    }
}

/// Working copy of the settings being edited
#[derive(Debug, Clone, Default)]
pub struct ConfigEditState {
    working: Settings,
}

impl ConfigEditState {
    #[must_use]
    pub fn new(snapshot: Settings) -> Self {
        Self { working: snapshot }
    }

    /// Apply one edit; every other field is left untouched
    pub fn set_field(&mut self, field: SettingsField) {
        match field {
            SettingsField::AiProvider(provider) => self.working.ai_provider = provider,
            SettingsField::OllamaModel(model) => self.working.ollama_model = model,
            SettingsField::StorageProvider(provider) => self.working.storage_provider = provider,
            SettingsField::StoragePath(path) => self.working.storage_path = Some(path),
        }
    }

    /// Discard the working copy in favour of a fresh snapshot
    pub fn replace_snapshot(&mut self, snapshot: Settings) {
        self.working = snapshot;
    }

    #[must_use]
    pub fn working_copy(&self) -> &Settings {
        &self.working
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_docs() -> Settings {
        Settings {
            ai_provider: AiProvider::Gemini,
            ollama_model: "llama3".to_string(),
            storage_provider: StorageProvider::LocalStorage,
            storage_path: Some("Docs/X".to_string()),
        }
    }

    #[test]
    fn test_set_field_touches_one_field() {
        let mut edit = ConfigEditState::new(local_docs());
        edit.set_field(SettingsField::StoragePath("Docs/Y".to_string()));

        let expected = Settings {
            storage_path: Some("Docs/Y".to_string()),
            ..local_docs()
        };
        assert_eq!(edit.working_copy(), &expected);
    }

    #[test]
    fn test_model_name_survives_provider_round_trip() {
        let mut edit = ConfigEditState::new(local_docs());
        edit.set_field(SettingsField::AiProvider(AiProvider::Ollama));
        edit.set_field(SettingsField::OllamaModel("codellama".to_string()));
        assert!(edit.working_copy().model_field_visible());

        edit.set_field(SettingsField::AiProvider(AiProvider::Gemini));
        assert!(!edit.working_copy().model_field_visible());
        edit.set_field(SettingsField::AiProvider(AiProvider::Ollama));
        assert_eq!(edit.working_copy().ollama_model, "codellama");
    }

    #[test]
    fn test_replace_snapshot_discards_edits() {
        let mut edit = ConfigEditState::new(local_docs());
        edit.set_field(SettingsField::StoragePath("Docs/Y".to_string()));
        edit.replace_snapshot(Settings::default());
        assert_eq!(edit.working_copy(), &Settings::default());
    }

    #[test]
    fn test_presentation_table() {
        let local = StorageProvider::LocalStorage.presentation();
        assert_eq!(local.prefix, "/Local/");
        assert_eq!(local.placeholder, "e.g., Documents/PARC_Data");
        assert_eq!(StorageProvider::default().presentation().prefix, "/My Drive/");
        assert_eq!(StorageProvider::OneDrive.presentation().prefix, "/OneDrive/");
        assert_eq!(StorageProvider::Dropbox.presentation().prefix, "/Dropbox/");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(local_docs()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "aiProvider": "gemini",
                "ollamaModel": "llama3",
                "storageProvider": "local-storage",
                "storagePath": "Docs/X"
            })
        );

        // Missing optional fields fall back to defaults
        let sparse: Settings = serde_json::from_str(r#"{"aiProvider":"ollama"}"#).unwrap();
        assert_eq!(sparse.ai_provider, AiProvider::Ollama);
        assert_eq!(sparse.ollama_model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(sparse.storage_provider, StorageProvider::GoogleDrive);
        assert_eq!(sparse.storage_path, None);
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("one-drive".parse::<StorageProvider>(), Ok(StorageProvider::OneDrive));
        assert_eq!("ollama".parse::<AiProvider>(), Ok(AiProvider::Ollama));
        assert!("floppy".parse::<StorageProvider>().is_err());
    }
}
