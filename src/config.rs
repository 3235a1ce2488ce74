//! Runtime configuration from the environment

use crate::hub::HubContext;
use crate::persister::{PersisterContext, DEFAULT_ANNOUNCE_INTERVAL, DEFAULT_QUIET_PERIOD};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COMMUNITY_NAME: &str = "PARC";
pub const DEFAULT_THEME: &str = "Open questions in collaborative research";

#[derive(Debug, Clone)]
pub struct HubConfig {
    pub settings_path: PathBuf,
    pub quiet_period: Duration,
    pub announce_interval: Duration,
    pub community_name: String,
    pub theme_description: String,
}

impl HubConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let settings_path = lookup("PARC_SETTINGS_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".parc-hub").join("settings.json")
            },
            PathBuf::from,
        );

        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map_or(default, Duration::from_millis)
        };

        Self {
            settings_path,
            quiet_period: millis("PARC_SAVE_DEBOUNCE_MS", DEFAULT_QUIET_PERIOD),
            announce_interval: millis("PARC_SAVED_DISPLAY_MS", DEFAULT_ANNOUNCE_INTERVAL),
            community_name: lookup("PARC_COMMUNITY_NAME")
                .unwrap_or_else(|| DEFAULT_COMMUNITY_NAME.to_string()),
            theme_description: lookup("PARC_THEME").unwrap_or_else(|| DEFAULT_THEME.to_string()),
        }
    }

    #[must_use]
    pub fn persister_context(&self) -> PersisterContext {
        PersisterContext::new(self.quiet_period, self.announce_interval)
    }

    #[must_use]
    pub fn hub_context(&self) -> HubContext {
        HubContext::new(&self.community_name, &self.theme_description)
    }
}
