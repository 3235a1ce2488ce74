//! Persister state types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Phase of the debounced save cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePhase {
    /// Just loaded from a snapshot; the current value must not be saved
    #[default]
    Suspended,

    /// No pending edit, no timer
    Idle,

    /// Edited since the last reset; the quiet-period timer is running
    Dirty,

    /// A save just fired and "Saved" is visible
    Announcing,

    /// Torn down; pending timers were discarded without flushing
    Closed,
}

/// Full persister state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersisterState {
    pub phase: SavePhase,
    /// Bumped whenever a timer is scheduled or the snapshot is replaced.
    /// Timer events from an older epoch are stale.
    pub epoch: u64,
}

impl PersisterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == SavePhase::Closed
    }

    /// The UI-facing signal implied by the phase
    #[must_use]
    pub fn save_status(&self) -> SaveStatus {
        if self.phase == SavePhase::Announcing {
            SaveStatus::Saved
        } else {
            SaveStatus::Idle
        }
    }

    pub(crate) fn with(self, phase: SavePhase) -> Self {
        Self { phase, ..self }
    }

    pub(crate) fn bumped(self, phase: SavePhase) -> Self {
        Self {
            phase,
            epoch: self.epoch + 1,
        }
    }
}

/// Transient "Saved" indicator. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    #[default]
    Idle,
    Saved,
}

/// Quiet period before a save fires
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);
/// How long "Saved" stays visible
pub const DEFAULT_ANNOUNCE_INTERVAL: Duration = Duration::from_secs(2);

/// Timing configuration for one editor (immutable)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersisterContext {
    pub quiet_period: Duration,
    pub announce_interval: Duration,
}

impl Default for PersisterContext {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            announce_interval: DEFAULT_ANNOUNCE_INTERVAL,
        }
    }
}

impl PersisterContext {
    #[must_use]
    pub fn new(quiet_period: Duration, announce_interval: Duration) -> Self {
        Self {
            quiet_period,
            announce_interval,
        }
    }
}
