//! Events that drive the persister

use crate::settings::{Settings, SettingsField};

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// An observation cycle completed without an edit
    Observed,

    // Editor events
    Edit(SettingsField),
    /// A fresh snapshot arrived from outside; local edits are discarded
    SnapshotReplaced(Settings),
    Teardown,

    // Timer events, tagged with the epoch they were scheduled under
    QuietPeriodElapsed { epoch: u64 },
    AnnouncementElapsed { epoch: u64 },
}

impl Event {
    /// Short name for logging
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Observed => "observed",
            Event::Edit(_) => "edit",
            Event::SnapshotReplaced(_) => "snapshot_replaced",
            Event::Teardown => "teardown",
            Event::QuietPeriodElapsed { .. } => "quiet_period_elapsed",
            Event::AnnouncementElapsed { .. } => "announcement_elapsed",
        }
    }
}
