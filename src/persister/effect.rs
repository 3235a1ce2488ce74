//! Effects produced by state transitions

use std::time::Duration;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Start the quiet-period timer, replacing any pending one
    ScheduleSave { delay: Duration, epoch: u64 },

    /// Drop the pending quiet-period timer, if any
    CancelSave,

    /// Hand the current working copy to the settings store
    Persist,

    /// Raise the transient "Saved" signal
    ShowSaved,

    /// Start the timer that clears the "Saved" signal
    ScheduleAnnouncementExpiry { delay: Duration, epoch: u64 },

    CancelAnnouncementExpiry,

    /// Lower the "Saved" signal
    ClearSaved,

    /// Run the observation cycle for a freshly loaded snapshot
    AcknowledgeSnapshot,
}

impl Effect {
    #[must_use]
    pub fn is_persist(&self) -> bool {
        matches!(self, Effect::Persist)
    }
}
