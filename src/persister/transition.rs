//! Pure state transition function
//!
//! Given the same state, context and event this always produces the same
//! result, with no I/O.

use super::{Effect, Event, PersisterContext, PersisterState, SavePhase};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: PersisterState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    #[must_use]
    pub fn new(state: PersisterState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Settings editor has been torn down")]
    Closed,
}

/// Pure transition function
///
/// # Errors
///
/// Every event is rejected once the editor is closed.
pub fn transition(
    state: &PersisterState,
    context: &PersisterContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    let state = *state;

    match (state.phase, event) {
        (SavePhase::Closed, _) => Err(TransitionError::Closed),

        // ============================================================
        // Lifecycle
        // ============================================================

        // Teardown discards pending timers; nothing is flushed
        (_, Event::Teardown) => Ok(TransitionResult::new(state.with(SavePhase::Closed))
            .with_effects([Effect::CancelSave, Effect::CancelAnnouncementExpiry])),

        // Fresh snapshot: back to Suspended so the new value is not saved
        (_, Event::SnapshotReplaced(_)) => Ok(TransitionResult::new(
            state.bumped(SavePhase::Suspended),
        )
        .with_effects([
            Effect::CancelSave,
            Effect::CancelAnnouncementExpiry,
            Effect::ClearSaved,
            Effect::AcknowledgeSnapshot,
        ])),

        // First observation of a loaded value never saves it
        (SavePhase::Suspended, Event::Observed) => {
            Ok(TransitionResult::new(state.with(SavePhase::Idle)))
        }

        (_, Event::Observed) => Ok(TransitionResult::new(state)),

        // ============================================================
        // Edit coalescing
        // ============================================================

        // Announcing + Edit: drop "Saved" right away, then behave like Idle
        (SavePhase::Announcing, Event::Edit(_)) => {
            let next = state.bumped(SavePhase::Dirty);
            Ok(TransitionResult::new(next).with_effects([
                Effect::CancelAnnouncementExpiry,
                Effect::ClearSaved,
                Effect::ScheduleSave {
                    delay: context.quiet_period,
                    epoch: next.epoch,
                },
            ]))
        }

        // Suspended/Idle/Dirty + Edit -> Dirty with a restarted timer
        (SavePhase::Suspended | SavePhase::Idle | SavePhase::Dirty, Event::Edit(_)) => {
            let next = state.bumped(SavePhase::Dirty);
            Ok(TransitionResult::new(next).with_effect(Effect::ScheduleSave {
                delay: context.quiet_period,
                epoch: next.epoch,
            }))
        }

        // ============================================================
        // Timers
        // ============================================================

        // Quiet period elapsed with no newer edit -> save once, announce
        (SavePhase::Dirty, Event::QuietPeriodElapsed { epoch }) if epoch == state.epoch => {
            let next = state.bumped(SavePhase::Announcing);
            Ok(TransitionResult::new(next).with_effects([
                Effect::Persist,
                Effect::ShowSaved,
                Effect::ScheduleAnnouncementExpiry {
                    delay: context.announce_interval,
                    epoch: next.epoch,
                },
            ]))
        }

        (SavePhase::Announcing, Event::AnnouncementElapsed { epoch }) if epoch == state.epoch => {
            Ok(TransitionResult::new(state.with(SavePhase::Idle)).with_effect(Effect::ClearSaved))
        }

        // A timer that was superseded but still delivered its event
        (_, Event::QuietPeriodElapsed { .. } | Event::AnnouncementElapsed { .. }) => {
            Ok(TransitionResult::new(state))
        }
    }
}
