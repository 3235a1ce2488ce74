//! Debounced settings persistence state machine
//!
//! Elm-style core: a pure transition function over explicit states, with all
//! I/O expressed as [`Effect`] values that the editor runtime executes.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{
    PersisterContext, PersisterState, SavePhase, SaveStatus, DEFAULT_ANNOUNCE_INTERVAL,
    DEFAULT_QUIET_PERIOD,
};
pub use transition::{transition, TransitionError, TransitionResult};
