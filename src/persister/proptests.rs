//! Property-based tests for the persister state machine
//!
//! A tiny discrete-event simulator drives the pure transition function with
//! a virtual clock, honouring the timer effects the way the runtime does.

use super::*;
use crate::settings::SettingsField;
use proptest::prelude::*;
use std::time::Duration;

const QUIET_MS: u64 = 500;
const ANNOUNCE_MS: u64 = 2000;

fn test_context() -> PersisterContext {
    PersisterContext::new(
        Duration::from_millis(QUIET_MS),
        Duration::from_millis(ANNOUNCE_MS),
    )
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap()
}

/// Virtual-time driver with at most one pending timer per slot
struct Sim {
    state: PersisterState,
    now: u64,
    save_timer: Option<(u64, u64)>,
    announce_timer: Option<(u64, u64)>,
    /// Values handed to the store, in order
    persisted: Vec<String>,
    working: String,
    status_saved: bool,
}

impl Sim {
    fn open() -> Self {
        let mut sim = Self {
            state: PersisterState::new(),
            now: 0,
            save_timer: None,
            announce_timer: None,
            persisted: vec![],
            working: "initial".to_string(),
            status_saved: false,
        };
        sim.apply(Event::Observed);
        sim
    }

    fn apply(&mut self, event: Event) {
        if let Event::Edit(SettingsField::StoragePath(path)) = &event {
            self.working.clone_from(path);
        }
        let result = transition(&self.state, &test_context(), event).unwrap();
        self.state = result.new_state;
        for effect in result.effects {
            match effect {
                Effect::ScheduleSave { delay, epoch } => {
                    self.save_timer = Some((self.now + millis(delay), epoch));
                }
                Effect::CancelSave => self.save_timer = None,
                Effect::Persist => self.persisted.push(self.working.clone()),
                Effect::ShowSaved => self.status_saved = true,
                Effect::ClearSaved => self.status_saved = false,
                Effect::ScheduleAnnouncementExpiry { delay, epoch } => {
                    self.announce_timer = Some((self.now + millis(delay), epoch));
                }
                Effect::CancelAnnouncementExpiry => self.announce_timer = None,
                Effect::AcknowledgeSnapshot => self.apply(Event::Observed),
            }
        }
    }

    /// Advance the clock, firing due timers in deadline order
    fn advance(&mut self, by: u64) {
        let target = self.now + by;
        loop {
            let next_save = self.save_timer.filter(|(at, _)| *at <= target);
            let next_announce = self.announce_timer.filter(|(at, _)| *at <= target);
            match (next_save, next_announce) {
                (Some((s_at, epoch)), Some((a_at, _))) if s_at <= a_at => {
                    self.fire_save(s_at, epoch);
                }
                (Some((s_at, epoch)), None) => self.fire_save(s_at, epoch),
                (_, Some((a_at, epoch))) => {
                    self.now = a_at;
                    self.announce_timer = None;
                    self.apply(Event::AnnouncementElapsed { epoch });
                }
                (None, None) => break,
            }
        }
        self.now = target;
    }

    fn fire_save(&mut self, at: u64, epoch: u64) {
        self.now = at;
        self.save_timer = None;
        self.apply(Event::QuietPeriodElapsed { epoch });
    }

    fn edit(&mut self, path: &str) {
        self.apply(Event::Edit(SettingsField::StoragePath(path.to_string())));
    }
}

fn arb_gaps_within_quiet_period() -> impl Strategy<Value = Vec<u64>> {
    proptest::collection::vec(0..QUIET_MS, 0..10)
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Observed),
        "[a-z]{1,6}".prop_map(|p| Event::Edit(SettingsField::StoragePath(p))),
        (0u64..20).prop_map(|epoch| Event::QuietPeriodElapsed { epoch }),
        (0u64..20).prop_map(|epoch| Event::AnnouncementElapsed { epoch }),
        Just(Event::SnapshotReplaced(crate::settings::Settings::default())),
    ]
}

fn arb_live_phase() -> impl Strategy<Value = SavePhase> {
    prop_oneof![
        Just(SavePhase::Suspended),
        Just(SavePhase::Idle),
        Just(SavePhase::Dirty),
        Just(SavePhase::Announcing),
    ]
}

#[test]
fn test_scenario_local_docs_path_edits() {
    let mut sim = Sim::open();
    sim.edit("Docs/Y");
    sim.advance(100);
    sim.edit("Docs/Z");
    sim.advance(QUIET_MS - 1);
    assert!(sim.persisted.is_empty());
    sim.advance(1);
    assert_eq!(sim.persisted, vec!["Docs/Z".to_string()]);
    assert!(sim.status_saved);

    sim.advance(ANNOUNCE_MS);
    assert!(!sim.status_saved);
    assert_eq!(sim.state.phase, SavePhase::Idle);
}

#[test]
fn test_edit_after_announce_clears_and_recoalesces() {
    let mut sim = Sim::open();
    sim.edit("a");
    sim.advance(QUIET_MS);
    assert!(sim.status_saved);

    sim.advance(300);
    sim.edit("b");
    assert!(!sim.status_saved);
    assert_eq!(sim.state.phase, SavePhase::Dirty);

    sim.advance(QUIET_MS);
    assert_eq!(sim.persisted, vec!["a".to_string(), "b".to_string()]);
}

proptest! {
    /// N edits each within the quiet period of the previous one -> one save
    /// carrying the last value
    #[test]
    fn prop_edits_coalesce_into_one_save(gaps in arb_gaps_within_quiet_period()) {
        let mut sim = Sim::open();
        sim.edit("v0");
        for (i, gap) in gaps.iter().enumerate() {
            sim.advance(*gap);
            sim.edit(&format!("v{}", i + 1));
        }
        sim.advance(QUIET_MS + ANNOUNCE_MS);

        prop_assert_eq!(sim.persisted.len(), 1);
        prop_assert_eq!(&sim.persisted[0], &format!("v{}", gaps.len()));
        prop_assert_eq!(sim.state.phase, SavePhase::Idle);
    }

    /// Opening (or reopening) without editing never saves
    #[test]
    fn prop_no_save_without_edit(reopen_count in 0usize..4, wait in 0u64..10_000) {
        let mut sim = Sim::open();
        for _ in 0..reopen_count {
            sim.apply(Event::SnapshotReplaced(crate::settings::Settings::default()));
            sim.advance(wait);
        }
        sim.advance(wait);
        prop_assert!(sim.persisted.is_empty());
        prop_assert!(!sim.status_saved);
    }

    /// Edits separated by more than the quiet period each save once
    #[test]
    fn prop_spaced_edits_save_each(count in 1usize..6, slack in 0u64..3000) {
        let mut sim = Sim::open();
        for i in 0..count {
            sim.edit(&format!("v{i}"));
            sim.advance(QUIET_MS + slack);
        }
        let expected: Vec<String> = (0..count).map(|i| format!("v{i}")).collect();
        prop_assert_eq!(sim.persisted, expected);
    }

    /// A snapshot replaced mid-debounce discards the pending save
    #[test]
    fn prop_replace_mid_debounce_never_saves(before in 0u64..QUIET_MS) {
        let mut sim = Sim::open();
        sim.edit("discarded");
        sim.advance(before);
        sim.apply(Event::SnapshotReplaced(crate::settings::Settings::default()));
        sim.advance(QUIET_MS * 4);
        prop_assert!(sim.persisted.is_empty());
        prop_assert_eq!(sim.state.phase, SavePhase::Idle);
    }

    /// Any edit on a live editor lands in Dirty with a fresh timer
    #[test]
    fn prop_edit_always_restarts_timer(phase in arb_live_phase(), epoch in 0u64..100) {
        let state = PersisterState { phase, epoch };
        let result = transition(
            &state,
            &test_context(),
            Event::Edit(SettingsField::OllamaModel("m".to_string())),
        ).unwrap();
        prop_assert_eq!(result.new_state.phase, SavePhase::Dirty);
        prop_assert!(result.new_state.epoch > epoch);
        let scheduled = result.effects.iter().filter(|e| matches!(
            e,
            Effect::ScheduleSave { epoch: scheduled, .. } if *scheduled == result.new_state.epoch
        )).count();
        prop_assert_eq!(scheduled, 1);
        prop_assert!(!result.effects.iter().any(Effect::is_persist));
    }

    /// Persist is only ever emitted from Dirty, and the epoch never goes back
    #[test]
    fn prop_persist_only_from_dirty(
        phase in arb_live_phase(),
        epoch in 0u64..20,
        event in arb_event(),
    ) {
        let state = PersisterState { phase, epoch };
        let result = transition(&state, &test_context(), event).unwrap();
        if result.effects.iter().any(Effect::is_persist) {
            prop_assert_eq!(phase, SavePhase::Dirty);
        }
        prop_assert!(result.new_state.epoch >= epoch);
    }

    /// Nothing is accepted after teardown
    #[test]
    fn prop_closed_rejects_everything(epoch in 0u64..20, event in arb_event()) {
        let state = PersisterState { phase: SavePhase::Closed, epoch };
        prop_assert_eq!(
            transition(&state, &test_context(), event).unwrap_err(),
            TransitionError::Closed
        );
    }
}
