//! Settings editor runtime executor

use super::timer::ScheduledTask;
use crate::persister::{
    transition, Effect, Event, PersisterContext, PersisterState, SaveStatus, TransitionError,
};
use crate::settings::store::SettingsStore;
use crate::settings::{ConfigEditState, Settings};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Runtime for one settings editor, generic over the settings store
pub struct SettingsEditorRuntime<S>
where
    S: SettingsStore + 'static,
{
    context: PersisterContext,
    state: PersisterState,
    edit_state: ConfigEditState,
    store: Arc<S>,
    /// Edits, snapshots and teardown from handles
    event_rx: mpsc::Receiver<Event>,
    /// Timer events; the runtime keeps a sender so this never closes
    timer_tx: mpsc::UnboundedSender<Event>,
    timer_rx: mpsc::UnboundedReceiver<Event>,
    status_tx: watch::Sender<SaveStatus>,
    settings_tx: watch::Sender<Settings>,
    save_timer: ScheduledTask,
    announce_timer: ScheduledTask,
}

impl<S> SettingsEditorRuntime<S>
where
    S: SettingsStore + 'static,
{
    pub fn new(
        context: PersisterContext,
        snapshot: Settings,
        store: S,
        event_rx: mpsc::Receiver<Event>,
        status_tx: watch::Sender<SaveStatus>,
        settings_tx: watch::Sender<Settings>,
    ) -> Self {
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        Self {
            context,
            state: PersisterState::new(),
            edit_state: ConfigEditState::new(snapshot),
            store: Arc::new(store),
            event_rx,
            timer_tx,
            timer_rx,
            status_tx,
            settings_tx,
            save_timer: ScheduledTask::new(),
            announce_timer: ScheduledTask::new(),
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            quiet_period = ?self.context.quiet_period,
            announce_interval = ?self.context.announce_interval,
            "Starting settings editor"
        );

        // Initial observation cycle for the snapshot we were opened with
        if let Err(e) = self.process_event(Event::Observed) {
            tracing::error!(error = %e, "Failed to observe initial snapshot");
            return;
        }

        loop {
            let event = tokio::select! {
                received = self.event_rx.recv() => match received {
                    Some(event) => event,
                    // Every handle dropped
                    None => Event::Teardown,
                },
                Some(event) = self.timer_rx.recv() => event,
            };

            if let Err(e) = self.process_event(event) {
                tracing::warn!(error = %e, "Rejected settings editor event");
            }

            if self.state.is_terminal() {
                break;
            }
        }

        tracing::info!("Settings editor stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        // Handle chained effects without recursion
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let kind = current_event.kind();
            let payload = current_event.clone();

            // Pure state transition
            let result = transition(&self.state, &self.context, current_event)?;

            if result.new_state != self.state {
                tracing::debug!(
                    event = kind,
                    from = ?self.state.phase,
                    to = ?result.new_state.phase,
                    epoch = result.new_state.epoch,
                    "Persister transition"
                );
            }
            self.state = result.new_state;
            self.apply_to_working_copy(payload);

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect) {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    /// Accepted edits and snapshots land in the working copy
    fn apply_to_working_copy(&mut self, event: Event) {
        match event {
            Event::Edit(field) => {
                tracing::debug!(field = field.name(), "Settings field edited");
                self.edit_state.set_field(field);
            }
            Event::SnapshotReplaced(snapshot) => {
                tracing::info!("Settings snapshot replaced, discarding local edits");
                self.edit_state.replace_snapshot(snapshot);
            }
            _ => return,
        }
        self.settings_tx
            .send_replace(self.edit_state.working_copy().clone());
    }

    /// Execute an effect and optionally return a generated event
    fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::ScheduleSave { delay, epoch } => {
                self.save_timer.replace(
                    delay,
                    self.timer_tx.clone(),
                    Event::QuietPeriodElapsed { epoch },
                );
                None
            }

            Effect::CancelSave => {
                self.save_timer.cancel();
                None
            }

            Effect::Persist => {
                let snapshot = self.edit_state.working_copy().clone();
                let store = Arc::clone(&self.store);
                tracing::info!(
                    ai_provider = ?snapshot.ai_provider,
                    storage_provider = ?snapshot.storage_provider,
                    "Persisting settings"
                );
                // Fire-and-forget: failure never reverts state or retries
                tokio::spawn(async move {
                    if let Err(e) = store.save(&snapshot).await {
                        tracing::warn!(error = %e, "Settings store rejected save");
                    }
                });
                None
            }

            Effect::ShowSaved => {
                self.status_tx.send_replace(SaveStatus::Saved);
                None
            }

            Effect::ClearSaved => {
                self.status_tx.send_replace(SaveStatus::Idle);
                None
            }

            Effect::ScheduleAnnouncementExpiry { delay, epoch } => {
                self.announce_timer.replace(
                    delay,
                    self.timer_tx.clone(),
                    Event::AnnouncementElapsed { epoch },
                );
                None
            }

            Effect::CancelAnnouncementExpiry => {
                self.announce_timer.cancel();
                None
            }

            Effect::AcknowledgeSnapshot => Some(Event::Observed),
        }
    }
}
