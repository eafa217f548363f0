use std::collections::BTreeSet;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::handle::SessionHandle;
use super::state::{SessionConfig, SessionSnapshot};
use crate::error::{SessionError, ShortenResult};
use crate::models::{OperationState, ShortenedRecord};
use crate::usecase::ShortenUrl;

pub(crate) enum Command {
    SetInput(String),
    Submit,
    Retry,
    Remove(BTreeSet<usize>),
    Shutdown,
}

pub(crate) struct Envelope {
    pub command: Command,
    pub reply: oneshot::Sender<Result<(), SessionError>>,
}

/// Completions of work the actor spawned. Each carries the token it was
/// started with so superseded completions can be recognized and dropped.
enum Event {
    DebounceElapsed { generation: u64 },
    SubmitFinished {
        epoch: u64,
        result: ShortenResult<ShortenedRecord>,
    },
    DisplayWindowElapsed { epoch: u64 },
}

/// Owner of all session state. Runs as a single task; nothing else mutates
/// the snapshot, so no locking is involved.
pub struct Session {
    commands: mpsc::Receiver<Envelope>,
    events: mpsc::UnboundedReceiver<Event>,
    events_tx: mpsc::UnboundedSender<Event>,
    state: watch::Sender<SessionSnapshot>,
    use_case: ShortenUrl,
    config: SessionConfig,
    /// Bumped on every input change; only the matching evaluation applies.
    debounce_generation: u64,
    pending_debounce: Option<JoinHandle<()>>,
    /// Bumped on every accepted submit.
    operation_epoch: u64,
}

impl Session {
    /// Spawn the session actor on the current runtime and return its handle.
    pub fn spawn(use_case: ShortenUrl, config: SessionConfig) -> SessionHandle {
        let (commands_tx, commands) = mpsc::channel(config.command_buffer.max(1));
        let (events_tx, events) = mpsc::unbounded_channel();
        let (state, state_rx) = watch::channel(SessionSnapshot::default());

        let session = Session {
            commands,
            events,
            events_tx,
            state,
            use_case,
            config,
            debounce_generation: 0,
            pending_debounce: None,
            operation_epoch: 0,
        };

        tokio::spawn(async move {
            session.run().await;
        });

        SessionHandle::new(commands_tx, state_rx)
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                envelope = self.commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        debug!("all session handles dropped, stopping");
                        break;
                    };
                    if matches!(command, Command::Shutdown) {
                        let _ = reply.send(Ok(()));
                        break;
                    }
                    let outcome = self.handle_command(command);
                    let _ = reply.send(outcome);
                }
                // events_tx lives in self, so this channel never closes
                Some(event) = self.events.recv() => {
                    self.handle_event(event);
                }
            }
        }

        if let Some(pending) = self.pending_debounce.take() {
            pending.abort();
        }
        info!("session stopped");
    }

    fn handle_command(&mut self, command: Command) -> Result<(), SessionError> {
        match command {
            Command::SetInput(text) => {
                self.set_input(text);
                Ok(())
            }
            Command::Submit => {
                self.submit();
                Ok(())
            }
            Command::Retry => {
                self.state.send_modify(|s| s.operation = OperationState::Idle);
                Ok(())
            }
            Command::Remove(indices) => self.remove(&indices),
            Command::Shutdown => Ok(()),
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::DebounceElapsed { generation } => self.apply_validation(generation),
            Event::SubmitFinished { epoch, result } => self.finish_submit(epoch, result),
            Event::DisplayWindowElapsed { epoch } => self.end_display_window(epoch),
        }
    }

    fn set_input(&mut self, text: String) {
        self.state.send_if_modified(|s| {
            if s.input == text {
                return false;
            }
            s.input = text;
            true
        });
        self.schedule_validation();
    }

    /// Cancel any pending evaluation and start a fresh debounce window.
    fn schedule_validation(&mut self) {
        if let Some(pending) = self.pending_debounce.take() {
            pending.abort();
        }

        self.debounce_generation += 1;
        let generation = self.debounce_generation;
        let delay = self.config.debounce;
        let events = self.events_tx.clone();

        self.pending_debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(Event::DebounceElapsed { generation });
        }));
    }

    fn apply_validation(&mut self, generation: u64) {
        if generation != self.debounce_generation {
            debug!(generation, current = self.debounce_generation, "discarding stale validation");
            return;
        }
        self.pending_debounce = None;

        let validator = *self.use_case.validator();
        self.state.send_modify(|s| {
            s.is_input_valid = !s.input.is_empty() && validator.is_valid(&s.input);
            s.validations += 1;
        });
    }

    fn submit(&mut self) {
        let (input, loading) = {
            let current = self.state.borrow();
            (current.input.clone(), current.operation.is_loading())
        };

        if input.is_empty() {
            debug!("submit ignored: input is empty");
            return;
        }
        if loading {
            warn!("submit ignored: a shorten request is already in flight");
            return;
        }

        self.operation_epoch += 1;
        let epoch = self.operation_epoch;
        self.state.send_modify(|s| s.operation = OperationState::Loading);

        let use_case = self.use_case.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(&input).await;
            let _ = events.send(Event::SubmitFinished { epoch, result });
        });
    }

    fn finish_submit(&mut self, epoch: u64, result: ShortenResult<ShortenedRecord>) {
        if epoch != self.operation_epoch {
            debug!(epoch, current = self.operation_epoch, "discarding superseded submit result");
            return;
        }

        match result {
            Ok(record) => {
                self.state.send_modify(|s| {
                    s.records.insert(0, record);
                    s.input.clear();
                    s.operation = OperationState::Success;
                });
                self.schedule_validation();

                let delay = self.config.success_display;
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(Event::DisplayWindowElapsed { epoch });
                });
            }
            Err(err) => {
                warn!(error = %err, "shorten failed");
                self.state
                    .send_modify(|s| s.operation = OperationState::Error(err.to_string()));
            }
        }
    }

    fn end_display_window(&mut self, epoch: u64) {
        let still_showing = epoch == self.operation_epoch;
        self.state.send_if_modified(|s| {
            if still_showing && s.operation == OperationState::Success {
                s.operation = OperationState::Idle;
                true
            } else {
                false
            }
        });
    }

    fn remove(&mut self, indices: &BTreeSet<usize>) -> Result<(), SessionError> {
        let len = self.state.borrow().records.len();
        if let Some(&index) = indices.last() {
            if index >= len {
                warn!(index, len, "refusing to remove records out of range");
                return Err(SessionError::IndexOutOfRange { index, len });
            }
        } else {
            return Ok(());
        }

        self.state.send_modify(|s| {
            for &index in indices.iter().rev() {
                s.records.remove(index);
            }
        });
        Ok(())
    }
}
