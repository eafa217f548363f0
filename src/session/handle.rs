use std::collections::BTreeSet;
use tokio::sync::{mpsc, oneshot, watch};

use super::actor::{Command, Envelope};
use super::state::SessionSnapshot;
use crate::error::SessionError;

/// Cloneable front door to a running [`Session`](super::Session).
///
/// Every mutating call resolves once the actor has applied the command, so a
/// snapshot taken right after reflects it. Asynchronous follow-ups (debounce,
/// network, display window) land later and are visible through
/// [`subscribe`](Self::subscribe) or [`wait_for`](Self::wait_for).
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Envelope>,
    state: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Envelope>,
        state: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self { commands, state }
    }

    pub async fn set_input(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.dispatch(Command::SetInput(text.into())).await
    }

    pub async fn submit(&self) -> Result<(), SessionError> {
        self.dispatch(Command::Submit).await
    }

    /// Dismiss the current state back to `Idle`. Never resubmits.
    pub async fn retry(&self) -> Result<(), SessionError> {
        self.dispatch(Command::Retry).await
    }

    /// Remove the records at `indices` (positions in the current list).
    pub async fn remove<I>(&self, indices: I) -> Result<(), SessionError>
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        self.dispatch(Command::Remove(indices)).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.dispatch(Command::Shutdown).await
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }

    /// Resolve with the first snapshot (current or future) matching `predicate`.
    pub async fn wait_for<F>(&self, mut predicate: F) -> Result<SessionSnapshot, SessionError>
    where
        F: FnMut(&SessionSnapshot) -> bool,
    {
        let mut rx = self.state.clone();
        let snapshot = rx
            .wait_for(|s| predicate(s))
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snapshot.clone())
    }

    async fn dispatch(&self, command: Command) -> Result<(), SessionError> {
        let (reply, done) = oneshot::channel();
        self.commands
            .send(Envelope { command, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        done.await.map_err(|_| SessionError::Closed)?
    }
}
