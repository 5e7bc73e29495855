// src/store.rs

use std::sync::Arc;

use crate::{
    error::AppError,
    reducer::{Action, reduce},
    state::AppState,
    storage::Persistence,
};

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&AppState)>;

/// Owns the current snapshot and the slot it is persisted to.
///
/// All mutation goes through [`Store::dispatch`]; readers get shared,
/// immutable snapshots from [`Store::state`].
pub struct Store<P: Persistence> {
    state: Arc<AppState>,
    persistence: P,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<P: Persistence> Store<P> {
    /// Seeds the store from whatever `persistence` currently holds.
    pub fn new(persistence: P) -> Self {
        let state = persistence.load();
        Self {
            state: Arc::new(state),
            persistence,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Applies `action`, writes the result through and notifies listeners.
    ///
    /// On error nothing changes: no new state, no write, no notification.
    pub fn dispatch(&mut self, action: Action) -> Result<(), AppError> {
        let kind = action.kind();
        let next = reduce(&self.state, action).map_err(|e| {
            tracing::warn!("Action {} rejected: {}", kind, e);
            e
        })?;

        self.state = Arc::new(next);
        self.persistence.save(&self.state);
        tracing::debug!("Applied {}", kind);

        let snapshot: &AppState = &self.state;
        for (_, listener) in &self.listeners {
            listener(snapshot);
        }

        Ok(())
    }

    /// Dispatches `actions` in order, stopping at the first failure.
    /// Actions before the failing one stay applied.
    pub fn dispatch_all(&mut self, actions: Vec<Action>) -> Result<(), AppError> {
        for action in actions {
            self.dispatch(action)?;
        }
        Ok(())
    }

    /// Registers `listener` to run after every successful dispatch.
    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }
}
