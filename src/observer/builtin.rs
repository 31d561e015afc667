//! Built-in Observers
//!
//! - [`FnObserver`] forwards every update to a closure.
//! - [`HistoryObserver`] stores every pushed value in its history buffers.

use std::fmt;

use crate::observer::history::EventHistory;
use crate::observer::{EventKey, Observer};
use crate::publisher::config::PublisherConfig;

/// Observer backed by a closure
pub struct FnObserver<E, V, F> {
    history: EventHistory<E, V>,
    callback: F,
}

impl<E, V, F> FnObserver<E, V, F>
where
    E: EventKey,
    F: FnMut(&E, &V),
{
    pub fn new(callback: F) -> Self {
        Self {
            history: EventHistory::new(),
            callback,
        }
    }

    /// Closure observer whose history buffers hold `events_length` values
    pub fn with_history_length(events_length: usize, callback: F) -> Self {
        Self {
            history: EventHistory::with_length(events_length),
            callback,
        }
    }
}

impl<E, V, F> Observer<E, V> for FnObserver<E, V, F>
where
    E: EventKey + Send,
    V: Send,
    F: FnMut(&E, &V) + Send,
{
    fn history(&self) -> &EventHistory<E, V> {
        &self.history
    }

    fn history_mut(&mut self) -> &mut EventHistory<E, V> {
        &mut self.history
    }

    fn update_callback(&mut self, event: &E, value: &V) {
        (self.callback)(event, value);
    }
}

impl<E: fmt::Debug, V: fmt::Debug, F> fmt::Debug for FnObserver<E, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObserver")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

/// Observer that records each pushed value into its bounded history.
///
/// Values pushed for an event the observer is not booked on are ignored.
#[derive(Debug, Clone)]
pub struct HistoryObserver<E, V> {
    history: EventHistory<E, V>,
}

impl<E: EventKey, V> HistoryObserver<E, V> {
    pub fn new(events_length: usize) -> Self {
        Self {
            history: EventHistory::with_length(events_length),
        }
    }

    /// Observer sized by the configured history length
    pub fn from_config(config: &PublisherConfig) -> Self {
        Self::new(config.history_length)
    }

    /// Values retained for `event`, oldest first
    pub fn values(&self, event: &E) -> Vec<&V> {
        self.history
            .get(event)
            .map(|buffer| buffer.iter().collect())
            .unwrap_or_default()
    }
}

impl<E: EventKey, V> Default for HistoryObserver<E, V> {
    fn default() -> Self {
        Self::from_config(&PublisherConfig::default())
    }
}

impl<E, V> Observer<E, V> for HistoryObserver<E, V>
where
    E: EventKey + Send,
    V: Clone + Send,
{
    fn history(&self) -> &EventHistory<E, V> {
        &self.history
    }

    fn history_mut(&mut self) -> &mut EventHistory<E, V> {
        &mut self.history
    }

    fn update_callback(&mut self, event: &E, value: &V) {
        self.history.record(event, value.clone());
    }
}
