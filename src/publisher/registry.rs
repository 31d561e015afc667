//! Event Registry and Synchronous Dispatcher
//!
//! [`Publisher`] owns three pieces of state:
//!
//! - the set of registered events, each mapped to its [`SubscriberList`];
//! - the subscriber lists themselves, sorted ascending by priority;
//! - a reverse index from [`ObserverId`] to the events that observer is
//!   subscribed to, used for duplicate checks, `has_subscription` and
//!   `detach_all`.
//!
//! The reverse index contains `event` for an observer iff that observer is
//! present in the event's subscriber list.
//!
//! Every operation is fail-soft: unknown events, duplicate attaches and
//! detaches of absent subscriptions leave state untouched and are reported
//! only through `log` at debug level.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::observer::{EventKey, ObserverHandle, ObserverId};
use crate::publisher::config::PublisherConfig;
use crate::publisher::subscribers::{Priority, SubscriberList};

/// Priority-ordered entries for one event
pub type Subscribers<E, V> = [(Priority, ObserverHandle<E, V>)];

/// Registry of events and their priority-ordered observers
pub struct Publisher<E: EventKey, V> {
    events: HashMap<E, SubscriberList<ObserverHandle<E, V>>>,
    subscriptions: HashMap<ObserverId, HashSet<E>>,
    config: PublisherConfig,
}

impl<E: EventKey, V> Publisher<E, V> {
    pub fn new() -> Self {
        Self::with_config(PublisherConfig::default())
    }

    pub fn with_config(config: PublisherConfig) -> Self {
        Self {
            events: HashMap::new(),
            subscriptions: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    /// Register `event` with an empty subscriber list; no-op if already registered
    pub fn add_event(&mut self, event: E) {
        if self.events.contains_key(&event) {
            trace!("Event {:?} already registered", event);
            return;
        }
        debug!("Registered event {:?}", event);
        self.events.insert(event, SubscriberList::new());
    }

    /// Deregister `event` and drop its subscriber list.
    ///
    /// Former subscribers are purged from the reverse index and have their
    /// `remove_event` hook called, so no stale subscription survives.
    pub fn remove_event(&mut self, event: &E) {
        let Some(subscribers) = self.events.remove(event) else {
            trace!("Cannot remove unregistered event {:?}", event);
            return;
        };

        for (_, observer) in subscribers.iter() {
            self.forget_subscription(observer.id(), event);
            observer.lock().remove_event(event);
        }
        debug!("Removed event {:?} ({} subscribers dropped)", event, subscribers.len());
    }

    pub fn event_exists(&self, event: &E) -> bool {
        self.events.contains_key(event)
    }

    /// Registered events, in no particular order
    pub fn events(&self) -> impl Iterator<Item = &E> {
        self.events.keys()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Subscribe `observer` to each of `events` at `priority`.
    ///
    /// Unregistered events and events the observer is already subscribed to
    /// are skipped; an existing subscription keeps its original priority.
    pub fn attach<I>(&mut self, observer: &ObserverHandle<E, V>, priority: Priority, events: I)
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        for event in events {
            self.attach_one(observer, priority, event.borrow());
        }
    }

    /// Subscribe `observer` to a single event
    pub fn attach_one(&mut self, observer: &ObserverHandle<E, V>, priority: Priority, event: &E) {
        let Some(subscribers) = self.events.get_mut(event) else {
            debug!("Attach of {} skipped: event {:?} not registered", describe(observer), event);
            return;
        };

        let booked = self.subscriptions.entry(observer.id()).or_default();
        if booked.contains(event) {
            debug!("Attach of {} skipped: already subscribed to {:?}", describe(observer), event);
            return;
        }

        if subscribers.is_empty() {
            subscribers.reserve(self.config.initial_capacity);
        }
        let position = subscribers.insert(priority, observer.clone());
        booked.insert(event.clone());
        observer.lock().book_event(event);

        trace!(
            "Attached {} to {:?} at priority {} (position {})",
            observer.id(), event, priority, position
        );
    }

    /// Unsubscribe `observer` from each of `events`
    pub fn detach<I>(&mut self, observer: &ObserverHandle<E, V>, events: I)
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        for event in events {
            self.detach_one(observer, event.borrow());
        }
    }

    /// Unsubscribe `observer` from a single event; no-op if not subscribed
    pub fn detach_one(&mut self, observer: &ObserverHandle<E, V>, event: &E) {
        let id = observer.id();
        if !self.forget_subscription(id, event) {
            debug!("Detach of {} skipped: not subscribed to {:?}", describe(observer), event);
            return;
        }

        if let Some(subscribers) = self.events.get_mut(event) {
            subscribers.remove_by(|subscriber| subscriber.id() == id);
        }
        observer.lock().remove_event(event);
        trace!("Detached {} from {:?}", id, event);
    }

    /// Unsubscribe `observer` from every event it is subscribed to
    pub fn detach_all(&mut self, observer: &ObserverHandle<E, V>) {
        let events: Vec<E> = self.subscriptions(observer).cloned().collect();
        self.detach(observer, events);
    }

    /// Answered from the reverse index
    pub fn has_subscription(&self, observer: &ObserverHandle<E, V>, event: &E) -> bool {
        self.subscriptions
            .get(&observer.id())
            .is_some_and(|events| events.contains(event))
    }

    /// Events `observer` is subscribed to, in no particular order
    pub fn subscriptions<'a>(&'a self, observer: &ObserverHandle<E, V>) -> impl Iterator<Item = &'a E> + 'a {
        self.subscriptions
            .get(&observer.id())
            .into_iter()
            .flat_map(|events| events.iter())
    }

    /// Subscribers of `event` in dispatch order; empty if unknown
    pub fn get_observers(&self, event: &E) -> &Subscribers<E, V> {
        match self.events.get(event) {
            Some(subscribers) => subscribers.as_slice(),
            None => &[],
        }
    }

    pub fn subscriber_count(&self, event: &E) -> usize {
        self.get_observers(event).len()
    }

    /// Push `value` to every subscriber of `event` in priority order.
    ///
    /// Callbacks run inline on the calling thread; returns how many
    /// observers were notified. Unknown events and empty lists are silent.
    pub fn push_update(&self, event: &E, value: &V) -> usize {
        let subscribers = self.get_observers(event);
        if subscribers.is_empty() {
            trace!("No subscribers for {:?}, update dropped", event);
            return 0;
        }

        for (_, observer) in subscribers {
            observer.lock().update_callback(event, value);
        }
        trace!("Pushed update for {:?} to {} subscribers", event, subscribers.len());
        subscribers.len()
    }

    /// Drop `event` from the reverse index entry of `id`, pruning empty entries
    fn forget_subscription(&mut self, id: ObserverId, event: &E) -> bool {
        let Some(booked) = self.subscriptions.get_mut(&id) else {
            return false;
        };
        let removed = booked.remove(event);
        if booked.is_empty() {
            self.subscriptions.remove(&id);
        }
        removed
    }
}

/// `observer#N (TypeName)` for log records
fn describe<E: EventKey, V>(observer: &ObserverHandle<E, V>) -> String {
    format!("{} ({})", observer.id(), observer.lock().name())
}

impl<E: EventKey, V> Default for Publisher<E, V> {
    fn default() -> Self {
        Self::new()
    }
}
