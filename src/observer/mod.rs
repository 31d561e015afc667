//! Observers
//!
//! An observer is anything implementing [`Observer`]: it owns a bounded
//! [`EventHistory`] per booked event and exposes a single update hook the
//! [`Publisher`](crate::publisher::Publisher) invokes during dispatch.
//!
//! Observers are registered through an [`ObserverHandle`], a shared handle
//! carrying a stable [`ObserverId`]. The publisher keys its reverse index on
//! that id, so detaching or dropping an observer can never leave a dangling
//! reference behind.
//!
//! # Example
//!
//! ```
//! use observer_registry::{EventHistory, Observer, ObserverHandle};
//!
//! struct Thermometer {
//!     history: EventHistory<&'static str, f64>,
//!     readings: Vec<f64>,
//! }
//!
//! impl Observer<&'static str, f64> for Thermometer {
//!     fn history(&self) -> &EventHistory<&'static str, f64> { &self.history }
//!     fn history_mut(&mut self) -> &mut EventHistory<&'static str, f64> { &mut self.history }
//!
//!     fn update_callback(&mut self, _event: &&'static str, value: &f64) {
//!         self.readings.push(*value);
//!     }
//! }
//!
//! let handle: ObserverHandle<&'static str, f64> = ObserverHandle::new(Thermometer { history: EventHistory::new(), readings: vec![] });
//! assert!(handle.lock().history().is_empty());
//! ```

pub mod builtin;
pub mod history;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

pub use builtin::{FnObserver, HistoryObserver};
pub use history::{EventHistory, RingBuffer, DEFAULT_HISTORY_LENGTH};

/// Bounds every event identifier must satisfy
pub trait EventKey: Eq + Hash + Clone + fmt::Debug {}

impl<T> EventKey for T where T: Eq + Hash + Clone + fmt::Debug {}

/// Extension point for receiving published values.
///
/// Implementors only need to expose their history; booking and removal have
/// default implementations that maintain it. The default
/// [`update_callback`](Observer::update_callback) is inert: it does not store
/// the pushed value. Override it (or use [`HistoryObserver`]) to do real work.
pub trait Observer<E: EventKey, V>: Send {
    /// History buffers for the events this observer is booked on
    fn history(&self) -> &EventHistory<E, V>;

    fn history_mut(&mut self) -> &mut EventHistory<E, V>;

    /// Called by the publisher when a subscription to `event` is created.
    ///
    /// No-op if a history buffer for `event` already exists.
    fn book_event(&mut self, event: &E) {
        self.history_mut().book(event.clone());
    }

    /// Called by the publisher when a subscription to `event` ends
    fn remove_event(&mut self, event: &E) {
        self.history_mut().remove(event);
    }

    /// Invoked synchronously for every value pushed to a subscribed event
    fn update_callback(&mut self, event: &E, value: &V) {
        let _ = (event, value);
    }

    /// Name used in diagnostics
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Identity of a shared observer.
///
/// Derived from the address of the shared allocation, so every handle over
/// the same observer carries the same id. The address stays stable while any
/// handle, including the clones a publisher keeps per subscription, is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

impl ObserverId {
    fn of<T>(shared: &Arc<T>) -> Self {
        Self(Arc::as_ptr(shared) as usize as u64)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// Shared handle to an observer.
///
/// Clones, and handles created with [`from_shared`](Self::from_shared) over
/// the same `Arc`, share both the observer and its [`ObserverId`]; equality
/// and hashing are by id only.
pub struct ObserverHandle<E: EventKey, V> {
    id: ObserverId,
    inner: Arc<Mutex<dyn Observer<E, V>>>,
}

impl<E: EventKey, V> ObserverHandle<E, V> {
    /// Wrap an observer in a new handle
    pub fn new<O>(observer: O) -> Self
    where
        O: Observer<E, V> + 'static,
    {
        Self::from_shared(Arc::new(Mutex::new(observer)))
    }

    /// Create a handle over an observer the caller keeps typed access to
    pub fn from_shared<O>(shared: Arc<Mutex<O>>) -> Self
    where
        O: Observer<E, V> + 'static,
    {
        let id = ObserverId::of(&shared);
        let inner: Arc<Mutex<dyn Observer<E, V>>> = shared;
        Self { id, inner }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// Lock the observer for direct access.
    ///
    /// Must not be called from inside the observer's own callbacks.
    pub fn lock(&self) -> MutexGuard<'_, dyn Observer<E, V>> {
        self.inner.lock()
    }
}

impl<E, V> ObserverHandle<E, V>
where
    E: EventKey + Send + 'static,
    V: Send + 'static,
{
    /// Handle over a closure invoked for every pushed value
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: FnMut(&E, &V) + Send + 'static,
    {
        Self::new(FnObserver::new(callback))
    }
}

impl<E: EventKey, V> Clone for ObserverHandle<E, V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: EventKey, V> PartialEq for ObserverHandle<E, V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E: EventKey, V> Eq for ObserverHandle<E, V> {}

impl<E: EventKey, V> Hash for ObserverHandle<E, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<E: EventKey, V> fmt::Debug for ObserverHandle<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObserverHandle").field(&self.id).finish()
    }
}
