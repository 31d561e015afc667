//! Bounded Per-Event Value Histories
//!
//! Every observer carries an [`EventHistory`]: one fixed-capacity [`RingBuffer`]
//! for each event it is booked on. Values are kept in arrival order and the
//! oldest value is evicted once a buffer is full.

use std::collections::VecDeque;

/// Number of values retained per event unless configured otherwise
pub const DEFAULT_HISTORY_LENGTH: usize = 1;

/// Fixed-capacity circular buffer, oldest value evicted first
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<V> {
    values: VecDeque<V>,
    capacity: usize,
}

impl<V> RingBuffer<V> {
    /// Create a buffer holding at most `capacity` values.
    ///
    /// The capacity is clamped to a minimum of 1.
    /// Storage grows on demand up to `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append a value, returning the evicted value if the buffer was full
    pub fn push(&mut self, value: V) -> Option<V> {
        let evicted = if self.is_full() {
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    /// Most recently pushed value
    pub fn latest(&self) -> Option<&V> {
        self.values.back()
    }

    /// Oldest retained value
    pub fn oldest(&self) -> Option<&V> {
        self.values.front()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Per-event history records owned by an observer.
///
/// Entries are kept in booking order. Lookups are linear: an observer is
/// expected to track only a handful of events.
#[derive(Debug, Clone)]
pub struct EventHistory<E, V> {
    entries: Vec<(E, RingBuffer<V>)>,
    events_length: usize,
}

impl<E: PartialEq, V> EventHistory<E, V> {
    /// Create an empty history retaining [`DEFAULT_HISTORY_LENGTH`] values per event
    pub fn new() -> Self {
        Self::with_length(DEFAULT_HISTORY_LENGTH)
    }

    /// Create an empty history retaining `events_length` values per event
    pub fn with_length(events_length: usize) -> Self {
        Self {
            entries: Vec::new(),
            events_length: events_length.max(1),
        }
    }

    /// Capacity given to every newly booked buffer
    pub fn events_length(&self) -> usize {
        self.events_length
    }

    fn position(&self, event: &E) -> Option<usize> {
        self.entries.iter().position(|(booked, _)| booked == event)
    }

    /// Ensure a buffer exists for `event`.
    ///
    /// Returns `false` without touching the existing buffer if already booked.
    pub fn book(&mut self, event: E) -> bool {
        if self.position(&event).is_some() {
            return false;
        }
        self.entries.push((event, RingBuffer::new(self.events_length)));
        true
    }

    /// Discard the buffer for `event`, returning whether one existed
    pub fn remove(&mut self, event: &E) -> bool {
        match self.position(event) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Store `value` for a booked event; unbooked events are ignored
    pub fn record(&mut self, event: &E, value: V) -> bool {
        match self.position(event) {
            Some(index) => {
                self.entries[index].1.push(value);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, event: &E) -> bool {
        self.position(event).is_some()
    }

    pub fn get(&self, event: &E) -> Option<&RingBuffer<V>> {
        self.position(event).map(|index| &self.entries[index].1)
    }

    /// Latest value recorded for `event`
    pub fn latest(&self, event: &E) -> Option<&V> {
        self.get(event).and_then(RingBuffer::latest)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&E, &RingBuffer<V>)> {
        self.entries.iter().map(|(event, values)| (event, values))
    }

    /// Number of booked events
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: PartialEq, V> Default for EventHistory<E, V> {
    fn default() -> Self {
        Self::new()
    }
}
