//! Priority-Ordered Subscriber List
//!
//! Vec-based list of `(priority, item)` pairs kept in ascending priority order.
//! Insertion appends and then bubbles the new entry left past every entry with
//! a strictly greater priority, so entries with equal priority keep their
//! insertion order.

/// Scheduling priority ("nice value"): lower values are serviced first
pub type Priority = i32;

#[derive(Debug, Clone)]
pub struct SubscriberList<T> {
    items: Vec<(Priority, T)>,
}

impl<T> SubscriberList<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Reserve room for `additional` more subscribers
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Insert keeping ascending order; returns the index the item landed at
    pub fn insert(&mut self, priority: Priority, item: T) -> usize {
        self.items.push((priority, item));
        let mut index = self.items.len() - 1;
        while index > 0 && self.items[index - 1].0 > priority {
            self.items.swap(index - 1, index);
            index -= 1;
        }
        index
    }

    /// Remove the first item matching `predicate`, preserving the order of the rest
    pub fn remove_by<F>(&mut self, predicate: F) -> Option<(Priority, T)>
    where
        F: Fn(&T) -> bool,
    {
        self.find_index(predicate).map(|index| self.items.remove(index))
    }

    pub fn find_index<F>(&self, predicate: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        self.items.iter().position(|(_, item)| predicate(item))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Priority, T)> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[(Priority, T)] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for SubscriberList<T> {
    fn default() -> Self {
        Self::new()
    }
}
