//! Bounded FIFO buffer for per-entity sample history.
//!
//! The buffer never holds more than its capacity: pushing into a full buffer
//! evicts the oldest value first. Reading is side-effect free, so renderers
//! can walk [`HistoryBuffer::values`] as often as they like.

use std::collections::VecDeque;
use std::collections::vec_deque;

/// Fixed-capacity queue of the most recent values, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> HistoryBuffer<T> {
    /// Create a buffer holding at most `capacity` values. A capacity of zero
    /// is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, value: T) {
        if self.data.len() >= self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Values from oldest to newest. The iterator is `Clone`, so a caller
    /// can restart the scan without touching the buffer.
    pub fn values(&self) -> vec_deque::Iter<'_, T> {
        self.data.iter()
    }

    /// Value at `index`, counting from the oldest.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    pub fn latest(&self) -> Option<&T> {
        self.data.back()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.data.front()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<'a, T> IntoIterator for &'a HistoryBuffer<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
