//! Bounded recency memory of fitness values.

use std::collections::{HashSet, VecDeque};

/// FIFO memory of recently accepted fitness values.
///
/// Values are compared exactly (bit pattern, with `-0.0` folded onto `0.0`).
/// Pushing into a full list evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct TabuList {
    capacity: usize,
    queue: VecDeque<u64>,
    set: HashSet<u64>,
}

impl TabuList {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity + 1),
            set: HashSet::with_capacity(capacity + 1),
        }
    }

    fn key(value: f64) -> u64 {
        if value == 0.0 {
            0.0f64.to_bits()
        } else {
            value.to_bits()
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.set.contains(&Self::key(value))
    }

    /// Remembers `value`; a value already present is left where it is.
    pub fn push(&mut self, value: f64) {
        let key = Self::key(value);
        if !self.set.insert(key) {
            return;
        }
        self.queue.push_back(key);
        if self.queue.len() > self.capacity {
            if let Some(old) = self.queue.pop_front() {
                self.set.remove(&old);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
