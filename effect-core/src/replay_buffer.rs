// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::collections::VecDeque;

/// Bounded FIFO holding the most recent values emitted by a [`ReplaySubject`](crate::ReplaySubject).
///
/// Pushing past capacity drops the oldest value. A capacity of zero retains nothing.
/// Every [`clear`](Self::clear) is counted, so owners can verify how often the
/// buffer was reset.
#[derive(Debug, Clone)]
pub struct ReplayBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
    resets: u64,
}

impl<T: Clone> ReplayBuffer<T> {
    /// Creates an empty buffer retaining at most `capacity` values.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            resets: 0,
        }
    }

    /// Appends a value, evicting the oldest one when full.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    /// Removes every buffered value and records the reset.
    pub fn clear(&mut self) {
        self.items.clear();
        self.resets += 1;
    }

    /// Copies the buffered values, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    /// Iterates over the buffered values, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of times [`clear`](Self::clear) has been called.
    #[must_use]
    pub const fn resets(&self) -> u64 {
        self.resets
    }
}
