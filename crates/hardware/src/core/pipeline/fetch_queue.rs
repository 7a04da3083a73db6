//! Instruction fetch queue.
//!
//! A bounded FIFO between fetch and dispatch. Dispatch only ever looks at the
//! head, so a stalled head blocks everything behind it.

use std::collections::VecDeque;

use crate::core::record::InstTag;

/// Bounded FIFO of fetched, not yet dispatched instructions.
#[derive(Debug, Clone)]
pub struct FetchQueue {
    entries: VecDeque<InstTag>,
    capacity: usize,
}

impl FetchQueue {
    /// Creates an empty queue holding at most `capacity` instructions.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of queued instructions.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of queued instructions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if no further instruction can be queued.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Oldest queued instruction.
    pub fn head(&self) -> Option<InstTag> {
        self.entries.front().copied()
    }

    /// Appends `tag` at the tail.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full.
    pub fn push(&mut self, tag: InstTag) {
        assert!(!self.is_full(), "fetch queue overflow pushing {tag}");
        self.entries.push_back(tag);
    }

    /// Removes and returns the head.
    pub fn pop(&mut self) -> Option<InstTag> {
        self.entries.pop_front()
    }

    /// Queued instructions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = InstTag> + '_ {
        self.entries.iter().copied()
    }
}
