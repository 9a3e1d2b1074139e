// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-clocked deferred tasks.
//!
//! The carousel never reads a clock. Delayed work (wrap correction, debounced
//! resizes) is parked in a [`DeferredQueue`] with a due time computed from the
//! timestamp the host passed in, and released when the host calls back with a
//! later timestamp. Tasks are fire-and-forget: scheduling never cancels
//! anything already pending.
//!
//! ```
//! use understory_carousel::DeferredQueue;
//!
//! let mut queue = DeferredQueue::new();
//! queue.schedule(1_000, 250, "wrap");
//! queue.schedule(1_000, 500, "resize");
//!
//! assert_eq!(queue.pop_due(1_200), None);
//! assert_eq!(queue.pop_due(1_250), Some("wrap"));
//! assert_eq!(queue.next_due(), Some(1_500));
//! ```

use smallvec::SmallVec;

/// A task and the timestamp (milliseconds) at which it becomes due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deferred<T> {
    /// Timestamp at or after which the task runs.
    pub due: u64,
    /// The task payload.
    pub task: T,
}

/// Pending tasks ordered by due time, first-scheduled first among equals.
#[derive(Clone, Debug)]
pub struct DeferredQueue<T> {
    pending: SmallVec<[Deferred<T>; 4]>,
}

impl<T> DeferredQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
        }
    }

    /// Parks `task` until `now + delay_ms`.
    pub fn schedule(&mut self, now: u64, delay_ms: u64, task: T) {
        self.pending.push(Deferred {
            due: now.saturating_add(delay_ms),
            task,
        });
    }

    /// Removes and returns the earliest task due at `now`, if any.
    pub fn pop_due(&mut self, now: u64) -> Option<T> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, deferred)| deferred.due <= now)
            .min_by_key(|(_, deferred)| deferred.due)?;
        Some(self.pending.remove(index).task)
    }

    /// Earliest due time among pending tasks.
    ///
    /// Hosts with a real timer can sleep until this instant.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|deferred| deferred.due).min()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
