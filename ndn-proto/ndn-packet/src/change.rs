// Copyright 2026 Anapaya Systems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Pull-based change tracking for mutable packet fields.
//!
//! Every mutable composite in this crate exposes a change count through [`ChangeCountable`]. A
//! composite is never notified when one of its nested fields changes. Instead it owns its nested
//! fields through [`ChangeTracker`]s and polls them whenever its own count is queried:
//!
//! * a direct mutation of the composite bumps its own [`ChangeCount`] by one
//! * every tracker whose child moved since the last poll bumps it by one more
//!
//! A cached wire encoding is valid exactly when it was produced at the count the owner reports
//! now.
//!
//! All counts are drawn from one process-wide sequence. A count therefore identifies a single
//! state of a single object lineage: a child swapped in through a `_mut` accessor can never carry
//! the count its predecessor was last observed at, even if both are fresh defaults.
//!
//! ### Threading
//!
//! Counters live in [`Cell`]s so that polling works through shared references. This makes all
//! packet types `Send` but not `Sync`: an object graph is mutated and observed by one thread at a
//! time, callers needing more must add their own exclusion.

use std::{
    cell::Cell,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_COUNT: AtomicU64 = AtomicU64::new(1);

fn next_count() -> u64 {
    NEXT_COUNT.fetch_add(1, Ordering::Relaxed)
}

/// A value exposing a monotonically increasing change count.
pub trait ChangeCountable {
    /// Returns the current change count.
    ///
    /// Calling this twice without mutating the value in between returns the same count.
    fn change_count(&self) -> u64;
}

/// Counter of direct mutations of a composite.
///
/// The counter is seeded and bumped from a process-wide sequence, so it grows by at least one per
/// mutation and no two live objects ever share a count unless one was cloned from the other.
///
/// Change counts describe the mutation history of a value, not its content. They never take part
/// in equality, so composites can derive `PartialEq` over all their fields.
#[derive(Debug, Clone)]
pub struct ChangeCount(Cell<u64>);
impl ChangeCount {
    /// Creates a counter with a count no other object has been observed at.
    pub fn new() -> Self {
        Self(Cell::new(next_count()))
    }

    /// Returns the current count.
    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// Records one mutation.
    #[inline]
    pub fn bump(&self) {
        self.0.set(next_count());
    }

    /// Raises the count to at least `floor`, keeping it monotonic across wholesale replacement.
    pub(crate) fn raise_to(&self, floor: u64) {
        if self.0.get() < floor {
            self.0.set(floor);
        }
    }
}
impl Default for ChangeCount {
    fn default() -> Self {
        Self::new()
    }
}
impl PartialEq for ChangeCount {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
impl Eq for ChangeCount {}

/// Owns exactly one mutable child and detects whether it changed since the last observation.
///
/// The tracker keeps a snapshot of the child's change count. [`ChangeTracker::check_changed`]
/// compares the snapshot with the child's current count, which is O(1) regardless of how deeply
/// the child itself is nested.
#[derive(Debug, Clone)]
pub struct ChangeTracker<T> {
    value: T,
    snapshot: Cell<u64>,
    changes: ChangeCount,
}
impl<T: ChangeCountable> ChangeTracker<T> {
    /// Starts tracking `value`.
    pub fn new(value: T) -> Self {
        let snapshot = Cell::new(value.change_count());
        Self {
            value,
            snapshot,
            changes: ChangeCount::new(),
        }
    }

    /// Replaces the tracked child.
    ///
    /// Takes a fresh snapshot of the new child's count and bumps the tracker's own count. The
    /// owner of the tracker must bump its own count as well, a following
    /// [`ChangeTracker::check_changed`] does not report the replacement.
    pub fn set(&mut self, value: T) {
        self.snapshot.set(value.change_count());
        self.value = value;
        self.changes.bump();
    }

    /// Returns the tracked child.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns the tracked child for in-place editing.
    ///
    /// Edits are picked up lazily by the next [`ChangeTracker::check_changed`].
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Returns true if the child's count moved since the last call.
    ///
    /// On change the snapshot is updated and the tracker's own count is bumped, so two
    /// consecutive calls without an intervening child mutation report the change once.
    pub fn check_changed(&self) -> bool {
        let current = self.value.change_count();
        if current == self.snapshot.get() {
            return false;
        }

        self.snapshot.set(current);
        self.changes.bump();
        true
    }

    /// Consumes the tracker and returns the child.
    pub fn into_inner(self) -> T {
        self.value
    }
}
impl<T: ChangeCountable> ChangeCountable for ChangeTracker<T> {
    fn change_count(&self) -> u64 {
        self.check_changed();
        self.changes.get()
    }
}
impl<T: ChangeCountable + Default> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
impl<T: PartialEq> PartialEq for ChangeTracker<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<T: Eq> Eq for ChangeTracker<T> {}
