//! Undo/redo timeline over whole-canvas snapshots.
//!
//! Every entry is a full copy of the widget list rather than an inverse operation. At the
//! scale of a dashboard (tens of widgets) the copy is cheap and restoring can never drift
//! out of sync with the model.

use crate::constants::DEFAULT_HISTORY_CAPACITY;
use crate::types::Widget;
use log::trace;

/// A deep copy of the canvas model at one instant.
pub type Snapshot = Vec<Widget>;

/// Bounded linear undo/redo timeline.
///
/// The timeline holds at most `capacity` snapshots and a pointer to the current one.
/// Undoing moves the pointer back, redoing moves it forward, and pushing after an undo
/// discards the redo future.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    /// Snapshots from oldest to newest
    entries: Vec<Snapshot>,
    /// Index of the current snapshot; `None` while the timeline is empty
    pointer: Option<usize>,
    /// Maximum number of snapshots retained
    capacity: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl UndoHistory {
    /// Creates an empty timeline retaining at most `capacity` snapshots (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            pointer: None,
            capacity,
        }
    }

    /// Records a snapshot.
    ///
    /// Any redo future beyond the current pointer is dropped first. A snapshot equal to the
    /// current one is ignored. When the timeline grows past its capacity the oldest entries
    /// are discarded.
    ///
    /// # Arguments
    ///
    /// * `snapshot` - The canvas model to record (copied)
    ///
    /// # Returns
    ///
    /// `true` if a new entry was appended.
    pub fn push(&mut self, snapshot: &[Widget]) -> bool {
        if let Some(pointer) = self.pointer {
            self.entries.truncate(pointer + 1);
        }

        if self.current().is_some_and(|current| current == snapshot) {
            return false;
        }

        self.entries.push(snapshot.to_vec());
        let mut pointer = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
            pointer -= excess;
        }

        self.pointer = Some(pointer);
        trace!(
            "history push: {} widgets, entry {} of {}",
            snapshot.len(),
            pointer + 1,
            self.entries.len()
        );
        true
    }

    /// Steps back one snapshot.
    ///
    /// # Returns
    ///
    /// A copy of the snapshot now current, or `None` if nothing precedes the current one.
    pub fn undo(&mut self) -> Option<Snapshot> {
        let pointer = self.pointer.filter(|p| *p > 0)? - 1;
        self.pointer = Some(pointer);
        self.entries.get(pointer).cloned()
    }

    /// Steps forward one snapshot.
    ///
    /// # Returns
    ///
    /// A copy of the snapshot now current, or `None` if the pointer is already at the end.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let pointer = self.pointer? + 1;
        let snapshot = self.entries.get(pointer).cloned()?;
        self.pointer = Some(pointer);
        Some(snapshot)
    }

    /// Clears the timeline.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.pointer = None;
    }

    /// Returns true if a snapshot precedes the current one.
    pub fn can_undo(&self) -> bool {
        self.pointer.is_some_and(|p| p > 0)
    }

    /// Returns true if a snapshot follows the current one.
    pub fn can_redo(&self) -> bool {
        self.pointer.is_some_and(|p| p + 1 < self.entries.len())
    }

    /// The snapshot at the pointer, if any.
    pub fn current(&self) -> Option<&[Widget]> {
        self.pointer
            .and_then(|p| self.entries.get(p))
            .map(Vec::as_slice)
    }

    /// Index of the current snapshot.
    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    /// Number of snapshots on the timeline.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the timeline holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of snapshots retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
