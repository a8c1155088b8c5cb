#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Position;

/// A position captured when a valid fix was decoded.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueEntry {
    position: Position,
}

impl QueueEntry {
    /// The captured position.
    pub fn position(&self) -> &Position {
        &self.position
    }
}

/// Fixed-capacity history of fix positions, oldest first.
///
/// When the queue is full, [`push`](Self::push) evicts the oldest entry. There
/// is no other way to remove entries.
///
/// # Examples
///
/// ```rust
/// use nmea0183_position_queue::{Position, PositionQueue};
///
/// let mut queue = PositionQueue::<2>::new();
/// assert!(queue.latest().is_none());
///
/// for latitude in [1.0, 2.0, 3.0] {
///     queue.push(Position { latitude, longitude: 0.0 });
/// }
///
/// let latitudes: Vec<_> = queue.iter().map(|e| e.position().latitude).collect();
/// assert_eq!(latitudes, [2.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct PositionQueue<const CAP: usize> {
    entries: heapless::Vec<QueueEntry, CAP>,
}

impl<const CAP: usize> Default for PositionQueue<CAP> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAP: usize> PositionQueue<CAP> {
    /// Creates an empty queue.
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Appends a position, evicting the oldest entry if the queue is full.
    ///
    /// Eviction shifts every remaining entry, costing `O(CAP)`.
    pub fn push(&mut self, position: Position) {
        if CAP == 0 {
            return;
        }
        if self.entries.is_full() {
            let evicted = self.entries.remove(0);
            log::trace!("position queue full, evicted {:?}", evicted.position);
        }
        // Cannot fail, a slot was freed above.
        let _ = self.entries.push(QueueEntry { position });
    }

    /// The most recently pushed entry.
    pub fn latest(&self) -> Option<&QueueEntry> {
        self.entries.last()
    }

    /// The entry at `index`, where 0 is the oldest.
    pub fn get(&self, index: usize) -> Option<&QueueEntry> {
        self.entries.get(index)
    }

    /// Iterates over the entries, oldest first.
    pub fn iter(&self) -> core::slice::Iter<'_, QueueEntry> {
        self.entries.iter()
    }

    /// The entries as a slice, oldest first.
    pub fn as_slice(&self) -> &[QueueEntry] {
        &self.entries
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entry has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the next push evicts an entry.
    pub fn is_full(&self) -> bool {
        self.entries.is_full()
    }

    /// Maximum number of entries.
    pub const fn capacity(&self) -> usize {
        CAP
    }
}

impl<'a, const CAP: usize> IntoIterator for &'a PositionQueue<CAP> {
    type Item = &'a QueueEntry;
    type IntoIter = core::slice::Iter<'a, QueueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
