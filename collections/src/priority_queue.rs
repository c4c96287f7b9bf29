//! A priority queue backed by an array-based binary heap.
//!
//! Entries are stored in a single `Vec` interpreted as a binary tree: the children of the entry at
//! position `i` live at `2i + 1` and `2i + 2`, and its parent at `(i - 1) / 2`. Every parent
//! compares less than or equal to its children, so the smallest entry (by [Ord]) is always at the
//! root and available in `O(1)`. Insertion and removal of the root run in `O(log n)`.
//!
//! To keep the largest entry on top instead, wrap entries in [core::cmp::Reverse].

use core::fmt;

/// A min-ordered priority queue.
#[derive(Clone)]
pub struct PriorityQueue<T: Ord> {
    entries: Vec<T>,
}

impl<T: Ord> PriorityQueue<T> {
    /// Create a new, empty priority queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries in the queue.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the queue holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add an entry to the queue.
    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
        self.sift_up(self.entries.len() - 1);
    }

    /// Returns the smallest entry without removing it, or `None` if the queue is empty.
    pub fn top(&self) -> Option<&T> {
        self.entries.first()
    }

    /// Removes and returns the smallest entry, or `None` if the queue is empty.
    ///
    /// The last entry is moved into the root slot, which is then walked down toward the leaves by
    /// repeatedly promoting the smaller of its children. Once the slot reaches the bottom of the
    /// tree, the entry is sifted back up to its final position.
    pub fn pop(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries.swap_remove(0);

        // Walk the slot down, always taking the path of the smaller child. The right child is
        // preferred unless the left child compares strictly smaller.
        let len = self.entries.len();
        let mut slot = 0;
        let mut right = 2;
        while right < len {
            let child = if self.entries[right] > self.entries[right - 1] {
                right - 1
            } else {
                right
            };
            self.entries.swap(slot, child);
            slot = child;
            right = 2 * child + 2;
        }

        // Only a left child remains at the bottom of the tree
        if right == len {
            self.entries.swap(slot, len - 1);
            slot = len - 1;
        }

        self.sift_up(slot);
        Some(top)
    }

    /// Returns an iterator over the entries in heap order (which is not sorted order).
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Moves the entry at `slot` toward the root while its parent compares greater.
    ///
    /// Entries equal to their parent stay where they are.
    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[parent] <= self.entries[slot] {
                break;
            }
            self.entries.swap(parent, slot);
            slot = parent;
        }
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.entries.len())
            .field("top", &self.top())
            .finish()
    }
}

impl<'a, T: Ord> IntoIterator for &'a PriorityQueue<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
