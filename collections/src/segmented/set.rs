use super::{Blocks, Config, IntoIter, Iter};
use crate::NZUsize;
use core::fmt;
use std::{collections::HashSet, hash::Hash};

/// An append-only set that can grow beyond the size of a single `HashSet`.
///
/// Each block is a `HashSet` holding at most [Config::block_capacity] values. Membership is
/// checked against every block, so a value is stored at most once across the whole set.
///
/// Iteration visits blocks in the order they were opened. The order of values within a block is
/// unspecified.
#[derive(Clone)]
pub struct LongHashSet<T: Eq + Hash> {
    blocks: Blocks<HashSet<T>>,
}

impl<T: Eq + Hash> LongHashSet<T> {
    /// The default maximum number of values per block (`2^26`).
    pub const DEFAULT_BLOCK_CAPACITY: usize = 1 << 26;

    /// Creates an empty set using [Self::DEFAULT_BLOCK_CAPACITY].
    pub fn new() -> Self {
        Self::with_config(Config {
            block_capacity: NZUsize!(Self::DEFAULT_BLOCK_CAPACITY),
        })
    }

    /// Creates an empty set with the provided configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self {
            blocks: Blocks::new(cfg.block_capacity),
        }
    }

    /// Adds `value` to the set.
    ///
    /// Returns `false` (and leaves the set unchanged) if an equal value is already present in any
    /// block. Otherwise the value is stored in the last block, opening a new block first if the
    /// last one is full.
    pub fn insert(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.blocks.tail().insert(value)
    }

    /// Returns true if the set contains `value`.
    ///
    /// Probes each block in order, stopping at the first hit.
    pub fn contains(&self, value: &T) -> bool {
        self.blocks.blocks().any(|block| block.contains(value))
    }

    /// Returns the number of values in the set.
    ///
    /// Runs in `O(blocks)`.
    pub fn len(&self) -> u64 {
        self.blocks.len()
    }

    /// Returns true if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the number of blocks backing the set.
    pub fn num_blocks(&self) -> usize {
        self.blocks.num_blocks()
    }

    /// Returns the maximum number of values stored in each block.
    pub fn block_capacity(&self) -> usize {
        self.blocks.capacity()
    }

    /// Removes every value, leaving a single empty block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Returns an iterator over the values, block by block.
    pub fn iter(&self) -> Iter<'_, HashSet<T>> {
        self.blocks.iter()
    }
}

impl<T: Eq + Hash> Default for LongHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + fmt::Debug> fmt::Debug for LongHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq + Hash> Extend<T> for LongHashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for LongHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a LongHashSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, HashSet<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq + Hash> IntoIterator for LongHashSet<T> {
    type Item = T;
    type IntoIter = IntoIter<HashSet<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_elements()
    }
}
