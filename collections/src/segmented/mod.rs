//! Collections that shard their elements across fixed-capacity blocks.
//!
//! A single `Vec` or `HashSet` can only address (and efficiently grow to) a bounded number of
//! elements. [LongList] and [LongHashSet] lift that bound by storing elements in an ordered
//! sequence of blocks, each holding at most [Config::block_capacity] elements:
//!
//! ```text
//! +-----------------+-----------------+-----+---------------+
//! | block 0 (full)  | block 1 (full)  | ... | block n (tail) |
//! +-----------------+-----------------+-----+---------------+
//! ```
//!
//! Every block except the last is at capacity. New elements are always appended to the last
//! block, and a new block is only opened once the last block is full. Element position `i` is
//! therefore found at offset `i % capacity` of block `i / capacity`.
//!
//! # Counting
//!
//! `len()` sums the size of every block and is `O(blocks)` rather than `O(1)`. Callers that need
//! the count frequently should cache it.
//!
//! # Concurrency
//!
//! Neither collection synchronizes access internally. Iterators borrow the collection, so it
//! cannot be mutated while an iterator is alive.

mod list;
pub use list::{IterMut, LongList};
mod set;
pub use set::LongHashSet;

use core::{
    iter::{Flatten, FusedIterator},
    num::NonZeroUsize,
    ops::{Index, IndexMut},
    slice,
};
use std::{collections::HashSet, hash::Hash};
use tracing::debug;

/// Configuration for a segmented collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// The maximum number of elements to store in each block.
    ///
    /// Every block except the newest contains exactly this number of elements.
    pub block_capacity: NonZeroUsize,
}

/// A container that can serve as a single block of a segmented collection.
pub(crate) trait Block: Default {
    /// Returns the number of elements stored in the block.
    fn len(&self) -> usize;
}

impl<T> Block for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T: Eq + Hash> Block for HashSet<T> {
    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

/// Ordered blocks shared by [LongList] and [LongHashSet].
///
/// Invariants:
/// - There is always at least one block.
/// - Every block but the last holds exactly `capacity` elements.
#[derive(Clone)]
pub(crate) struct Blocks<B> {
    blocks: Vec<B>,
    capacity: NonZeroUsize,
}

impl<B: Block> Blocks<B> {
    /// Creates storage holding a single empty block.
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            blocks: vec![B::default()],
            capacity,
        }
    }

    /// Returns the maximum number of elements per block.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the number of blocks currently allocated.
    pub(crate) fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Returns the total number of elements across all blocks.
    pub(crate) fn len(&self) -> u64 {
        self.blocks.iter().map(|block| block.len() as u64).sum()
    }

    /// Returns true if no block holds an element.
    ///
    /// Only the first block needs to be inspected: any later block implies the first is full.
    pub(crate) fn is_empty(&self) -> bool {
        self.blocks.first().map_or(true, |block| block.len() == 0)
    }

    /// Returns the block at `index`, if it exists.
    pub(crate) fn get(&self, index: usize) -> Option<&B> {
        self.blocks.get(index)
    }

    /// Returns the block that the next element should be added to, opening a new block if the
    /// current last block is full.
    pub(crate) fn tail(&mut self) -> &mut B {
        let capacity = self.capacity.get();
        if self
            .blocks
            .last()
            .map_or(true, |block| block.len() >= capacity)
        {
            self.blocks.push(B::default());
            debug!(blocks = self.blocks.len(), capacity, "extending blocks");
        }
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Discards every block and starts over with a single empty one.
    pub(crate) fn clear(&mut self) {
        let discarded = self.blocks.len();
        self.blocks.clear();
        self.blocks.push(B::default());
        debug!(discarded, "cleared blocks");
    }

    /// Returns an iterator over every element, in block order.
    pub(crate) fn iter<'a>(&'a self) -> Iter<'a, B>
    where
        &'a B: IntoIterator,
    {
        Iter {
            inner: self.blocks.iter().flatten(),
        }
    }

    /// Returns an iterator over the blocks themselves.
    pub(crate) fn blocks(&self) -> slice::Iter<'_, B> {
        self.blocks.iter()
    }

    /// Returns a mutable iterator over the blocks themselves.
    pub(crate) fn blocks_mut(&mut self) -> slice::IterMut<'_, B> {
        self.blocks.iter_mut()
    }

    /// Consumes the storage, yielding every element in block order.
    pub(crate) fn into_elements(self) -> IntoIter<B>
    where
        B: IntoIterator,
    {
        IntoIter {
            inner: self.blocks.into_iter().flatten(),
        }
    }
}

impl<B> Index<usize> for Blocks<B> {
    type Output = B;

    fn index(&self, index: usize) -> &Self::Output {
        &self.blocks[index]
    }
}

impl<B> IndexMut<usize> for Blocks<B> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.blocks[index]
    }
}

/// Borrowing iterator over the elements of a segmented collection.
///
/// Elements are yielded block by block. Within a block, the block's own iteration order applies
/// (insertion order for [LongList], unspecified for [LongHashSet]).
pub struct Iter<'a, B>
where
    &'a B: IntoIterator,
{
    inner: Flatten<slice::Iter<'a, B>>,
}

impl<'a, B> Iterator for Iter<'a, B>
where
    &'a B: IntoIterator,
{
    type Item = <&'a B as IntoIterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, B> FusedIterator for Iter<'a, B> where &'a B: IntoIterator {}

impl<'a, B> Clone for Iter<'a, B>
where
    &'a B: IntoIterator,
    <&'a B as IntoIterator>::IntoIter: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Owning iterator over the elements of a segmented collection.
pub struct IntoIter<B: IntoIterator> {
    inner: Flatten<std::vec::IntoIter<B>>,
}

impl<B: IntoIterator> Iterator for IntoIter<B> {
    type Item = B::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<B: IntoIterator> FusedIterator for IntoIter<B> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NZUsize;

    #[test]
    fn test_tail_rolls_over() {
        let mut blocks: Blocks<Vec<u8>> = Blocks::new(NZUsize!(2));
        assert_eq!(blocks.num_blocks(), 1);
        assert!(blocks.is_empty());

        blocks.tail().push(1);
        blocks.tail().push(2);
        assert_eq!(blocks.num_blocks(), 1);
        assert_eq!(blocks.len(), 2);

        // The next write opens a new block
        blocks.tail().push(3);
        assert_eq!(blocks.num_blocks(), 2);
        assert_eq!(blocks.len(), 3);
        assert!(!blocks.is_empty());
        assert_eq!(blocks[0], vec![1, 2]);
        assert_eq!(blocks.get(1), Some(&vec![3]));
        assert_eq!(blocks.get(2), None);

        blocks[1][0] = 4;
        assert_eq!(blocks[1], vec![4]);
        assert_eq!(blocks.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);

        blocks.clear();
        assert_eq!(blocks.num_blocks(), 1);
        assert_eq!(blocks.len(), 0);
        assert!(blocks.is_empty());
        assert_eq!(blocks.capacity(), 2);
    }

    #[test]
    fn test_into_elements() {
        let mut blocks: Blocks<Vec<u32>> = Blocks::new(NZUsize!(3));
        for i in 0..10 {
            blocks.tail().push(i);
        }
        assert_eq!(blocks.num_blocks(), 4);
        let elements: Vec<u32> = blocks.into_elements().collect();
        assert_eq!(elements, (0..10).collect::<Vec<_>>());
    }
}
