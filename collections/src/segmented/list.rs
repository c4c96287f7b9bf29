use super::{Blocks, Config, IntoIter, Iter};
use crate::{Error, NZUsize};
use core::{
    fmt,
    iter::{Flatten, FusedIterator},
    ops::{Index, IndexMut},
    slice,
};

/// An append-only sequence that can grow beyond the size of a single `Vec`.
///
/// Elements are addressed by a [u64] position equal to their order of insertion. Insertion order
/// is preserved across blocks.
#[derive(Clone)]
pub struct LongList<T> {
    blocks: Blocks<Vec<T>>,
}

impl<T> LongList<T> {
    /// The default maximum number of elements per block (`2^27`).
    pub const DEFAULT_BLOCK_CAPACITY: usize = 1 << 27;

    /// Creates an empty list using [Self::DEFAULT_BLOCK_CAPACITY].
    pub fn new() -> Self {
        Self::with_config(Config {
            block_capacity: NZUsize!(Self::DEFAULT_BLOCK_CAPACITY),
        })
    }

    /// Creates an empty list with the provided configuration.
    pub fn with_config(cfg: Config) -> Self {
        Self {
            blocks: Blocks::new(cfg.block_capacity),
        }
    }

    /// Appends `value` to the end of the list.
    pub fn push(&mut self, value: T) {
        self.blocks.tail().push(value);
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: u64) -> Result<&T, Error> {
        match self.position(index) {
            Some((block, offset)) => Ok(&self.blocks[block][offset]),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: u64) -> Result<&mut T, Error> {
        match self.position(index) {
            Some((block, offset)) => Ok(&mut self.blocks[block][offset]),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Replaces the element at `index` with `value`.
    pub fn set(&mut self, index: u64, value: T) -> Result<(), Error> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Returns the number of elements in the list.
    ///
    /// Runs in `O(blocks)`.
    pub fn len(&self) -> u64 {
        self.blocks.len()
    }

    /// Returns true if the list contains no elements.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the number of blocks backing the list.
    pub fn num_blocks(&self) -> usize {
        self.blocks.num_blocks()
    }

    /// Returns the maximum number of elements stored in each block.
    pub fn block_capacity(&self) -> usize {
        self.blocks.capacity()
    }

    /// Returns true if any element of the list equals `value`.
    ///
    /// Scans every block in order.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.blocks.blocks().any(|block| block.contains(value))
    }

    /// Removes every element, leaving a single empty block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> Iter<'_, Vec<T>> {
        self.blocks.iter()
    }

    /// Returns an iterator that allows modifying each element, in insertion order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            inner: self.blocks.blocks_mut().flatten(),
        }
    }

    /// Returns the block and offset holding the element at `index`, if that element exists.
    fn position(&self, index: u64) -> Option<(usize, usize)> {
        let capacity = self.blocks.capacity() as u64;
        let block = usize::try_from(index / capacity).ok()?;
        let offset = (index % capacity) as usize;
        (offset < self.blocks.get(block)?.len()).then_some((block, offset))
    }

    fn out_of_range(&self, index: u64) -> Error {
        Error::OutOfRange {
            index,
            len: self.len(),
        }
    }
}

impl<T> Default for LongList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LongList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<u64> for LongList<T> {
    type Output = T;

    /// Panics if `index` is out of bounds.
    fn index(&self, index: u64) -> &Self::Output {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<u64> for LongList<T> {
    /// Panics if `index` is out of bounds.
    fn index_mut(&mut self, index: u64) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for LongList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for LongList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LongList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LongList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for LongList<T> {
    type Item = T;
    type IntoIter = IntoIter<Vec<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_elements()
    }
}

/// Mutable iterator over the elements of a [LongList], in insertion order.
pub struct IterMut<'a, T> {
    inner: Flatten<slice::IterMut<'a, Vec<T>>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn small(capacity: usize) -> Config {
        Config {
            block_capacity: NZUsize!(capacity),
        }
    }

    #[test]
    fn test_defaults() {
        let list: LongList<u8> = LongList::new();
        assert_eq!(list.block_capacity(), 1 << 27);
        assert_eq!(list.num_blocks(), 1);
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.get(0), Err(Error::OutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_push_and_get() {
        let mut list = LongList::new();
        for i in 0..100u64 {
            list.push(i * 2);
        }
        assert_eq!(list.len(), 100);
        assert_eq!(list.num_blocks(), 1);
        for i in 0..100u64 {
            assert_eq!(*list.get(i).unwrap(), i * 2);
            assert_eq!(list[i], i * 2);
        }
        assert_eq!(
            list.get(100),
            Err(Error::OutOfRange {
                index: 100,
                len: 100
            })
        );
    }

    #[test]
    fn test_rollover() {
        const CAPACITY: usize = 4;
        let mut list = LongList::with_config(small(CAPACITY));

        // Fill exactly one block
        for i in 0..CAPACITY as u64 {
            list.push(i);
        }
        assert_eq!(list.num_blocks(), 1);

        // One more element opens a second block
        list.push(CAPACITY as u64);
        assert_eq!(list.num_blocks(), 2);
        assert_eq!(list.len(), CAPACITY as u64 + 1);
        assert_eq!(list[CAPACITY as u64], CAPACITY as u64);

        // Offsets inside an existing but partially filled block are out of range
        let err = list.get(CAPACITY as u64 + 1).unwrap_err();
        assert_eq!(err, Error::OutOfRange { index: 5, len: 5 });

        // Blocks that do not exist are out of range
        assert!(list.get(100).is_err());
        assert!(list.get(u64::MAX).is_err());
    }

    #[test]
    fn test_set_and_mutate() {
        let mut list = LongList::with_config(small(3));
        list.extend(0..7);

        list.set(0, 100).unwrap();
        list.set(6, 106).unwrap();
        list[4] = 104;
        *list.get_mut(3).unwrap() += 100;
        assert_eq!(list.set(7, 0), Err(Error::OutOfRange { index: 7, len: 7 }));

        for value in list.iter_mut() {
            *value += 1;
        }
        let values: Vec<_> = list.iter().copied().collect();
        assert_eq!(values, vec![101, 2, 3, 104, 105, 6, 107]);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_out_of_range() {
        let list: LongList<u8> = LongList::new();
        let _ = list[0];
    }

    #[test]
    fn test_contains() {
        let mut list = LongList::with_config(small(2));
        list.extend(["a", "b", "c", "d", "e"]);
        assert_eq!(list.num_blocks(), 3);
        for value in ["a", "c", "e"] {
            assert!(list.contains(&value));
        }
        assert!(!list.contains(&"f"));
    }

    #[test]
    fn test_clear() {
        let mut list = LongList::with_config(small(2));
        list.extend(0..9);
        assert_eq!(list.num_blocks(), 5);

        list.clear();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.num_blocks(), 1);
        assert!(!list.contains(&0));

        // Still usable after clearing
        list.push(42);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], 42);
    }

    #[test]
    fn test_iteration_preserves_order() {
        let mut rng = StdRng::seed_from_u64(0);
        let model: Vec<u32> = (0..1_000).map(|_| rng.gen()).collect();
        let list: LongList<u32> = {
            let mut list = LongList::with_config(small(7));
            list.extend(model.iter().copied());
            list
        };
        assert_eq!(list.num_blocks(), model.len().div_ceil(7));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);

        // Iteration is restartable
        assert_eq!((&list).into_iter().count(), model.len());
        for (i, value) in model.iter().enumerate() {
            assert_eq!(list.get(i as u64), Ok(value));
        }

        // Owning iteration yields the same order
        assert_eq!(list.into_iter().collect::<Vec<_>>(), model);
    }

    #[test]
    fn test_from_iter_and_debug() {
        let list: LongList<u8> = (1..=3).collect();
        assert_eq!(list.len(), 3);
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }
}
