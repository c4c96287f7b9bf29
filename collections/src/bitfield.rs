//! Fixed-length bitfield.
//!
//! A [Bitfield] is a compact set of boolean flags packed into [u32] "words". Its length is chosen
//! at construction and never changes. If the length is not a multiple of 32, the last word holds
//! some bits that are not part of the field. An invariant of the implementation is that those
//! trailing bits are always 0, so they can never be observed through counts, equality, or
//! iteration.
//!
//! Range updates ([Bitfield::set_range], [Bitfield::reset_range]) touch at most two partial words
//! and fill every word in between at once, so their cost is proportional to the number of words
//! covered rather than the number of bits.

use crate::Error;
use core::{
    fmt::{self, Formatter, Write as _},
    iter::FusedIterator,
    ops::Index,
};
use tracing::trace;

/// Type alias for the underlying word type.
type Word = u32;

/// Number of bits in a [Word].
const BITS_PER_WORD: usize = Word::BITS as usize;

/// Empty word of bits (all bits set to 0).
const EMPTY_WORD: Word = 0;

/// Full word of bits (all bits set to 1).
const FULL_WORD: Word = Word::MAX;

/// A fixed-length set of bits.
///
/// Cloning a [Bitfield] duplicates its storage.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitfield {
    /// The underlying storage for the bits.
    storage: Vec<Word>,
    /// The total number of bits.
    num_bits: usize,
}

impl Bitfield {
    /// Creates a new `Bitfield` with `len` bits, all initialized to zero.
    #[inline]
    pub fn new(len: usize) -> Self {
        Self {
            storage: vec![EMPTY_WORD; Self::num_words_for(len)],
            num_bits: len,
        }
    }

    /// Creates a new `Bitfield` with `len` bits, all initialized to one.
    #[inline]
    pub fn ones(len: usize) -> Self {
        let mut result = Self {
            storage: vec![FULL_WORD; Self::num_words_for(len)],
            num_bits: len,
        };
        result.clear_trailing_bits();
        result
    }

    /// Creates a new `Bitfield` with `len` bits, all initialized to `value`.
    #[inline]
    pub fn with_default(len: usize, value: bool) -> Self {
        if value {
            Self::ones(len)
        } else {
            Self::new(len)
        }
    }

    /// Creates a new `Bitfield` holding one bit per entry of `bools`, in order.
    pub fn from_bools(bools: &[bool]) -> Self {
        bools.iter().copied().collect()
    }

    /// Returns the number of bits in the field.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_bits
    }

    /// Returns true if the field contains no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Returns the number of words backing the field.
    #[inline]
    pub fn num_words(&self) -> usize {
        self.storage.len()
    }

    /// Gets the value of the bit at `index` (true if 1, false if 0).
    #[inline]
    pub fn get(&self, index: usize) -> Result<bool, Error> {
        self.check_index(index)?;
        Ok(self.get_bit_unchecked(index))
    }

    /// Sets the bit at `index` to 1.
    #[inline]
    pub fn set(&mut self, index: usize) -> Result<(), Error> {
        self.check_index(index)?;
        self.set_bit_unchecked(index);
        Ok(())
    }

    /// Sets the bit at `index` to 0.
    #[inline]
    pub fn reset(&mut self, index: usize) -> Result<(), Error> {
        self.check_index(index)?;
        self.clear_bit_unchecked(index);
        Ok(())
    }

    /// Sets the bit at `index` to the specified `value`.
    #[inline]
    pub fn set_to(&mut self, index: usize, value: bool) -> Result<(), Error> {
        self.check_index(index)?;
        if value {
            self.set_bit_unchecked(index);
        } else {
            self.clear_bit_unchecked(index);
        }
        Ok(())
    }

    /// Flips the bit at `index`.
    #[inline]
    pub fn toggle(&mut self, index: usize) -> Result<(), Error> {
        self.check_index(index)?;
        let (word, mask) = Self::locate(index);
        self.storage[word] ^= mask;
        Ok(())
    }

    /// Sets every bit in the inclusive range `[from, to]` to 1.
    pub fn set_range(&mut self, from: usize, to: usize) -> Result<(), Error> {
        self.update_range(from, to, true)
    }

    /// Sets every bit in the inclusive range `[from, to]` to 0.
    pub fn reset_range(&mut self, from: usize, to: usize) -> Result<(), Error> {
        self.update_range(from, to, false)
    }

    /// Sets all bits to 1.
    #[inline]
    pub fn set_all(&mut self) {
        self.storage.fill(FULL_WORD);
        self.clear_trailing_bits();
    }

    /// Sets all bits to 0.
    #[inline]
    pub fn reset_all(&mut self) {
        self.storage.fill(EMPTY_WORD);
    }

    /// Returns the number of bits set to 1.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.storage
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Returns the number of bits set to 0.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.num_bits - self.count_ones()
    }

    /// Creates an iterator over the bits, in index order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            field: self,
            pos: 0,
        }
    }

    /// Creates an iterator over the indices of all bits set to 1, in ascending order.
    pub fn set_bits(&self) -> Indices<'_> {
        Indices::new(self, true)
    }

    /// Creates an iterator over the indices of all bits set to 0, in ascending order.
    pub fn not_set_bits(&self) -> Indices<'_> {
        Indices::new(self, false)
    }

    /// Copies every bit, in order, into `dst` starting at `offset`.
    ///
    /// Fails if `offset` lies past the end of `dst`, or if `dst[offset..]` cannot hold
    /// [Bitfield::len] values. Entries of `dst` outside of the copied range are left untouched.
    pub fn copy_to(&self, dst: &mut [bool], offset: usize) -> Result<(), Error> {
        let available = dst.len().saturating_sub(offset);
        if offset > dst.len() || available < self.num_bits {
            return Err(Error::DestinationTooShort {
                required: self.num_bits,
                available,
            });
        }
        for (slot, bit) in dst[offset..].iter_mut().zip(self.iter()) {
            *slot = bit;
        }
        Ok(())
    }

    // ---------- Helper Functions ----------

    /// Calculates the word index for a given bit index.
    #[inline(always)]
    fn word_index(index: usize) -> usize {
        index / BITS_PER_WORD
    }

    /// Calculates the bit offset within a word.
    #[inline(always)]
    fn bit_offset(index: usize) -> usize {
        index % BITS_PER_WORD
    }

    /// Calculates the number of words needed to store `num_bits`.
    #[inline(always)]
    fn num_words_for(num_bits: usize) -> usize {
        num_bits.div_ceil(BITS_PER_WORD)
    }

    /// Returns the word holding `index` and the mask selecting it within that word.
    #[inline(always)]
    fn locate(index: usize) -> (usize, Word) {
        (Self::word_index(index), 1 << Self::bit_offset(index))
    }

    /// Creates a mask with the first `num_bits` bits set to 1.
    #[inline(always)]
    fn mask_over_first_n_bits(num_bits: usize) -> Word {
        debug_assert!(num_bits > 0 && num_bits <= BITS_PER_WORD);
        FULL_WORD >> (BITS_PER_WORD - num_bits)
    }

    #[inline(always)]
    fn get_bit_unchecked(&self, index: usize) -> bool {
        let (word, mask) = Self::locate(index);
        self.storage[word] & mask != 0
    }

    #[inline(always)]
    fn set_bit_unchecked(&mut self, index: usize) {
        let (word, mask) = Self::locate(index);
        self.storage[word] |= mask;
    }

    #[inline(always)]
    fn clear_bit_unchecked(&mut self, index: usize) {
        let (word, mask) = Self::locate(index);
        self.storage[word] &= !mask;
    }

    /// Returns an error if `index` does not refer to a bit in the field.
    #[inline(always)]
    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.num_bits {
            return Err(Error::OutOfRange {
                index: index as u64,
                len: self.num_bits as u64,
            });
        }
        Ok(())
    }

    /// Applies `value` to every bit of `[from, to]`, one word at a time.
    fn update_range(&mut self, from: usize, to: usize, value: bool) -> Result<(), Error> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from > to {
            return Err(Error::InvalidRange {
                from: from as u64,
                to: to as u64,
            });
        }

        let first = Self::word_index(from);
        let last = Self::word_index(to);

        // Bits [offset(from), 32) of the first word and [0, offset(to)] of the last word
        let head = FULL_WORD << Self::bit_offset(from);
        let tail = Self::mask_over_first_n_bits(Self::bit_offset(to) + 1);
        if first == last {
            self.apply_mask(first, head & tail, value);
        } else {
            self.apply_mask(first, head, value);
            let fill = if value { FULL_WORD } else { EMPTY_WORD };
            self.storage[first + 1..last].fill(fill);
            self.apply_mask(last, tail, value);
        }
        trace!(from, to, words = last - first + 1, value, "updated range");
        Ok(())
    }

    #[inline(always)]
    fn apply_mask(&mut self, word: usize, mask: Word, value: bool) {
        if value {
            self.storage[word] |= mask;
        } else {
            self.storage[word] &= !mask;
        }
    }

    /// Returns the word at `index` with bits equal to `value` set to 1 (and everything past the
    /// end of the field set to 0).
    #[inline]
    fn matching(&self, index: usize, value: bool) -> Word {
        let word = self.storage[index];
        if value {
            return word;
        }
        let inverted = !word;
        let trailing = Self::bit_offset(self.num_bits);
        if index + 1 == self.storage.len() && trailing != 0 {
            inverted & Self::mask_over_first_n_bits(trailing)
        } else {
            inverted
        }
    }

    /// Clears any bits in storage beyond the last valid bit.
    #[inline]
    fn clear_trailing_bits(&mut self) {
        let trailing = Self::bit_offset(self.num_bits);
        if trailing == 0 {
            return;
        }
        if let Some(word) = self.storage.last_mut() {
            *word &= Self::mask_over_first_n_bits(trailing);
        }
    }
}

// ---------- Constructors ----------

impl FromIterator<bool> for Bitfield {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut storage = Vec::with_capacity(Self::num_words_for(iter.size_hint().0));
        let mut num_bits = 0;
        for bit in iter {
            let offset = Self::bit_offset(num_bits);
            if offset == 0 {
                storage.push(EMPTY_WORD);
            }
            if bit {
                if let Some(word) = storage.last_mut() {
                    *word |= 1 << offset;
                }
            }
            num_bits += 1;
        }
        Self { storage, num_bits }
    }
}

impl From<&[bool]> for Bitfield {
    fn from(bools: &[bool]) -> Self {
        Self::from_bools(bools)
    }
}

impl<const N: usize> From<&[bool; N]> for Bitfield {
    fn from(bools: &[bool; N]) -> Self {
        Self::from_bools(bools)
    }
}

impl From<Vec<bool>> for Bitfield {
    fn from(bools: Vec<bool>) -> Self {
        Self::from_bools(&bools)
    }
}

// ---------- Converters ----------

impl From<Bitfield> for Vec<bool> {
    fn from(field: Bitfield) -> Self {
        field.iter().collect()
    }
}

// ---------- Debug ----------

impl fmt::Debug for Bitfield {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // For very large fields, only show a preview
        const MAX_DISPLAY: usize = 64;
        const HALF_DISPLAY: usize = MAX_DISPLAY / 2;

        let write_bit = |formatter: &mut Formatter<'_>, index: usize| -> fmt::Result {
            formatter.write_char(if self.get_bit_unchecked(index) {
                '1'
            } else {
                '0'
            })
        };

        f.write_str("Bitfield[")?;
        if self.num_bits <= MAX_DISPLAY {
            for i in 0..self.num_bits {
                write_bit(f, i)?;
            }
        } else {
            for i in 0..HALF_DISPLAY {
                write_bit(f, i)?;
            }
            f.write_str("...")?;
            for i in (self.num_bits - HALF_DISPLAY)..self.num_bits {
                write_bit(f, i)?;
            }
        }
        f.write_str("]")
    }
}

// ---------- Operations ----------

impl Index<usize> for Bitfield {
    type Output = bool;

    /// Allows reading bits using the `[]` operator.
    ///
    /// Panics if out of bounds.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.num_bits, "index out of bounds: {index}");
        if self.get_bit_unchecked(index) {
            &true
        } else {
            &false
        }
    }
}

impl<'a> IntoIterator for &'a Bitfield {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------- Iterators ----------

/// Iterator over the bits of a [Bitfield].
#[derive(Clone)]
pub struct Iter<'a> {
    /// Field being iterated over.
    field: &'a Bitfield,

    /// Next position to yield (0-indexed).
    pos: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.field.len() {
            return None;
        }

        let bit = self.field.get_bit_unchecked(self.pos);
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.field.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over the indices of a [Bitfield] whose bit matches a fixed value.
///
/// Words without any matching bit are skipped entirely.
#[derive(Clone)]
pub struct Indices<'a> {
    field: &'a Bitfield,

    /// Whether set (true) or unset (false) bits are yielded.
    value: bool,

    /// Index of the word held in `pending`.
    word: usize,

    /// Matching bits of the current word that have not been yielded yet.
    pending: Word,
}

impl<'a> Indices<'a> {
    fn new(field: &'a Bitfield, value: bool) -> Self {
        let pending = if field.storage.is_empty() {
            EMPTY_WORD
        } else {
            field.matching(0, value)
        };
        Self {
            field,
            value,
            word: 0,
            pending,
        }
    }
}

impl Iterator for Indices<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending == EMPTY_WORD {
            if self.word + 1 >= self.field.storage.len() {
                return None;
            }
            self.word += 1;
            self.pending = self.field.matching(self.word, self.value);
        }

        let offset = self.pending.trailing_zeros() as usize;
        self.pending &= self.pending - 1;
        Some(self.word * BITS_PER_WORD + offset)
    }
}

impl FusedIterator for Indices<'_> {}
