//! Fixed-capacity, word-packed bit vector.

use crate::error::{Error, Result};

const WORD_BITS: u64 = 64;

#[inline]
fn word_index(index: u64) -> usize {
    (index / WORD_BITS) as usize
}

#[inline]
fn bit_mask(index: u64) -> u64 {
    1 << (index % WORD_BITS)
}

/// Number of 64-bit words needed to hold `num_bits` bits.
pub fn words_for(num_bits: u64) -> usize {
    num_bits.div_ceil(WORD_BITS) as usize
}

/// A bit vector of `len` bits stored as `ceil(len / 64)` words.
///
/// Bit `i` lives in word `i / 64` at offset `i % 64`. The capacity is fixed
/// at construction. Indices `>= len` are a caller bug and panic.
///
/// There is no interior locking: mutation needs `&mut self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitSet {
    words: Vec<u64>,
    len: u64,
}

impl BitSet {
    /// Create an all-zero bit vector of `len` bits.
    ///
    /// Fails instead of aborting when the words cannot be allocated.
    pub fn new(len: u64) -> Result<Self> {
        let num_words = words_for(len);
        let mut words = Vec::new();
        words.try_reserve_exact(num_words).map_err(|e| {
            Error::invalid_argument(format!(
                "cannot allocate bit vector of {} bits: {}",
                len, e
            ))
        })?;
        words.resize(num_words, 0);

        Ok(Self { words, len })
    }

    /// Rebuild a bit vector from its words.
    ///
    /// Fails if the word count does not match `len`, or if any bit at or
    /// beyond `len` is set.
    pub fn from_words(len: u64, words: Vec<u64>) -> Result<Self> {
        let expected = words_for(len);
        if words.len() != expected {
            return Err(Error::corruption(format!(
                "Bit vector word count mismatch: expected {}, got {}",
                expected,
                words.len()
            )));
        }

        let tail_bits = len % WORD_BITS;
        if tail_bits != 0 {
            let tail_mask = !((1u64 << tail_bits) - 1);
            if words.last().is_some_and(|w| w & tail_mask != 0) {
                return Err(Error::corruption("Bit set beyond bit vector capacity"));
            }
        }

        Ok(Self { words, len })
    }

    /// Set bit `index` to 1.
    #[inline]
    pub fn set(&mut self, index: u64) {
        self.check(index);
        self.words[word_index(index)] |= bit_mask(index);
    }

    /// Clear bit `index` to 0.
    #[inline]
    pub fn unset(&mut self, index: u64) {
        self.check(index);
        self.words[word_index(index)] &= !bit_mask(index);
    }

    /// Whether bit `index` is 1.
    #[inline]
    pub fn is_set(&self, index: u64) -> bool {
        self.check(index);
        self.words[word_index(index)] & bit_mask(index) != 0
    }

    /// Capacity in bits.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Always false for a constructed filter; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of backing words.
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Number of bits currently set.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// The backing words.
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Consume the vector, returning its words.
    pub fn into_words(self) -> Vec<u64> {
        self.words
    }

    #[inline]
    fn check(&self, index: u64) {
        assert!(
            index < self.len,
            "bit index {} out of range for bit vector of {} bits",
            index,
            self.len
        );
    }
}
