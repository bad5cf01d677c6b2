//! In-memory Bloom filter.

use crate::bitset::BitSet;
use crate::config::{self, Options};
use crate::error::{Error, Result};
use crate::filter::BloomFilter;
use crate::hash::IndexHasher;
use crate::snapshot::FilterState;

/// Bloom filter over a bit vector held in process memory.
///
/// `put` needs `&mut self`, so a single writer is enforced by the borrow
/// checker. Wrap it in a [`SharedFilter`](crate::SharedFilter) to share it
/// across threads.
///
/// # Example
/// ```
/// use bloomstore::{BloomFilter, MemoryBloomFilter};
///
/// # fn main() -> bloomstore::Result<()> {
/// let mut filter = MemoryBloomFilter::new(1 << 16, 5)?;
/// filter.put_str("user:1001")?;
///
/// assert!(filter.has_str("user:1001")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryBloomFilter {
    /// `None` once the filter is closed.
    bits: Option<BitSet>,
    num_hashes: u32,
    num_bits: u64,
}

impl MemoryBloomFilter {
    /// Create an empty filter of `num_bits` bits using `num_hashes` hash functions.
    pub fn new(num_bits: u64, num_hashes: u32) -> Result<Self> {
        config::validate_params(num_bits, num_hashes)?;
        log::debug!("Creating memory bloom filter: n={}, k={}", num_bits, num_hashes);

        Ok(Self { bits: Some(BitSet::new(num_bits)?), num_hashes, num_bits })
    }

    /// Create an empty filter sized by `options`.
    pub fn with_options(options: &Options) -> Result<Self> {
        options.validate()?;
        Self::new(options.num_bits, options.num_hashes)
    }

    /// Rebuild a filter from a persisted state.
    pub fn from_state(state: FilterState) -> Result<Self> {
        config::validate_params(state.num_bits, state.num_hashes)?;
        let bits = BitSet::from_words(state.num_bits, state.words)?;

        Ok(Self { bits: Some(bits), num_hashes: state.num_hashes, num_bits: state.num_bits })
    }

    /// Copy out the current `{k, n, words}` state.
    pub fn state(&self) -> Result<FilterState> {
        let bits = self.bits()?;
        Ok(FilterState {
            num_hashes: self.num_hashes,
            num_bits: self.num_bits,
            words: bits.words().to_vec(),
        })
    }

    /// Number of bits currently set.
    pub fn bits_set(&self) -> Result<u64> {
        Ok(self.bits()?.count_ones())
    }

    /// Estimated false-positive rate after `items` insertions.
    pub fn estimated_false_positive_rate(&self, items: u64) -> f64 {
        config::estimated_false_positive_rate(self.num_bits, self.num_hashes, items)
    }

    /// Whether [`close`](BloomFilter::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.bits.is_none()
    }

    fn bits(&self) -> Result<&BitSet> {
        self.bits.as_ref().ok_or(Error::Closed)
    }
}

impl BloomFilter for MemoryBloomFilter {
    fn put(&mut self, data: &[u8]) -> Result<()> {
        let bits = self.bits.as_mut().ok_or(Error::Closed)?;
        let hasher = IndexHasher::new(data, self.num_bits);

        for index in hasher.indices(self.num_hashes) {
            bits.set(index);
        }
        Ok(())
    }

    fn has(&self, data: &[u8]) -> Result<bool> {
        let bits = self.bits()?;
        let hasher = IndexHasher::new(data, self.num_bits);

        let all_set = hasher.indices(self.num_hashes).all(|index| bits.is_set(index));
        Ok(all_set)
    }

    /// No persistence target: a no-op on an open filter.
    fn store(&mut self) -> Result<()> {
        self.bits().map(|_| ())
    }

    fn close(&mut self) -> Result<()> {
        if self.bits.take().is_some() {
            log::debug!("Closed memory bloom filter: n={}, k={}", self.num_bits, self.num_hashes);
        }
        Ok(())
    }

    fn num_bits(&self) -> u64 {
        self.num_bits
    }

    fn num_hashes(&self) -> u32 {
        self.num_hashes
    }
}
