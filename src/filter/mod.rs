//! Bloom filter contract and its backends.
//!
//! Three backends implement [`BloomFilter`]:
//!
//! - [`MemoryBloomFilter`]: bit vector held in process memory
//! - [`FileBloomFilter`]: a memory filter plus a snapshot file
//! - [`RemoteBloomFilter`]: one slot per bit in a shared remote list

pub mod file;
pub mod memory;
pub mod remote;

pub use file::FileBloomFilter;
pub use memory::MemoryBloomFilter;
pub use remote::{redis_key, RemoteBloomFilter};

use crate::error::Result;

/// Probabilistic set membership with no false negatives.
///
/// All backends share the same semantics: after `put(d)`, `has(d)` returns
/// `Ok(true)` for as long as the filter is open. `has` may also return
/// `Ok(true)` for data never inserted.
///
/// Once [`close`](BloomFilter::close) succeeds, every other operation returns
/// [`Error::Closed`](crate::Error::Closed).
pub trait BloomFilter {
    /// Insert `data`.
    fn put(&mut self, data: &[u8]) -> Result<()>;

    /// Check whether `data` may have been inserted.
    fn has(&self, data: &[u8]) -> Result<bool>;

    /// Insert the UTF-8 bytes of `data`.
    fn put_str(&mut self, data: &str) -> Result<()> {
        self.put(data.as_bytes())
    }

    /// Check the UTF-8 bytes of `data`.
    fn has_str(&self, data: &str) -> Result<bool> {
        self.has(data.as_bytes())
    }

    /// Persist the filter state, if the backend has a persistence target.
    fn store(&mut self) -> Result<()>;

    /// Release the filter's resources. Closing twice is a no-op.
    fn close(&mut self) -> Result<()>;

    /// Bit-vector capacity `n`.
    fn num_bits(&self) -> u64;

    /// Hash-function count `k`.
    fn num_hashes(&self) -> u32;
}

impl<F: BloomFilter + ?Sized> BloomFilter for Box<F> {
    fn put(&mut self, data: &[u8]) -> Result<()> {
        (**self).put(data)
    }

    fn has(&self, data: &[u8]) -> Result<bool> {
        (**self).has(data)
    }

    fn store(&mut self) -> Result<()> {
        (**self).store()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn num_bits(&self) -> u64 {
        (**self).num_bits()
    }

    fn num_hashes(&self) -> u32 {
        (**self).num_hashes()
    }
}
