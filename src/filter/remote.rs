//! Bloom filter stored as a shared remote list.
//!
//! The remote list holds one slot per bit: `"1"` for a set bit, empty for an
//! unset one. There is no local bit vector, so every `put` is `k` remote
//! writes and every `has` up to `k` remote reads.

use crate::config;
use crate::error::{Error, Result};
use crate::filter::BloomFilter;
use crate::hash::IndexHasher;
use crate::store::ListStore;

/// Value written to a slot whose bit is set.
pub const SET_MARKER: &[u8] = b"1";

/// Slots appended per push when (re)creating a list.
const PUSH_CHUNK: u64 = 64 * 1024;

/// Name of the remote list for a filter of `num_bits` bits and `num_hashes` hashes.
///
/// Filters with equal `(n, k)` share a list; different pairs never collide.
pub fn redis_key(num_bits: u64, num_hashes: u32) -> String {
    format!("_bloomfilter:n{}:k{}", num_bits, num_hashes)
}

/// Bloom filter whose bits live in a [`ListStore`].
///
/// Any number of filters, in this or other processes, built with the same
/// `(n, k)` against the same store read and write the same bits. The `k`
/// writes of one `put` are not atomic as a group, so a concurrent `has` may
/// observe a partially inserted item, and a failed `put` may leave some of
/// its bits set.
///
/// # Example
/// ```
/// use bloomstore::{BloomFilter, MemoryListStore, RemoteBloomFilter};
///
/// # fn main() -> bloomstore::Result<()> {
/// let store = MemoryListStore::new();
/// let mut writer = RemoteBloomFilter::new(store.clone(), 4096, 3)?;
/// let reader = RemoteBloomFilter::new(store, 4096, 3)?;
///
/// writer.put_str("user:1001")?;
/// assert!(reader.has_str("user:1001")?);
/// # Ok(())
/// # }
/// ```
pub struct RemoteBloomFilter<S: ListStore> {
    /// `None` once the filter is closed.
    store: Option<S>,
    key: String,
    num_bits: u64,
    num_hashes: u32,
}

impl<S: ListStore> RemoteBloomFilter<S> {
    /// Attach to the list for `(num_bits, num_hashes)` in `store`.
    ///
    /// If the list's length differs from `num_bits` it is deleted and
    /// recreated with `num_bits` unset slots. That reset discards every bit
    /// previously stored under this key.
    pub fn new(store: S, num_bits: u64, num_hashes: u32) -> Result<Self> {
        config::validate_params(num_bits, num_hashes)?;
        let key = redis_key(num_bits, num_hashes);

        let len = store.len(&key).map_err(|e| Error::backend("LLEN", None, e))?;
        if len != num_bits {
            if len != 0 {
                log::warn!(
                    "Resetting remote bloom filter {}: stored length {} != {}",
                    key,
                    len,
                    num_bits
                );
            }
            store.delete(&key).map_err(|e| Error::backend("DEL", None, e))?;

            let mut remaining = num_bits;
            while remaining > 0 {
                let count = remaining.min(PUSH_CHUNK);
                store.push_unset(&key, count).map_err(|e| Error::backend("RPUSH", None, e))?;
                remaining -= count;
            }
        }

        log::debug!("Attached remote bloom filter {}", key);
        Ok(Self { store: Some(store), key, num_bits, num_hashes })
    }

    /// Name of the remote list.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the store handle has been released.
    pub fn is_closed(&self) -> bool {
        self.store.is_none()
    }

    /// Release the filter, returning the store handle if it was still held.
    pub fn into_store(self) -> Option<S> {
        self.store
    }

    fn handle(&self) -> Result<&S> {
        self.store.as_ref().ok_or(Error::Closed)
    }
}

impl<S: ListStore> BloomFilter for RemoteBloomFilter<S> {
    fn put(&mut self, data: &[u8]) -> Result<()> {
        let store = self.handle()?;
        let hasher = IndexHasher::new(data, self.num_bits);

        for index in hasher.indices(self.num_hashes) {
            store
                .set(&self.key, index, SET_MARKER)
                .map_err(|e| Error::backend("LSET", Some(index), e))?;
        }
        Ok(())
    }

    fn has(&self, data: &[u8]) -> Result<bool> {
        let store = self.handle()?;
        let hasher = IndexHasher::new(data, self.num_bits);

        for index in hasher.indices(self.num_hashes) {
            let value = store
                .get(&self.key, index)
                .map_err(|e| Error::backend("LINDEX", Some(index), e))?;
            if value.as_deref() != Some(SET_MARKER) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Releases the store handle; remote writes are already durable.
    fn store(&mut self) -> Result<()> {
        self.close()
    }

    /// Releases the store handle. The connection itself stays open.
    fn close(&mut self) -> Result<()> {
        if self.store.take().is_some() {
            log::debug!("Released remote bloom filter {}", self.key);
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
