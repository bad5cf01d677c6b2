//! Remote list stores backing [`RemoteBloomFilter`](crate::RemoteBloomFilter).
//!
//! A list store holds named lists of optional byte values addressed by index,
//! the shape of a Redis list. The filter only needs length, delete, append,
//! and single-slot get/set.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

pub use memory::MemoryListStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisListStore;

use crate::error::BoxError;

/// Result type of list store operations.
pub type StoreResult<T> = std::result::Result<T, BoxError>;

/// Indexed list operations offered by a remote key-value store.
///
/// Implementations own nothing of the connection lifecycle beyond what they
/// are handed; retries and timeouts belong to the underlying client.
pub trait ListStore: Send + Sync {
    /// Length of the list at `key`; 0 if it does not exist.
    fn len(&self, key: &str) -> StoreResult<u64>;

    /// Delete the list at `key`. Deleting a missing list is not an error.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Append `count` unset slots to the list at `key`, creating it if needed.
    fn push_unset(&self, key: &str, count: u64) -> StoreResult<()>;

    /// Write `value` into slot `index`. The slot must exist.
    fn set(&self, key: &str, index: u64, value: &[u8]) -> StoreResult<()>;

    /// Read slot `index`; `None` if the slot is unset or out of range.
    fn get(&self, key: &str, index: u64) -> StoreResult<Option<Vec<u8>>>;
}

impl<S: ListStore + ?Sized> ListStore for std::sync::Arc<S> {
    fn len(&self, key: &str) -> StoreResult<u64> {
        (**self).len(key)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }

    fn push_unset(&self, key: &str, count: u64) -> StoreResult<()> {
        (**self).push_unset(key, count)
    }

    fn set(&self, key: &str, index: u64, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, index, value)
    }

    fn get(&self, key: &str, index: u64) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key, index)
    }
}
