//! Thread-safe filter handle.

use crate::error::Result;
use crate::filter::BloomFilter;
use parking_lot::Mutex;
use std::sync::Arc;

/// A [`BloomFilter`] shared between threads.
///
/// The bare filters require `&mut self` to insert, which makes a single
/// writer a compile-time rule. `SharedFilter` lifts that by serialising every
/// call through one mutex; clones share the same filter.
///
/// # Example
/// ```
/// use bloomstore::{MemoryBloomFilter, SharedFilter};
/// use std::thread;
///
/// # fn main() -> bloomstore::Result<()> {
/// let filter = SharedFilter::new(MemoryBloomFilter::new(1 << 16, 4)?);
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let filter = filter.clone();
///         thread::spawn(move || filter.put_str(&format!("thread{}", t)))
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap()?;
/// }
///
/// assert!(filter.has_str("thread3")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SharedFilter<F> {
    inner: Arc<Mutex<F>>,
}

impl<F> Clone for SharedFilter<F> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<F: BloomFilter> SharedFilter<F> {
    /// Wrap `filter`.
    pub fn new(filter: F) -> Self {
        Self { inner: Arc::new(Mutex::new(filter)) }
    }

    /// See [`BloomFilter::put`].
    pub fn put(&self, data: &[u8]) -> Result<()> {
        self.inner.lock().put(data)
    }

    /// See [`BloomFilter::put_str`].
    pub fn put_str(&self, data: &str) -> Result<()> {
        self.inner.lock().put_str(data)
    }

    /// See [`BloomFilter::has`].
    pub fn has(&self, data: &[u8]) -> Result<bool> {
        self.inner.lock().has(data)
    }

    /// See [`BloomFilter::has_str`].
    pub fn has_str(&self, data: &str) -> Result<bool> {
        self.inner.lock().has_str(data)
    }

    /// See [`BloomFilter::store`].
    pub fn store(&self) -> Result<()> {
        self.inner.lock().store()
    }

    /// See [`BloomFilter::close`]. Closes the filter for every clone.
    pub fn close(&self) -> Result<()> {
        self.inner.lock().close()
    }

    /// Run `f` with exclusive access to the wrapped filter.
    pub fn with<R>(&self, f: impl FnOnce(&mut F) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwrap the filter if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<F, Self> {
        Arc::try_unwrap(self.inner).map(Mutex::into_inner).map_err(|inner| Self { inner })
    }
}
