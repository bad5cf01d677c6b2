//! Bloom filter persisted to a snapshot file.

use crate::config::{CompressionType, Options};
use crate::error::Result;
use crate::filter::{BloomFilter, MemoryBloomFilter};
use crate::snapshot;
use std::path::{Path, PathBuf};

/// A [`MemoryBloomFilter`] paired with a snapshot path.
///
/// All reads and writes go to memory. [`store`](BloomFilter::store) writes a
/// full snapshot to the path, and [`close`](BloomFilter::close) stores before
/// releasing the bit vector.
///
/// # Example
/// ```no_run
/// use bloomstore::{BloomFilter, FileBloomFilter};
///
/// # fn main() -> bloomstore::Result<()> {
/// let mut filter = FileBloomFilter::new("users.bloom", 1 << 20, 5)?;
/// filter.put_str("user:1001")?;
/// filter.close()?;
///
/// let filter = FileBloomFilter::reload("users.bloom")?;
/// assert!(filter.has_str("user:1001")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileBloomFilter {
    inner: MemoryBloomFilter,
    path: PathBuf,
    compression: CompressionType,
    sync_on_store: bool,
}

impl FileBloomFilter {
    /// Create an empty filter that will be stored at `path`.
    ///
    /// The file is not read; use [`reload`](Self::reload) to resume from disk.
    pub fn new(path: impl AsRef<Path>, num_bits: u64, num_hashes: u32) -> Result<Self> {
        let options = Options::default().num_bits(num_bits).num_hashes(num_hashes);
        Self::with_options(path, &options)
    }

    /// Create an empty filter configured by `options`.
    pub fn with_options(path: impl AsRef<Path>, options: &Options) -> Result<Self> {
        let inner = MemoryBloomFilter::with_options(options)?;
        Ok(Self::from_parts(inner, path.as_ref(), options))
    }

    /// Restore a filter from the snapshot at `path`.
    ///
    /// Later stores keep the compression the snapshot was written with.
    ///
    /// # Errors
    ///
    /// - [`Error::SnapshotNotFound`](crate::Error::SnapshotNotFound) if there is no file
    /// - [`Error::Corruption`](crate::Error::Corruption) or
    ///   [`Error::ChecksumMismatch`](crate::Error::ChecksumMismatch) if it cannot be decoded
    /// - [`Error::Io`](crate::Error::Io) on any other read failure
    pub fn reload(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (state, compression) = snapshot::read_snapshot(path)?;
        let inner = MemoryBloomFilter::from_state(state)?;
        Ok(Self::from_parts(inner, path, &Options::default().compression(compression)))
    }

    /// Restore from `path`, taking compression and sync settings from `options`.
    ///
    /// `n` and `k` always come from the snapshot.
    pub fn reload_with_options(path: impl AsRef<Path>, options: &Options) -> Result<Self> {
        let path = path.as_ref();
        let (state, _) = snapshot::read_snapshot(path)?;
        let inner = MemoryBloomFilter::from_state(state)?;
        Ok(Self::from_parts(inner, path, options))
    }

    /// Restore from `path` if a snapshot exists, otherwise start empty.
    ///
    /// A snapshot that exists but is corrupt is still an error.
    pub fn open_or_create(path: impl AsRef<Path>, num_bits: u64, num_hashes: u32) -> Result<Self> {
        let options = Options::default().num_bits(num_bits).num_hashes(num_hashes);
        match Self::reload(path.as_ref()) {
            Err(e) if e.is_not_found() => {
                log::info!("No snapshot at {:?}, starting empty", path.as_ref());
                Self::with_options(path, &options)
            }
            result => result,
        }
    }

    fn from_parts(inner: MemoryBloomFilter, path: &Path, options: &Options) -> Self {
        Self {
            inner,
            path: path.to_path_buf(),
            compression: options.compression,
            sync_on_store: options.sync_on_store,
        }
    }

    /// Snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compression used when storing.
    pub fn compression(&self) -> CompressionType {
        self.compression
    }

    /// The underlying memory filter.
    pub fn inner(&self) -> &MemoryBloomFilter {
        &self.inner
    }
}

impl BloomFilter for FileBloomFilter {
    fn put(&mut self, data: &[u8]) -> Result<()> {
        self.inner.put(data)
    }

    fn has(&self, data: &[u8]) -> Result<bool> {
        self.inner.has(data)
    }

    /// Write a full snapshot, replacing any previous file at the path.
    fn store(&mut self) -> Result<()> {
        let state = self.inner.state()?;
        snapshot::write_snapshot(&self.path, &state, self.compression, self.sync_on_store)?;
        Ok(())
    }

    /// Store, then release the bit vector.
    ///
    /// If the store fails the filter stays open.
    fn close(&mut self) -> Result<()> {
        if self.inner.is_closed() {
            return Ok(());
        }
        self.store()?;
        self.inner.close()
    }

    fn num_bits(&self) -> u64 {
        self.inner.num_bits()
    }

    fn num_hashes(&self) -> u32 {
        self.inner.num_hashes()
    }
}
