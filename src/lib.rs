//! # BloomStore - A Bloom Filter with Pluggable Storage
//!
//! BloomStore implements a probabilistic set-membership filter behind one
//! contract, [`BloomFilter`], with three interchangeable backends:
//!
//! - **Memory**: a word-packed bit vector in process memory
//! - **File**: a memory filter that snapshots to a compressed file
//! - **Remote**: one slot per bit in a shared remote list (e.g. Redis)
//!
//! ## Architecture
//!
//! - **Hash family** ([`hash`]): SHA-256 digest, then seeded XXH3-64; seed `i`
//!   yields the `i`-th of `k` indices, reduced modulo `n`
//! - **Bit vector** ([`bitset`]): `ceil(n / 64)` 64-bit words
//! - **Snapshot** ([`snapshot`]): checksummed, compressed `{k, n, words}`
//! - **List store** ([`store`]): the remote collaborator's indexed list API
//!
//! ## Example Usage
//!
//! ```rust
//! use bloomstore::{BloomFilter, MemoryBloomFilter};
//!
//! # fn main() -> Result<(), bloomstore::Error> {
//! let mut filter = MemoryBloomFilter::new(64 << 20, 5)?;
//!
//! filter.put(b"key1")?;
//! filter.put_str("key2")?;
//!
//! assert!(filter.has(b"key1")?);
//! assert!(filter.has_str("key2")?);
//!
//! filter.close()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Module declarations
pub mod bitset;
pub mod config;
pub mod error;
pub mod filter;
pub mod hash;
pub mod snapshot;
pub mod store;
pub mod sync;

// Re-exports
pub use config::{CompressionType, Options};
pub use error::{Error, Result};
pub use filter::{BloomFilter, FileBloomFilter, MemoryBloomFilter, RemoteBloomFilter};
pub use store::{ListStore, MemoryListStore};
pub use sync::SharedFilter;

#[cfg(feature = "redis")]
pub use store::RedisListStore;
