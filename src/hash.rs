//! Hash family used to derive bit indices.
//!
//! Every index is computed in two steps: the input is first reduced to a
//! fixed-width SHA-256 digest, and the digest is then hashed with XXH3-64
//! seeded by the hash-function number. Varying the seed over `0..k` yields
//! the `k` indices of one item.

use sha2::{Digest, Sha256};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Width of the digest fed to the seeded hash.
pub const DIGEST_SIZE: usize = 32;

/// Derives one hash value for `data` under `seed`.
///
/// ```
/// use bloomstore::hash::derive;
///
/// assert_eq!(derive(b"apple", 3), derive(b"apple", 3));
/// assert_ne!(derive(b"apple", 0), derive(b"apple", 1));
/// ```
pub fn derive(data: &[u8], seed: u64) -> u64 {
    let digest = Sha256::digest(data);
    xxh3_64_with_seed(&digest, seed)
}

/// Produces the `k` bit indices of a single item.
///
/// The digest is computed once and reused across seeds, so the indices are
/// identical to calling [`derive`] `k` times.
#[derive(Debug, Clone)]
pub struct IndexHasher {
    digest: [u8; DIGEST_SIZE],
    num_bits: u64,
}

impl IndexHasher {
    /// Digest `data` for a filter of `num_bits` bits.
    pub fn new(data: &[u8], num_bits: u64) -> Self {
        debug_assert!(num_bits > 0, "num_bits must be > 0");
        Self { digest: Sha256::digest(data).into(), num_bits }
    }

    /// Index for hash function `seed`: `derive(data, seed) mod n`.
    #[inline]
    pub fn index(&self, seed: u64) -> u64 {
        xxh3_64_with_seed(&self.digest, seed) % self.num_bits
    }

    /// Iterates the indices for hash functions `0..num_hashes`.
    pub fn indices(&self, num_hashes: u32) -> impl Iterator<Item = u64> + '_ {
        (0..num_hashes as u64).map(move |seed| self.index(seed))
    }
}
