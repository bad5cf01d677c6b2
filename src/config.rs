//! Configuration options for BloomStore filters.

/// Default bit-vector capacity: 64 Mi bits (8 MiB of words).
pub const DEFAULT_NUM_BITS: u64 = 64 << 20;

/// Default number of hash functions.
pub const DEFAULT_NUM_HASHES: u32 = 5;

/// Upper bound applied by [`Options::for_capacity`].
const MAX_SIZED_HASHES: u32 = 30;

/// Configuration options for constructing a filter.
#[derive(Debug, Clone)]
pub struct Options {
    /// Bit-vector capacity `n`.
    /// Default: 64 Mi bits
    pub num_bits: u64,

    /// Hash-function count `k`.
    /// Default: 5
    pub num_hashes: u32,

    /// Compression applied to file snapshots.
    /// Default: CompressionType::Snappy
    pub compression: CompressionType,

    /// `fsync` the snapshot before renaming it into place.
    /// Default: true
    pub sync_on_store: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            num_bits: DEFAULT_NUM_BITS,
            num_hashes: DEFAULT_NUM_HASHES,
            compression: CompressionType::default(),
            sync_on_store: true,
        }
    }
}

/// Compression algorithms supported for file snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionType {
    /// No compression.
    None = 0,

    /// Snappy compression (fast, moderate compression ratio).
    #[cfg(feature = "snappy")]
    Snappy = 1,

    /// LZ4 compression (very fast, lower compression ratio).
    #[cfg(feature = "lz4-compression")]
    Lz4 = 2,
}

impl CompressionType {
    /// Convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(CompressionType::None),
            #[cfg(feature = "snappy")]
            1 => Some(CompressionType::Snappy),
            #[cfg(feature = "lz4-compression")]
            2 => Some(CompressionType::Lz4),
            _ => None,
        }
    }
}

impl Default for CompressionType {
    fn default() -> Self {
        #[cfg(feature = "snappy")]
        return CompressionType::Snappy;

        #[cfg(not(feature = "snappy"))]
        CompressionType::None
    }
}

impl Options {
    /// Creates a new Options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes a filter for `expected_items` at the target false-positive rate.
    ///
    /// Uses `m = -n * ln(p) / ln(2)^2` and `k = (m / n) * ln(2)`. The filter
    /// itself never recomputes these; this is only a convenience for callers
    /// choosing `n` and `k`.
    pub fn for_capacity(expected_items: u64, false_positive_rate: f64) -> Self {
        if expected_items == 0 {
            return Self::default().num_bits(64).num_hashes(1);
        }

        let items = expected_items as f64;
        let p = false_positive_rate.clamp(0.0001, 0.9999);
        let ln2 = std::f64::consts::LN_2;

        let num_bits = ((-items * p.ln()) / (ln2 * ln2)).ceil() as u64;
        let num_bits = num_bits.max(64);

        let num_hashes = ((num_bits as f64 / items) * ln2).ceil() as u32;
        let num_hashes = num_hashes.clamp(1, MAX_SIZED_HASHES);

        Self::default().num_bits(num_bits).num_hashes(num_hashes)
    }

    /// Sets the bit-vector capacity.
    pub fn num_bits(mut self, num_bits: u64) -> Self {
        self.num_bits = num_bits;
        self
    }

    /// Sets the number of hash functions.
    pub fn num_hashes(mut self, num_hashes: u32) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Sets the snapshot compression algorithm.
    pub fn compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }

    /// Enables or disables `fsync` on store.
    pub fn sync_on_store(mut self, value: bool) -> Self {
        self.sync_on_store = value;
        self
    }

    /// Validates the options and returns an error if any are invalid.
    pub fn validate(&self) -> crate::Result<()> {
        validate_params(self.num_bits, self.num_hashes)
    }
}

/// Checks the `(n, k)` pair every backend is built from.
pub(crate) fn validate_params(num_bits: u64, num_hashes: u32) -> crate::Result<()> {
    if num_bits == 0 {
        return Err(crate::Error::invalid_argument("num_bits must be > 0"));
    }
    if num_hashes == 0 {
        return Err(crate::Error::invalid_argument("num_hashes must be > 0"));
    }

    // The words must be addressable as one allocation
    let addressable = usize::try_from(num_bits.div_ceil(64))
        .ok()
        .and_then(|words| words.checked_mul(std::mem::size_of::<u64>()))
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !addressable {
        return Err(crate::Error::invalid_argument(format!(
            "num_bits {} exceeds addressable memory",
            num_bits
        )));
    }
    Ok(())
}

/// Approximate false-positive rate after `items` insertions.
///
/// p = (1 - e^(-k * items / m))^k
pub fn estimated_false_positive_rate(num_bits: u64, num_hashes: u32, items: u64) -> f64 {
    if items == 0 || num_bits == 0 {
        return 0.0;
    }

    let k = num_hashes as f64;
    let n = items as f64;
    let m = num_bits as f64;

    (1.0 - (-k * n / m).exp()).powf(k)
}
