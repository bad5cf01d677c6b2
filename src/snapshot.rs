//! Filter snapshot format.
//!
//! A snapshot is the full `{k, n, words}` state of a filter written to one
//! file. Layout:
//!
//! ```text
//! [magic: u32 LE]
//! [version: u8]
//! [compression: u8]
//! [checksum: u32 LE]   // CRC32 of body
//! [body: bytes]        // compressed bincode(FilterState)
//! ```
//!
//! Snapshots are written to a sibling temp file and renamed into place, so a
//! reader sees either the previous snapshot or the new one.

use crate::config::CompressionType;
use crate::error::{Error, Result};
use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Magic number identifying a snapshot file ("BLMF").
pub const MAGIC_NUMBER: u32 = 0x424c_4d46;

/// Current snapshot format version.
pub const FORMAT_VERSION: u8 = 1;

/// Size of the fixed header preceding the body.
pub const HEADER_SIZE: usize = 10;

/// The persisted unit of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Hash-function count `k`.
    pub num_hashes: u32,
    /// Bit-vector capacity `n`.
    pub num_bits: u64,
    /// Bit-vector words, `ceil(n / 64)` of them.
    pub words: Vec<u64>,
}

/// Encode a state into snapshot bytes.
pub fn encode_state(state: &FilterState, compression: CompressionType) -> Result<Vec<u8>> {
    let raw = bincode::serialize(state)?;
    let body = compress(&raw, compression)?;

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + body.len());
    buf.put_u32_le(MAGIC_NUMBER);
    buf.put_u8(FORMAT_VERSION);
    buf.put_u8(compression as u8);
    buf.put_u32_le(crc32fast::hash(&body));
    buf.put_slice(&body);

    Ok(buf.to_vec())
}

/// Decode snapshot bytes into a state.
pub fn decode_state(data: &[u8]) -> Result<FilterState> {
    decode_snapshot(data).map(|(state, _)| state)
}

/// Decode snapshot bytes into a state and the compression its body used.
pub fn decode_snapshot(mut data: &[u8]) -> Result<(FilterState, CompressionType)> {
    if data.len() < HEADER_SIZE {
        return Err(Error::corruption(format!("Snapshot too short: {} bytes", data.len())));
    }

    let magic = data.get_u32_le();
    if magic != MAGIC_NUMBER {
        return Err(Error::corruption(format!(
            "Invalid snapshot magic number: expected {:#x}, got {:#x}",
            MAGIC_NUMBER, magic
        )));
    }

    let version = data.get_u8();
    if version != FORMAT_VERSION {
        return Err(Error::corruption(format!("Unsupported snapshot version: {}", version)));
    }

    let compression_tag = data.get_u8();
    let compression = CompressionType::from_u8(compression_tag).ok_or_else(|| {
        Error::corruption(format!("Invalid compression type: {}", compression_tag))
    })?;

    let stored_checksum = data.get_u32_le();
    let computed_checksum = crc32fast::hash(data);
    if computed_checksum != stored_checksum {
        return Err(Error::ChecksumMismatch {
            expected: stored_checksum,
            actual: computed_checksum,
        });
    }

    let raw = decompress(data, compression)?;
    let state: FilterState = bincode::deserialize(&raw)?;

    if state.num_hashes == 0 || state.num_bits == 0 {
        return Err(Error::corruption(format!(
            "Invalid filter parameters: n={}, k={}",
            state.num_bits, state.num_hashes
        )));
    }

    let expected_words = crate::bitset::words_for(state.num_bits);
    if state.words.len() != expected_words {
        return Err(Error::corruption(format!(
            "Snapshot word count mismatch: n={} needs {} words, got {}",
            state.num_bits,
            expected_words,
            state.words.len()
        )));
    }

    Ok((state, compression))
}

/// Write `state` to `path`, replacing any existing snapshot.
///
/// Returns the number of bytes written.
pub fn write_snapshot(
    path: &Path,
    state: &FilterState,
    compression: CompressionType,
    sync: bool,
) -> Result<usize> {
    let encoded = encode_state(state, compression)?;
    let tmp_path = temp_path(path);

    let result = (|| -> io::Result<()> {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&encoded)?;
        if sync {
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::Io(e));
    }

    log::info!(
        "Stored snapshot {:?}: {} bytes, n={}, k={}",
        path,
        encoded.len(),
        state.num_bits,
        state.num_hashes
    );
    Ok(encoded.len())
}

/// Read the snapshot at `path`.
///
/// A missing file is reported as [`Error::SnapshotNotFound`]; anything that
/// exists but fails to decode is [`Error::Corruption`] or
/// [`Error::ChecksumMismatch`].
///
/// Returns the state together with the compression the file was written with.
pub fn read_snapshot(path: &Path) -> Result<(FilterState, CompressionType)> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::SnapshotNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    let (state, compression) = decode_snapshot(&data)?;
    log::info!(
        "Reloaded snapshot {:?}: {} bytes, n={}, k={}, compression={:?}",
        path,
        data.len(),
        state.num_bits,
        state.num_hashes,
        compression
    );
    Ok((state, compression))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn compress(data: &[u8], compression: CompressionType) -> Result<Vec<u8>> {
    match compression {
        CompressionType::None => Ok(data.to_vec()),
        #[cfg(feature = "snappy")]
        CompressionType::Snappy => snap::raw::Encoder::new()
            .compress_vec(data)
            .map_err(|e| Error::Io(io::Error::other(format!("Compression failed: {}", e)))),
        #[cfg(feature = "lz4-compression")]
        CompressionType::Lz4 => Ok(lz4::block::compress(data, None, true)?),
    }
}

fn decompress(data: &[u8], compression: CompressionType) -> Result<Vec<u8>> {
    match compression {
        CompressionType::None => Ok(data.to_vec()),
        #[cfg(feature = "snappy")]
        CompressionType::Snappy => snap::raw::Decoder::new()
            .decompress_vec(data)
            .map_err(|e| Error::corruption(format!("Decompression failed: {}", e))),
        #[cfg(feature = "lz4-compression")]
        CompressionType::Lz4 => lz4::block::decompress(data, None)
            .map_err(|e| Error::corruption(format!("Decompression failed: {}", e))),
    }
}
