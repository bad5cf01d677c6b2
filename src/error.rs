//! Error types for BloomStore.

use std::io;
use std::path::PathBuf;

/// Boxed error raised by a [`ListStore`](crate::store::ListStore) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The result type used throughout BloomStore.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for BloomStore operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred while writing or reading a snapshot.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No snapshot exists at the given path.
    ///
    /// Callers may treat this as "start with an empty filter".
    #[error("Snapshot not found: {}", .0.display())]
    SnapshotNotFound(PathBuf),

    /// A snapshot exists but could not be decoded.
    #[error("Data corruption: {0}")]
    Corruption(String),

    /// The snapshot body failed its checksum.
    #[error("Checksum mismatch: expected {expected:#x}, got {actual:#x}")]
    ChecksumMismatch {
        /// The checksum stored in the snapshot header.
        expected: u32,
        /// The checksum computed over the body.
        actual: u32,
    },

    /// An operation against the remote list store failed.
    #[error("Backend error: {op} failed{}: {source}", index_suffix(.index))]
    Backend {
        /// The remote command that failed (`LSET`, `LINDEX`, ...).
        op: &'static str,
        /// The slot addressed by the command, if any.
        index: Option<u64>,
        /// The error reported by the store.
        #[source]
        source: BoxError,
    },

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The filter was used after `close()`.
    #[error("Filter is closed")]
    Closed,
}

fn index_suffix(index: &Option<u64>) -> String {
    match index {
        Some(index) => format!(" at index {}", index),
        None => String::new(),
    }
}

impl Error {
    /// Creates a new corruption error.
    pub fn corruption(msg: impl Into<String>) -> Self {
        Error::Corruption(msg.into())
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Creates a new backend error for `op`, optionally at slot `index`.
    pub fn backend(op: &'static str, index: Option<u64>, source: BoxError) -> Self {
        Error::Backend { op, index, source }
    }

    /// Returns true if the error means "no snapshot on disk".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SnapshotNotFound(_))
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Corruption(format!("Snapshot decode failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::corruption("test corruption");
        assert_eq!(err.to_string(), "Data corruption: test corruption");

        let err = Error::ChecksumMismatch { expected: 0x12345678, actual: 0x87654321 };
        assert!(err.to_string().contains("0x12345678"));
        assert!(err.to_string().contains("0x87654321"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = Error::backend("LSET", Some(42), "connection reset".into());
        assert_eq!(err.to_string(), "Backend error: LSET failed at index 42: connection reset");

        let err = Error::backend("LLEN", None, "timeout".into());
        assert_eq!(err.to_string(), "Backend error: LLEN failed: timeout");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_predicate() {
        let err = Error::SnapshotNotFound(PathBuf::from("/tmp/missing.bloom"));
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing.bloom"));
    }
}
