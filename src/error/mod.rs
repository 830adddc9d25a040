//! Error types for dedupstat.

use std::path::PathBuf;

use crate::chunk::ChunkDigest;

/// Errors that can occur while scanning and aggregating chunks.
///
/// Everything except [`ScanError::Read`] aborts a scan. A `Read` error is
/// surfaced by the low-level [`ChunkReader`](crate::ChunkReader); a
/// [`ScanSession`](crate::ScanSession) logs it, counts the file as
/// truncated and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A file yielded by the traversal could not be opened.
    #[error("could not open file {}: {source}", .path.display())]
    FileOpen {
        /// The file that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A read failed after the file was opened.
    #[error("could not read from file {}: {source}", .path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The directory traversal failed.
    #[error("could not read the directory {}: {source}", .root.display())]
    Traversal {
        /// The root the traversal started from.
        root: PathBuf,
        /// The underlying walk error.
        #[source]
        source: walkdir::Error,
    },

    /// The scan root exists but is not a directory.
    #[error("{} is not a directory", .root.display())]
    NotADirectory {
        /// The root given to the traversal.
        root: PathBuf,
    },

    /// A digest's reference count reached the configured histogram bound.
    #[error("ref count {ref_count} of chunk {digest} is too large (bound {bound})")]
    HistogramOverflow {
        /// The offending digest.
        digest: ChunkDigest,
        /// Its reference count.
        ref_count: u64,
        /// The configured bound.
        bound: u64,
    },

    /// A reference counter would wrap.
    #[error("ref count of chunk {digest} overflowed")]
    RefCountOverflow {
        /// The digest whose counter overflowed.
        digest: ChunkDigest,
    },

    /// The total chunk counter would wrap.
    #[error("total chunk count overflowed")]
    ChunkCountOverflow,

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// An I/O error on a source without a path.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// Returns true for errors that end the whole scan.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScanError::Read { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn test_file_open_names_path() {
        let err = ScanError::FileOpen {
            path: PathBuf::from("some/dir/file.bin"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("some/dir/file.bin"));
        assert!(msg.contains("denied"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_histogram_overflow_display() {
        let err = ScanError::HistogramOverflow {
            digest: ChunkDigest::new([0xAB; 32]),
            ref_count: 100,
            bound: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("ref count 100"));
        assert!(msg.contains("bound 100"));
        assert!(msg.contains(&"ab".repeat(32)));
    }

    #[test]
    fn test_read_error_is_recoverable() {
        let err = ScanError::Read {
            path: PathBuf::from("a"),
            source: std::io::Error::other("boom"),
        };
        assert!(!err.is_fatal());
        assert!(std::error::Error::source(&err).is_some());
    }
}
