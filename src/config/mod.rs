//! Configuration for a dedup scan.
//!
//! - [`ScanConfig`] - Chunk size, histogram bound, digest and traversal options
//!
//! # Example
//!
//! ```
//! use dedupstat::{DigestAlgorithm, ScanConfig};
//!
//! // Defaults: 4 KiB chunks, bound of 100 000 references, BLAKE3
//! let config = ScanConfig::default();
//!
//! // Custom values
//! let config = ScanConfig::new(8192, 1_000)?
//!     .with_digest(DigestAlgorithm::Blake3)
//!     .with_follow_links(true);
//! # Ok::<(), dedupstat::ScanError>(())
//! ```

use crate::error::ScanError;
use crate::hash::DigestAlgorithm;

/// Default chunk size (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Default histogram bound.
///
/// A digest seen this many times or more aborts aggregation. Real workloads
/// stay far below it; reaching it usually means a pathological input such as
/// a huge sparse or zero-filled file.
pub const DEFAULT_HISTOGRAM_BOUND: u64 = 100_000;

/// Configuration for one scan.
///
/// Constraints: `chunk_size > 0` and `histogram_bound >= 2` (a bound of 1
/// would reject every chunk, a bound of 0 makes no sense).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    /// Maximum chunk size in bytes.
    chunk_size: usize,

    /// Exclusive upper limit on tabulated reference counts.
    histogram_bound: u64,

    /// Digest used to fingerprint chunks.
    digest: DigestAlgorithm,

    /// Whether the traversal follows symbolic links.
    follow_links: bool,
}

impl ScanConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if the chunk size is zero or the bound is below 2.
    pub fn new(chunk_size: usize, histogram_bound: u64) -> Result<Self, ScanError> {
        if chunk_size == 0 {
            return Err(ScanError::InvalidConfig {
                message: "chunk size must be non-zero",
            });
        }

        if histogram_bound < 2 {
            return Err(ScanError::InvalidConfig {
                message: "histogram bound must be at least 2",
            });
        }

        Ok(Self {
            chunk_size,
            histogram_bound,
            ..Self::default()
        })
    }

    /// Sets the chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the histogram bound.
    pub fn with_histogram_bound(mut self, bound: u64) -> Self {
        self.histogram_bound = bound;
        self
    }

    /// Sets the digest algorithm.
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }

    /// Sets whether symbolic links are followed during traversal.
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the histogram bound.
    pub fn histogram_bound(&self) -> u64 {
        self.histogram_bound
    }

    /// Returns the digest algorithm.
    pub fn digest(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Returns whether symbolic links are followed.
    pub fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ScanError> {
        Self::new(self.chunk_size, self.histogram_bound).map(|_| ())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            histogram_bound: DEFAULT_HISTOGRAM_BOUND,
            digest: DigestAlgorithm::default(),
            follow_links: false,
        }
    }
}
