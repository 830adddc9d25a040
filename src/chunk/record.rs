//! Reference-counted chunk records.

use std::fmt;

use super::ChunkDigest;

/// One distinct chunk and how many times it has been seen.
///
/// A record starts at a reference count of 1 and is only ever incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRecord {
    digest: ChunkDigest,
    ref_count: u64,
}

impl ChunkRecord {
    /// Creates a record for a chunk seen for the first time.
    pub(crate) fn first_seen(digest: ChunkDigest) -> Self {
        Self {
            digest,
            ref_count: 1,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_ref_count(digest: ChunkDigest, ref_count: u64) -> Self {
        Self { digest, ref_count }
    }

    /// Adds one reference. Returns `None` instead of wrapping.
    pub(crate) fn increment(&mut self) -> Option<u64> {
        self.ref_count = self.ref_count.checked_add(1)?;
        Some(self.ref_count)
    }

    /// Returns the chunk digest.
    pub fn digest(&self) -> &ChunkDigest {
        &self.digest
    }

    /// Returns the number of chunks sharing this digest.
    pub fn ref_count(&self) -> u64 {
        self.ref_count
    }

    /// Returns true if more than one chunk shares this digest.
    pub fn is_duplicate(&self) -> bool {
        self.ref_count > 1
    }
}

impl fmt::Display for ChunkRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.digest, self.ref_count)
    }
}
