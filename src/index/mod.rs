//! Digest to reference-count index.
//!
//! [`DedupIndex`] accumulates every chunk of a scan. Each distinct digest
//! gets one [`ChunkRecord`]; identical chunks from any file or offset land
//! in the same record. The index only grows and is dropped with its scan.
//!
//! # Example
//!
//! ```
//! use dedupstat::{DedupIndex, DigestAlgorithm};
//!
//! let mut index = DedupIndex::new(DigestAlgorithm::Blake3);
//! index.record_chunk(b"same bytes")?;
//! index.record_chunk(b"same bytes")?;
//! index.record_chunk(b"other bytes")?;
//!
//! assert_eq!(index.total_chunks(), 3);
//! assert_eq!(index.len(), 2);
//! # Ok::<(), dedupstat::ScanError>(())
//! ```

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::chunk::{ChunkDigest, ChunkRecord};
use crate::error::ScanError;
use crate::hash::DigestAlgorithm;

/// Mapping from chunk digest to reference count, plus the total chunk count.
#[derive(Debug, Clone, Default)]
pub struct DedupIndex {
    records: HashMap<ChunkDigest, ChunkRecord>,
    total_chunks: u64,
    algorithm: DigestAlgorithm,
}

impl DedupIndex {
    /// Creates an empty index that fingerprints chunks with `algorithm`.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            records: HashMap::new(),
            total_chunks: 0,
            algorithm,
        }
    }

    /// Hashes a chunk and records it.
    ///
    /// Returns the chunk's reference count after this occurrence.
    pub fn record_chunk(&mut self, data: &[u8]) -> Result<u64, ScanError> {
        let digest = self.algorithm.digest(data);
        self.record_digest(digest)
    }

    /// Records one occurrence of an already computed digest.
    ///
    /// Inserts a record with a count of 1 or increments the existing one,
    /// and counts the chunk towards the total. Counters never wrap.
    pub fn record_digest(&mut self, digest: ChunkDigest) -> Result<u64, ScanError> {
        let total = self
            .total_chunks
            .checked_add(1)
            .ok_or(ScanError::ChunkCountOverflow)?;

        let ref_count = match self.records.entry(digest) {
            Entry::Vacant(slot) => slot.insert(ChunkRecord::first_seen(digest)).ref_count(),
            Entry::Occupied(mut slot) => slot
                .get_mut()
                .increment()
                .ok_or(ScanError::RefCountOverflow { digest })?,
        };

        self.total_chunks = total;
        Ok(ref_count)
    }

    /// Returns the number of distinct digests.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no chunk has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of chunks recorded, duplicates included.
    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    /// Returns the digest algorithm.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Looks up the record for a digest.
    pub fn get(&self, digest: &ChunkDigest) -> Option<&ChunkRecord> {
        self.records.get(digest)
    }

    /// Looks up the record for a chunk's bytes.
    pub fn get_chunk(&self, data: &[u8]) -> Option<&ChunkRecord> {
        self.get(&self.algorithm.digest(data))
    }

    /// Iterates over all records in unspecified order.
    pub fn records(&self) -> impl Iterator<Item = &ChunkRecord> {
        self.records.values()
    }
}
