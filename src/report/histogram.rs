//! Reference-count histogram.

use std::collections::BTreeMap;

use crate::error::ScanError;
use crate::index::DedupIndex;

/// How many distinct digests have each reference count.
///
/// Only counts below the bound are tabulated. Storage is sparse: one entry
/// per reference count that actually occurs, kept in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    buckets: BTreeMap<u64, u64>,
    bound: u64,
}

impl Histogram {
    /// Builds the histogram of a finished index.
    ///
    /// Fails with [`ScanError::HistogramOverflow`] on the first record whose
    /// reference count is `>= bound`.
    pub fn build(index: &DedupIndex, bound: u64) -> Result<Self, ScanError> {
        let mut buckets = BTreeMap::new();

        for record in index.records() {
            let ref_count = record.ref_count();
            if ref_count >= bound {
                return Err(ScanError::HistogramOverflow {
                    digest: *record.digest(),
                    ref_count,
                    bound,
                });
            }
            *buckets.entry(ref_count).or_insert(0) += 1;
        }

        Ok(Self { buckets, bound })
    }

    /// Returns the number of digests with exactly `ref_count` references.
    pub fn get(&self, ref_count: u64) -> u64 {
        self.buckets.get(&ref_count).copied().unwrap_or(0)
    }

    /// Iterates over non-empty buckets as `(ref_count, digests)`, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.buckets.iter().map(|(&ref_count, &count)| (ref_count, count))
    }

    /// Returns the number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of distinct digests tabulated.
    pub fn distinct_digests(&self) -> u64 {
        self.buckets.values().sum()
    }

    /// Returns the number of chunks the buckets account for.
    ///
    /// Equals the index's total chunk count for any histogram that built
    /// successfully.
    pub fn accounted_chunks(&self) -> u64 {
        self.iter().map(|(ref_count, count)| ref_count * count).sum()
    }

    /// Returns the largest tabulated reference count, if any.
    pub fn max_ref_count(&self) -> Option<u64> {
        self.buckets.keys().next_back().copied()
    }

    /// Returns the configured bound.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Returns true if no digest was tabulated.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
