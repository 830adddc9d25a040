//! Duplication ratio.

use std::fmt;

use super::Histogram;

/// Fraction of chunks that are not unique: `1 - unique / total`.
///
/// Kept as the two counts it is derived from, so the exact value is never
/// lost to integer division. With zero chunks the ratio is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicationRatio {
    unique_chunks: u64,
    total_chunks: u64,
}

impl DuplicationRatio {
    /// Computes the ratio from the histogram's refcount-1 bucket.
    pub fn compute(histogram: &Histogram, total_chunks: u64) -> Self {
        Self::from_counts(histogram.get(1), total_chunks)
    }

    /// Builds a ratio from raw counts.
    pub fn from_counts(unique_chunks: u64, total_chunks: u64) -> Self {
        Self {
            unique_chunks,
            total_chunks,
        }
    }

    /// Returns the ratio, or `None` when no chunk was scanned.
    pub fn value(&self) -> Option<f64> {
        if self.total_chunks == 0 {
            return None;
        }
        let duplicated = self.total_chunks.saturating_sub(self.unique_chunks);
        Some(duplicated as f64 / self.total_chunks as f64)
    }

    /// Returns true if at least one chunk was scanned.
    pub fn is_defined(&self) -> bool {
        self.total_chunks > 0
    }

    /// Returns the number of chunks with a reference count of 1.
    pub fn unique_chunks(&self) -> u64 {
        self.unique_chunks
    }

    /// Returns the number of chunks scanned.
    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    /// Decimal places needed to tell apart ratios that differ by `1 / total`.
    pub fn precision(&self) -> usize {
        let digits = self.total_chunks.checked_ilog10().map_or(1, |d| d as usize + 1);
        (digits + 1).max(6)
    }
}

impl fmt::Display for DuplicationRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{:.*}", self.precision(), value),
            None => f.write_str("undefined"),
        }
    }
}
