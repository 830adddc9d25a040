//! Aggregation of a finished scan.
//!
//! - [`Histogram`] - Digests per reference count, with an overflow bound
//! - [`DuplicationRatio`] - Fraction of non-unique chunks
//! - [`ScanReport`] - Both of the above plus scan counters, renderable as text
//!
//! The text form is one `<ref_count>\t<digests>` line per non-empty bucket,
//! a blank line, then the totals:
//!
//! ```text
//! 1	2
//! 2	1
//!
//! Total chunks: 4
//! Duplication Ratio: 0.500000
//! Distinct chunks: 3
//! Files scanned: 2
//! Truncated files: 0
//! ```

mod histogram;
mod ratio;

use std::fmt;
use std::io::{self, Write};

pub use histogram::Histogram;
pub use ratio::DuplicationRatio;

use crate::error::ScanError;
use crate::index::DedupIndex;

/// Per-file counters collected while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files opened and read to the end or to a read error.
    pub files_scanned: u64,
    /// Files whose read failed mid-stream; their chunks up to the failure are counted.
    pub files_truncated: u64,
    /// Bytes chunked across all files.
    pub bytes_read: u64,
}

/// The result of a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    histogram: Histogram,
    ratio: DuplicationRatio,
    total_chunks: u64,
    stats: ScanStats,
}

impl ScanReport {
    /// Aggregates a finished index.
    ///
    /// Fails if any reference count reaches `bound`.
    pub fn build(index: &DedupIndex, bound: u64, stats: ScanStats) -> Result<Self, ScanError> {
        let histogram = Histogram::build(index, bound)?;
        let total_chunks = index.total_chunks();
        let ratio = DuplicationRatio::compute(&histogram, total_chunks);
        Ok(Self {
            histogram,
            ratio,
            total_chunks,
            stats,
        })
    }

    /// Returns the reference-count histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Returns the duplication ratio.
    pub fn ratio(&self) -> DuplicationRatio {
        self.ratio
    }

    /// Returns the number of chunks scanned.
    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    /// Returns the number of distinct chunks.
    pub fn distinct_chunks(&self) -> u64 {
        self.histogram.distinct_digests()
    }

    /// Returns the per-file counters.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Writes the text report.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "{}", self)?;
        out.flush()
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ref_count, digests) in self.histogram.iter() {
            writeln!(f, "{}\t{}", ref_count, digests)?;
        }
        writeln!(f)?;
        writeln!(f, "Total chunks: {}", self.total_chunks)?;
        writeln!(f, "Duplication Ratio: {}", self.ratio)?;
        writeln!(f, "Distinct chunks: {}", self.distinct_chunks())?;
        writeln!(f, "Files scanned: {}", self.stats.files_scanned)?;
        writeln!(f, "Truncated files: {}", self.stats.files_truncated)
    }
}
