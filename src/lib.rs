//! dedupstat
//!
//! Chunk deduplication accounting for file trees.
//!
//! `dedupstat` splits every file under a directory into fixed-size chunks,
//! fingerprints each chunk with a cryptographic digest and counts how often
//! each distinct chunk occurs. The result is a histogram of reference counts
//! and a duplication ratio: an estimate of how much a content-addressed,
//! deduplicating store would save on that data.
//!
//! The crate intentionally:
//! - does NOT store chunks anywhere
//! - does NOT do content-defined chunking
//! - does NOT persist the index between runs
//! - does NOT hash in parallel
//!
//! Data flow: directory walk → [`ChunkReader`] → digest → [`DedupIndex`] →
//! [`Histogram`] / [`DuplicationRatio`] → [`ScanReport`].
//!
//! # Scan a directory
//!
//! ```no_run
//! use dedupstat::{ScanConfig, ScanError, scan};
//!
//! fn main() -> Result<(), ScanError> {
//!     let report = scan("data", ScanConfig::default())?;
//!     print!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! # Feed chunks by hand
//!
//! ```
//! use dedupstat::{DedupIndex, DigestAlgorithm, Histogram, DuplicationRatio};
//!
//! let mut index = DedupIndex::new(DigestAlgorithm::Blake3);
//! for chunk in [&b"a"[..], b"a", b"b"] {
//!     index.record_chunk(chunk)?;
//! }
//!
//! let histogram = Histogram::build(&index, 100)?;
//! let ratio = DuplicationRatio::compute(&histogram, index.total_chunks());
//! assert_eq!(ratio.value(), Some(2.0 / 3.0));
//! # Ok::<(), dedupstat::ScanError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod error;
mod hash;
mod index;
mod report;
mod scan;

mod buffer; // internal (thread-local reuse)

#[cfg(feature = "async-io")]
mod async_stream;

pub use chunk::{ChunkDigest, ChunkRecord};
pub use chunker::{ChunkReader, read_chunks};
pub use config::{DEFAULT_CHUNK_SIZE, DEFAULT_HISTOGRAM_BOUND, ScanConfig};
pub use error::ScanError;
pub use hash::DigestAlgorithm;
pub use index::DedupIndex;
pub use report::{DuplicationRatio, Histogram, ScanReport, ScanStats};
pub use scan::{FileOutcome, ScanSession, scan, walk_files};

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};
