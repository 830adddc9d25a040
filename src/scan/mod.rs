//! Driving a scan over a file tree.
//!
//! - [`ScanSession`] - Owns the index and counters for one scan
//! - [`walk_files`] - Regular files under a root directory
//! - [`scan`] - One-call scan of a directory

mod session;
mod walk;

pub use session::{FileOutcome, ScanSession, scan};
pub use walk::walk_files;
