//! Chunk identity types.
//!
//! - [`ChunkDigest`] - 32-byte cryptographic fingerprint
//! - [`ChunkRecord`] - Digest plus reference count

mod digest;
mod record;

pub use digest::ChunkDigest;
pub use record::ChunkRecord;
