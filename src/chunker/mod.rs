//! Splitting byte streams into fixed-size chunks.
//!
//! - [`ChunkReader`] - Iterator of chunks over a [`std::io::Read`]
//! - [`read_chunks`] - Opens a file and wraps it in a [`ChunkReader`]

mod reader;

pub use reader::{ChunkReader, read_chunks};
