//! Async streaming support for chunking.
//!
//! - [`chunk_async`] - Creates an async stream of fixed-size chunks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{ChunkStream, chunk_async};
