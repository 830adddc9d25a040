//! Internal buffer management.
//!
//! This module provides a thread-local buffer pool so that a scan over many
//! files reuses one read buffer. It is an implementation detail and not part
//! of the public API.

mod pool;

pub(crate) use pool::Buffer;
