//! Thread-local pool of read buffers.

use std::cell::RefCell;

use bytes::{Bytes, BytesMut};

/// Largest chunk length whose buffer is returned to the pool (1 MiB).
pub const MAX_POOLED_CAPACITY: usize = 1024 * 1024;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable read buffer that hands out chunks without copying.
///
/// Each chunk is split off the buffer and frozen into a [`Bytes`]. Once the
/// caller drops that chunk, the next [`as_mut_slice`](Buffer::as_mut_slice)
/// reclaims the same allocation. One scan opens many files in a row; each
/// file's reader takes a buffer from the pool and gives it back on drop.
#[derive(Debug)]
pub struct Buffer {
    data: BytesMut,
    len: usize,
}

impl Buffer {
    /// Takes a buffer for `len`-byte chunks from the thread-local pool or creates a new one.
    pub fn take(len: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.clear();
        data.reserve(len);
        Self { data, len }
    }

    /// Returns the `len`-byte read area.
    ///
    /// The area is zeroed after each [`freeze`](Buffer::freeze); between
    /// freezes it keeps what was written into it.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.data.is_empty() {
            self.data.resize(self.len, 0);
        }
        &mut self.data[..]
    }

    /// Splits off the first `filled` bytes as an immutable chunk.
    pub fn freeze(&mut self, filled: usize) -> Bytes {
        self.data.truncate(filled);
        self.data.split().freeze()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if self.len <= MAX_POOLED_CAPACITY {
            THREAD_BUFFER_POOL.with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(std::mem::take(&mut self.data));
                }
            });
        }
    }
}

thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<BytesMut>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_take() {
        let mut buf = Buffer::take(4096);
        let area = buf.as_mut_slice();
        assert_eq!(area.len(), 4096);
        assert!(area.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_area_is_zeroed_after_freeze() {
        let mut buf = Buffer::take(64);
        buf.as_mut_slice().fill(0xFF);
        let chunk = buf.freeze(10);
        assert_eq!(&chunk[..], &[0xFF; 10]);

        assert_eq!(buf.as_mut_slice().len(), 64);
        assert!(buf.as_mut_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_held_chunk_survives_next_fill() {
        let mut buf = Buffer::take(8);
        buf.as_mut_slice().fill(1);
        let first = buf.freeze(8);

        buf.as_mut_slice().fill(2);
        let second = buf.freeze(3);

        assert_eq!(&first[..], &[1u8; 8]);
        assert_eq!(&second[..], &[2u8; 3]);
    }

    #[test]
    fn test_dropped_chunk_allocation_is_reclaimed() {
        let mut buf = Buffer::take(4096);
        buf.as_mut_slice().fill(1);
        let first = buf.freeze(4096);
        let ptr = first.as_ptr();
        drop(first);

        buf.as_mut_slice().fill(2);
        let second = buf.freeze(4096);
        assert_eq!(second.as_ptr(), ptr);
        assert!(second.iter().all(|&b| b == 2));
    }

    #[test]
    fn test_reuse_from_pool_is_zeroed() {
        {
            let mut buf = Buffer::take(64);
            buf.as_mut_slice().fill(0xFF);
        }

        let mut buf = Buffer::take(64);
        assert_eq!(buf.as_mut_slice().len(), 64);
        assert!(buf.as_mut_slice().iter().all(|&b| b == 0));
    }
}
