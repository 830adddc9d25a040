//! Fixed-size chunk reader.
//!
//! [`ChunkReader`] turns any [`std::io::Read`] into a lazy sequence of
//! chunks of at most `chunk_size` bytes, in stream order. Boundaries depend
//! only on byte offsets: short reads from the source are accumulated until a
//! chunk is full, so the same bytes always produce the same chunks.
//!
//! Chunks are split off the reader's buffer rather than copied. A caller that
//! drops each chunk before asking for the next one lets the reader refill the
//! same allocation for the whole file.
//!
//! # Example
//!
//! ```
//! use dedupstat::ChunkReader;
//! use std::io::Cursor;
//!
//! let data = vec![7u8; 4097];
//! let chunks: Vec<_> = ChunkReader::new(Cursor::new(data), 4096).collect::<Result<_, _>>()?;
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[0].len(), 4096);
//! assert_eq!(chunks[1].len(), 1);
//! # Ok::<(), dedupstat::ScanError>(())
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::buffer::Buffer;
use crate::error::ScanError;

/// Opens `path` and returns a reader over its fixed-size chunks.
///
/// Fails with [`ScanError::FileOpen`] if the file cannot be opened. Read
/// failures after that are yielded by the iterator as [`ScanError::Read`].
pub fn read_chunks(path: impl AsRef<Path>, chunk_size: usize) -> Result<ChunkReader<File>, ScanError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ChunkReader::new(file, chunk_size).with_path(path))
}

/// An iterator over the fixed-size chunks of a reader.
///
/// Yields `Ok(chunk)` for every non-empty chunk. The last chunk may be
/// shorter than `chunk_size`; end of stream never yields an empty chunk.
///
/// If a read fails, bytes already buffered are yielded first as a final
/// partial chunk, then the error is yielded once and the iterator ends.
/// `ErrorKind::Interrupted` is retried.
#[derive(Debug)]
pub struct ChunkReader<R> {
    reader: R,
    path: Option<PathBuf>,
    chunk_size: usize,
    buffer: Buffer,
    deferred_error: Option<io::Error>,
    bytes_read: u64,
    finished: bool,
}

impl<R: Read> ChunkReader<R> {
    /// Creates a chunk reader.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            reader,
            path: None,
            chunk_size,
            buffer: Buffer::take(chunk_size),
            deferred_error: None,
            bytes_read: 0,
            finished: false,
        }
    }

    /// Attaches the source path so read errors can name it.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Returns the source path, if one was attached.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the number of bytes yielded so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn read_error(&self, source: io::Error) -> ScanError {
        match &self.path {
            Some(path) => ScanError::Read {
                path: path.clone(),
                source,
            },
            None => ScanError::Io(source),
        }
    }

    /// Fills the buffer until it holds a full chunk, EOF, or an error.
    ///
    /// Returns the number of bytes filled and the error that stopped the
    /// fill early, if any.
    fn fill(&mut self) -> (usize, Option<io::Error>) {
        let buf = self.buffer.as_mut_slice();
        let mut filled = 0;
        while filled < self.chunk_size {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return (filled, Some(e)),
            }
        }
        (filled, None)
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Bytes, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(e) = self.deferred_error.take() {
            self.finished = true;
            return Some(Err(self.read_error(e)));
        }

        let (filled, error) = self.fill();

        match error {
            Some(e) if filled == 0 => {
                self.finished = true;
                return Some(Err(self.read_error(e)));
            }
            // Emit the partial chunk now, the error on the next call
            Some(e) => self.deferred_error = Some(e),
            None if filled < self.chunk_size => self.finished = true,
            None => {}
        }

        if filled == 0 {
            return None;
        }

        self.bytes_read += filled as u64;
        Some(Ok(self.buffer.freeze(filled)))
    }
}
