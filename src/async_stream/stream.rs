//! Async fixed-size chunk stream.
//!
//! Same chunking rules as [`ChunkReader`](crate::ChunkReader), driven by a
//! `futures_io::AsyncRead`. Runtime-agnostic: works with tokio (through
//! `tokio_util::compat`), async-std, smol, and others.
//!
//! # Example
//!
//! ```ignore
//! use dedupstat::{chunk_async, ScanConfig, ScanSession};
//! use tokio_util::compat::TokioAsyncReadCompatExt;
//!
//! let file = tokio::fs::File::open("data.bin").await?;
//! let mut session = ScanSession::new(ScanConfig::default())?;
//! session
//!     .ingest_stream("data.bin", chunk_async(file.compat(), 4096))
//!     .await?;
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::buffer::Buffer;
use crate::error::ScanError;

pin_project! {
    /// A stream of fixed-size chunks read from an async reader.
    ///
    /// The fill position survives `Poll::Pending`, so a chunk that arrives
    /// over several wakeups is still emitted whole.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        buffer: Buffer,
        chunk_size: usize,
        filled: usize,
        deferred_error: Option<io::Error>,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    /// Creates a chunk stream.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be non-zero");
        Self {
            reader,
            buffer: Buffer::take(chunk_size),
            chunk_size,
            filled: 0,
            deferred_error: None,
            finished: false,
        }
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Bytes, ScanError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        if let Some(e) = this.deferred_error.take() {
            *this.finished = true;
            return Poll::Ready(Some(Err(ScanError::Io(e))));
        }

        while *this.filled < *this.chunk_size {
            let buf = &mut this.buffer.as_mut_slice()[*this.filled..];
            match this.reader.as_mut().poll_read(cx, buf) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    break;
                }
                Poll::Ready(Ok(n)) => *this.filled += n,
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    if *this.filled == 0 {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(ScanError::Io(e))));
                    }
                    // Emit the partial chunk now, the error on the next poll
                    *this.deferred_error = Some(e);
                    break;
                }
            }
        }

        let len = std::mem::take(this.filled);
        if len == 0 {
            return Poll::Ready(None);
        }
        Poll::Ready(Some(Ok(this.buffer.freeze(len))))
    }
}

/// Creates a fixed-size chunk stream from an async reader.
///
/// For tokio readers, convert with `tokio_util::compat::TokioAsyncReadCompatExt`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use dedupstat::chunk_async;
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(file.compat(), 4096);
/// ```
pub fn chunk_async<R: AsyncRead>(reader: R, chunk_size: usize) -> ChunkStream<R> {
    ChunkStream::new(reader, chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use tokio_util::compat::TokioAsyncReadCompatExt;

    async fn lens<R: AsyncRead>(stream: ChunkStream<R>) -> Vec<Result<usize, ScanError>> {
        stream.map(|chunk| chunk.map(|c| c.len())).collect().await
    }

    #[tokio::test]
    async fn test_chunk_stream_empty() {
        let reader: &[u8] = &[];
        assert!(lens(chunk_async(reader, 4096)).await.is_empty());
    }

    #[tokio::test]
    async fn test_chunk_stream_boundaries() {
        let data = vec![0xAAu8; 4097];
        let reader: &[u8] = &data;
        let lens: Vec<_> = lens(chunk_async(reader, 4096))
            .await
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(lens, vec![4096, 1]);
    }

    #[tokio::test]
    async fn test_chunk_stream_accumulates_short_reads() {
        let mock = tokio_test::io::Builder::new()
            .read(&[1u8; 1000])
            .read(&[2u8; 3000])
            .read(&[3u8; 200])
            .build();

        let chunks: Vec<_> = chunk_async(mock.compat(), 4096).collect().await;
        let chunks: Vec<Bytes> = chunks.into_iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 4096);
        assert_eq!(chunks[1].len(), 104);
        assert_eq!(chunks[0][999], 1);
        assert_eq!(chunks[0][1000], 2);
        assert_eq!(chunks[0][4000], 3);
    }

    #[tokio::test]
    async fn test_chunk_stream_error_after_partial_chunk() {
        let mock = tokio_test::io::Builder::new()
            .read(&[5u8; 10])
            .read_error(io::Error::other("gone"))
            .build();

        let items = lens(chunk_async(mock.compat(), 4096)).await;
        assert_eq!(items.len(), 2);
        assert_eq!(*items[0].as_ref().unwrap(), 10);
        assert!(matches!(items[1], Err(ScanError::Io(_))));
    }
}
