//! The scan engine.
//!
//! A [`ScanSession`] owns everything one scan mutates: the dedup index and
//! the per-file counters. Build one per scan, feed it files, then call
//! [`ScanSession::finish`] to aggregate.
//!
//! # Example
//!
//! ```no_run
//! use dedupstat::{ScanConfig, ScanSession};
//!
//! let mut session = ScanSession::new(ScanConfig::default())?;
//! session.scan_dir("data")?;
//! let report = session.finish()?;
//!
//! print!("{}", report);
//! # Ok::<(), dedupstat::ScanError>(())
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use bytes::Bytes;
#[cfg(feature = "async-io")]
use futures_core::Stream;

use crate::chunker::{ChunkReader, read_chunks};
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::index::DedupIndex;
use crate::report::{ScanReport, ScanStats};

use super::walk_files;

/// How a single file was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Read to end of file.
    Complete {
        /// Chunks recorded from this file.
        chunks: u64,
    },
    /// A read failed; chunks before the failure were recorded.
    Truncated {
        /// Chunks recorded from this file.
        chunks: u64,
    },
}

impl FileOutcome {
    /// Returns the number of chunks recorded from the file.
    pub fn chunks(&self) -> u64 {
        match *self {
            FileOutcome::Complete { chunks } | FileOutcome::Truncated { chunks } => chunks,
        }
    }
}

/// One scan's state: the dedup index plus scan counters.
#[derive(Debug)]
pub struct ScanSession {
    config: ScanConfig,
    index: DedupIndex,
    stats: ScanStats,
}

impl ScanSession {
    /// Creates an empty session.
    ///
    /// Returns error if the configuration is invalid.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        config.validate()?;
        Ok(Self {
            config,
            index: DedupIndex::new(config.digest()),
            stats: ScanStats::default(),
        })
    }

    /// Scans every regular file under `root`.
    ///
    /// Stops at the first traversal, open or counter error.
    pub fn scan_dir(&mut self, root: impl AsRef<Path>) -> Result<(), ScanError> {
        let root = root.as_ref();
        tracing::debug!(root = %root.display(), "scanning directory");
        for path in walk_files(root, self.config.follow_links()) {
            self.scan_file(path?)?;
        }
        Ok(())
    }

    /// Scans the given files in order.
    pub fn scan_paths<I, P>(&mut self, paths: I) -> Result<(), ScanError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self.scan_file(path)?;
        }
        Ok(())
    }

    /// Chunks one file into the index.
    ///
    /// An open failure is returned as [`ScanError::FileOpen`]. A read failure
    /// after that is logged, counted as a truncated file, and not returned.
    pub fn scan_file(&mut self, path: impl AsRef<Path>) -> Result<FileOutcome, ScanError> {
        let chunks = read_chunks(path.as_ref(), self.config.chunk_size())?;
        self.ingest(chunks)
    }

    /// Chunks an already open reader into the index.
    ///
    /// `path` only labels log lines and errors.
    pub fn scan_reader<R: Read>(
        &mut self,
        path: impl Into<PathBuf>,
        reader: R,
    ) -> Result<FileOutcome, ScanError> {
        let chunks = ChunkReader::new(reader, self.config.chunk_size()).with_path(path);
        self.ingest(chunks)
    }

    fn ingest<R: Read>(&mut self, chunks: ChunkReader<R>) -> Result<FileOutcome, ScanError> {
        let path = chunks.path().map(Path::to_path_buf).unwrap_or_default();
        let mut file = FileScan::default();

        for chunk in chunks {
            match chunk {
                Ok(data) => self.record(&mut file, &data)?,
                Err(e @ ScanError::Read { .. }) => {
                    tracing::warn!(error = %e, "file truncated");
                    file.truncated = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.close_file(&path, file))
    }

    /// Consumes a stream of chunks, such as one from
    /// [`chunk_async`](crate::chunk_async), into the index.
    ///
    /// Read errors in the stream truncate the file like in [`scan_file`](Self::scan_file).
    #[cfg(feature = "async-io")]
    pub async fn ingest_stream<S>(
        &mut self,
        path: impl Into<PathBuf>,
        stream: S,
    ) -> Result<FileOutcome, ScanError>
    where
        S: Stream<Item = Result<Bytes, ScanError>>,
    {
        let path = path.into();
        let mut stream = std::pin::pin!(stream);
        let mut file = FileScan::default();

        while let Some(chunk) = std::future::poll_fn(|cx| stream.as_mut().poll_next(cx)).await {
            match chunk {
                Ok(data) => self.record(&mut file, &data)?,
                Err(ScanError::Io(source) | ScanError::Read { source, .. }) => {
                    let e = ScanError::Read {
                        path: path.clone(),
                        source,
                    };
                    tracing::warn!(error = %e, "file truncated");
                    file.truncated = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.close_file(&path, file))
    }

    fn record(&mut self, file: &mut FileScan, data: &Bytes) -> Result<(), ScanError> {
        self.index.record_chunk(data)?;
        file.chunks += 1;
        file.bytes += data.len() as u64;
        Ok(())
    }

    fn close_file(&mut self, path: &Path, file: FileScan) -> FileOutcome {
        self.stats.files_scanned += 1;
        self.stats.bytes_read += file.bytes;
        tracing::debug!(path = %path.display(), chunks = file.chunks, bytes = file.bytes, "scanned file");

        if file.truncated {
            self.stats.files_truncated += 1;
            FileOutcome::Truncated {
                chunks: file.chunks,
            }
        } else {
            FileOutcome::Complete {
                chunks: file.chunks,
            }
        }
    }

    /// Returns the index built so far.
    pub fn index(&self) -> &DedupIndex {
        &self.index
    }

    /// Returns the counters collected so far.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Ends the scan and aggregates the index into a report.
    ///
    /// Fails with [`ScanError::HistogramOverflow`] if any chunk's reference
    /// count reached the configured bound.
    pub fn finish(self) -> Result<ScanReport, ScanError> {
        let report = ScanReport::build(&self.index, self.config.histogram_bound(), self.stats)?;
        tracing::info!(
            files = self.stats.files_scanned,
            truncated = self.stats.files_truncated,
            total_chunks = report.total_chunks(),
            distinct_chunks = report.distinct_chunks(),
            ratio = %report.ratio(),
            "scan complete"
        );
        Ok(report)
    }
}

#[derive(Debug, Default)]
struct FileScan {
    chunks: u64,
    bytes: u64,
    truncated: bool,
}

/// Scans `root` with `config` and returns the report.
pub fn scan(root: impl AsRef<Path>, config: ScanConfig) -> Result<ScanReport, ScanError> {
    let mut session = ScanSession::new(config)?;
    session.scan_dir(root)?;
    session.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct FailAfter {
        data: Cursor<Vec<u8>>,
        limit: u64,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.position() >= self.limit {
                return Err(io::Error::other("device error"));
            }
            let room = (self.limit - self.data.position()) as usize;
            let len = buf.len().min(room);
            self.data.read(&mut buf[..len])
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScanConfig::default().with_chunk_size(0);
        assert!(ScanSession::new(config).is_err());
    }

    #[test]
    fn test_scan_reader_counts_chunks() {
        let mut session = ScanSession::new(ScanConfig::default()).unwrap();
        let outcome = session
            .scan_reader("mem", Cursor::new(vec![0u8; 4097]))
            .unwrap();
        assert_eq!(outcome, FileOutcome::Complete { chunks: 2 });
        assert_eq!(session.index().total_chunks(), 2);
        assert_eq!(session.stats().bytes_read, 4097);
    }

    #[test]
    fn test_read_error_truncates_and_continues() {
        let mut session = ScanSession::new(ScanConfig::default()).unwrap();
        let broken = FailAfter {
            data: Cursor::new(vec![1u8; 3 * 4096]),
            limit: 4096 + 100,
        };

        let outcome = session.scan_reader("broken", broken).unwrap();
        assert_eq!(outcome, FileOutcome::Truncated { chunks: 2 });

        let outcome = session
            .scan_reader("fine", Cursor::new(vec![2u8; 10]))
            .unwrap();
        assert_eq!(outcome.chunks(), 1);

        let stats = session.stats();
        assert_eq!(stats.files_scanned, 2);
        assert_eq!(stats.files_truncated, 1);

        let report = session.finish().unwrap();
        assert_eq!(report.total_chunks(), 3);
        assert_eq!(report.stats().files_truncated, 1);
        assert!(report.to_string().contains("Truncated files: 1\n"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let mut session = ScanSession::new(ScanConfig::default()).unwrap();
        let err = session.scan_file("/no/such/file").unwrap_err();
        assert!(matches!(err, ScanError::FileOpen { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_finish_checks_bound() {
        let config = ScanConfig::new(4, 3).unwrap();

        let mut session = ScanSession::new(config).unwrap();
        session
            .scan_reader("twice", Cursor::new(b"abcdabcd".to_vec()))
            .unwrap();
        assert!(session.finish().is_ok());

        let mut session = ScanSession::new(config).unwrap();
        session
            .scan_reader("thrice", Cursor::new(b"abcdabcdabcd".to_vec()))
            .unwrap();
        assert!(matches!(
            session.finish(),
            Err(ScanError::HistogramOverflow {
                ref_count: 3,
                bound: 3,
                ..
            })
        ));
    }
}
