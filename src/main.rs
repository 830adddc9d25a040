//! dedupstat CLI - chunk deduplication statistics for a directory tree.
//!
//! Run with:
//!     dedupstat [PATH] [-o report.txt]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dedupstat::{
    DEFAULT_CHUNK_SIZE, DEFAULT_HISTOGRAM_BOUND, DigestAlgorithm, ScanConfig, ScanSession,
};

/// Estimate how much a deduplicating store would save on a directory tree.
#[derive(Parser)]
#[command(name = "dedupstat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan (default: current directory)
    path: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Chunk size in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Abort if any chunk is referenced this many times or more
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BOUND)]
    bound: u64,

    /// Chunk digest algorithm
    #[arg(long, default_value = "blake3")]
    digest: DigestAlgorithm,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let root = cli.path.unwrap_or_else(|| {
        tracing::warn!("no path given, using current directory");
        PathBuf::from(".")
    });

    let config = ScanConfig::new(cli.chunk_size, cli.bound)
        .context("invalid options")?
        .with_digest(cli.digest)
        .with_follow_links(cli.follow_links);

    let mut session = ScanSession::new(config)?;
    session
        .scan_dir(&root)
        .with_context(|| format!("scan of {} failed", root.display()))?;
    let report = session.finish().context("aggregation failed")?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("could not open output file {}", path.display()))?;
            report
                .write_to(BufWriter::new(file))
                .with_context(|| format!("could not write report to {}", path.display()))?;
        }
        None => report
            .write_to(io::stdout().lock())
            .context("could not write report")?,
    }

    Ok(())
}
