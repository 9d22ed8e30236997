//! Command-line interface definitions for dupescan.
//!
//! All arguments use the clap derive API. The flags here are a thin
//! layer over the core's traversal policy and digest chain; parsing
//! them produces data only, no behavior.
//!
//! # Example
//!
//! ```bash
//! # Scan two trees with the default chain (blake3)
//! dupescan ~/photos /mnt/backup/photos
//!
//! # Chain two algorithms as a collision-confidence check
//! dupescan -a sha1 -a sha256 ~/photos
//!
//! # Include hidden entries and zero-length files, emit JSON
//! dupescan -d -z --output json ~/src
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Progressive duplicate file finder.
///
/// Groups files by size, then narrows candidate groups through an
/// ordered chain of content digests, reporting clusters of
/// byte-identical files.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files and/or directories to scan
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Include zero-length files
    ///
    /// Every empty file trivially duplicates every other empty file,
    /// so they are skipped by default.
    #[arg(short = 'z', long = "zero")]
    pub zero: bool,

    /// Include '.' files and directories
    #[arg(short = 'd', long = "dot")]
    pub dot: bool,

    /// Digest algorithm chain, applied in order (repeatable)
    ///
    /// Supported: md5, sha1, sha224, sha256, sha384, sha512, blake3.
    /// Appending a second algorithm narrows collisions of the first.
    #[arg(
        short = 'a',
        long = "algorithm",
        value_name = "NAME",
        default_value = "blake3"
    )]
    pub algorithms: Vec<String>,

    /// Number of I/O threads for digesting (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value = "4")]
    pub io_threads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Write the singleton-filtered size groups to FILE as JSON
    ///
    /// Diagnostic only; the mapping is never read back.
    #[arg(long, value_name = "FILE")]
    pub save_groups: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Report formats for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable cluster blocks
    Text,
    /// Machine-readable JSON
    Json,
}
