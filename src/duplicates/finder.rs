//! Pipeline orchestrator tying traversal and refinement together.
//!
//! # Overview
//!
//! [`DupeFinder`] runs the complete detection pipeline:
//! 1. **Walk** - group files by size through the identity tracker
//! 2. **Filter** - drop singleton size groups
//! 3. **Refine** - apply the digest chain, filtering after each stage
//!
//! The outcome carries the confirmed clusters, the filtered size
//! mapping (exposed as plain data so callers can persist it for
//! diagnostics), and a scan summary.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DupeFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DupeFinder::with_defaults();
//! let outcome = finder.scan(&[PathBuf::from("/some/path")]).unwrap();
//! println!("Found {} clusters", outcome.clusters.len());
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bytesize::ByteSize;

use crate::digest::{Algorithm, ConfigError, DigestError};
use crate::scanner::{ScanError, SizeGroups, Walker, WalkerConfig};

use super::groups::{member_count, retain_duplicates, Cluster};
use super::refine::{refine, RefineConfig};

/// Configuration for the full detection pipeline.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Traversal policy options.
    pub walker: WalkerConfig,
    /// Ordered digest algorithm chain.
    pub chain: Vec<Algorithm>,
    /// Number of I/O threads for parallel digesting.
    pub io_threads: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            walker: WalkerConfig::default(),
            chain: vec![Algorithm::Blake3],
            io_threads: 4,
        }
    }
}

impl FinderConfig {
    /// Set the traversal policy.
    #[must_use]
    pub fn with_walker_config(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    /// Set the digest chain.
    #[must_use]
    pub fn with_chain(mut self, chain: Vec<Algorithm>) -> Self {
        self.chain = chain;
        self
    }

    /// Set the I/O thread count (clamped to at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }
}

/// Summary statistics from one scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files admitted into size groups
    pub total_files: usize,
    /// Total size of admitted files in bytes
    pub total_size: u64,
    /// Paths suppressed as hard links to already-seen files
    pub hardlinks_skipped: usize,
    /// Files eliminated because their size was unique
    pub eliminated_by_size: usize,
    /// Confirmed clusters
    pub cluster_count: usize,
    /// Redundant copies across all clusters (members beyond the first)
    pub duplicate_files: usize,
    /// Bytes occupied by redundant copies
    pub reclaimable_space: u64,
    /// Wall-clock duration of the scan
    pub scan_duration: Duration,
    /// Traversal/stat errors absorbed during the walk
    pub scan_errors: Vec<ScanError>,
    /// Digest errors absorbed during refinement
    pub digest_errors: Vec<DigestError>,
}

impl ScanSummary {
    /// Whether any non-fatal error was absorbed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.scan_errors.is_empty() || !self.digest_errors.is_empty()
    }

    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Total scanned size as a human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }
}

/// Everything a scan produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Confirmed duplicate clusters, in deterministic order
    pub clusters: Vec<Cluster>,
    /// The singleton-filtered size mapping, for diagnostic persistence
    pub size_groups: SizeGroups,
    /// Scan statistics and absorbed errors
    pub summary: ScanSummary,
}

/// Errors that abort a scan before it starts.
///
/// Per-file failures never abort a scan; only configuration problems do.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The digest chain was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Orchestrates the multi-stage duplicate detection pipeline.
pub struct DupeFinder {
    config: FinderConfig,
}

impl DupeFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Run the full pipeline over the given input paths.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] if the digest chain is empty.
    /// All per-file failures are absorbed into the summary instead.
    pub fn scan(&self, paths: &[PathBuf]) -> Result<ScanOutcome, FinderError> {
        if self.config.chain.is_empty() {
            return Err(ConfigError::EmptyChain.into());
        }

        let start = std::time::Instant::now();
        log::info!("Scanning {} input path(s)", paths.len());

        let walker = Walker::new(paths.to_vec(), self.config.walker.clone());
        let report = walker.collect_by_size();
        log::info!(
            "Raw size groups: {} ({} files, {})",
            report.groups.len(),
            report.stats.files_grouped,
            ByteSize::b(report.stats.total_size)
        );

        let size_groups = retain_duplicates(report.groups);
        let surviving = member_count(&size_groups);
        log::info!(
            "Candidate groups after singleton filter: {} ({} files)",
            size_groups.len(),
            surviving
        );

        let refine_config = RefineConfig::default().with_io_threads(self.config.io_threads);
        let (clusters, refine_stats) =
            refine(size_groups.clone(), &self.config.chain, &refine_config);

        let summary = ScanSummary {
            total_files: report.stats.files_grouped,
            total_size: report.stats.total_size,
            hardlinks_skipped: report.stats.hardlinks_skipped,
            eliminated_by_size: report.stats.files_grouped - surviving,
            cluster_count: clusters.len(),
            duplicate_files: clusters.iter().map(Cluster::duplicate_count).sum(),
            reclaimable_space: clusters.iter().map(Cluster::wasted_space).sum(),
            scan_duration: start.elapsed(),
            scan_errors: report.errors,
            digest_errors: refine_stats.errors,
        };

        log::info!(
            "Scan complete in {:.2?}: {} clusters, {} redundant files, {} reclaimable",
            summary.scan_duration,
            summary.cluster_count,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok(ScanOutcome {
            clusters,
            size_groups,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_chain_is_rejected_before_scanning() {
        let finder = DupeFinder::new(FinderConfig::default().with_chain(Vec::new()));
        let err = finder.scan(&[PathBuf::from("/nonexistent")]).unwrap_err();
        assert!(matches!(err, FinderError::Config(ConfigError::EmptyChain)));
    }

    #[test]
    fn test_scan_finds_duplicate_pair() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        fs::write(dir.path().join("b.txt"), b"hello").unwrap();
        fs::write(dir.path().join("c.txt"), b"different length").unwrap();

        let finder = DupeFinder::with_defaults();
        let outcome = finder.scan(&[dir.path().to_path_buf()]).unwrap();

        assert_eq!(outcome.clusters.len(), 1);
        assert_eq!(outcome.clusters[0].size, 5);
        assert_eq!(outcome.clusters[0].paths.len(), 2);
        assert_eq!(outcome.summary.total_files, 3);
        assert_eq!(outcome.summary.eliminated_by_size, 1);
        assert_eq!(outcome.summary.duplicate_files, 1);
        assert_eq!(outcome.summary.reclaimable_space, 5);
        assert!(!outcome.summary.has_errors());
    }

    #[test]
    fn test_outcome_exposes_filtered_size_groups() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), b"hello").unwrap();
        fs::write(dir.path().join("b.txt"), b"world").unwrap();
        fs::write(dir.path().join("c.txt"), b"unique length here").unwrap();

        let finder = DupeFinder::with_defaults();
        let outcome = finder.scan(&[dir.path().to_path_buf()]).unwrap();

        // Same-size pair survives the size filter even though content differs.
        assert_eq!(outcome.size_groups.len(), 1);
        assert_eq!(outcome.size_groups[&5].len(), 2);
        // But digesting separates them.
        assert!(outcome.clusters.is_empty());
    }
}
