//! Traversal of input paths and grouping of files by byte length.
//!
//! # Overview
//!
//! This is the first pipeline stage. The walker visits every input
//! path (files directly, directories recursively), stats each file
//! exactly once through the [`IdentityTracker`], and appends the
//! canonical path of each accepted file to the group for its size.
//! No file content is read here.
//!
//! Traversal is single-threaded and sorted by file name per directory
//! level, so group membership order is deterministic run to run.
//!
//! # Policy
//!
//! - Nonexistent input paths are skipped silently (non-fatal).
//! - Hidden entries (names starting with `.`) are pruned from descent
//!   unless `include_hidden` is set. Explicit input paths are always
//!   visited.
//! - Zero-length files are skipped unless `keep_zero_len` is set.
//! - Symbolic links are never followed and never classified.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! let walker = Walker::new(vec![PathBuf::from(".")], WalkerConfig::default());
//! let report = walker.collect_by_size();
//! for (size, paths) in &report.groups {
//!     println!("{size} bytes: {} files", paths.len());
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::identity::{IdentityTracker, Observation};
use super::ScanError;

/// Mapping from file size to the paths of that size, in first-seen order.
pub type SizeGroups = BTreeMap<u64, Vec<PathBuf>>;

/// Configuration for traversal and size grouping.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Visit hidden files and descend into hidden directories.
    pub include_hidden: bool,

    /// Group zero-length files instead of skipping them.
    /// Every empty file trivially duplicates every other empty file,
    /// which is rarely interesting, so the default skips them.
    pub keep_zero_len: bool,
}

/// Counters describing one traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Files accepted into size groups
    pub files_grouped: usize,
    /// Total size of accepted files in bytes
    pub total_size: u64,
    /// Paths suppressed because their physical file was already seen
    pub hardlinks_skipped: usize,
    /// Zero-length files skipped by policy
    pub zero_len_skipped: usize,
    /// Files whose stat failed
    pub unreadable: usize,
    /// Symbolic links skipped (never followed)
    pub symlinks_skipped: usize,
    /// Input paths that did not exist
    pub missing_roots: usize,
}

/// Result of one traversal: the size groups plus diagnostics.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Files grouped by byte length
    pub groups: SizeGroups,
    /// Traversal counters
    pub stats: WalkStats,
    /// Non-fatal errors absorbed during traversal
    pub errors: Vec<ScanError>,
}

/// Walks the input paths and builds size groups.
#[derive(Debug)]
pub struct Walker {
    roots: Vec<PathBuf>,
    config: WalkerConfig,
}

impl Walker {
    /// Create a walker over the given input paths.
    ///
    /// # Arguments
    ///
    /// * `roots` - Ordered list of files and/or directories to scan
    /// * `config` - Traversal policy options
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, config: WalkerConfig) -> Self {
        Self { roots, config }
    }

    /// Traverse every root and group accepted files by size.
    ///
    /// Per-path failures are absorbed into the report; this call never
    /// fails as a whole.
    #[must_use]
    pub fn collect_by_size(&self) -> WalkReport {
        let mut tracker = IdentityTracker::new();
        let mut report = WalkReport::default();

        for root in &self.roots {
            if !root.exists() {
                log::debug!("Skipping nonexistent path: {}", root.display());
                report.stats.missing_roots += 1;
                continue;
            }
            if root.is_dir() {
                self.walk_directory(root, &mut tracker, &mut report);
            } else {
                // Explicit file inputs bypass the hidden-name filter.
                self.classify(root, &mut tracker, &mut report);
            }
        }

        log::debug!(
            "Traversal complete: {} files in {} size groups, {} hard links suppressed",
            report.stats.files_grouped,
            report.groups.len(),
            report.stats.hardlinks_skipped
        );
        report
    }

    /// Recursively visit a directory in lexical order per level.
    fn walk_directory(&self, root: &Path, tracker: &mut IdentityTracker, report: &mut WalkReport) {
        let include_hidden = self.config.include_hidden;
        let walk = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                // The root itself is always visited, even if hidden.
                include_hidden || entry.depth() == 0 || !is_hidden_name(entry.file_name())
            });

        for entry in walk {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        self.classify(entry.path(), tracker, report);
                    } else if entry.path_is_symlink() {
                        log::trace!("Skipping symlink: {}", entry.path().display());
                        report.stats.symlinks_skipped += 1;
                    }
                }
                Err(e) => report.errors.push(walkdir_error(root, e)),
            }
        }
    }

    /// Stat one file through the identity tracker and group it by size.
    fn classify(&self, path: &Path, tracker: &mut IdentityTracker, report: &mut WalkReport) {
        match tracker.observe(path) {
            Observation::AlreadySeen => {
                log::debug!("Already seen (hard link): {}", path.display());
                report.stats.hardlinks_skipped += 1;
            }
            Observation::Unreadable(e) => {
                log::debug!("Could not stat {}: {e}", path.display());
                report.stats.unreadable += 1;
                report.errors.push(ScanError::Stat {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
            Observation::FirstSeen(metadata) => {
                if !metadata.is_file() {
                    // Explicit root that is a symlink or special file.
                    log::trace!("Skipping non-regular file: {}", path.display());
                    return;
                }
                let size = metadata.len();
                if size == 0 && !self.config.keep_zero_len {
                    log::trace!("Skipping zero-length file: {}", path.display());
                    report.stats.zero_len_skipped += 1;
                    return;
                }
                let canonical =
                    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
                report.stats.files_grouped += 1;
                report.stats.total_size += size;
                report.groups.entry(size).or_default().push(canonical);
            }
        }
    }
}

/// Whether a directory-entry name marks it hidden.
fn is_hidden_name(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Convert a walkdir error into the scan error taxonomy.
fn walkdir_error(root: &Path, err: walkdir::Error) -> ScanError {
    let path = err
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    let denied = err
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied);
    if denied {
        ScanError::PermissionDenied(path)
    } else {
        ScanError::Io {
            path,
            source: err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory traversal failed")),
        }
    }
}
