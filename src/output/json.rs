//! JSON output for scripting and diagnostics.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "clusters": [
//!     {
//!       "size": 5,
//!       "digest": "aaf4c6...",
//!       "files": ["/path/a.txt", "/path/b.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 3,
//!     "total_size": 19,
//!     "cluster_count": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 5,
//!     "scan_duration_ms": 12,
//!     "skipped_paths": 0
//!   }
//! }
//! ```
//!
//! The diagnostic size-group dump is a single JSON object keyed by
//! byte length with arrays of paths as values.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use crate::duplicates::{Cluster, ScanOutcome, ScanSummary};
use crate::scanner::SizeGroups;

/// A single cluster in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonCluster {
    /// Byte length shared by all members
    pub size: u64,
    /// Final digest of the chain, lower-case hex
    pub digest: String,
    /// Member paths in first-seen order
    pub files: Vec<String>,
}

impl JsonCluster {
    fn from_cluster(cluster: &Cluster) -> Self {
        Self {
            size: cluster.size,
            digest: cluster.digest.clone(),
            files: cluster
                .paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
    }
}

/// Summary statistics in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files admitted into size groups
    pub total_files: usize,
    /// Total size of admitted files in bytes
    pub total_size: u64,
    /// Paths suppressed as hard links
    pub hardlinks_skipped: usize,
    /// Files eliminated because their size was unique
    pub eliminated_by_size: usize,
    /// Confirmed clusters
    pub cluster_count: usize,
    /// Redundant copies across all clusters
    pub duplicate_files: usize,
    /// Bytes occupied by redundant copies
    pub reclaimable_space: u64,
    /// Scan duration in milliseconds
    pub scan_duration_ms: u64,
    /// Paths dropped by absorbed traversal or digest errors
    pub skipped_paths: usize,
}

impl JsonSummary {
    fn from_summary(summary: &ScanSummary) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            hardlinks_skipped: summary.hardlinks_skipped,
            eliminated_by_size: summary.eliminated_by_size,
            cluster_count: summary.cluster_count,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            skipped_paths: summary.scan_errors.len() + summary.digest_errors.len(),
        }
    }
}

/// The complete machine-readable report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Confirmed clusters
    pub clusters: Vec<JsonCluster>,
    /// Scan statistics
    pub summary: JsonSummary,
}

impl JsonReport {
    /// Build a report from a scan outcome.
    #[must_use]
    pub fn from_outcome(outcome: &ScanOutcome) -> Self {
        Self {
            clusters: outcome.clusters.iter().map(JsonCluster::from_cluster).collect(),
            summary: JsonSummary::from_summary(&outcome.summary),
        }
    }

    /// Serialize as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a path is not valid UTF-8.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if a path is not valid UTF-8.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the pretty-printed report to a sink.
    ///
    /// # Errors
    ///
    /// Propagates I/O and serialization failures.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, self).map_err(io::Error::from)?;
        writeln!(w)
    }
}

/// Write a size-grouped mapping as pretty JSON, keyed by byte length.
///
/// Purely diagnostic: the mapping is never read back by the core.
///
/// # Errors
///
/// Propagates I/O and serialization failures.
pub fn write_size_groups<W: Write>(w: &mut W, groups: &SizeGroups) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, groups).map_err(io::Error::from)?;
    writeln!(w)
}

/// Write the diagnostic size-group dump to a file.
///
/// # Errors
///
/// Propagates file-creation, I/O, and serialization failures.
pub fn save_size_groups(path: &Path, groups: &SizeGroups) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = io::BufWriter::new(file);
    write_size_groups(&mut writer, groups)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_outcome() -> ScanOutcome {
        let clusters = vec![Cluster {
            size: 5,
            digest: "cafe".to_string(),
            paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
        }];
        let summary = ScanSummary {
            total_files: 3,
            total_size: 19,
            cluster_count: 1,
            duplicate_files: 1,
            reclaimable_space: 5,
            ..Default::default()
        };
        ScanOutcome {
            clusters,
            size_groups: SizeGroups::new(),
            summary,
        }
    }

    #[test]
    fn test_report_shape() {
        let report = JsonReport::from_outcome(&sample_outcome());
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["clusters"][0]["size"], 5);
        assert_eq!(value["clusters"][0]["digest"], "cafe");
        assert_eq!(value["clusters"][0]["files"][1], "/b");
        assert_eq!(value["summary"]["cluster_count"], 1);
        assert_eq!(value["summary"]["skipped_paths"], 0);
    }

    #[test]
    fn test_size_groups_keyed_by_length() {
        let mut groups = SizeGroups::new();
        groups.insert(5, vec![PathBuf::from("/a"), PathBuf::from("/b")]);

        let mut buf = Vec::new();
        write_size_groups(&mut buf, &groups).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["5"][0], "/a");
        assert_eq!(value["5"][1], "/b");
    }
}
