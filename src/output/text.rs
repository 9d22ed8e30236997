//! Human-readable cluster report.
//!
//! One block per cluster: member count, representative size, final
//! digest, then every member path indented beneath. A short summary
//! follows the clusters.

use std::io::{self, Write};

use bytesize::ByteSize;

use crate::duplicates::{Cluster, ScanSummary};

/// Write every cluster to `w`, one block per cluster.
///
/// # Errors
///
/// Propagates any I/O error from the sink.
pub fn render_clusters<W: Write>(w: &mut W, clusters: &[Cluster]) -> io::Result<()> {
    for (index, cluster) in clusters.iter().enumerate() {
        writeln!(
            w,
            "cluster {}: {} files, size {} ({}), digest {}",
            index + 1,
            cluster.len(),
            cluster.size,
            ByteSize::b(cluster.size),
            cluster.digest
        )?;
        for path in &cluster.paths {
            writeln!(w, "  {}", path.display())?;
        }
    }
    Ok(())
}

/// Write the scan summary footer to `w`.
///
/// # Errors
///
/// Propagates any I/O error from the sink.
pub fn render_summary<W: Write>(w: &mut W, summary: &ScanSummary) -> io::Result<()> {
    writeln!(
        w,
        "{} files scanned ({}), {} clusters, {} redundant files, {} reclaimable",
        summary.total_files,
        summary.total_size_display(),
        summary.cluster_count,
        summary.duplicate_files,
        summary.reclaimable_display()
    )?;
    let absorbed = summary.scan_errors.len() + summary.digest_errors.len();
    if absorbed > 0 {
        writeln!(w, "{absorbed} paths skipped due to errors (see log)")?;
    }
    Ok(())
}

/// Write the full report: clusters followed by the summary.
///
/// # Errors
///
/// Propagates any I/O error from the sink.
pub fn render_report<W: Write>(
    w: &mut W,
    clusters: &[Cluster],
    summary: &ScanSummary,
) -> io::Result<()> {
    render_clusters(w, clusters)?;
    if !clusters.is_empty() {
        writeln!(w)?;
    }
    render_summary(w, summary)
}
