//! Progressive refinement of size groups through the digest chain.
//!
//! # Overview
//!
//! The engine takes the singleton-filtered size groups and applies the
//! configured digest algorithms in order. Each stage digests every
//! member of every surviving group, re-partitions the group by digest,
//! and drops the singletons; groups that survive the whole chain are
//! emitted as confirmed clusters.
//!
//! Grouping by size first is strictly cheaper than hashing everything,
//! and a second algorithm appended to the chain narrows false positives
//! of the first without a byte-for-byte comparison pass.
//!
//! Members of a group are digested concurrently on a bounded rayon
//! pool; results are collected in input order, so cluster membership
//! order stays deterministic.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::digest::Algorithm;
//! use dupescan::duplicates::{refine, RefineConfig};
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! let report = Walker::new(vec![PathBuf::from(".")], WalkerConfig::default()).collect_by_size();
//! let (clusters, stats) = refine(report.groups, &[Algorithm::Blake3], &RefineConfig::default());
//! println!("{} clusters, {} files digested", clusters.len(), stats.digested_files);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::digest::{digest_file, Algorithm, DigestError};
use crate::scanner::SizeGroups;

use super::groups::{retain_duplicates, Cluster};

/// Configuration for the refinement engine.
#[derive(Debug, Clone)]
pub struct RefineConfig {
    /// Number of I/O threads for parallel digesting.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self { io_threads: 4 }
    }
}

impl RefineConfig {
    /// Set the I/O thread count (clamped to at least 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }
}

/// Statistics from a refinement run.
#[derive(Debug, Default)]
pub struct RefineStats {
    /// Digest stages executed (= chain length)
    pub stages: usize,
    /// Successful per-file digest computations across all stages
    pub digested_files: usize,
    /// Files dropped because a digest failed
    pub failed_files: usize,
    /// The digest errors that were absorbed
    pub errors: Vec<DigestError>,
}

/// One surviving group between stages.
struct StageGroup {
    size: u64,
    digest: String,
    paths: Vec<PathBuf>,
}

/// Refine size groups into confirmed clusters using the digest chain.
///
/// The input is singleton-filtered internally, so callers may pass the
/// raw walk result. Clusters come back ordered by ascending size, then
/// lexically by digest within a size; members keep first-seen order.
///
/// Files whose digest fails are excluded from the current and all later
/// stages; a group that degenerates below two readable members is
/// discarded like any other singleton.
///
/// # Arguments
///
/// * `size_groups` - Files grouped by byte length
/// * `chain` - Ordered, non-empty list of algorithms to apply
/// * `config` - Parallelism options
#[must_use]
pub fn refine(
    size_groups: SizeGroups,
    chain: &[Algorithm],
    config: &RefineConfig,
) -> (Vec<Cluster>, RefineStats) {
    refine_with(size_groups, chain, config, digest_file)
}

/// Generic engine, parameterized over the digester for testability.
fn refine_with<F>(
    size_groups: SizeGroups,
    chain: &[Algorithm],
    config: &RefineConfig,
    digester: F,
) -> (Vec<Cluster>, RefineStats)
where
    F: Fn(&Path, Algorithm) -> Result<String, DigestError> + Sync,
{
    debug_assert!(!chain.is_empty(), "chain must be validated before refine");

    let mut stats = RefineStats::default();
    let mut groups: Vec<StageGroup> = retain_duplicates(size_groups)
        .into_iter()
        .map(|(size, paths)| StageGroup {
            size,
            digest: String::new(),
            paths,
        })
        .collect();

    let pool = build_pool(config.io_threads);

    for &algorithm in chain {
        stats.stages += 1;
        log::info!(
            "Digesting {} candidate groups ({} files) with {algorithm}",
            groups.len(),
            groups.iter().map(|g| g.paths.len()).sum::<usize>()
        );

        let mut next = Vec::new();
        for group in groups {
            // Digest members concurrently, collecting in input order.
            let results: Vec<(PathBuf, Result<String, DigestError>)> = run_in(&pool, || {
                group
                    .paths
                    .into_par_iter()
                    .map(|path| {
                        let digest = digester(&path, algorithm);
                        (path, digest)
                    })
                    .collect()
            });

            let mut by_digest: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
            for (path, result) in results {
                match result {
                    Ok(digest) => {
                        stats.digested_files += 1;
                        by_digest.entry(digest).or_default().push(path);
                    }
                    Err(e) => {
                        log::warn!("Failed to digest {}: {e}", path.display());
                        stats.failed_files += 1;
                        stats.errors.push(e);
                    }
                }
            }

            for (digest, paths) in retain_duplicates(by_digest) {
                next.push(StageGroup {
                    size: group.size,
                    digest,
                    paths,
                });
            }
        }
        groups = next;
    }

    let clusters: Vec<Cluster> = groups
        .into_iter()
        .map(|g| Cluster {
            size: g.size,
            digest: g.digest,
            paths: g.paths,
        })
        .collect();

    log::info!(
        "Refinement complete: {} clusters after {} stage(s)",
        clusters.len(),
        stats.stages
    );
    (clusters, stats)
}

/// Build the bounded digest pool, falling back to the global pool.
fn build_pool(io_threads: usize) -> Option<rayon::ThreadPool> {
    match rayon::ThreadPoolBuilder::new()
        .num_threads(io_threads.max(1))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            log::warn!("Failed to create digest thread pool, using global pool: {e}");
            None
        }
    }
}

fn run_in<R: Send>(pool: &Option<rayon::ThreadPool>, task: impl FnOnce() -> R + Send) -> R {
    match pool {
        Some(pool) => pool.install(task),
        None => task(),
    }
}
