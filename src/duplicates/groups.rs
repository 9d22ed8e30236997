//! Group filtering and the final cluster type.
//!
//! # Overview
//!
//! Every pipeline stage produces a mapping from some key (byte size,
//! then digest) to the files sharing that key. After each stage the
//! singleton filter discards groups with one member, since a lone file
//! cannot be a duplicate of anything in the scanned set.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::retain_duplicates;
//! use std::collections::BTreeMap;
//!
//! let mut groups: BTreeMap<u64, Vec<&str>> = BTreeMap::new();
//! groups.insert(5, vec!["a.txt", "b.txt"]);
//! groups.insert(9, vec!["lonely.txt"]);
//!
//! let groups = retain_duplicates(groups);
//! assert_eq!(groups.len(), 1);
//! assert!(groups.contains_key(&5));
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

/// Drop every group with fewer than two members.
///
/// Pure and order-preserving: surviving entries keep their keys and
/// their member order. Applied after size grouping and after every
/// digest-refinement stage.
#[must_use]
pub fn retain_duplicates<K: Ord, V>(groups: BTreeMap<K, Vec<V>>) -> BTreeMap<K, Vec<V>> {
    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .collect()
}

/// Total member count across all groups.
#[must_use]
pub fn member_count<K, V>(groups: &BTreeMap<K, Vec<V>>) -> usize {
    groups.values().map(Vec::len).sum()
}

/// A confirmed cluster of byte-identical files.
///
/// Produced by the refinement engine once the digest chain is
/// exhausted; every member matched on size and on every configured
/// algorithm. Always holds at least two paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cluster {
    /// Byte length shared by all members
    pub size: u64,
    /// Final digest of the chain, lower-case hex
    pub digest: String,
    /// Member paths in first-seen order
    pub paths: Vec<PathBuf>,
}

impl Cluster {
    /// Number of files in this cluster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the cluster has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Redundant copies beyond the first member.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Bytes occupied by the redundant copies.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }
}
