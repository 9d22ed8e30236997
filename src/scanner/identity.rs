//! Filesystem identity tracking for hard-link suppression.
//!
//! # Overview
//!
//! Hard links are multiple directory entries pointing at the same
//! physical file. They share content but are not duplicates of each
//! other, so a physical file must contribute exactly one entry to the
//! size-grouping stage no matter how many names reach it.
//!
//! The tracker owns the single `stat` call made per path: the caller
//! hands it a path and receives either the metadata (first sighting of
//! that identity), an already-seen verdict, or an unreadable verdict
//! when the stat itself failed.
//!
//! # Platform Support
//!
//! - **Unix**: identity is the (device, inode) pair from metadata
//! - **Other**: no inode equivalent is available; every path is
//!   treated as first-seen and hard-link suppression is disabled

use std::collections::HashSet;
use std::fs::Metadata;
use std::path::Path;

/// Outcome of observing one path.
#[derive(Debug)]
pub enum Observation {
    /// First sighting of this physical file; carries the metadata from
    /// the stat so the caller never stats twice.
    FirstSeen(Metadata),
    /// This physical file was already observed under another name.
    AlreadySeen,
    /// The stat failed; the path must be skipped, never escalated.
    Unreadable(std::io::Error),
}

/// Tracks seen physical-file identities within a single scan.
///
/// Create one per scan and discard it after the size-grouping stage;
/// identities are not needed by later stages.
///
/// # Thread Safety
///
/// `IdentityTracker` is not thread-safe. Traversal is single-threaded;
/// wrap the tracker in a lock if that ever changes.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    seen: HashSet<FileId>,
}

impl IdentityTracker {
    /// Create a new, empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Create a tracker with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Stat a path and classify it against the identities seen so far.
    ///
    /// Symlinks are not followed: the stat is `symlink_metadata`, so a
    /// link is observed as itself, not as its target.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to observe
    pub fn observe(&mut self, path: &Path) -> Observation {
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => return Observation::Unreadable(e),
        };

        if let Some(id) = FileId::from_metadata(&metadata) {
            if !self.seen.insert(id) {
                return Observation::AlreadySeen;
            }
        }
        Observation::FirstSeen(metadata)
    }

    /// Number of distinct physical files observed.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

/// Platform-specific identity key for a physical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FileId {
    #[cfg(unix)]
    dev: u64,
    #[cfg(unix)]
    ino: u64,
    #[cfg(not(unix))]
    _phantom: (),
}

impl FileId {
    #[cfg(unix)]
    fn from_metadata(metadata: &Metadata) -> Option<Self> {
        use std::os::unix::fs::MetadataExt;
        Some(Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    #[cfg(not(unix))]
    fn from_metadata(_metadata: &Metadata) -> Option<Self> {
        // No portable inode equivalent; hard links will be narrowed by
        // the digest stages instead of being suppressed up front.
        None
    }
}
