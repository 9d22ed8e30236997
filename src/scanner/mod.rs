//! Scanner module: traversal, filesystem identity, and size grouping.
//!
//! This module covers everything that happens before any file content
//! is read:
//! - [`identity`]: hard-link suppression via (device, inode) tracking
//! - [`walker`]: deterministic traversal of the input paths and
//!   grouping of accepted files by byte length
//!
//! Only stat metadata is touched here; content digesting lives in
//! [`crate::digest`].

pub mod identity;
pub mod walker;

use std::path::PathBuf;

pub use identity::{IdentityTracker, Observation};
pub use walker::{SizeGroups, WalkReport, WalkStats, Walker, WalkerConfig};

/// Errors that can occur during traversal and size grouping.
///
/// All of these are non-fatal: the offending path is skipped, the error
/// is recorded in the walk report, and the scan continues.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied while listing a directory.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Metadata could not be read for a specific file.
    #[error("could not stat {path}: {source}")]
    Stat {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Any other I/O error during traversal.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::PermissionDenied(PathBuf::from("/locked"));
        assert_eq!(err.to_string(), "permission denied: /locked");

        let err = ScanError::Stat {
            path: PathBuf::from("/gone"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("could not stat /gone"));
    }
}
