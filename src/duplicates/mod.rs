//! Duplicate detection pipeline: grouping, refinement, orchestration.

pub mod finder;
pub mod groups;
pub mod refine;

pub use finder::{DupeFinder, FinderConfig, FinderError, ScanOutcome, ScanSummary};
pub use groups::{member_count, retain_duplicates, Cluster};
pub use refine::{refine, RefineConfig, RefineStats};
