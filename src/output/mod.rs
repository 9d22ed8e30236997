//! Report sinks for scan results.
//!
//! The core pipeline exposes clusters and mappings as plain data; these
//! modules render them:
//! - [`text`]: human-readable cluster report for the terminal
//! - [`json`]: machine-readable report and diagnostic group dumps

pub mod json;
pub mod text;
