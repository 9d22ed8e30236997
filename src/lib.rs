//! dupescan - Progressive Duplicate File Finder
//!
//! Partitions a file universe into candidate-duplicate groups, first
//! cheaply (by size and filesystem identity), then expensively (by an
//! ordered chain of content digests), narrowing at every stage until
//! only clusters of byte-identical files remain.

pub mod cli;
pub mod digest;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use anyhow::Context;

use cli::{Cli, OutputFormat};
use duplicates::{DupeFinder, FinderConfig};
use error::ExitCode;
use scanner::WalkerConfig;

/// Run the application: validate the chain, scan, report.
///
/// # Errors
///
/// Returns an error for configuration problems (unknown algorithm,
/// empty chain) or failures writing the report; per-file scan errors
/// are absorbed and reflected in the exit code instead.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    // The chain is validated before any traversal begins.
    let chain = digest::parse_chain(&cli.algorithms)?;

    let config = FinderConfig::default()
        .with_walker_config(WalkerConfig {
            include_hidden: cli.dot,
            keep_zero_len: cli.zero,
        })
        .with_chain(chain)
        .with_io_threads(cli.io_threads);

    let outcome = DupeFinder::new(config).scan(&cli.paths)?;

    if let Some(path) = &cli.save_groups {
        output::json::save_size_groups(path, &outcome.size_groups)
            .with_context(|| format!("failed to write size groups to {}", path.display()))?;
        log::info!("Wrote size groups to {}", path.display());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Text => {
            output::text::render_report(&mut out, &outcome.clusters, &outcome.summary)?;
        }
        OutputFormat::Json => {
            output::json::JsonReport::from_outcome(&outcome).write_to(&mut out)?;
        }
    }

    Ok(if outcome.summary.has_errors() {
        ExitCode::PartialSuccess
    } else if outcome.clusters.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    })
}
