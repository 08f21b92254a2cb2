//! CLI execution.
//!
//! This module keeps `main` minimal by providing a single entry point: load
//! the graph snapshot, build the [`State`], and serialise it to the chosen
//! destination.

mod error;
mod path_helpers;

pub use error::RunnerError;

use crate::cli::Cli;
use crate::file_writer::{DiskFileWriter, FileWriter, StdoutWriter, is_stdout_path};
use crate::graph::State;
use crate::snapshot;
use crate::writer::ManifestWriter;
use anyhow::{Context, Result};
use path_helpers::{ensure_snapshot_exists, resolve_path};
use tracing::debug;

/// Execute the parsed [`Cli`].
///
/// # Errors
///
/// Returns an error if the snapshot is missing or malformed, describes an
/// inconsistent graph, or the manifest cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let graph_path = resolve_path(cli, &cli.graph)?;
    let output_path = resolve_path(cli, &cli.output)?;
    ensure_snapshot_exists(cli, &graph_path)?;

    let snapshot = snapshot::load(&graph_path)?;
    let state = State::from_snapshot(&snapshot)
        .with_context(|| format!("building graph from {graph_path}"))?;

    let file_writer: &dyn FileWriter = if is_stdout_path(&output_path) {
        &StdoutWriter
    } else {
        &DiskFileWriter
    };
    debug!(output = %output_path, "writing manifest");
    ManifestWriter::new(&state, file_writer)
        .write(&output_path)
        .with_context(|| format!("writing manifest {output_path}"))?;
    Ok(())
}
