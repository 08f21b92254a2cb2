//! Error types for the runner module.
//
// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while preparing a run.
#[derive(Debug, Error, Diagnostic)]
pub enum RunnerError {
    /// The graph snapshot does not exist at the expected path.
    #[error("graph snapshot '{path}' not found in {directory}")]
    #[diagnostic(
        code(ninja_writer::runner::snapshot_not_found),
        help("pass the snapshot with --graph, or use -C to change directory")
    )]
    SnapshotNotFound {
        /// The path that was attempted.
        path: Utf8PathBuf,
        /// Directory description, e.g. "the current directory".
        directory: String,
    },

    /// A command-line path is not valid UTF-8.
    #[error("path '{path}' is not valid UTF-8")]
    #[diagnostic(code(ninja_writer::runner::non_utf8_path))]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },
}
