//! Errors raised while serialising a graph.
//
// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use crate::file_writer::FileWriteError;
use miette::Diagnostic;
use thiserror::Error;

/// Failures of [`crate::writer::ManifestWriter::write`].
#[derive(Debug, Error, Diagnostic)]
pub enum WriteError {
    /// An edge names a rule the graph does not define.
    #[error("build edge references unknown rule '{rule}'")]
    #[diagnostic(
        code(ninja_writer::writer::unknown_rule),
        help("the graph is inconsistent; edges must only use defined rules")
    )]
    UnknownRule {
        /// Name of the missing rule.
        rule: String,
    },

    /// An edge holds a node id that does not belong to the graph.
    #[error("build edge references unknown node #{index}")]
    #[diagnostic(code(ninja_writer::writer::unknown_node))]
    UnknownNode {
        /// Offending node index.
        index: usize,
    },

    /// The file writer failed; its message is passed through unchanged.
    #[error(transparent)]
    #[diagnostic(transparent)]
    File(#[from] FileWriteError),
}
