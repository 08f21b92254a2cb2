//! Errors raised while assembling a [`crate::graph::State`].
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

/// Structural violations detected when adding entities to a graph.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum GraphError {
    /// A pool with this name already exists.
    #[error("duplicate pool '{name}'")]
    #[diagnostic(code(ninja_writer::graph::duplicate_pool))]
    DuplicatePool {
        /// Name of the pool.
        name: String,
    },

    /// A rule with this name already exists.
    #[error("duplicate rule '{name}'")]
    #[diagnostic(code(ninja_writer::graph::duplicate_rule))]
    DuplicateRule {
        /// Name of the rule.
        name: String,
    },

    /// An edge referenced a rule the graph does not define.
    #[error("unknown rule '{rule}' for build edge producing '{target}'")]
    #[diagnostic(
        code(ninja_writer::graph::unknown_rule),
        help("define the rule before adding edges that use it")
    )]
    UnknownRule {
        /// Name of the missing rule.
        rule: String,
        /// First output of the offending edge.
        target: String,
    },

    /// Two edges claim the same output.
    #[error("multiple edges generate '{path}'")]
    #[diagnostic(code(ninja_writer::graph::duplicate_output))]
    DuplicateOutput {
        /// Output path produced more than once.
        path: Utf8PathBuf,
    },

    /// An edge was added without any outputs.
    #[error("build edge using rule '{rule}' has no outputs")]
    #[diagnostic(code(ninja_writer::graph::empty_outputs))]
    EmptyOutputs {
        /// Rule the edge would have used.
        rule: String,
    },
}
