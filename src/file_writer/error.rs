//! Errors reported by [`crate::file_writer::FileWriter`] implementations.
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
use std::io;
use thiserror::Error;

/// A failed attempt to persist manifest text.
#[derive(Debug, Error, Diagnostic)]
pub enum FileWriteError {
    /// No ancestor of an absolute path could be opened.
    #[error("no existing ancestor directory for '{path}'")]
    #[diagnostic(code(ninja_writer::file::no_existing_ancestor))]
    NoExistingAncestor {
        /// Requested output path.
        path: Utf8PathBuf,
    },

    /// The base directory could not be opened.
    #[error("failed to open directory '{path}': {source}")]
    #[diagnostic(code(ninja_writer::file::open_dir))]
    OpenDir {
        /// Directory that was opened.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// A missing parent directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    #[diagnostic(code(ninja_writer::file::create_parent_dir))]
    CreateParentDir {
        /// Directory that was created.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("failed to create '{path}': {source}")]
    #[diagnostic(code(ninja_writer::file::create))]
    Create {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// Writing, flushing or syncing the output failed.
    #[error("failed to write '{path}': {source}")]
    #[diagnostic(code(ninja_writer::file::write))]
    Write {
        /// Output path, or `-` for stdout.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}
