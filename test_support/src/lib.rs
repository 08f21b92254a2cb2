//! Test utilities for `ninja-writer`.
//!
//! This crate provides a reader for the writer's manifest grammar, an
//! in-memory [`ninja_writer::file_writer::FileWriter`], and sample graphs.

pub mod graphs;
pub mod manifest_reader;
pub mod recording;

pub use manifest_reader::{ReadError, parse_literal, read_manifest};
pub use recording::RecordingWriter;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

/// Create a temporary directory holding `name` with `contents`.
///
/// Returns the directory guard and the UTF-8 path of the new file.
pub fn temp_file(name: &str, contents: &str) -> Result<(TempDir, Utf8PathBuf)> {
    let dir = TempDir::new().context("temp_file: create temp dir")?;
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name))
        .map_err(|p| anyhow::anyhow!("temp_file: non-UTF-8 path {}", p.display()))?;
    fs::write(&path, contents).with_context(|| format!("temp_file: write {path}"))?;
    Ok((dir, path))
}
