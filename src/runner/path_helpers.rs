//! Path resolution helpers for the runner module.

use super::RunnerError;
use crate::cli::Cli;
use camino::{Utf8Path, Utf8PathBuf};
use std::path::Path;

fn to_utf8(path: &Path) -> Result<Utf8PathBuf, RunnerError> {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|p| RunnerError::NonUtf8Path {
        path: p.display().to_string(),
    })
}

/// Resolve a command-line path relative to the CLI working directory.
///
/// The `-C/--directory` option behaves like a working directory change for
/// every path supplied on the command line. Absolute paths and the `-`
/// stdout sentinel are returned unchanged.
pub(super) fn resolve_path(cli: &Cli, path: &Path) -> Result<Utf8PathBuf, RunnerError> {
    let file = to_utf8(path)?;
    if file.is_absolute() || file.as_str() == "-" {
        return Ok(file);
    }
    match &cli.directory {
        Some(dir) => Ok(to_utf8(dir)?.join(file)),
        None => Ok(file),
    }
}

/// Fail with [`RunnerError::SnapshotNotFound`] unless `path` exists.
pub(super) fn ensure_snapshot_exists(cli: &Cli, path: &Utf8Path) -> Result<(), RunnerError> {
    if path.exists() {
        return Ok(());
    }
    let directory = match (&cli.directory, path.parent()) {
        (Some(_), Some(parent)) if !parent.as_str().is_empty() => format!("directory '{parent}'"),
        _ => String::from("the current directory"),
    };
    Err(RunnerError::SnapshotNotFound {
        path: path.to_owned(),
        directory,
    })
}
