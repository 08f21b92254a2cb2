//! Capability-scoped file output.

use super::{FileWriteError, FileWriter};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs as cap_fs};
use std::io::Write;
use tracing::info;

/// Writes manifests to the filesystem.
///
/// Relative paths are resolved against the current directory. Absolute
/// paths are resolved against their nearest existing ancestor. Missing
/// parent directories are created, and the file is flushed and synced
/// before success is reported. An existing file is overwritten.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileWriter;

impl DiskFileWriter {
    /// Create a writer using ambient filesystem authority.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileWriter for DiskFileWriter {
    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<(), FileWriteError> {
        let (dir, relative) = derive_dir_and_relative(path)?;
        write_in_dir(&dir, &relative, content)?;
        info!("Wrote manifest to {path}");
        Ok(())
    }
}

/// Write `content` to `path` beneath `dir`, creating parents as needed.
///
/// # Errors
///
/// Returns a [`FileWriteError`] naming the step that failed.
fn write_in_dir(
    dir: &cap_fs::Dir,
    path: &Utf8Path,
    content: &str,
) -> Result<(), FileWriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        dir.create_dir_all(parent.as_str())
            .map_err(|source| FileWriteError::CreateParentDir {
                path: parent.to_owned(),
                source,
            })?;
    }
    let mut file = dir
        .create(path.as_str())
        .map_err(|source| FileWriteError::Create {
            path: path.to_owned(),
            source,
        })?;
    let write_err = |source| FileWriteError::Write {
        path: path.to_owned(),
        source,
    };
    file.write_all(content.as_bytes()).map_err(write_err)?;
    file.flush().map_err(write_err)?;
    file.sync_all().map_err(write_err)?;
    Ok(())
}

fn derive_dir_and_relative(path: &Utf8Path) -> Result<(cap_fs::Dir, Utf8PathBuf), FileWriteError> {
    if path.is_relative() {
        let dir = cap_fs::Dir::open_ambient_dir(".", ambient_authority()).map_err(|source| {
            FileWriteError::OpenDir {
                path: Utf8PathBuf::from("."),
                source,
            }
        })?;
        return Ok((dir, path.to_owned()));
    }

    let mut ancestors = path.ancestors();
    ancestors.next();
    let (base, dir) = ancestors
        .find_map(|candidate| {
            cap_fs::Dir::open_ambient_dir(candidate.as_str(), ambient_authority())
                .ok()
                .map(|dir| (candidate, dir))
        })
        .ok_or_else(|| FileWriteError::NoExistingAncestor {
            path: path.to_owned(),
        })?;
    let relative = path
        .strip_prefix(base)
        .map_err(|_| FileWriteError::NoExistingAncestor {
            path: path.to_owned(),
        })?
        .to_owned();
    Ok((dir, relative))
}
