//! Persistence seam for rendered manifests.
//!
//! The serialiser never touches the filesystem itself. It hands the
//! finished text to a [`FileWriter`], whose errors it reports unchanged.

mod disk;
mod error;

pub use disk::DiskFileWriter;
pub use error::FileWriteError;

use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, Write};

/// Destination for manifest text.
pub trait FileWriter {
    /// Persist `content` under `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`FileWriteError`] describing why the content could not be
    /// written. Whether a partial file remains is up to the implementation.
    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<(), FileWriteError>;
}

/// Return `true` when `path` is the CLI sentinel for "write to stdout".
#[must_use]
pub fn is_stdout_path(path: &Utf8Path) -> bool {
    path.as_str() == "-"
}

/// Streams manifests to standard output, ignoring the path.
///
/// A closed pipe on the reading side is not treated as an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutWriter;

impl FileWriter for StdoutWriter {
    fn write_file(&self, _path: &Utf8Path, content: &str) -> Result<(), FileWriteError> {
        let mut stdout = io::stdout().lock();
        write_all_ignoring_broken_pipe(&mut stdout, content.as_bytes())
            .and_then(|()| flush_ignoring_broken_pipe(&mut stdout))
            .map_err(|source| FileWriteError::Write {
                path: Utf8PathBuf::from("-"),
                source,
            })
    }
}

fn is_broken_pipe(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

fn write_all_ignoring_broken_pipe(writer: &mut impl Write, buf: &[u8]) -> io::Result<()> {
    match writer.write_all(buf) {
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

fn flush_ignoring_broken_pipe(writer: &mut impl Write) -> io::Result<()> {
    match writer.flush() {
        Err(err) if is_broken_pipe(&err) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    struct Full;

    impl Write for Full {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("device full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[rstest]
    #[case("-", true)]
    #[case("build.ninja", false)]
    #[case("./-", false)]
    fn is_stdout_path_detects_dash(#[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(
            is_stdout_path(Utf8Path::new(candidate)),
            expected,
            "unexpected result for {candidate}"
        );
    }

    #[rstest]
    fn broken_pipe_is_not_an_error() {
        assert!(write_all_ignoring_broken_pipe(&mut ClosedPipe, b"rule cc\n").is_ok());
        assert!(flush_ignoring_broken_pipe(&mut ClosedPipe).is_ok());
    }

    #[rstest]
    fn other_failures_surface() {
        let err = write_all_ignoring_broken_pipe(&mut Full, b"rule cc\n");
        assert!(err.is_err_and(|e| e.to_string() == "device full"));
    }
}
