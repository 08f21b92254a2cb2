//! A [`FileWriter`] that keeps what it is given.

use camino::{Utf8Path, Utf8PathBuf};
use ninja_writer::file_writer::{FileWriteError, FileWriter};
use std::cell::RefCell;
use std::io;

/// Records every write in memory, optionally failing with a fixed message.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    writes: RefCell<Vec<(Utf8PathBuf, String)>>,
    failure: Option<String>,
}

impl RecordingWriter {
    /// A writer that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that rejects every write with an I/O error carrying
    /// `message`. Rejected writes are not recorded.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            writes: RefCell::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    /// All accepted writes, oldest first.
    pub fn writes(&self) -> Vec<(Utf8PathBuf, String)> {
        self.writes.borrow().clone()
    }

    /// Content of the most recent accepted write.
    pub fn last_content(&self) -> Option<String> {
        self.writes.borrow().last().map(|(_, content)| content.clone())
    }
}

impl FileWriter for RecordingWriter {
    fn write_file(&self, path: &Utf8Path, content: &str) -> Result<(), FileWriteError> {
        if let Some(message) = &self.failure {
            return Err(FileWriteError::Write {
                path: path.to_owned(),
                source: io::Error::other(message.clone()),
            });
        }
        self.writes
            .borrow_mut()
            .push((path.to_owned(), content.to_owned()));
        Ok(())
    }
}
