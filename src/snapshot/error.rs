//! Snapshot loading diagnostics.
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
use miette::{Diagnostic, NamedSource, SourceSpan};
use std::io;
use thiserror::Error;

/// Failures while reading or decoding a graph snapshot.
#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read graph snapshot '{path}': {source}")]
    #[diagnostic(code(ninja_writer::snapshot::read))]
    Read {
        /// Path that was read.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The text is not valid YAML or JSON.
    #[error("{message}")]
    #[diagnostic(code(ninja_writer::snapshot::syntax))]
    Syntax {
        /// Summary including the line and column.
        message: String,
        /// Snapshot text, for rendering the span.
        #[source_code]
        src: NamedSource<String>,
        /// Location of the failure, when known.
        #[label("here")]
        span: Option<SourceSpan>,
    },

    /// The document parsed but does not describe a graph.
    #[error("graph snapshot '{name}' has an invalid structure: {source}")]
    #[diagnostic(
        code(ninja_writer::snapshot::structure),
        help("expected top-level keys: bindings, pools, rules, edges")
    )]
    Structure {
        /// Display name of the snapshot.
        name: String,
        /// Deserialisation failure.
        source: serde_json::Error,
    },
}

impl SnapshotError {
    /// Build a [`SnapshotError::Syntax`] pointing at `line`/`column`
    /// (both 1-based, `0` meaning unknown).
    pub(super) fn syntax(
        name: &str,
        src: &str,
        line: u64,
        column: u64,
        details: &str,
    ) -> Self {
        let span = (line > 0).then(|| SourceSpan::from((byte_index(src, line, column), 1)));
        Self::Syntax {
            message: format!(
                "failed to parse graph snapshot '{name}' at line {}, column {}: {details}",
                line.max(1),
                column.max(1),
            ),
            src: NamedSource::new(name, src.to_owned()),
            span,
        }
    }
}

/// Translate a 1-based line and column into a byte offset in `src`.
///
/// Offsets past the end of a line clamp to the line end, and `\r\n` line
/// endings are tolerated.
fn byte_index(src: &str, line: u64, column: u64) -> usize {
    let target_line = usize::try_from(line.saturating_sub(1)).unwrap_or(usize::MAX);
    let target_column = usize::try_from(column.saturating_sub(1)).unwrap_or(usize::MAX);
    let mut offset = 0usize;
    for (idx, segment) in src.split_inclusive('\n').enumerate() {
        if idx == target_line {
            let without_newline = segment.strip_suffix('\n').unwrap_or(segment);
            let cleaned = without_newline
                .strip_suffix('\r')
                .unwrap_or(without_newline);
            let column_offset = cleaned
                .char_indices()
                .nth(target_column)
                .map_or(cleaned.len(), |(byte_idx, _)| byte_idx);
            return offset + column_offset;
        }
        offset += segment.len();
    }
    src.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc\ndef", 2, 2, 5)]
    #[case("abc\r\ndef", 1, 9, 3)]
    #[case("é: [", 1, 2, 2)]
    #[case("abc", 7, 1, 3)]
    fn byte_index_maps_line_and_column(
        #[case] src: &str,
        #[case] line: u64,
        #[case] column: u64,
        #[case] expected: usize,
    ) {
        assert_eq!(byte_index(src, line, column), expected);
    }

    #[rstest]
    fn unknown_location_has_no_span() {
        let err = SnapshotError::syntax("graph.json", "{", 0, 0, "EOF");
        assert!(matches!(err, SnapshotError::Syntax { span: None, .. }));
        assert!(err.to_string().contains("line 1, column 1"));
    }
}
