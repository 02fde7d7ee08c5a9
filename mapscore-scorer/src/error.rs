//! Error types raised while loading probability fields and scoring tests.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Raw values could not form a probability field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// The value count disagrees with the declared dimensions.
    #[error("a {width}x{height} field needs {expected} values but {actual} were supplied")]
    Length {
        /// Declared columns.
        width: usize,
        /// Declared rows.
        height: usize,
        /// `width * height`, or `usize::MAX` when that overflows.
        expected: usize,
        /// Values supplied.
        actual: usize,
    },
    /// Rows of a nested field differ in length.
    #[error("row {row} has {actual} values but the first row has {expected}")]
    RaggedRow {
        /// Offending row index.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A cell holds a negative or non-finite value.
    #[error("value {value} at row {row}, column {column} is not a finite non-negative number")]
    InvalidValue {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// The rejected value.
        value: f64,
    },
}

/// Loading a probability field from storage failed.
#[derive(Debug, Error)]
pub enum FieldLoadError {
    /// The file could not be opened or read.
    #[error("failed to read probability field at {path}")]
    Read {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not a decodable image.
    #[error("failed to decode probability field image at {path}")]
    Decode {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from `image`.
        #[source]
        source: image::ImageError,
    },
    /// The decoded image could not be turned into a field.
    #[error("probability field image at {path} is unusable")]
    Field {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Underlying field error.
        #[source]
        source: FieldError,
    },
}

/// Scoring a find cell against a probability field failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    /// The field is not `side × side`.
    #[error("field is {width}x{height} cells but the grid has {side} cells per side")]
    Shape {
        /// Cells per grid side.
        side: u64,
        /// Field columns.
        width: usize,
        /// Field rows.
        height: usize,
    },
}

/// Scoring a stored field for a test failed.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The field could not be loaded.
    #[error(transparent)]
    Load(#[from] FieldLoadError),
    /// The loaded field could not be scored.
    #[error(transparent)]
    Score(#[from] ScoreError),
}
