//! Error type shared by the parser, reader, assembler and discovery.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading `.xsc` files or assembling opacity tables.
///
/// Every variant is a data-integrity failure for the file or molecule being
/// processed; nothing here is retried.
#[derive(Debug, Error)]
pub enum XscError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Header line too short, bad field boundary, or a non-numeric token.
    /// `line` is 1-based when known, 0 when parsing a detached line.
    #[error("format error at line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// Reconstructed wavenumber grid disagrees with the declared point count.
    #[error("grid mismatch: header declares {expected} points, grid has {found}")]
    GridMismatch { expected: usize, found: usize },

    /// End of input reached before the declared number of values was read.
    #[error("incomplete record: expected {expected} values, found {found} before end of input")]
    IncompleteRecord { expected: usize, found: usize },

    /// Records do not fill the pressure × temperature grid exactly once.
    #[error(
        "shape mismatch: {records} records cannot fill {pressures} pressures x {temperatures} temperatures"
    )]
    ShapeMismatch {
        records: usize,
        pressures: usize,
        temperatures: usize,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("no cross-section records to assemble")]
    EmptyDataset,

    #[error("unknown interpolation mode: {0:?} (expected \"linear\" or \"exp\")")]
    InvalidInterpMode(String),
}

impl XscError {
    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        XscError::Format {
            line,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XscError>;
