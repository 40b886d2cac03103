//! Errors raised by the alignment pipeline.
//!
//! Configuration problems (unknown mode, unknown cost token) are not errors:
//! they surface as [`crate::scoring::ConfigWarning`] and a default is used.

use crate::types::{CellIndex, Direction};
use thiserror::Error;

/// Errors that abort a single alignment request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    #[error("Start cell ({}, {}) is outside a {rows}x{cols} matrix", .start.row, .start.col)]
    StartCellOutOfRange {
        start: CellIndex,
        rows: usize,
        cols: usize,
    },

    #[error("Inconsistent matrix at ({}, {}): {reason}", .at.row, .at.col)]
    InconsistentMatrix { at: CellIndex, reason: String },

    #[error("Traceback would produce more than {limit} optimal paths")]
    PathLimitExceeded { limit: usize },

    #[error("Sequence {which} contains the gap symbol '{gap}'")]
    GapSymbolInSequence { which: u8, gap: char },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl AlignError {
    pub(crate) fn inconsistent<S: Into<String>>(at: CellIndex, reason: S) -> Self {
        Self::InconsistentMatrix {
            at,
            reason: reason.into(),
        }
    }

    pub(crate) fn dangling(at: CellIndex, direction: Direction) -> Self {
        Self::inconsistent(
            at,
            format!("{:?} pointer leads outside the matrix", direction),
        )
    }
}

pub type AlignResult<T> = Result<T, AlignError>;
