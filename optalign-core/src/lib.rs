//! optalign core library
//!
//! Exhaustive optimal global alignment: the score matrix records every tied
//! optimal predecessor, the traceback expands each tie into its own path, and
//! every path is rendered as an explicit alignment with an edit script.
//!
//! ```
//! use optalign_core::{GlobalAligner, ScoreScheme};
//!
//! let report = GlobalAligner::new(ScoreScheme::edit_distance())
//!     .align("ab", "ba")
//!     .unwrap();
//! assert_eq!(report.score, 2.0);
//! assert_eq!(report.alignments.len(), 3);
//! ```

pub mod types;
pub mod error;
pub mod scoring;
pub mod matrix;
pub mod traceback;
pub mod alignment;
pub mod edit;
pub mod pipeline;

// Re-export commonly used types and functions
pub use types::{CellIndex, Direction, DirectionSet, EditOp, Step, DEFAULT_GAP};
pub use error::{AlignError, AlignResult};
pub use scoring::{ConfigWarning, Costs, Mode, Parsed, ScoreScheme};
pub use matrix::{AlignmentMatrix, Cell};
pub use traceback::{count_paths, traceback, Path, TracebackParams, TracebackSet, DEFAULT_MAX_PATHS};
pub use alignment::{reconstruct, ExplicitAlignment};
pub use edit::{edit_script, EditScript, EditSummary};
pub use pipeline::{AlignerOptions, AlignmentReport, GlobalAligner, ScoredAlignment};

/// Version information for the optalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
