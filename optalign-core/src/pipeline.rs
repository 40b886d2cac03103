//! One-call driver: matrix, traceback, reconstruction and edit scripts.

use crate::alignment::{reconstruct, ExplicitAlignment};
use crate::edit::{edit_script, EditScript, EditSummary};
use crate::error::{AlignError, AlignResult};
use crate::matrix::AlignmentMatrix;
use crate::scoring::ScoreScheme;
use crate::traceback::{traceback, Path, TracebackParams};
use crate::types::{CellIndex, DEFAULT_GAP};
use rayon::prelude::*;
use serde::Serialize;

/// Per-request options. Nothing here is global, two aligners with different
/// options can run side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignerOptions {
    pub traceback: TracebackParams,
    /// Cell to trace back from; `None` is the bottom-right cell
    pub start: Option<CellIndex>,
    pub gap: char,
    /// Reconstruct alignments on the rayon pool
    pub parallel: bool,
    /// Dump the filled matrix and every path at debug level
    pub verbose: bool,
}

impl Default for AlignerOptions {
    fn default() -> Self {
        Self {
            traceback: TracebackParams::default(),
            start: None,
            gap: DEFAULT_GAP,
            parallel: false,
            verbose: false,
        }
    }
}

/// One optimal alignment with its edit script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredAlignment {
    pub alignment: ExplicitAlignment,
    pub edit_script: EditScript,
    pub summary: EditSummary,
}

/// Everything one alignment request produces
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentReport {
    pub seq1: String,
    pub seq2: String,
    pub scheme: ScoreScheme,
    pub start: CellIndex,
    pub score: f64,
    pub branch_points: usize,
    pub alignments: Vec<ScoredAlignment>,
}

impl AlignmentReport {
    pub fn len(&self) -> usize {
        self.alignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }
}

/// Computes every optimal global alignment under one scoring scheme
#[derive(Debug, Clone)]
pub struct GlobalAligner {
    scheme: ScoreScheme,
    options: AlignerOptions,
}

impl GlobalAligner {
    pub fn new(scheme: ScoreScheme) -> Self {
        Self::with_options(scheme, AlignerOptions::default())
    }

    pub fn with_options(scheme: ScoreScheme, options: AlignerOptions) -> Self {
        Self { scheme, options }
    }

    pub fn scheme(&self) -> &ScoreScheme {
        &self.scheme
    }

    pub fn options(&self) -> &AlignerOptions {
        &self.options
    }

    /// Run the full pipeline
    pub fn align(&self, seq1: &str, seq2: &str) -> AlignResult<AlignmentReport> {
        self.check_gap(seq1, seq2)?;
        let matrix = self.build_matrix(seq1, seq2);
        self.report(&matrix)
    }

    pub fn build_matrix(&self, seq1: &str, seq2: &str) -> AlignmentMatrix {
        let matrix = AlignmentMatrix::build(seq1, seq2, &self.scheme);
        if self.options.verbose {
            for (i, row) in matrix.iter_rows().enumerate() {
                let cells: Vec<String> = row
                    .iter()
                    .map(|c| {
                        let glyphs: String = c.directions.iter().map(char::from).collect();
                        format!("{}({})", c.value, glyphs)
                    })
                    .collect();
                log::debug!("row {:>3}: {}", i, cells.join(" "));
            }
        }
        matrix
    }

    /// Trace back through an already filled matrix and render every path
    pub fn report(&self, matrix: &AlignmentMatrix) -> AlignResult<AlignmentReport> {
        let set = traceback(matrix, self.options.start, &self.options.traceback)?;
        log::info!(
            "Found {} optimal alignment(s) with score {}",
            set.len(),
            set.score()
        );

        if self.options.verbose {
            for (n, path) in set.iter().enumerate() {
                let glyphs: String = path.directions().map(char::from).collect();
                log::debug!("path {}: {}", n + 1, glyphs);
            }
        }

        let render = |path: &Path| -> AlignResult<ScoredAlignment> {
            let alignment = reconstruct(path, matrix.seq1(), matrix.seq2(), self.options.gap)?;
            let edit_script = edit_script(&alignment);
            let summary = edit_script.summary();
            Ok(ScoredAlignment {
                alignment,
                edit_script,
                summary,
            })
        };

        let alignments = if self.options.parallel {
            set.paths().par_iter().map(render).collect::<AlignResult<Vec<_>>>()?
        } else {
            set.paths().iter().map(render).collect::<AlignResult<Vec<_>>>()?
        };

        Ok(AlignmentReport {
            seq1: matrix.seq1().iter().collect(),
            seq2: matrix.seq2().iter().collect(),
            scheme: *matrix.scheme(),
            start: set.start(),
            score: set.score(),
            branch_points: set.branch_points(),
            alignments,
        })
    }

    fn check_gap(&self, seq1: &str, seq2: &str) -> AlignResult<()> {
        let gap = self.options.gap;
        if seq1.contains(gap) {
            return Err(AlignError::GapSymbolInSequence { which: 1, gap });
        }
        if seq2.contains(gap) {
            return Err(AlignError::GapSymbolInSequence { which: 2, gap });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Costs, Mode};
    use crate::types::EditOp;

    #[test]
    fn test_identical_pair() {
        let report = GlobalAligner::new(ScoreScheme::edit_distance())
            .align("ab", "ab")
            .unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.score, 0.0);
        assert_eq!(
            report.alignments[0].edit_script.ops(),
            &[EditOp::Match, EditOp::Match]
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scheme = ScoreScheme::new(Costs::new(20.0, -1.0, -1.0, -1.0), Mode::Maximize);
        let sequential = GlobalAligner::new(scheme).align("vintners", "writers").unwrap();
        let parallel = GlobalAligner::with_options(
            scheme,
            AlignerOptions {
                parallel: true,
                ..Default::default()
            },
        )
        .align("vintners", "writers")
        .unwrap();
        assert_eq!(sequential.alignments, parallel.alignments);
    }

    #[test]
    fn test_gap_checked_before_matrix() {
        let err = GlobalAligner::new(ScoreScheme::edit_distance())
            .align("ab", "a_")
            .unwrap_err();
        assert_eq!(err, AlignError::GapSymbolInSequence { which: 2, gap: '_' });
    }

    #[test]
    fn test_custom_start_cell() {
        let aligner = GlobalAligner::with_options(
            ScoreScheme::edit_distance(),
            AlignerOptions {
                start: Some(CellIndex::new(1, 1)),
                ..Default::default()
            },
        );
        let report = aligner.align("ab", "b").unwrap();
        assert_eq!(report.start, CellIndex::new(1, 1));
        assert_eq!(report.score, 1.0);
        assert_eq!(report.alignments[0].alignment.aligned1, "a");
        assert_eq!(report.alignments[0].alignment.aligned2, "b");
    }

    #[test]
    fn test_report_serializes() {
        let report = GlobalAligner::new(ScoreScheme::edit_distance())
            .align("a", "b")
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"], 1.0);
        assert_eq!(json["scheme"]["mode"], "min");
    }
}
