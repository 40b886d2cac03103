//! Explicit alignments rebuilt from traceback paths.

use crate::error::{AlignError, AlignResult};
use crate::traceback::Path;
use crate::types::{Direction, Step};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two equal-length rows: `aligned1` is `seq1` with gaps, `aligned2` is
/// `seq2` with gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplicitAlignment {
    pub aligned1: String,
    pub aligned2: String,
    pub score: f64,
    pub gap: char,
}

impl ExplicitAlignment {
    /// Number of aligned columns
    pub fn len(&self) -> usize {
        self.aligned1.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Column pairs, left to right
    pub fn columns(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.aligned1.chars().zip(self.aligned2.chars())
    }

    pub fn is_gap(&self, symbol: char) -> bool {
        symbol == self.gap
    }

    /// `aligned1` with gaps removed, i.e. the aligned part of `seq1`
    pub fn ungapped1(&self) -> String {
        self.aligned1.chars().filter(|&c| c != self.gap).collect()
    }

    /// `aligned2` with gaps removed, i.e. the aligned part of `seq2`
    pub fn ungapped2(&self) -> String {
        self.aligned2.chars().filter(|&c| c != self.gap).collect()
    }
}

impl fmt::Display for ExplicitAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.aligned1)?;
        write!(f, "{}", self.aligned2)
    }
}

/// Rebuild the explicit alignment described by `path`.
///
/// The path runs from its start cell back to the origin, so columns are
/// produced right to left and reversed at the end. A path that starts at an
/// interior cell `(i, j)` aligns the prefixes `seq1[..j]` and `seq2[..i]`.
pub fn reconstruct(
    path: &Path,
    seq1: &[char],
    seq2: &[char],
    gap: char,
) -> AlignResult<ExplicitAlignment> {
    if seq1.contains(&gap) {
        return Err(AlignError::GapSymbolInSequence { which: 1, gap });
    }
    if seq2.contains(&gap) {
        return Err(AlignError::GapSymbolInSequence { which: 2, gap });
    }
    if !path.is_complete() {
        return Err(AlignError::InvalidPath("path does not end in a terminal step".into()));
    }

    let steps = path.steps();
    let mut row1 = Vec::with_capacity(steps.len());
    let mut row2 = Vec::with_capacity(steps.len());

    for (k, step) in steps.iter().enumerate() {
        if step.direction.is_terminal() {
            break;
        }
        check_link(step, steps.get(k + 1))?;

        let (i, j) = (step.cell.row, step.cell.col);
        let symbol1 = || {
            seq1.get(j - 1)
                .copied()
                .ok_or_else(|| AlignError::InvalidPath(format!("column {j} beyond seq1")))
        };
        let symbol2 = || {
            seq2.get(i - 1)
                .copied()
                .ok_or_else(|| AlignError::InvalidPath(format!("row {i} beyond seq2")))
        };

        match step.direction {
            Direction::Diagonal => {
                row1.push(symbol1()?);
                row2.push(symbol2()?);
            }
            Direction::Vertical => {
                row1.push(gap);
                row2.push(symbol2()?);
            }
            Direction::Horizontal => {
                row1.push(symbol1()?);
                row2.push(gap);
            }
            Direction::Terminal => unreachable!("terminal steps end the loop"),
        }
    }

    Ok(ExplicitAlignment {
        aligned1: row1.into_iter().rev().collect(),
        aligned2: row2.into_iter().rev().collect(),
        score: path.score(),
        gap,
    })
}

/// The step after `step` must sit on the cell its direction points to.
fn check_link(step: &Step, next: Option<&Step>) -> AlignResult<()> {
    let expected = step.direction.predecessor(step.cell);
    match (expected, next) {
        (Some(cell), Some(next)) if next.cell == cell => Ok(()),
        _ => Err(AlignError::InvalidPath(format!(
            "{:?} step at ({}, {}) is not followed by its predecessor",
            step.direction, step.cell.row, step.cell.col
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::AlignmentMatrix;
    use crate::scoring::ScoreScheme;
    use crate::traceback::{traceback, TracebackParams};
    use crate::types::{CellIndex, DEFAULT_GAP};

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn align_all(a: &str, b: &str) -> Vec<ExplicitAlignment> {
        let m = AlignmentMatrix::build(a, b, &ScoreScheme::edit_distance());
        let set = traceback(&m, None, &TracebackParams::default()).unwrap();
        set.iter()
            .map(|p| reconstruct(p, m.seq1(), m.seq2(), DEFAULT_GAP).unwrap())
            .collect()
    }

    #[test]
    fn test_gaps_on_both_sides() {
        let aligns = align_all("acgt", "agt");
        assert_eq!(aligns.len(), 1);
        assert_eq!(aligns[0].aligned1, "acgt");
        assert_eq!(aligns[0].aligned2, "a_gt");
        assert_eq!(aligns[0].score, 1.0);
    }

    #[test]
    fn test_tie_alignments_in_order() {
        let aligns = align_all("ab", "ba");
        let rows: Vec<_> = aligns
            .iter()
            .map(|a| (a.aligned1.as_str(), a.aligned2.as_str()))
            .collect();
        // Vertical at the last cell puts the gap in the last column of row 1.
        assert_eq!(rows, vec![("ab", "ba"), ("ab_", "_ba"), ("_ab", "ba_")]);
    }

    #[test]
    fn test_empty_first_sequence() {
        let aligns = align_all("", "abc");
        assert_eq!(aligns.len(), 1);
        assert_eq!(aligns[0].aligned1, "___");
        assert_eq!(aligns[0].aligned2, "abc");
        assert_eq!(aligns[0].ungapped1(), "");
        assert_eq!(aligns[0].ungapped2(), "abc");
    }

    #[test]
    fn test_gap_symbol_in_input_is_rejected() {
        let m = AlignmentMatrix::build("a_b", "ab", &ScoreScheme::edit_distance());
        let set = traceback(&m, None, &TracebackParams::default()).unwrap();
        let err = reconstruct(&set.paths()[0], m.seq1(), m.seq2(), '_').unwrap_err();
        assert_eq!(err, AlignError::GapSymbolInSequence { which: 1, gap: '_' });

        let ok = reconstruct(&set.paths()[0], m.seq1(), m.seq2(), '-').unwrap();
        assert_eq!(ok.ungapped1(), "a_b");
    }

    #[test]
    fn test_broken_path_is_rejected() {
        let path = Path::new(
            vec![
                Step::new(CellIndex::new(1, 1), Direction::Diagonal),
                Step::new(CellIndex::new(1, 0), Direction::Terminal),
            ],
            0.0,
        );
        let err = reconstruct(&path, &chars("a"), &chars("a"), '_').unwrap_err();
        assert!(matches!(err, AlignError::InvalidPath(_)));

        let open = Path::new(vec![Step::new(CellIndex::new(1, 1), Direction::Diagonal)], 0.0);
        assert!(reconstruct(&open, &chars("a"), &chars("a"), '_').is_err());
    }

    #[test]
    fn test_display_two_rows() {
        let aligns = align_all("ab", "b");
        assert_eq!(aligns[0].to_string(), "ab\n_b");
    }
}
