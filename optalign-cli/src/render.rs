//! Plain-text views of matrices and alignment reports

use optalign_core::{AlignmentMatrix, AlignmentReport, ScoreScheme, ScoredAlignment};
use std::fmt;

/// The filled matrix, one line per row of `seq2`.
///
/// With pointers each cell reads like `3(\|)`: the value followed by the
/// glyphs of every optimal incoming move. The origin reads `0()`.
pub struct MatrixView<'a> {
    matrix: &'a AlignmentMatrix,
    pointers: bool,
}

impl<'a> MatrixView<'a> {
    pub fn new(matrix: &'a AlignmentMatrix, pointers: bool) -> Self {
        Self { matrix, pointers }
    }

    fn cell_text(&self, row: usize, col: usize) -> String {
        let cell = self.matrix.cell(row, col);
        if self.pointers {
            let glyphs: String = cell.directions.iter().map(char::from).collect();
            format!("{}({})", cell.value, glyphs)
        } else {
            cell.value.to_string()
        }
    }
}

impl fmt::Display for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix;
        let mut width = 1;
        for row in 0..m.rows() {
            for col in 0..m.cols() {
                width = width.max(self.cell_text(row, col).chars().count());
            }
        }

        write!(f, "  {:>w$}", "", w = width)?;
        for symbol in m.seq1() {
            write!(f, " {:>w$}", symbol, w = width)?;
        }
        writeln!(f)?;

        for row in 0..m.rows() {
            let label = if row == 0 { ' ' } else { m.seq2()[row - 1] };
            write!(f, "{}", label)?;
            for col in 0..m.cols() {
                write!(f, " {:>w$}", self.cell_text(row, col), w = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Sequences, costs and mode
pub struct HeaderView<'a> {
    pub seq1: &'a str,
    pub seq2: &'a str,
    pub scheme: &'a ScoreScheme,
}

impl fmt::Display for HeaderView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let costs = &self.scheme.costs;
        writeln!(f, "Sequence 1: {}", self.seq1)?;
        writeln!(f, "Sequence 2: {}", self.seq2)?;
        writeln!(
            f,
            "Costs:      match={} replace={} insert={} delete={}",
            costs.match_cost, costs.replace_cost, costs.insert_cost, costs.delete_cost
        )?;
        writeln!(
            f,
            "Mode:       {} ({})",
            self.scheme.mode.describe(),
            self.scheme.mode
        )
    }
}

/// One numbered alignment: score, both rows and the edit transcript, with
/// symbols separated by single spaces so the columns line up.
pub struct AlignmentView<'a> {
    pub number: usize,
    pub scored: &'a ScoredAlignment,
}

impl fmt::Display for AlignmentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alignment = &self.scored.alignment;
        writeln!(f, "Alignment {} (score {})", self.number, alignment.score)?;
        writeln!(f, "  {}", spaced(alignment.aligned1.chars()))?;
        writeln!(f, "  {}", spaced(alignment.aligned2.chars()))?;
        writeln!(
            f,
            "  {}",
            spaced(self.scored.edit_script.iter().map(|&op| char::from(op)))
        )
    }
}

/// The whole report: header, optional matrix, then every alignment
pub struct ReportView<'a> {
    pub report: &'a AlignmentReport,
    pub matrix: Option<MatrixView<'a>>,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        write!(
            f,
            "{}",
            HeaderView {
                seq1: &report.seq1,
                seq2: &report.seq2,
                scheme: &report.scheme,
            }
        )?;

        if let Some(matrix) = &self.matrix {
            writeln!(f)?;
            write!(f, "{}", matrix)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Start cell ({}, {}), score {}, {} optimal alignment(s), {} branch point(s)",
            report.start.row,
            report.start.col,
            report.score,
            report.len(),
            report.branch_points
        )?;

        for (n, scored) in report.alignments.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{}", AlignmentView { number: n + 1, scored })?;
        }
        Ok(())
    }
}

fn spaced(symbols: impl Iterator<Item = char>) -> String {
    let mut out = String::new();
    for (n, symbol) in symbols.enumerate() {
        if n > 0 {
            out.push(' ');
        }
        out.push(symbol);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use optalign_core::{Costs, GlobalAligner, Mode};

    #[test]
    fn test_matrix_view_with_pointers() {
        let matrix = AlignmentMatrix::build("ab", "b", &ScoreScheme::edit_distance());
        let text = MatrixView::new(&matrix, true).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "          a    b");
        assert_eq!(lines[1], "   0() 1(-) 2(-)");
        assert_eq!(lines[2], "b 1(|) 1(\\) 1(\\)");
    }

    #[test]
    fn test_matrix_view_keeps_glyphs_apart_from_sign() {
        // {Diagonal, Horizontal} with value 1
        let matrix = AlignmentMatrix::build("aa", "a", &ScoreScheme::edit_distance());
        let text = MatrixView::new(&matrix, true).to_string();
        assert_eq!(
            text,
            "            a     a\n    0()  1(-)  2(-)\na  1(|)  0(\\) 1(\\-)\n"
        );

        // {Diagonal} with value -1
        let scheme = ScoreScheme::new(Costs::new(1.0, -1.0, -1.0, -1.0), Mode::Maximize);
        let matrix = AlignmentMatrix::build("a", "b", &scheme);
        let text = MatrixView::new(&matrix, true).to_string();
        assert_eq!(text, "            a\n    0() -1(-)\nb -1(|) -1(\\)\n");
    }

    #[test]
    fn test_matrix_view_values_only() {
        let matrix = AlignmentMatrix::build("ab", "b", &ScoreScheme::edit_distance());
        let text = MatrixView::new(&matrix, false).to_string();
        assert_eq!(text, "    a b\n  0 1 2\nb 1 1 1\n");
    }

    #[test]
    fn test_alignment_view() {
        let report = GlobalAligner::new(ScoreScheme::edit_distance())
            .align("acgt", "agt")
            .unwrap();
        let text = AlignmentView {
            number: 1,
            scored: &report.alignments[0],
        }
        .to_string();
        assert_eq!(
            text,
            "Alignment 1 (score 1)\n  a c g t\n  a _ g t\n  M D M M\n"
        );
    }

    #[test]
    fn test_report_view_lists_every_alignment() {
        let report = GlobalAligner::new(ScoreScheme::edit_distance())
            .align("ab", "ba")
            .unwrap();
        let text = ReportView {
            report: &report,
            matrix: None,
        }
        .to_string();

        assert!(text.starts_with("Sequence 1: ab\nSequence 2: ba\n"));
        assert!(text.contains("Mode:       distance (min)"));
        assert!(text.contains("3 optimal alignment(s)"));
        assert!(text.contains("Alignment 3 (score 2)"));
        assert!(!text.contains("Alignment 4"));
    }
}
