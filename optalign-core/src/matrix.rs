//! Alignment matrix construction.
//!
//! `seq1` runs along the columns and `seq2` along the rows, so the grid has
//! `len(seq2) + 1` rows and `len(seq1) + 1` columns. Every cell keeps its
//! value and *all* the directions whose candidate value equals the selected
//! extremum; ties are what later expand into distinct optimal alignments.

use crate::scoring::ScoreScheme;
use crate::types::{CellIndex, Direction, DirectionSet};
use serde::Serialize;

/// One entry of the matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Cell {
    pub value: f64,
    pub directions: DirectionSet,
}

/// Filled score matrix plus the inputs it was built from
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentMatrix {
    seq1: Vec<char>,
    seq2: Vec<char>,
    scheme: ScoreScheme,
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl AlignmentMatrix {
    /// Fill the matrix for `seq1` (columns) against `seq2` (rows).
    ///
    /// Row 0 and column 0 hold the base cases `j * delete` and `i * insert`;
    /// the interior is filled row-major so the three predecessors of a cell
    /// are always resolved before it.
    pub fn build(seq1: &str, seq2: &str, scheme: &ScoreScheme) -> Self {
        let seq1: Vec<char> = seq1.chars().collect();
        let seq2: Vec<char> = seq2.chars().collect();
        let rows = seq2.len() + 1;
        let cols = seq1.len() + 1;

        let mut matrix = Self {
            seq1,
            seq2,
            scheme: *scheme,
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        };

        let costs = scheme.costs;

        // First row (deletions from seq1)
        for j in 1..cols {
            *matrix.cell_mut(0, j) = Cell {
                value: j as f64 * costs.delete_cost,
                directions: DirectionSet::single(Direction::Horizontal),
            };
        }

        // First column (insertions of seq2 symbols)
        for i in 1..rows {
            *matrix.cell_mut(i, 0) = Cell {
                value: i as f64 * costs.insert_cost,
                directions: DirectionSet::single(Direction::Vertical),
            };
        }

        for i in 1..rows {
            for j in 1..cols {
                let diagonal = matrix.value(i - 1, j - 1)
                    + scheme.substitution(matrix.seq1[j - 1], matrix.seq2[i - 1]);
                let vertical = matrix.value(i - 1, j) + costs.insert_cost;
                let horizontal = matrix.value(i, j - 1) + costs.delete_cost;

                let candidates = [diagonal, vertical, horizontal];
                let best = scheme.mode.select(&candidates);

                // Exact equality: costs are sums of the four operation costs.
                let directions = [
                    (Direction::Diagonal, diagonal),
                    (Direction::Vertical, vertical),
                    (Direction::Horizontal, horizontal),
                ]
                .into_iter()
                .filter(|&(_, candidate)| candidate == best)
                .map(|(direction, _)| direction)
                .collect();

                *matrix.cell_mut(i, j) = Cell {
                    value: best,
                    directions,
                };
                log::trace!("cell ({}, {}) = {} {:?}", i, j, best, candidates);
            }
        }

        log::debug!(
            "Built {}x{} {} matrix, final value {}",
            rows,
            cols,
            scheme.mode.describe(),
            matrix.value(rows - 1, cols - 1)
        );

        matrix
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let offset = self.offset(row, col);
        &mut self.cells[offset]
    }

    /// Overwrite the pointers of one cell, leaving its value alone
    #[cfg(test)]
    pub(crate) fn set_directions(&mut self, row: usize, col: usize, directions: DirectionSet) {
        self.cell_mut(row, col).directions = directions;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn seq1(&self) -> &[char] {
        &self.seq1
    }

    pub fn seq2(&self) -> &[char] {
        &self.seq2
    }

    pub fn scheme(&self) -> &ScoreScheme {
        &self.scheme
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        index.row < self.rows && index.col < self.cols
    }

    /// Cell at `index`, or `None` when out of range
    pub fn get(&self, index: CellIndex) -> Option<&Cell> {
        if self.contains(index) {
            self.cells.get(self.offset(index.row, index.col))
        } else {
            None
        }
    }

    /// # Panics
    /// Panics when `(row, col)` is out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) out of range");
        &self.cells[self.offset(row, col)]
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cell(row, col).value
    }

    pub fn directions(&self, row: usize, col: usize) -> DirectionSet {
        self.cell(row, col).directions
    }

    /// Bottom-right cell: the start of a global traceback
    pub fn last_cell(&self) -> CellIndex {
        CellIndex::new(self.rows - 1, self.cols - 1)
    }

    /// Optimal global score (value of the bottom-right cell)
    pub fn score(&self) -> f64 {
        self.value(self.rows - 1, self.cols - 1)
    }

    /// Cells with more than one optimal direction
    pub fn tie_count(&self) -> usize {
        self.cells.iter().filter(|c| c.directions.len() > 1).count()
    }

    /// Rows of cells, top to bottom
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }
}
