//! Multi-path traceback.
//!
//! Walks the recorded optimal directions from a start cell back to the origin
//! and produces one [`Path`] per distinct optimal alignment. Whenever a cell
//! carries more than one direction the walk branches.
//!
//! Steps live in an arena where every node points to the step before it, so
//! all branches share the prefix they had in common when they split. Open
//! branches sit on a LIFO worklist; popping the diagonal branch first gives a
//! depth-first order with Diagonal < Vertical < Horizontal at every tie,
//! identical across runs.

use crate::error::{AlignError, AlignResult};
use crate::matrix::AlignmentMatrix;
use crate::types::{CellIndex, Direction, Step};
use serde::{Deserialize, Serialize};

/// Default bound on the number of optimal paths one traceback may produce
pub const DEFAULT_MAX_PATHS: usize = 100_000;

/// Parameters for path enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracebackParams {
    /// Fail once more than this many paths (complete or pending) exist.
    /// `None` disables the guard.
    pub max_paths: Option<usize>,
}

impl Default for TracebackParams {
    fn default() -> Self {
        Self {
            max_paths: Some(DEFAULT_MAX_PATHS),
        }
    }
}

impl TracebackParams {
    pub fn unbounded() -> Self {
        Self { max_paths: None }
    }

    pub fn with_max_paths(max_paths: usize) -> Self {
        Self {
            max_paths: Some(max_paths),
        }
    }

    fn check(&self, paths: usize) -> AlignResult<()> {
        match self.max_paths {
            Some(limit) if paths > limit => Err(AlignError::PathLimitExceeded { limit }),
            _ => Ok(()),
        }
    }
}

/// One complete optimal path, recorded from the start cell to the origin.
/// The last step always carries [`Direction::Terminal`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    steps: Vec<Step>,
    score: f64,
}

impl Path {
    pub fn new(steps: Vec<Step>, score: f64) -> Self {
        Self { steps, score }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Matrix value at the start cell
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn start(&self) -> Option<CellIndex> {
        self.steps.first().map(|s| s.cell)
    }

    pub fn is_complete(&self) -> bool {
        self.steps.last().is_some_and(|s| s.direction.is_terminal())
    }

    /// Number of moves, i.e. aligned columns (the terminal step excluded)
    pub fn len(&self) -> usize {
        self.steps.iter().filter(|s| !s.direction.is_terminal()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directions of the moves, start to origin
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps
            .iter()
            .map(|s| s.direction)
            .filter(|d| !d.is_terminal())
    }
}

/// All optimal paths from one start cell
#[derive(Debug, Clone, Serialize)]
pub struct TracebackSet {
    start: CellIndex,
    score: f64,
    branch_points: usize,
    paths: Vec<Path>,
}

impl TracebackSet {
    pub fn start(&self) -> CellIndex {
        self.start
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of times the walk split while enumerating
    pub fn branch_points(&self) -> usize {
        self.branch_points
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths
    }
}

impl<'a> IntoIterator for &'a TracebackSet {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

#[derive(Debug, Clone, Copy)]
struct StepNode {
    step: Step,
    parent: Option<usize>,
}

/// Step storage shared by every branch of one traceback
#[derive(Debug, Default)]
struct StepArena {
    nodes: Vec<StepNode>,
}

impl StepArena {
    fn push(&mut self, step: Step, parent: Option<usize>) -> usize {
        self.nodes.push(StepNode { step, parent });
        self.nodes.len() - 1
    }

    fn step(&self, handle: usize) -> Step {
        self.nodes[handle].step
    }

    /// Steps from the root of the chain down to `tail`
    fn materialize(&self, tail: usize) -> Vec<Step> {
        let mut steps = Vec::new();
        let mut cursor = Some(tail);
        while let Some(handle) = cursor {
            let node = self.nodes[handle];
            steps.push(node.step);
            cursor = node.parent;
        }
        steps.reverse();
        steps
    }
}

/// Enumerate every optimal path from `start` (default: the bottom-right
/// cell) to the origin.
pub fn traceback(
    matrix: &AlignmentMatrix,
    start: Option<CellIndex>,
    params: &TracebackParams,
) -> AlignResult<TracebackSet> {
    let start = start.unwrap_or_else(|| matrix.last_cell());
    let start_cell = matrix
        .get(start)
        .ok_or(AlignError::StartCellOutOfRange {
            start,
            rows: matrix.rows(),
            cols: matrix.cols(),
        })?;
    let score = start_cell.value;

    if start_cell.directions.is_empty() {
        if !start.is_origin() {
            return Err(AlignError::inconsistent(start, "start cell has no directions"));
        }
        return Ok(TracebackSet {
            start,
            score,
            branch_points: 0,
            paths: vec![Path::new(vec![Step::new(start, Direction::Terminal)], score)],
        });
    }

    params.check(start_cell.directions.len())?;

    let mut arena = StepArena::default();
    let mut open: Vec<usize> = Vec::new();
    let mut complete: Vec<usize> = Vec::new();
    let mut branch_points = usize::from(start_cell.directions.len() > 1);

    for direction in start_cell.directions.iter().collect::<Vec<_>>().into_iter().rev() {
        open.push(arena.push(Step::new(start, direction), None));
    }

    while let Some(handle) = open.pop() {
        let step = arena.step(handle);
        let prev = step
            .direction
            .predecessor(step.cell)
            .filter(|cell| matrix.contains(*cell))
            .ok_or_else(|| AlignError::dangling(step.cell, step.direction))?;
        let directions = matrix.directions(prev.row, prev.col);

        if directions.is_empty() {
            if !prev.is_origin() {
                return Err(AlignError::inconsistent(prev, "cell has no directions"));
            }
            complete.push(arena.push(Step::new(prev, Direction::Terminal), Some(handle)));
            continue;
        }

        if directions.len() > 1 {
            branch_points += 1;
            params.check(complete.len() + open.len() + directions.len())?;
            log::trace!("branching {} ways at ({}, {})", directions.len(), prev.row, prev.col);
        }

        // Reverse so the diagonal branch is popped first.
        for direction in directions.iter().collect::<Vec<_>>().into_iter().rev() {
            open.push(arena.push(Step::new(prev, direction), Some(handle)));
        }
    }

    log::debug!(
        "Traceback from ({}, {}): {} paths, {} branch points, {} step nodes",
        start.row,
        start.col,
        complete.len(),
        branch_points,
        arena.nodes.len()
    );

    let paths = complete
        .into_iter()
        .map(|tail| Path::new(arena.materialize(tail), score))
        .collect();

    Ok(TracebackSet {
        start,
        score,
        branch_points,
        paths,
    })
}

/// Number of optimal paths from `start` to the origin, without enumerating
/// them. Saturates at `u128::MAX`.
pub fn count_paths(matrix: &AlignmentMatrix, start: Option<CellIndex>) -> AlignResult<u128> {
    let start = start.unwrap_or_else(|| matrix.last_cell());
    if !matrix.contains(start) {
        return Err(AlignError::StartCellOutOfRange {
            start,
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    // counts[i][j] = paths from (i, j) to a terminal cell, filled in
    // dependency order so predecessors are known first.
    let cols = start.col + 1;
    let mut counts = vec![0u128; (start.row + 1) * cols];
    for i in 0..=start.row {
        for j in 0..=start.col {
            let cell = CellIndex::new(i, j);
            let directions = matrix.directions(i, j);
            counts[i * cols + j] = if directions.is_empty() {
                if !cell.is_origin() {
                    return Err(AlignError::inconsistent(cell, "cell has no directions"));
                }
                1
            } else {
                let mut total = 0u128;
                for direction in directions.iter() {
                    let prev = direction
                        .predecessor(cell)
                        .ok_or_else(|| AlignError::dangling(cell, direction))?;
                    total = total.saturating_add(counts[prev.row * cols + prev.col]);
                }
                total
            };
        }
    }

    Ok(counts[start.row * cols + start.col])
}
