use serde::{Deserialize, Serialize};

/// Gap marker used when rendering explicit alignments
pub const DEFAULT_GAP: char = '_';

/// Enumeration order for tied directions. Fixes output order.
pub const DIRECTION_ORDER: [Direction; 3] = [
    Direction::Diagonal,
    Direction::Vertical,
    Direction::Horizontal,
];

/// Move into a cell from one of its predecessors.
///
/// `Terminal` marks the last step of a complete path: the cell has no
/// recorded predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Diagonal,
    Vertical,
    Horizontal,
    Terminal,
}

impl Direction {
    /// Cell this direction points back to, or `None` when it would leave the
    /// matrix (or the direction is `Terminal`).
    pub fn predecessor(self, cell: CellIndex) -> Option<CellIndex> {
        match self {
            Direction::Diagonal if cell.row > 0 && cell.col > 0 => {
                Some(CellIndex::new(cell.row - 1, cell.col - 1))
            }
            Direction::Vertical if cell.row > 0 => Some(CellIndex::new(cell.row - 1, cell.col)),
            Direction::Horizontal if cell.col > 0 => Some(CellIndex::new(cell.row, cell.col - 1)),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Direction::Terminal)
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Diagonal => 0b001,
            Direction::Vertical => 0b010,
            Direction::Horizontal => 0b100,
            Direction::Terminal => 0,
        }
    }
}

impl From<Direction> for char {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Diagonal => '\\',
            Direction::Vertical => '|',
            Direction::Horizontal => '-',
            Direction::Terminal => '.',
        }
    }
}

/// Set of optimal incoming directions of a matrix cell (0 to 3 members).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);

    pub fn single(direction: Direction) -> Self {
        let mut set = Self::EMPTY;
        set.insert(direction);
        set
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn contains(&self, direction: Direction) -> bool {
        !direction.is_terminal() && self.0 & direction.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in diagonal, vertical, horizontal order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        DIRECTION_ORDER.iter().copied().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

/// Zero-based (row, col) position in the alignment matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub col: usize,
}

impl CellIndex {
    pub const ORIGIN: CellIndex = CellIndex { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_origin(&self) -> bool {
        self.row == 0 && self.col == 0
    }
}

impl From<(usize, usize)> for CellIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// One step of a traceback path: a cell and the direction taken out of it
/// towards the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub cell: CellIndex,
    pub direction: Direction,
}

impl Step {
    pub fn new(cell: CellIndex, direction: Direction) -> Self {
        Self { cell, direction }
    }
}

/// Per-column edit operation of an explicit alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOp {
    Match,
    Replace,
    Insert,
    Delete,
}

impl From<EditOp> for char {
    fn from(op: EditOp) -> Self {
        match op {
            EditOp::Match => 'M',
            EditOp::Replace => 'R',
            EditOp::Insert => 'I',
            EditOp::Delete => 'D',
        }
    }
}

impl TryFrom<char> for EditOp {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'M' => Ok(EditOp::Match),
            'R' => Ok(EditOp::Replace),
            'I' => Ok(EditOp::Insert),
            'D' => Ok(EditOp::Delete),
            other => Err(other),
        }
    }
}
