use std::fmt;
use std::fmt::{Display, Formatter};

/// Orientation of a slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "across"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// A placement slot: start cell, orientation and fixed length.
///
/// Two variables are equal iff all four fields match. The derived ordering
/// (row, col, direction, length) is the stable iteration order used for
/// every tie-break in the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    #[must_use]
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self { row, col, direction, length }
    }

    #[must_use]
    pub fn across(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Across, length)
    }

    #[must_use]
    pub fn down(row: usize, col: usize, length: usize) -> Self {
        Self::new(row, col, Direction::Down, length)
    }

    /// Cell coordinate of the `k`-th character of this slot.
    #[must_use]
    pub fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    /// All cells covered by this slot, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|k| self.cell(k))
    }

    /// Index of `cell` within this slot, if the slot covers it.
    #[must_use]
    pub fn index_of(&self, cell: (usize, usize)) -> Option<usize> {
        let (r, c) = cell;
        let k = match self.direction {
            Direction::Across if r == self.row && c >= self.col => c - self.col,
            Direction::Down if c == self.col && r >= self.row => r - self.row,
            _ => return None,
        };
        (k < self.length).then_some(k)
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} : {}", self.row, self.col, self.direction, self.length)
    }
}
