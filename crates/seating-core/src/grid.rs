//! Occupancy grid owned by a single layout computation
//!
//! Cells are addressed `(x, y)` with `(0, 0)` at the bottom-left of the chart.
//! Writes go through [`Grid::promote`], which enforces the precedence rules:
//! stage and head-table cells are permanent, a gap cell may only become a head
//! table or a block, and an empty cell may become anything.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Absolute grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "table")]
pub enum CellState {
    #[default]
    Empty,
    Stage,
    HeadTable,
    BlockedGap,
    Blocked,
    /// Numbered guest table `T<n>`
    Table(u32),
}

impl CellState {
    /// Whether a cell in this state may be overwritten with `next`
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        match self {
            Self::Empty => true,
            Self::BlockedGap => matches!(next, Self::HeadTable | Self::Blocked),
            Self::Blocked => matches!(next, Self::Blocked),
            Self::Stage | Self::HeadTable | Self::Table(_) => false,
        }
    }

    /// Stage and head-table cells can never be reclaimed
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        matches!(self, Self::Stage | Self::HeadTable)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Stage => write!(f, "stage"),
            Self::HeadTable => write!(f, "head_table"),
            Self::BlockedGap => write!(f, "blocked_gap"),
            Self::Blocked => write!(f, "blocked"),
            Self::Table(n) => write!(f, "T{n}"),
        }
    }
}

/// Row-major occupancy map, `rows * cols` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Allocate an all-empty grid
    #[must_use]
    pub fn new(cols: u32, rows: u32) -> Self {
        let len = (cols as usize).saturating_mul(rows as usize);
        Self {
            cols,
            rows,
            cells: vec![CellState::Empty; len],
        }
    }

    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.cols && cell.y < self.rows
    }

    /// Signed-coordinate bounds check for caller-supplied positions
    #[must_use]
    pub fn cell_at(&self, x: i64, y: i64) -> Option<Cell> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        let cell = Cell::new(x, y);
        self.contains(cell).then_some(cell)
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell)
            .then(|| (cell.y as usize) * (self.cols as usize) + cell.x as usize)
    }

    /// State of `cell`, `None` when out of bounds
    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<CellState> {
        self.index(cell).and_then(|i| self.cells.get(i).copied())
    }

    /// Write `next` into `cell` if the precedence rules allow it.
    ///
    /// Returns `true` when the cell now holds `next`.
    pub fn promote(&mut self, cell: Cell, next: CellState) -> bool {
        let Some(slot) = self.index(cell).and_then(|i| self.cells.get_mut(i)) else {
            return false;
        };
        if slot.can_become(next) {
            *slot = next;
            true
        } else {
            false
        }
    }

    /// All cells with their state, row by row from `y = 0`
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        let cols = self.cols.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, state)| {
            #[allow(clippy::cast_possible_truncation)]
            let cell = Cell::new((i % cols) as u32, (i / cols) as u32);
            (cell, *state)
        })
    }

    /// Number of cells matching `predicate`
    pub fn count(&self, predicate: impl Fn(CellState) -> bool) -> usize {
        self.cells.iter().filter(|state| predicate(**state)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.count(|s| s == CellState::Empty), 6);
        assert_eq!(grid.get(Cell::new(2, 1)), Some(CellState::Empty));
        assert_eq!(grid.get(Cell::new(3, 0)), None);
    }

    #[test]
    fn test_permanent_states_are_never_overwritten() {
        let mut grid = Grid::new(2, 2);
        let cell = Cell::new(0, 0);
        assert!(grid.promote(cell, CellState::Stage));
        assert!(!grid.promote(cell, CellState::Blocked));
        assert!(!grid.promote(cell, CellState::HeadTable));
        assert_eq!(grid.get(cell), Some(CellState::Stage));
    }

    #[test]
    fn test_gap_promotes_to_head_table_or_block_only() {
        let mut grid = Grid::new(2, 1);
        let a = Cell::new(0, 0);
        let b = Cell::new(1, 0);
        assert!(grid.promote(a, CellState::BlockedGap));
        assert!(grid.promote(b, CellState::BlockedGap));
        assert!(!grid.promote(a, CellState::Table(1)));
        assert!(grid.promote(a, CellState::HeadTable));
        assert!(grid.promote(b, CellState::Blocked));
    }

    #[test]
    fn test_cell_at_rejects_negative_and_outside() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.cell_at(3, 2), Some(Cell::new(3, 2)));
        assert_eq!(grid.cell_at(-1, 0), None);
        assert_eq!(grid.cell_at(4, 0), None);
    }

    #[test]
    fn test_iter_is_row_major() {
        let grid = Grid::new(2, 2);
        let cells: Vec<Cell> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(0, 1),
                Cell::new(1, 1)
            ]
        );
    }
}
