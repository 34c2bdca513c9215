//! Obstacle grid: the only owner of cell passability.
//!
//! Indices are always in [0, height) x [0, width). Direct access with an
//! out-of-range position panics; neighbour queries for an out-of-range
//! position return nothing.

use crate::types::{Connectivity, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 4-connected offsets in fixed order: up, down, left, right.
const FOUR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal offsets appended for 8-connectivity: up-left, up-right, down-left, down-right.
const DIAGONAL_OFFSETS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    Empty,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width:  usize,
    cells:  Vec<CellState>,
}

impl Grid {
    /// Panics on a zero dimension; use `SimConfig::validate` at the boundary.
    pub fn new(height: usize, width: usize) -> Self {
        assert!(height > 0 && width > 0, "grid dimensions must be non-zero");
        Self {
            height,
            width,
            cells: vec![CellState::Empty; height * width],
        }
    }

    pub fn height(&self) -> usize { self.height }
    pub fn width(&self)  -> usize { self.width  }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            self.in_bounds(pos),
            "position {pos} outside {}x{} grid",
            self.height,
            self.width
        );
        pos.row * self.width + pos.col
    }

    pub fn cell(&self, pos: Position) -> CellState {
        self.cells[self.index(pos)]
    }

    pub fn is_passable(&self, pos: Position) -> bool {
        self.cell(pos) == CellState::Empty
    }

    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.is_passable(pos)
    }

    pub fn set_blocked(&mut self, pos: Position) {
        let idx = self.index(pos);
        self.cells[idx] = CellState::Full;
    }

    pub fn set_passable(&mut self, pos: Position) {
        let idx = self.index(pos);
        self.cells[idx] = CellState::Empty;
    }

    /// Reset every cell to passable.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Empty);
    }

    /// Blocked cells in row-major order.
    pub fn obstacles(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == CellState::Full)
            .map(|(i, _)| Position::new(i / self.width, i % self.width))
            .collect()
    }

    pub fn neighbors4(&self, pos: Position) -> Vec<Position> {
        self.offset_neighbors(pos, &FOUR_OFFSETS, &[])
    }

    pub fn neighbors8(&self, pos: Position) -> Vec<Position> {
        self.offset_neighbors(pos, &FOUR_OFFSETS, &DIAGONAL_OFFSETS)
    }

    pub fn neighbors(&self, pos: Position, connectivity: Connectivity) -> Vec<Position> {
        match connectivity {
            Connectivity::Four  => self.neighbors4(pos),
            Connectivity::Eight => self.neighbors8(pos),
        }
    }

    fn offset_neighbors(
        &self,
        pos: Position,
        first: &[(isize, isize)],
        second: &[(isize, isize)],
    ) -> Vec<Position> {
        if !self.in_bounds(pos) {
            return Vec::new();
        }
        first
            .iter()
            .chain(second)
            .filter_map(|&(dr, dc)| {
                let row = pos.row.checked_add_signed(dr)?;
                let col = pos.col.checked_add_signed(dc)?;
                let n = Position::new(row, col);
                self.in_bounds(n).then_some(n)
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let ch = match cell {
                    CellState::Empty => '.',
                    CellState::Full  => '#',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
