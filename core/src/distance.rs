//! Multi-source breadth-first distance fields.
//!
//! # Algorithm
//!
//! 1. Fill the field with the sentinel `height * width` (larger than any real path).
//! 2. Every source is visited at distance 0, blocked or not.
//! 3. All sources are queued before the first dequeue, so the result does not
//!    depend on the order sources are supplied.
//! 4. Pop a cell, and for each unvisited 4-neighbour: mark it visited; if it
//!    is passable give it `d + 1` and queue it. Blocked neighbours keep the
//!    sentinel and are never queued.

use crate::{
    error::{SimError, SimResult},
    grid::Grid,
    types::Position,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceField {
    height: usize,
    width:  usize,
    values: Vec<u32>,
}

impl DistanceField {
    /// A field where every cell is unreached.
    pub fn unreached_for(grid: &Grid) -> Self {
        let sentinel = sentinel_for(grid.height(), grid.width());
        Self {
            height: grid.height(),
            width:  grid.width(),
            values: vec![sentinel; grid.cell_count()],
        }
    }

    /// Build a field from row-major values, e.g. a host-supplied or hand-made field.
    pub fn from_values(height: usize, width: usize, values: Vec<u32>) -> SimResult<Self> {
        if height == 0 || width == 0 {
            return Err(SimError::InvalidDimensions { height, width });
        }
        if values.len() != height * width {
            return Err(SimError::FieldLength {
                expected: height * width,
                actual:   values.len(),
            });
        }
        Ok(Self { height, width, values })
    }

    pub fn height(&self) -> usize { self.height }
    pub fn width(&self)  -> usize { self.width  }

    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// The "no path" value for this field's dimensions.
    pub fn unreached(&self) -> u32 {
        sentinel_for(self.height, self.width)
    }

    pub fn get(&self, pos: Position) -> u32 {
        self.values[self.index(pos)]
    }

    pub fn is_reached(&self, pos: Position) -> bool {
        self.get(pos) < self.unreached()
    }

    /// Row vectors, for rendering.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.values.chunks(self.width).map(<[u32]>::to_vec).collect()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    fn index(&self, pos: Position) -> usize {
        assert!(
            pos.row < self.height && pos.col < self.width,
            "position {pos} outside {}x{} field",
            self.height,
            self.width
        );
        pos.row * self.width + pos.col
    }

    fn set(&mut self, pos: Position, value: u32) {
        let idx = self.index(pos);
        self.values[idx] = value;
    }
}

fn sentinel_for(height: usize, width: usize) -> u32 {
    u32::try_from(height * width).unwrap_or(u32::MAX)
}

/// Shortest 4-connected passable-path distance from every cell to the
/// nearest source. Sources must be in bounds.
pub fn compute_distance_field(sources: &[Position], grid: &Grid) -> DistanceField {
    let mut field = DistanceField::unreached_for(grid);
    let mut visited = vec![false; grid.cell_count()];
    let mut frontier: VecDeque<Position> = VecDeque::with_capacity(sources.len());

    for &source in sources {
        let idx = field.index(source);
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        field.set(source, 0);
        frontier.push_back(source);
    }

    while let Some(cell) = frontier.pop_front() {
        let distance = field.get(cell) + 1;
        for neighbor in grid.neighbors4(cell) {
            let idx = field.index(neighbor);
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            if grid.is_passable(neighbor) {
                field.set(neighbor, distance);
                frontier.push_back(neighbor);
            }
        }
    }

    field
}
