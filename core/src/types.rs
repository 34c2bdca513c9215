//! Shared primitive types used across the entire simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A simulation step counter. One tick = one pursue + flee cycle.
pub type Tick = u64;

/// The canonical run identifier.
pub type RunId = String;

/// A cell on the board. Equality is structural; entities have no other identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which population an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Human,
    Zombie,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Human  => "human",
            Self::Zombie => "zombie",
        }
    }

    /// The population this one reacts to.
    pub fn opponent(&self) -> Self {
        match self {
            Self::Human  => Self::Zombie,
            Self::Zombie => Self::Human,
        }
    }

    /// Zombies shamble orthogonally; humans may also step diagonally.
    pub fn connectivity(&self) -> Connectivity {
        match self {
            Self::Human  => Connectivity::Eight,
            Self::Zombie => Connectivity::Four,
        }
    }

    pub fn objective(&self) -> Objective {
        match self {
            Self::Human  => Objective::Flee,
            Self::Zombie => Objective::Pursue,
        }
    }
}

/// Neighbour relation used by a query or a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    /// Up, down, left, right.
    Four,
    /// Four plus the diagonals.
    Eight,
}

/// Direction a mover optimises its distance-field value in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Minimise distance to the sources.
    Pursue,
    /// Maximise distance from the sources.
    Flee,
}

impl Objective {
    /// True when `candidate` is strictly better than `current`.
    pub fn improves(&self, candidate: u32, current: u32) -> bool {
        match self {
            Self::Pursue => candidate < current,
            Self::Flee   => candidate > current,
        }
    }
}
