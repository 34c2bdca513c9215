use crate::types::Position;
use serde::{Deserialize, Serialize};

/// Board edits issued by the host (mouse clicks in a GUI, lines over IPC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum HostCommand {
    AddObstacle    { row: usize, col: usize },
    RemoveObstacle { row: usize, col: usize },
    AddHuman       { row: usize, col: usize },
    AddZombie      { row: usize, col: usize },
    /// Remove every obstacle, human and zombie.
    Clear,
}

impl HostCommand {
    pub fn position(&self) -> Option<Position> {
        match *self {
            Self::AddObstacle { row, col }
            | Self::RemoveObstacle { row, col }
            | Self::AddHuman { row, col }
            | Self::AddZombie { row, col } => Some(Position::new(row, col)),
            Self::Clear => None,
        }
    }
}
