//! Snapshot serialization: the render-facing view of the engine.
//!
//! A snapshot carries everything a frontend draws: board, entities and the
//! most recent distance fields. It is rebuilt on demand and never stored.

use crate::{
    config::SimConfig,
    types::{Position, RunId, Tick},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub run_id:    RunId,
    pub tick:      Tick,
    pub height:    usize,
    pub width:     usize,
    pub obstacles: Vec<Position>,
    pub humans:    Vec<Position>,
    pub zombies:   Vec<Position>,
    /// Human-sourced field from the last step, as rows.
    pub human_field:  Option<Vec<Vec<u32>>>,
    /// Zombie-sourced field from the last step, as rows.
    pub zombie_field: Option<Vec<Vec<u32>>>,
}

impl SimSnapshot {
    /// The board layout as a config, for restarting a scenario from this point.
    pub fn to_config(&self, seed: u64) -> SimConfig {
        SimConfig {
            height:    self.height,
            width:     self.width,
            seed,
            obstacles: self.obstacles.clone(),
            zombies:   self.zombies.clone(),
            humans:    self.humans.clone(),
        }
    }
}
