use crate::{
    error::{SimError, SimResult},
    types::Position,
};
use serde::{Deserialize, Serialize};

fn default_seed() -> u64 {
    42
}

/// Everything needed to build an engine: board size, initial layout and seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    pub height: usize,
    pub width:  usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub obstacles: Vec<Position>,
    #[serde(default)]
    pub zombies: Vec<Position>,
    #[serde(default)]
    pub humans: Vec<Position>,
}

impl SimConfig {
    /// An empty board with the default seed.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            seed: default_seed(),
            obstacles: Vec::new(),
            zombies: Vec::new(),
            humans: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Load a scenario from a JSON file.
    /// In tests, use SimConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: SimConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject boards the engine cannot represent.
    pub fn validate(&self) -> SimResult<()> {
        if self.height == 0 || self.width == 0 {
            return Err(SimError::InvalidDimensions {
                height: self.height,
                width:  self.width,
            });
        }
        // Distances are u32 and the sentinel is height * width.
        let fits = self
            .height
            .checked_mul(self.width)
            .is_some_and(|cells| u32::try_from(cells).is_ok());
        if !fits {
            return Err(SimError::InvalidDimensions {
                height: self.height,
                width:  self.width,
            });
        }

        for pos in self.obstacles.iter().chain(&self.zombies).chain(&self.humans) {
            self.check_bounds(*pos)?;
        }
        Ok(())
    }

    pub fn check_bounds(&self, pos: Position) -> SimResult<()> {
        if pos.row < self.height && pos.col < self.width {
            Ok(())
        } else {
            Err(SimError::OutOfBounds {
                row:    pos.row,
                col:    pos.col,
                height: self.height,
                width:  self.width,
            })
        }
    }

    /// Small fixed scenario used in tests: a wall with a gap, two zombies
    /// on one side and three humans on the other.
    pub fn default_test() -> Self {
        let obstacles = (0..8)
            .filter(|&row| row != 4)
            .map(|row| Position::new(row, 6))
            .collect();
        Self {
            height: 8,
            width: 12,
            seed: 0xC0FF_EE00,
            obstacles,
            zombies: vec![Position::new(0, 0), Position::new(7, 1)],
            humans: vec![
                Position::new(1, 10),
                Position::new(4, 8),
                Position::new(6, 11),
            ],
        }
    }
}
