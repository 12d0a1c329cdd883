//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::Owner;

/// Settings for starting a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side that takes the first turn.
    pub first_mover: Owner,
    /// Seed for the random opponent. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            first_mover: Owner::Player,
            seed: None,
        }
    }
}
