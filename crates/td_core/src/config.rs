//! Runtime simulation settings.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ENTITIES;
use crate::error::{GameError, Result};

/// Settings that vary between runs without changing level data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for ship placement and spawn rolls.
    pub seed: u64,
    /// Entity slots per level (at most `u16::MAX`).
    pub entity_capacity: usize,
    /// Money at the start of a campaign.
    pub starting_money: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            entity_capacity: MAX_ENTITIES,
            starting_money: 100,
        }
    }
}

impl SimConfig {
    /// Parse a config from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| GameError::DataParse(e.to_string()))
    }

    /// Same config with a different seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Entity capacity clamped to what a 16-bit handle index can address.
    #[must_use]
    pub fn clamped_capacity(&self) -> usize {
        self.entity_capacity.clamp(1, u16::MAX as usize)
    }
}
