//! A sequence of levels sharing one set of player stats.

use tracing::info;

use crate::config::SimConfig;
use crate::design::{builtin_campaign, LevelDesign};
use crate::economy::Stats;
use crate::error::{GameError, Result};
use crate::level::{Level, Outcome};

/// Ordered levels plus the one being played.
#[derive(Debug, Clone)]
pub struct Campaign {
    designs: Vec<LevelDesign>,
    config: SimConfig,
    index: usize,
    entry_stats: Stats,
    level: Level,
}

impl Campaign {
    /// Start a campaign at its first level.
    pub fn new(designs: Vec<LevelDesign>, config: SimConfig) -> Result<Self> {
        let first = designs
            .first()
            .ok_or_else(|| GameError::DataParse("campaign has no levels".to_string()))?;
        let entry_stats = Stats::new(config.starting_money);
        let level = Level::with_stats(first, &config, entry_stats.clone())?;

        Ok(Self {
            designs,
            config,
            index: 0,
            entry_stats,
            level,
        })
    }

    /// The built-in campaign.
    pub fn builtin(config: SimConfig) -> Result<Self> {
        Self::new(builtin_campaign(), config)
    }

    /// Level being played.
    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Mutable access to the level being played.
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    /// Index of the current level.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    /// True when there are no levels. A loaded campaign always has at least one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    /// True on the final level.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.designs.len()
    }

    /// Move to the next level, carrying stats over.
    ///
    /// The finished level's bonus is paid if it was won. Returns false when
    /// there is no next level.
    pub fn advance(&mut self) -> Result<bool> {
        if self.is_last() {
            return Ok(false);
        }

        let mut stats = self.level.stats().clone();
        if self.level.outcome() == Some(Outcome::Victory) {
            stats.money += self.designs[self.index].bonus;
        }

        let next = self.index + 1;
        let level = Level::with_stats(&self.designs[next], &self.config, stats.clone())?;
        self.index = next;
        self.entry_stats = stats;
        self.level = level;

        info!(index = self.index, money = self.entry_stats.money, "Advanced to next level");
        Ok(true)
    }

    /// Rebuild the current level with the stats it was entered with.
    pub fn restart(&mut self) -> Result<()> {
        self.level = Level::with_stats(&self.designs[self.index], &self.config, self.entry_stats.clone())?;
        info!(index = self.index, "Level restarted");
        Ok(())
    }
}
