//! Seeded batches run in parallel with rayon.

use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use td_core::design::LevelDesign;

use crate::error::Result;
use crate::runner::{run_campaign, GameReport, RunConfig};

/// Configuration for a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of runs.
    pub count: u32,
    /// Seed of the first run; run `i` uses `seed_start + i`.
    pub seed_start: u64,
    /// Maximum parallel runs (0 = rayon default).
    pub parallel: usize,
    /// Settings shared by every run. Its seed is overridden.
    pub run: RunConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 100,
            seed_start: 0,
            parallel: 0,
            run: RunConfig::default(),
        }
    }
}

/// Aggregate over a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Runs that finished without error.
    pub games: u32,
    /// Runs that won every level.
    pub completed: u32,
    /// `completed / games`.
    pub win_rate: f64,
    /// Mean ticks per run.
    pub mean_ticks: f64,
    /// Mean levels won per run.
    pub mean_levels_won: f64,
    /// Mean kills per run.
    pub mean_kills: f64,
}

impl BatchSummary {
    /// Summarize finished runs.
    #[must_use]
    pub fn from_games(games: &[GameReport]) -> Self {
        if games.is_empty() {
            return Self::default();
        }
        let n = games.len() as f64;
        let completed = games.iter().filter(|g| g.completed).count() as u32;
        let mean = |f: &dyn Fn(&GameReport) -> f64| games.iter().map(f).sum::<f64>() / n;

        Self {
            games: games.len() as u32,
            completed,
            win_rate: f64::from(completed) / n,
            mean_ticks: mean(&|g| g.total_ticks as f64),
            mean_levels_won: mean(&|g| g.levels_won() as f64),
            mean_kills: mean(&|g| g.levels.iter().map(|l| f64::from(l.kills)).sum()),
        }
    }
}

/// A run that failed to start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Seed used.
    pub seed: u64,
    /// Error message.
    pub message: String,
}

/// Everything a batch produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used.
    pub config: BatchConfig,
    /// Aggregate summary.
    pub summary: BatchSummary,
    /// Per-run reports in seed order.
    pub games: Vec<GameReport>,
    /// Runs that failed.
    pub errors: Vec<BatchError>,
    /// Wall-clock runtime.
    pub duration_seconds: f64,
}

impl BatchResults {
    /// Save results as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load results saved by [`BatchResults::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Run `config.count` seeds over the same designs.
pub fn run_batch(designs: &[LevelDesign], config: &BatchConfig) -> BatchResults {
    let start = Instant::now();
    info!(count = config.count, seed_start = config.seed_start, "Starting batch");

    let run_all = || -> Vec<(u64, Result<GameReport>)> {
        (0..config.count)
            .into_par_iter()
            .map(|i| {
                let seed = config.seed_start.wrapping_add(u64::from(i));
                let run = config.run.clone().with_seed(seed);
                (seed, run_campaign(designs.to_vec(), &run))
            })
            .collect()
    };

    let results = if config.parallel > 0 {
        match rayon::ThreadPoolBuilder::new().num_threads(config.parallel).build() {
            Ok(pool) => pool.install(run_all),
            Err(e) => {
                warn!(%e, "Thread pool setup failed, using the global pool");
                run_all()
            }
        }
    } else {
        run_all()
    };

    let mut games = Vec::new();
    let mut errors = Vec::new();
    for (seed, result) in results {
        match result {
            Ok(report) => games.push(report),
            Err(e) => {
                warn!(seed, %e, "Run failed");
                errors.push(BatchError {
                    seed,
                    message: e.to_string(),
                });
            }
        }
    }

    let summary = BatchSummary::from_games(&games);
    let duration_seconds = start.elapsed().as_secs_f64();
    info!(
        games = summary.games,
        win_rate = summary.win_rate,
        seconds = duration_seconds,
        "Batch complete"
    );

    BatchResults {
        config: config.clone(),
        summary,
        games,
        errors,
        duration_seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_test_utils::fixtures::design;

    fn config(count: u32, parallel: usize) -> BatchConfig {
        BatchConfig {
            count,
            seed_start: 40,
            parallel,
            run: RunConfig {
                max_ticks_per_level: 2000,
                ..RunConfig::default()
            },
        }
    }

    fn designs() -> Vec<LevelDesign> {
        vec![design(&["  x   ", "SrrrrF", "   x  "], &[(td_core::behavior::EntityKind::ShipL0, 1)])]
    }

    #[test]
    fn test_batch_uses_consecutive_seeds() {
        let results = run_batch(&designs(), &config(4, 2));
        assert!(results.errors.is_empty());
        let seeds: Vec<u64> = results.games.iter().map(|g| g.seed).collect();
        assert_eq!(seeds, vec![40, 41, 42, 43]);
        assert_eq!(results.summary.games, 4);
    }

    #[test]
    fn test_parallelism_does_not_change_results() {
        let serial = run_batch(&designs(), &config(3, 1));
        let parallel = run_batch(&designs(), &config(3, 3));
        assert_eq!(serial.games, parallel.games);
        assert_eq!(serial.summary, parallel.summary);
    }

    #[test]
    fn test_bad_design_is_recorded_not_fatal() {
        let broken = vec![design(&["S  "], &[])];
        let results = run_batch(&broken, &config(2, 0));
        assert!(results.games.is_empty());
        assert_eq!(results.errors.len(), 2);
        assert_eq!(results.summary, BatchSummary::default());
    }

    #[test]
    fn test_results_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/batch.json");
        let results = run_batch(&designs(), &config(2, 0));

        results.save(&path).unwrap();
        let loaded = BatchResults::load(&path).unwrap();
        let hashes = |r: &BatchResults| r.games.iter().map(|g| (g.seed, g.final_state_hash)).collect::<Vec<_>>();
        assert_eq!(hashes(&loaded), hashes(&results));
        assert_eq!(loaded.summary.games, 2);
    }

    #[test]
    fn test_summary_math() {
        let game = |completed, ticks| GameReport {
            seed: 0,
            levels: Vec::new(),
            completed,
            total_ticks: ticks,
            final_state_hash: 0,
        };
        let summary = BatchSummary::from_games(&[game(true, 100), game(false, 300)]);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.win_rate, 0.5);
        assert_eq!(summary.mean_ticks, 200.0);
    }
}
