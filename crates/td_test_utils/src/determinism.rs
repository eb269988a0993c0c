//! Determinism testing utilities.
//!
//! A level is fully determined by its design, its config (seed included)
//! and the sequence of player actions. Running the same setup twice must
//! produce the same [`Level::state_hash`] after every tick.
//!
//! Sources of divergence to watch for:
//!
//! - **Hash map iteration**: the simulation only walks the entity list and
//!   tile lists, never a `HashMap`.
//! - **Randomness**: every roll comes from the level's seeded generator.
//! - **Wall clock**: ticks are driven by the caller, never by real time.

use std::thread;

use td_core::level::Level;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Final hash from each run.
    pub hashes: Vec<u64>,
    /// Number of ticks simulated per run.
    pub ticks: u64,
}

impl DeterminismResult {
    /// Distinct hashes (1 for a deterministic simulation).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that every run agreed.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            panic!(
                "Level simulation is non-deterministic!\n\
                 Runs: {}\n\
                 Ticks: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.ticks,
                self.unique_hashes().len(),
                self.hashes
            );
        }
    }
}

/// Run a setup `runs` times, stepping each copy `ticks` times, and compare
/// the final hashes.
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    ticks: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();
        for _ in 0..ticks {
            step(&mut state);
        }
        hashes.push(hash(&state));
    }

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        hashes,
        ticks,
    }
}

/// [`verify_determinism`] for a [`Level`] stepped with [`Level::tick`].
pub fn verify_level_determinism<F>(setup: F, runs: usize, ticks: u64) -> DeterminismResult
where
    F: Fn() -> Level,
{
    verify_determinism(runs, ticks, setup, Level::tick, Level::state_hash)
}

/// Run `num_levels` copies on scoped threads and collect the final hashes.
///
/// # Panics
///
/// Panics if a simulation thread panics.
pub fn run_parallel_levels<F>(setup: F, num_levels: usize, ticks: u64) -> DeterminismResult
where
    F: Fn() -> Level + Sync,
{
    let hashes: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..num_levels)
            .map(|_| {
                s.spawn(|| {
                    let mut level = setup();
                    for _ in 0..ticks {
                        level.tick();
                    }
                    level.state_hash()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("simulation thread panicked"))
            .collect()
    });

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        hashes,
        ticks,
    }
}

/// Step two copies side by side and return the first tick after which
/// their hashes differ, or `None` if they never do.
pub fn find_first_divergence<F>(setup: F, ticks: u64) -> Option<u64>
where
    F: Fn() -> Level,
{
    let mut a = setup();
    let mut b = setup();

    if a.state_hash() != b.state_hash() {
        return Some(0);
    }

    for tick in 1..=ticks {
        a.tick();
        b.tick();
        if a.state_hash() != b.state_hash() {
            tracing::debug!(tick, "Levels diverged");
            return Some(tick);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    fn playing_level() -> Level {
        let mut level = fixtures::campaign_level(0, 7);
        level.go();
        level
    }

    #[test]
    fn test_builtin_level_is_deterministic() {
        verify_level_determinism(playing_level, 3, 300).assert_deterministic();
    }

    #[test]
    fn test_parallel_runs_agree() {
        run_parallel_levels(playing_level, 4, 200).assert_deterministic();
    }

    #[test]
    fn test_no_divergence() {
        assert_eq!(find_first_divergence(playing_level, 150), None);
    }

    #[test]
    fn test_divergence_reported() {
        let result = verify_determinism(3, 1, || 0u64, |_| {}, |_| 0);
        assert!(result.is_deterministic);

        let odd = DeterminismResult {
            is_deterministic: false,
            hashes: vec![1, 2, 1],
            ticks: 10,
        };
        assert_eq!(odd.unique_hashes(), vec![1, 2]);
    }
}
