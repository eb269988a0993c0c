//! Property tests for the registry, tile lists, pathfinding and rates.

use proptest::prelude::*;
use td_core::consts::TICKS_PER_SECOND;
use td_core::entity::EntityId;
use td_core::grid::{Grid, TileType};
use td_core::math::IVec2;
use td_core::pathfinding::{default_weight, find_path};
use td_core::systems::rate_count;
use td_test_utils::fixtures::{open_level, place};
use td_test_utils::strategies::{arb_grid, arb_level_ops, arb_rate, arb_tile, LevelOp};

const W: i32 = 8;
const H: i32 = 8;

proptest! {
    #[test]
    fn prop_handles_never_alias(ops in arb_level_ops(W, H, 60)) {
        let mut level = open_level(W, H);
        let mut handles: Vec<EntityId> = Vec::new();
        let mut doomed: Vec<EntityId> = Vec::new();

        for op in ops {
            match op {
                LevelOp::Spawn(kind, tile) => handles.push(place(&mut level, kind, tile)),
                LevelOp::Move(slot, pos) if !handles.is_empty() => {
                    let id = handles[slot % handles.len()];
                    level.set_position(id, pos);
                }
                LevelOp::Delete(slot) if !handles.is_empty() => {
                    let id = handles[slot % handles.len()];
                    if let Some(e) = level.get_mut(id) {
                        e.mark_deleted();
                        doomed.push(id);
                    }
                }
                LevelOp::Tick => {
                    level.tick();
                    for id in doomed.drain(..) {
                        prop_assert!(level.get(id).is_none());
                    }
                }
                _ => {}
            }

            for &id in &handles {
                if let Some(e) = level.get(id) {
                    prop_assert_eq!(e.id(), id);
                }
            }
        }
    }

    #[test]
    fn prop_tile_lists_stay_consistent(ops in arb_level_ops(W, H, 60)) {
        let mut level = open_level(W, H);
        let mut handles: Vec<EntityId> = Vec::new();

        for op in ops {
            match op {
                LevelOp::Spawn(kind, tile) => handles.push(place(&mut level, kind, tile)),
                LevelOp::Move(slot, pos) if !handles.is_empty() => {
                    level.set_position(handles[slot % handles.len()], pos);
                }
                LevelOp::Delete(slot) if !handles.is_empty() => {
                    if let Some(e) = level.get_mut(handles[slot % handles.len()]) {
                        e.mark_deleted();
                    }
                }
                LevelOp::Tick => level.tick(),
                _ => {}
            }
            prop_assert!(level.validate_spatial());
        }
    }

    #[test]
    fn prop_paths_are_connected(grid in arb_grid(W, H), start in arb_tile(W, H), goal in arb_tile(W, H)) {
        let Some(path) = find_path(&grid, start, goal, default_weight) else {
            return Ok(());
        };

        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            prop_assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
        for &tile in &path[1..] {
            prop_assert!(default_weight(&grid, tile).is_some());
        }

        let again = find_path(&grid, start, goal, default_weight);
        prop_assert_eq!(again.as_ref(), Some(&path));
    }

    #[test]
    fn prop_open_ground_always_reachable(start in arb_tile(W, H), goal in arb_tile(W, H)) {
        let grid = Grid::new(W, H, TileType::Base);
        let path = find_path(&grid, start, goal, default_weight).unwrap();
        prop_assert_eq!(path.len() as u32, start.manhattan(goal) + 1);
    }

    #[test]
    fn prop_walled_goal_unreachable(goal in arb_tile(W, H)) {
        let mut grid = Grid::new(W, H, TileType::Base);
        for offset in [IVec2::new(1, 0), IVec2::new(-1, 0), IVec2::new(0, 1), IVec2::new(0, -1)] {
            grid.set_tile_type(goal + offset, TileType::Rock);
        }
        let start = if goal == IVec2::ZERO { IVec2::new(W - 1, H - 1) } else { IVec2::ZERO };
        prop_assume!(start.manhattan(goal) > 1);
        prop_assert!(find_path(&grid, start, goal, default_weight).is_none());
    }

    #[test]
    fn prop_rate_never_drifts(rate in arb_rate(), ticks in 1u64..20_000) {
        let fired: u64 = (1..=ticks).map(|t| u64::from(rate_count(t, rate))).sum();
        let exact = ticks as f64 * f64::from(rate) / f64::from(TICKS_PER_SECOND);
        prop_assert!((fired as f64 - exact.round()).abs() <= 1.0, "fired {} expected {}", fired, exact);
    }
}
