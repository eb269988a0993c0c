//! Test fixtures and helpers.
//!
//! Levels built from ASCII maps and small helpers for placing entities and
//! running the simulation in tests.

use td_core::behavior::EntityKind;
use td_core::config::SimConfig;
use td_core::design::{builtin_campaign, LevelDesign, ShipEntry};
use td_core::entity::EntityId;
use td_core::grid::{Grid, TileType};
use td_core::level::{Level, Outcome};
use td_core::math::{IVec2, TileCoord};

fn rows(map: &[&str]) -> Vec<String> {
    map.iter().map(|s| (*s).to_string()).collect()
}

/// A design with `map` and the given ship manifest.
#[must_use]
pub fn design(map: &[&str], ships: &[(EntityKind, u32)]) -> LevelDesign {
    LevelDesign {
        title: "TEST".to_string(),
        map: rows(map),
        ships: ships
            .iter()
            .map(|&(kind, count)| ShipEntry { kind, count })
            .collect(),
        bonus: 0,
    }
}

/// A full level from an ASCII map: truck on `S`, flag on `F`.
///
/// # Panics
///
/// Panics if the map does not parse.
#[must_use]
pub fn level_from_map(map: &[&str]) -> Level {
    Level::new(&design(map, &[]), &SimConfig::default()).expect("fixture map should parse")
}

/// Terrain from an ASCII map with no entities at all.
///
/// # Panics
///
/// Panics if the map does not parse.
#[must_use]
pub fn bare_level_from_map(map: &[&str]) -> Level {
    let parsed = design(map, &[])
        .parse_map()
        .expect("fixture map should parse");
    Level::from_grid(parsed.grid, parsed.start, parsed.finish, &SimConfig::default())
}

/// An empty `width` by `height` level of plain ground.
#[must_use]
pub fn open_level(width: i32, height: i32) -> Level {
    Level::from_grid(
        Grid::new(width, height, TileType::Base),
        IVec2::ZERO,
        IVec2::new(width - 1, height - 1),
        &SimConfig::default(),
    )
}

/// Level `index` of the built-in campaign with the given seed.
///
/// # Panics
///
/// Panics if `index` is out of range.
#[must_use]
pub fn campaign_level(index: usize, seed: u64) -> Level {
    let designs = builtin_campaign();
    let config = SimConfig::default().with_seed(seed);
    Level::new(&designs[index], &config).expect("built-in level should load")
}

/// Create an entity at the bottom-left pixel of `tile`.
///
/// # Panics
///
/// Panics if the registry is full or `kind` is not an entity.
pub fn place(level: &mut Level, kind: EntityKind, tile: TileCoord) -> EntityId {
    let id = level.new_entity(kind).expect("fixture entity should fit");
    level.set_position(id, Grid::tile_to_px(tile).as_vec2());
    id
}

/// Tick until `done` holds or `max_ticks` pass. Returns the ticks run when
/// `done` became true.
pub fn run_until<F>(level: &mut Level, max_ticks: u64, mut done: F) -> Option<u64>
where
    F: FnMut(&Level) -> bool,
{
    for ran in 0..max_ticks {
        if done(level) {
            return Some(ran);
        }
        level.tick();
    }
    done(level).then_some(max_ticks)
}

/// Tick until the level ends or `max_ticks` pass.
pub fn run_to_outcome(level: &mut Level, max_ticks: u64) -> Option<Outcome> {
    run_until(level, max_ticks, |l| l.outcome().is_some());
    level.outcome()
}
