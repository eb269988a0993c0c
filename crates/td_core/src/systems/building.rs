//! Passive buildings and the shared placement rule.

use crate::entity::EntityId;
use crate::level::{Level, Stage};
use crate::math::TileCoord;

use super::check_building_death;

/// Tick for buildings that only need to take damage and die.
pub fn tick(level: &mut Level, id: EntityId) {
    if level.stage() != Stage::Play {
        return;
    }
    check_building_death(level, id);
}

/// A building may go on any passable in-bounds tile nothing else blocks.
pub fn can_place(level: &Level, tile: TileCoord) -> bool {
    let passable = level
        .grid()
        .tile_type(tile)
        .is_some_and(|t| t.path_cost().is_some());
    passable && !level.tile_blocked(tile)
}
