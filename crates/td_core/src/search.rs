//! Nearest-entity spiral search.
//!
//! Scans square rings of tiles outward from an origin and keeps the best
//! scoring entity seen. The scan stops after a fixed number of tiles, so on
//! large levels the result is the best match near the origin, not
//! necessarily the best match overall. Callers re-run it periodically.

use crate::consts::SPIRAL_MAX_TILES;
use crate::entity::{Entity, EntityId};
use crate::level::Level;
use crate::math::{IVec2, TileCoord};

/// Tiles on the square ring at Chebyshev distance `radius` from `center`,
/// top row first, then the bottom row, then the side columns.
pub fn ring_tiles(center: TileCoord, radius: i32) -> Vec<TileCoord> {
    if radius == 0 {
        return vec![center];
    }

    let mut tiles = Vec::with_capacity((radius * 8) as usize);
    for dx in -radius..=radius {
        tiles.push(center + IVec2::new(dx, radius));
    }
    for dx in -radius..=radius {
        tiles.push(center + IVec2::new(dx, -radius));
    }
    for dy in (-radius + 1)..radius {
        tiles.push(center + IVec2::new(-radius, dy));
        tiles.push(center + IVec2::new(radius, dy));
    }
    tiles
}

impl Level {
    /// Highest-priority entity near `origin`.
    ///
    /// `priority` scores a candidate, or returns `None` to exclude it. Ties
    /// keep the candidate seen first, which is the one on a nearer ring.
    /// Out-of-bounds ring tiles are skipped rather than clamped onto the
    /// nearest edge tile, so edge tiles are never scanned twice. Skipped tiles
    /// do not count toward the [`SPIRAL_MAX_TILES`] budget, which means an
    /// origin near a corner reaches further than one in the middle.
    pub fn find_nearest<F>(&self, origin: TileCoord, priority: F) -> Option<EntityId>
    where
        F: FnMut(&Entity) -> Option<u32>,
    {
        self.find_nearest_within(origin, SPIRAL_MAX_TILES, priority)
    }

    /// [`Level::find_nearest`] with an explicit tile budget.
    pub fn find_nearest_within<F>(&self, origin: TileCoord, max_tiles: usize, mut priority: F) -> Option<EntityId>
    where
        F: FnMut(&Entity) -> Option<u32>,
    {
        let origin = self.grid.clamp_tile(origin);
        let max_radius = self.grid.width().max(self.grid.height());

        let mut best: Option<(u32, EntityId)> = None;
        let mut visited = 0;

        for radius in 0..=max_radius {
            for tile in ring_tiles(origin, radius) {
                if !self.grid.in_bounds(tile) {
                    continue;
                }

                for e in self.entities_on_tile(tile) {
                    if e.is_deleted() {
                        continue;
                    }
                    let Some(score) = priority(e) else {
                        continue;
                    };
                    if best.map_or(true, |(s, _)| score > s) {
                        best = Some((score, e.id()));
                    }
                }

                visited += 1;
                if visited >= max_tiles {
                    return best.map(|(_, id)| id);
                }
            }
        }

        best.map(|(_, id)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::{EntityFlags, EntityKind};
    use crate::config::SimConfig;
    use crate::grid::{Grid, TileType};
    use crate::math::Vec2;

    fn level(w: i32, h: i32) -> Level {
        Level::from_grid(Grid::new(w, h, TileType::Base), IVec2::ZERO, IVec2::ZERO, &SimConfig::default())
    }

    fn put(level: &mut Level, kind: EntityKind, x: i32, y: i32) -> EntityId {
        let id = level.new_entity(kind).unwrap();
        level.set_position(id, Grid::tile_to_px(IVec2::new(x, y)).as_vec2() + Vec2::new(1.0, 1.0));
        id
    }

    fn enemies(e: &Entity) -> Option<u32> {
        e.info().flags.contains(EntityFlags::ENEMY).then_some(1)
    }

    #[test]
    fn test_ring_sizes() {
        assert_eq!(ring_tiles(IVec2::ZERO, 0).len(), 1);
        assert_eq!(ring_tiles(IVec2::ZERO, 1).len(), 8);
        assert_eq!(ring_tiles(IVec2::ZERO, 3).len(), 24);
        assert!(ring_tiles(IVec2::ZERO, 2)
            .iter()
            .all(|t| t.chebyshev(IVec2::ZERO) == 2));
    }

    #[test]
    fn test_nearest_wins_ties() {
        let mut level = level(10, 10);
        let far = put(&mut level, EntityKind::AlienL0, 8, 8);
        let near = put(&mut level, EntityKind::AlienL0, 3, 2);

        assert_eq!(level.find_nearest(IVec2::new(2, 2), enemies), Some(near));
        assert_eq!(level.find_nearest(IVec2::new(9, 9), enemies), Some(far));
    }

    #[test]
    fn test_priority_beats_distance() {
        let mut level = level(10, 10);
        put(&mut level, EntityKind::AlienL0, 3, 3);
        let ship = put(&mut level, EntityKind::ShipL0, 7, 7);

        let found = level.find_nearest(IVec2::new(3, 3), |e| match e.kind() {
            EntityKind::ShipL0 => Some(2),
            EntityKind::AlienL0 => Some(1),
            _ => None,
        });
        assert_eq!(found, Some(ship));
    }

    #[test]
    fn test_excluded_entities_ignored() {
        let mut level = level(6, 6);
        put(&mut level, EntityKind::TurretL0, 2, 2);
        assert_eq!(level.find_nearest(IVec2::new(2, 2), enemies), None);
    }

    #[test]
    fn test_tile_budget_limits_search() {
        let mut level = level(10, 10);
        put(&mut level, EntityKind::AlienL0, 9, 9);

        // Ring 0 and ring 1 around the corner hold 4 in-bounds tiles.
        assert_eq!(level.find_nearest_within(IVec2::ZERO, 4, enemies), None);
        assert!(level.find_nearest_within(IVec2::ZERO, 100, enemies).is_some());
    }

    #[test]
    fn test_corner_budget_counts_only_grid_tiles() {
        let mut level = level(10, 10);
        let alien = put(&mut level, EntityKind::AlienL0, 2, 1);

        // Rings 0 to 2 around the corner cover a 3x3 block of real tiles,
        // and (2, 1) is the last of them scanned.
        assert_eq!(level.find_nearest_within(IVec2::ZERO, 9, enemies), Some(alien));
        assert_eq!(level.find_nearest_within(IVec2::ZERO, 8, enemies), None);
    }

    #[test]
    fn test_origin_clamped() {
        let mut level = level(5, 5);
        let alien = put(&mut level, EntityKind::AlienL0, 4, 4);
        assert_eq!(level.find_nearest(IVec2::new(40, 40), enemies), Some(alien));
    }
}
