//! Proptest strategies for the level simulation.
//!
//! Inputs are generated as plain data (tiles, kinds, operation scripts) and
//! applied to a level by the test, so a failing case shrinks to a short,
//! readable script.

use proptest::prelude::*;
use td_core::behavior::{EntityFlags, EntityKind};
use td_core::grid::{Grid, TileType};
use td_core::math::{TileCoord, Vec2};

/// Any kind that can exist as an entity.
pub fn arb_entity_kind() -> impl Strategy<Value = EntityKind> {
    let kinds: Vec<EntityKind> = EntityKind::ALL
        .into_iter()
        .filter(|k| !k.info().flags.contains(EntityFlags::NOT_AN_ENTITY))
        .collect();
    proptest::sample::select(kinds)
}

/// A tile inside a `width` by `height` grid.
pub fn arb_tile(width: i32, height: i32) -> impl Strategy<Value = TileCoord> {
    (0..width, 0..height).prop_map(|(x, y)| TileCoord::new(x, y))
}

/// A pixel position around a `width` by `height` grid, including a band
/// of positions just outside it.
pub fn arb_position(width: i32, height: i32) -> impl Strategy<Value = Vec2> {
    let size = Grid::tile_to_px(TileCoord::new(width, height));
    let (w, h) = (size.x as f32, size.y as f32);
    (-16.0f32..w + 16.0, -16.0f32..h + 16.0).prop_map(|(x, y)| Vec2::new(x, y))
}

/// Terrain weighted toward open ground.
pub fn arb_terrain() -> impl Strategy<Value = TileType> {
    prop_oneof![
        6 => Just(TileType::Base),
        2 => Just(TileType::Road),
        2 => Just(TileType::Mud),
        1 => Just(TileType::Forest),
        2 => Just(TileType::Rock),
    ]
}

/// A `width` by `height` grid of random terrain.
pub fn arb_grid(width: i32, height: i32) -> impl Strategy<Value = Grid> {
    proptest::collection::vec(arb_terrain(), (width * height) as usize).prop_map(move |terrain| {
        let mut grid = Grid::new(width, height, TileType::Base);
        for (i, kind) in terrain.into_iter().enumerate() {
            let i = i as i32;
            grid.set_tile_type(TileCoord::new(i % width, i / width), kind);
        }
        grid
    })
}

/// Rates from a trickle to one per tick.
pub fn arb_rate() -> impl Strategy<Value = f32> {
    0.05f32..30.0
}

/// One step of a registry script. Slots index into the handles created so
/// far, modulo their count, and may point at entities already deleted.
#[derive(Debug, Clone)]
pub enum LevelOp {
    /// Create an entity on a tile.
    Spawn(EntityKind, TileCoord),
    /// Move an entity to a pixel position.
    Move(usize, Vec2),
    /// Mark an entity for deletion.
    Delete(usize),
    /// Run one tick.
    Tick,
}

/// A script of up to `len` operations on a `width` by `height` level.
pub fn arb_level_ops(width: i32, height: i32, len: usize) -> impl Strategy<Value = Vec<LevelOp>> {
    let op = prop_oneof![
        3 => (arb_entity_kind(), arb_tile(width, height)).prop_map(|(k, t)| LevelOp::Spawn(k, t)),
        3 => (any::<usize>(), arb_position(width, height)).prop_map(|(s, p)| LevelOp::Move(s, p)),
        2 => any::<usize>().prop_map(LevelOp::Delete),
        1 => Just(LevelOp::Tick),
    ];
    proptest::collection::vec(op, 1..len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn test_grid_strategy_fills_size() {
        let mut runner = TestRunner::deterministic();
        let grid = arb_grid(5, 4).new_tree(&mut runner).unwrap().current();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
    }

    #[test]
    fn test_kind_strategy_skips_shop_items() {
        let mut runner = TestRunner::deterministic();
        for _ in 0..64 {
            let kind = arb_entity_kind().new_tree(&mut runner).unwrap().current();
            assert!(kind.info().is_entity());
        }
    }
}
