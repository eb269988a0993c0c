//! Tile grid: terrain lookup plus the per-tile entity list heads.
//!
//! Tiles never move. Entity membership in a tile's list is managed by the
//! level's position setter; the grid only stores the list heads.

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE_PX;
use crate::list::ListHead;
use crate::math::{IVec2, TileCoord, Vec2};

/// Terrain type of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Void outside the playable area. Impassable.
    None,
    /// Open ground. Buildings go here.
    #[default]
    Base,
    /// Road the truck drives on.
    Road,
    /// Where the truck starts.
    WarehouseStart,
    /// Where the truck is headed.
    WarehouseFinish,
    /// Slow ground for aliens.
    Mud,
    /// Slower ground for aliens.
    Forest,
    /// Impassable for every mover.
    Rock,
}

impl TileType {
    /// Base traversal cost for ground movers, `None` when impassable.
    #[must_use]
    pub const fn path_cost(self) -> Option<u32> {
        match self {
            Self::None | Self::Rock => None,
            Self::Base | Self::Road | Self::WarehouseStart | Self::WarehouseFinish => Some(1),
            Self::Mud => Some(2),
            Self::Forest => Some(3),
        }
    }

    /// True for tiles the truck may drive on.
    #[must_use]
    pub const fn is_truck_route(self) -> bool {
        matches!(self, Self::Road | Self::WarehouseStart | Self::WarehouseFinish)
    }
}

/// Static per-tile flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileFlags(u8);

impl TileFlags {
    /// Ships may land here when play starts.
    pub const ALIEN_SPAWN: Self = Self(1 << 0);

    /// No flags set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// True if every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Combine two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for TileFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Terrain.
    pub kind: TileType,
    /// Static flags.
    pub flags: TileFlags,
    /// Noise level from nearby boomboxes, recomputed every tick.
    pub music: u8,
}

/// Fixed-size grid of tiles, row-major with y = 0 at the bottom.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    lists: Vec<ListHead>,
}

impl Grid {
    /// Create a grid filled with `fill`.
    #[must_use]
    pub fn new(width: i32, height: i32, fill: TileType) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let count = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![
                Tile {
                    kind: fill,
                    ..Tile::default()
                };
                count
            ],
            lists: vec![ListHead::default(); count],
        }
    }

    /// Width in tiles.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size in pixels.
    #[must_use]
    pub fn size_px(&self) -> IVec2 {
        IVec2::new(self.width, self.height) * TILE_SIZE_PX
    }

    /// True if `tile` lies inside the grid.
    #[must_use]
    pub fn in_bounds(&self, tile: TileCoord) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    /// True if the pixel position lies inside the grid area.
    #[must_use]
    pub fn px_in_bounds(&self, pos: Vec2) -> bool {
        let size = self.size_px();
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < size.x as f32 && pos.y < size.y as f32
    }

    /// Clamp a tile coordinate into the grid.
    #[must_use]
    pub fn clamp_tile(&self, tile: TileCoord) -> TileCoord {
        tile.clamp(
            IVec2::ZERO,
            IVec2::new((self.width - 1).max(0), (self.height - 1).max(0)),
        )
    }

    /// Tile under a pixel position, clamped into the grid.
    #[must_use]
    pub fn px_to_tile(&self, px: IVec2) -> TileCoord {
        let size = self.size_px();
        let clamped = px.clamp(
            IVec2::ZERO,
            IVec2::new((size.x - 1).max(0), (size.y - 1).max(0)),
        );
        IVec2::new(clamped.x / TILE_SIZE_PX, clamped.y / TILE_SIZE_PX)
    }

    /// Lower-left pixel of a tile.
    #[must_use]
    pub fn tile_to_px(tile: TileCoord) -> IVec2 {
        tile * TILE_SIZE_PX
    }

    /// Center pixel of a tile.
    #[must_use]
    pub fn tile_center_px(tile: TileCoord) -> IVec2 {
        tile * TILE_SIZE_PX + IVec2::splat(TILE_SIZE_PX / 2)
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| (tile.y * self.width + tile.x) as usize)
    }

    /// Tile at a coordinate.
    #[must_use]
    pub fn tile(&self, tile: TileCoord) -> Option<&Tile> {
        self.index(tile).map(|i| &self.tiles[i])
    }

    /// Mutable tile at a coordinate.
    pub fn tile_mut(&mut self, tile: TileCoord) -> Option<&mut Tile> {
        self.index(tile).map(|i| &mut self.tiles[i])
    }

    /// Terrain at a coordinate, `None` when out of bounds.
    #[must_use]
    pub fn tile_type(&self, tile: TileCoord) -> Option<TileType> {
        self.tile(tile).map(|t| t.kind)
    }

    /// Overwrite the terrain at a coordinate. Out-of-bounds writes are ignored.
    pub fn set_tile_type(&mut self, tile: TileCoord, kind: TileType) {
        if let Some(t) = self.tile_mut(tile) {
            t.kind = kind;
        }
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }

    /// Coordinates of all tiles carrying `flags`.
    pub fn tiles_with_flags(&self, flags: TileFlags) -> impl Iterator<Item = TileCoord> + '_ {
        self.coords()
            .filter(move |&c| self.tile(c).is_some_and(|t| t.flags.contains(flags)))
    }

    /// Entity count on a tile.
    #[must_use]
    pub fn occupancy(&self, tile: TileCoord) -> usize {
        self.list(tile).map_or(0, |l| l.len)
    }

    pub(crate) fn list(&self, tile: TileCoord) -> Option<&ListHead> {
        self.index(tile).map(|i| &self.lists[i])
    }

    pub(crate) fn list_mut(&mut self, tile: TileCoord) -> Option<&mut ListHead> {
        self.index(tile).map(|i| &mut self.lists[i])
    }

    pub(crate) fn clear_music(&mut self) {
        for tile in &mut self.tiles {
            tile.music = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::new(20, 13, TileType::Base);
        assert!(grid.in_bounds(IVec2::new(0, 0)));
        assert!(grid.in_bounds(IVec2::new(19, 12)));
        assert!(!grid.in_bounds(IVec2::new(20, 0)));
        assert!(!grid.in_bounds(IVec2::new(0, -1)));
    }

    #[test]
    fn test_px_to_tile_clamps() {
        let grid = Grid::new(20, 13, TileType::Base);
        assert_eq!(grid.px_to_tile(IVec2::new(9, 17)), IVec2::new(1, 2));
        assert_eq!(grid.px_to_tile(IVec2::new(-5, -5)), IVec2::new(0, 0));
        assert_eq!(grid.px_to_tile(IVec2::new(1000, 1000)), IVec2::new(19, 12));
    }

    #[test]
    fn test_tile_px_mapping() {
        assert_eq!(Grid::tile_to_px(IVec2::new(2, 3)), IVec2::new(16, 24));
        assert_eq!(Grid::tile_center_px(IVec2::new(2, 3)), IVec2::new(20, 28));
    }

    #[test]
    fn test_path_costs() {
        assert_eq!(TileType::Road.path_cost(), Some(1));
        assert_eq!(TileType::Forest.path_cost(), Some(3));
        assert_eq!(TileType::Rock.path_cost(), None);
        assert!(TileType::WarehouseFinish.is_truck_route());
        assert!(!TileType::Base.is_truck_route());
    }

    #[test]
    fn test_flagged_tiles() {
        let mut grid = Grid::new(4, 4, TileType::Base);
        if let Some(t) = grid.tile_mut(IVec2::new(1, 2)) {
            t.flags = TileFlags::ALIEN_SPAWN;
        }
        let spawns: Vec<_> = grid.tiles_with_flags(TileFlags::ALIEN_SPAWN).collect();
        assert_eq!(spawns, vec![IVec2::new(1, 2)]);
    }
}
