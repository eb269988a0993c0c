//! Uniform-cost grid pathfinding.
//!
//! One search serves every mover. The caller passes a weight function giving
//! the cost to enter a tile, or `None` when the mover cannot enter it. The
//! search expands the cheapest frontier tile first, 4-connected only, and
//! gives up after a fixed number of expansions.
//!
//! The open set is a plain vector scanned linearly. Ties go to the tile that
//! entered the open set first, which makes the output fully deterministic for
//! a given grid and weight function.

use std::collections::HashMap;

use crate::consts::PATH_MAX_ITERATIONS;
use crate::grid::{Grid, TileType};
use crate::math::{Direction, TileCoord};

/// Find a path from `start` to `goal`, both inclusive.
///
/// Returns `None` when the goal is unreachable, when `start` is outside the
/// grid, or when the search exceeds [`PATH_MAX_ITERATIONS`] expansions.
pub fn find_path<W>(grid: &Grid, start: TileCoord, goal: TileCoord, weight: W) -> Option<Vec<TileCoord>>
where
    W: FnMut(&Grid, TileCoord) -> Option<u32>,
{
    find_path_with_limit(grid, start, goal, PATH_MAX_ITERATIONS, weight)
}

/// [`find_path`] with an explicit expansion cap.
pub fn find_path_with_limit<W>(
    grid: &Grid,
    start: TileCoord,
    goal: TileCoord,
    max_iterations: usize,
    mut weight: W,
) -> Option<Vec<TileCoord>>
where
    W: FnMut(&Grid, TileCoord) -> Option<u32>,
{
    if !grid.in_bounds(start) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open: Vec<TileCoord> = vec![start];
    let mut g_score: HashMap<TileCoord, u32> = HashMap::new();
    let mut came_from: HashMap<TileCoord, TileCoord> = HashMap::new();
    g_score.insert(start, 0);

    let mut iterations = 0;
    while !open.is_empty() {
        iterations += 1;
        if iterations > max_iterations {
            return None;
        }

        // Strict `<` keeps the first-encountered minimum.
        let mut best = 0;
        let mut best_cost = u32::MAX;
        for (i, tile) in open.iter().enumerate() {
            let cost = g_score.get(tile).copied().unwrap_or(u32::MAX);
            if cost < best_cost {
                best = i;
                best_cost = cost;
            }
        }

        let current = open.remove(best);
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        for dir in Direction::CARDINALS {
            let neighbor = current + dir.offset();
            if !grid.in_bounds(neighbor) {
                continue;
            }
            let Some(cost) = weight(grid, neighbor) else {
                continue;
            };

            let tentative = best_cost.saturating_add(cost);
            let known = g_score.get(&neighbor).copied().unwrap_or(u32::MAX);
            if tentative < known {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                if !open.contains(&neighbor) {
                    open.push(neighbor);
                }
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<TileCoord, TileCoord>, start: TileCoord, goal: TileCoord) -> Vec<TileCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}

/// Prefers open ground, crosses any other passable terrain at double cost.
pub fn default_weight(grid: &Grid, tile: TileCoord) -> Option<u32> {
    let kind = grid.tile_type(tile)?;
    match kind {
        TileType::Base => Some(1),
        other => other.path_cost().map(|_| 2),
    }
}

/// Road and warehouse tiles only.
pub fn truck_weight(grid: &Grid, tile: TileCoord) -> Option<u32> {
    grid.tile_type(tile)
        .filter(|kind| kind.is_truck_route())
        .map(|_| 1)
}

/// Terrain cost plus a penalty for tiles with music playing.
pub fn alien_weight(grid: &Grid, tile: TileCoord) -> Option<u32> {
    let t = grid.tile(tile)?;
    t.kind.path_cost().map(|cost| cost + u32::from(t.music))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::IVec2;

    fn open_grid(w: i32, h: i32) -> Grid {
        Grid::new(w, h, TileType::Base)
    }

    fn assert_adjacent_steps(path: &[TileCoord]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_straight_line_path() {
        let grid = open_grid(10, 10);
        let path = find_path(&grid, IVec2::new(0, 0), IVec2::new(5, 0), default_weight).unwrap();

        assert_eq!(path.len(), 6);
        assert_eq!(path.first(), Some(&IVec2::new(0, 0)));
        assert_eq!(path.last(), Some(&IVec2::new(5, 0)));
        assert_adjacent_steps(&path);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = open_grid(4, 4);
        let path = find_path(&grid, IVec2::new(2, 2), IVec2::new(2, 2), default_weight);
        assert_eq!(path, Some(vec![IVec2::new(2, 2)]));
    }

    #[test]
    fn test_start_out_of_bounds() {
        let grid = open_grid(4, 4);
        assert!(find_path(&grid, IVec2::new(-1, 0), IVec2::new(2, 2), default_weight).is_none());
    }

    #[test]
    fn test_path_around_wall() {
        let mut grid = open_grid(5, 5);
        for y in 1..5 {
            grid.set_tile_type(IVec2::new(2, y), TileType::Rock);
        }

        let path = find_path(&grid, IVec2::new(0, 0), IVec2::new(4, 4), default_weight).unwrap();
        assert!(path.contains(&IVec2::new(2, 0)));
        assert_adjacent_steps(&path);
    }

    #[test]
    fn test_walled_off_goal() {
        let mut grid = open_grid(5, 5);
        for (x, y) in [(3, 4), (4, 3), (3, 3)] {
            grid.set_tile_type(IVec2::new(x, y), TileType::Rock);
        }

        assert!(find_path(&grid, IVec2::new(0, 0), IVec2::new(4, 4), default_weight).is_none());
    }

    #[test]
    fn test_prefers_cheaper_terrain() {
        let mut grid = open_grid(5, 3);
        // Middle row is forest; the top row detour is cheaper.
        for x in 1..4 {
            grid.set_tile_type(IVec2::new(x, 1), TileType::Forest);
        }

        let path = find_path(&grid, IVec2::new(0, 1), IVec2::new(4, 1), alien_weight).unwrap();
        let cost: u32 = path[1..].iter().map(|&t| alien_weight(&grid, t).unwrap()).sum();
        assert_eq!(cost, 6);
    }

    #[test]
    fn test_truck_stays_on_road() {
        let mut grid = open_grid(5, 5);
        for x in 0..5 {
            grid.set_tile_type(IVec2::new(x, 2), TileType::Road);
        }
        grid.set_tile_type(IVec2::new(4, 2), TileType::WarehouseFinish);

        let path = find_path(&grid, IVec2::new(0, 2), IVec2::new(4, 2), truck_weight).unwrap();
        assert!(path.iter().all(|t| t.y == 2));
        assert!(find_path(&grid, IVec2::new(0, 2), IVec2::new(4, 4), truck_weight).is_none());
    }

    #[test]
    fn test_iteration_cap() {
        let grid = open_grid(64, 64);
        let far = IVec2::new(63, 63);

        assert!(find_path(&grid, IVec2::new(0, 0), far, default_weight).is_none());
        assert!(find_path_with_limit(&grid, IVec2::new(0, 0), far, 64 * 64 * 2, default_weight).is_some());
    }

    #[test]
    fn test_deterministic_output() {
        let grid = open_grid(8, 8);
        let a = find_path(&grid, IVec2::new(0, 0), IVec2::new(7, 7), default_weight);
        let b = find_path(&grid, IVec2::new(0, 0), IVec2::new(7, 7), default_weight);
        assert_eq!(a, b);
    }

    #[test]
    fn test_music_penalty() {
        let mut grid = open_grid(3, 3);
        if let Some(t) = grid.tile_mut(IVec2::new(1, 1)) {
            t.music = 4;
        }
        assert_eq!(alien_weight(&grid, IVec2::new(1, 1)), Some(5));
        assert_eq!(alien_weight(&grid, IVec2::new(0, 1)), Some(1));
        assert_eq!(alien_weight(&grid, IVec2::new(3, 1)), None);
    }
}
