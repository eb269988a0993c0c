//! Scripted build-phase strategies for headless play.
//!
//! A strategy runs once per level, during the build stage, and spends money
//! through the same shop calls a player would use.

use serde::{Deserialize, Serialize};
use tracing::debug;

use td_core::behavior::EntityKind;
use td_core::level::Level;
use td_core::math::TileCoord;

/// How the automated player spends its money before pressing go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Strategy {
    /// Buy nothing.
    Idle,
    /// Repeatedly buy the priciest affordable turret or mine and put it as
    /// close to the road as possible: mines on the road, turrets beside it.
    #[default]
    Greedy,
}

/// One purchase made by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// What was bought.
    pub kind: EntityKind,
    /// Where it went.
    pub tile: TileCoord,
}

impl Strategy {
    /// Spend money on `level`. Returns what was placed, in order.
    pub fn plan(self, level: &mut Level) -> Vec<Placement> {
        match self {
            Self::Idle => Vec::new(),
            Self::Greedy => greedy(level),
        }
    }
}

fn is_defense(kind: EntityKind) -> bool {
    let info = kind.info();
    info.turret.is_some() || info.mine.is_some()
}

fn greedy(level: &mut Level) -> Vec<Placement> {
    let road: Vec<TileCoord> = level
        .grid()
        .coords()
        .filter(|&t| level.grid().tile_type(t).is_some_and(|k| k.is_truck_route()))
        .collect();
    let road_distance = |tile: TileCoord| road.iter().map(|&r| r.manhattan(tile)).min().unwrap_or(u32::MAX);

    let mut exhausted: Vec<EntityKind> = Vec::new();
    let mut placed = Vec::new();

    loop {
        let stats = level.stats();
        let mut best: Option<EntityKind> = None;
        for kind in EntityKind::purchasable() {
            let price = kind.info().buy_price;
            let usable = is_defense(kind)
                && stats.unlocked.contains(&kind)
                && stats.can_afford(price)
                && !exhausted.contains(&kind);
            if usable && best.map_or(true, |b| price > b.info().buy_price) {
                best = Some(kind);
            }
        }
        let Some(kind) = best else {
            break;
        };

        let wants_road = kind.info().mine.is_some();
        let tile = level
            .grid()
            .coords()
            .filter(|&t| road.contains(&t) == wants_road && level.can_place(kind, t))
            .min_by_key(|&t| road_distance(t));

        let bought = tile.filter(|&t| level.buy(kind, t).succeeded());
        match bought {
            Some(tile) => {
                debug!(?kind, ?tile, "Strategy placed");
                placed.push(Placement { kind, tile });
            }
            None => exhausted.push(kind),
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_core::level::Stage;
    use td_core::math::IVec2;
    use td_test_utils::fixtures::level_from_map;

    const MAP: &[&str] = &["      ", "SrrrrF", "      ", "  x   "];

    #[test]
    fn test_idle_buys_nothing() {
        let mut level = level_from_map(MAP);
        let money = level.stats().money;
        assert!(Strategy::Idle.plan(&mut level).is_empty());
        assert_eq!(level.stats().money, money);
    }

    #[test]
    fn test_greedy_spends_down_next_to_road() {
        let mut level = level_from_map(MAP);
        let price = EntityKind::TurretL0.info().buy_price;
        let money = level.stats().money;

        let placed = Strategy::Greedy.plan(&mut level);

        assert_eq!(placed.len() as u32, money / price);
        assert!(level.stats().money < price);
        for p in &placed {
            assert_eq!(p.kind, EntityKind::TurretL0);
            // The road runs along y = 2.
            assert!(p.tile.y == 1 || p.tile.y == 3, "{:?}", p.tile);
        }
        assert_eq!(level.stage(), Stage::Build);
    }

    #[test]
    fn test_greedy_prefers_pricier_unlocked_kind() {
        let mut level = level_from_map(MAP);
        level.stats_mut().money = 1000;
        level.unlock(EntityKind::MineL0);

        let placed = Strategy::Greedy.plan(&mut level);

        assert_eq!(placed[0].kind, EntityKind::MineL0);
        assert_eq!(placed[0].tile.y, 2);
        let turrets: Vec<_> = placed.iter().filter(|p| p.kind == EntityKind::TurretL0).collect();
        assert!(!turrets.is_empty());
        assert!(turrets.iter().all(|p| p.tile.y != 2));
        assert!(placed.iter().all(|p| p.tile != IVec2::new(0, 2)));
    }
}
