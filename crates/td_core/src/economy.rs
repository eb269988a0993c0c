//! Money, unlocks, upgrades and the shop.
//!
//! Buying is a policy decision, not an error: every refusal comes back as a
//! [`Purchase`] variant and leaves the level untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::behavior::{EntityFlags, EntityKind};
use crate::entity::EntityId;
use crate::events::SoundCue;
use crate::grid::Grid;
use crate::level::{Level, Stage};
use crate::math::TileCoord;

/// Health restored by one repair.
pub const REPAIR_AMOUNT: f32 = 10.0;

/// Player state that carries over between levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Money on hand.
    pub money: u32,
    /// Kinds the player may buy.
    pub unlocked: BTreeSet<EntityKind>,
    /// Truck health as of the last tick.
    pub truck_health: f32,
    /// Armor upgrades bought.
    pub armor_level: u32,
    /// Speed upgrades bought.
    pub speed_level: u32,
    /// Enemies destroyed.
    pub kills: u32,
}

impl Stats {
    /// Fresh stats with `money` and every free kind unlocked.
    #[must_use]
    pub fn new(money: u32) -> Self {
        Self {
            money,
            unlocked: EntityKind::purchasable()
                .filter(|k| k.info().unlock_price == 0)
                .collect(),
            truck_health: EntityKind::Truck.info().base_health,
            armor_level: 0,
            speed_level: 0,
            kills: 0,
        }
    }

    /// True if `cost` is affordable.
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    /// Deduct `cost` if affordable.
    pub fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.money -= cost;
        true
    }

    /// Multiplier on contact damage the truck takes.
    #[must_use]
    pub fn armor_factor(&self) -> f32 {
        1.0 / (1.0 + 0.5 * self.armor_level as f32)
    }

    /// Multiplier on truck speed.
    #[must_use]
    pub fn speed_factor(&self) -> f32 {
        1.0 + 0.25 * self.speed_level as f32
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Result of a shop action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    /// A building was placed.
    Placed(EntityId),
    /// A shop item took effect.
    Applied,
    /// A kind was unlocked.
    Unlocked,
    /// Not enough money.
    InsufficientFunds,
    /// The kind has not been unlocked.
    Locked,
    /// Wrong stage, blocked tile, bad terrain, or nothing to apply to.
    InvalidPlacement,
    /// The kind is not sold.
    NotForSale,
    /// Unlocking something already unlocked.
    AlreadyUnlocked,
    /// No entity slot left.
    RegistryFull,
}

impl Purchase {
    /// True if money changed hands.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Placed(_) | Self::Applied | Self::Unlocked)
    }
}

fn for_sale(kind: EntityKind) -> bool {
    kind.info()
        .flags
        .intersects(EntityFlags::PLACEABLE | EntityFlags::NOT_AN_ENTITY)
}

impl Level {
    /// Spend the unlock price of `kind`.
    pub fn unlock(&mut self, kind: EntityKind) -> Purchase {
        if !for_sale(kind) {
            return Purchase::NotForSale;
        }
        if self.stats.unlocked.contains(&kind) {
            return Purchase::AlreadyUnlocked;
        }
        if !self.stats.spend(kind.info().unlock_price) {
            return Purchase::InsufficientFunds;
        }

        self.stats.unlocked.insert(kind);
        self.sound(SoundCue::Buy, 1.0);
        debug!(?kind, money = self.stats.money, "Unlocked");
        Purchase::Unlocked
    }

    /// True if a building of `kind` may go on `tile` right now.
    #[must_use]
    pub fn can_place(&self, kind: EntityKind, tile: TileCoord) -> bool {
        self.stage == Stage::Build
            && kind
                .info()
                .behavior
                .can_place
                .is_some_and(|can_place| can_place(self, tile))
    }

    /// Buy one `kind`. Buildings are placed on `tile`; shop items ignore it.
    pub fn buy(&mut self, kind: EntityKind, tile: TileCoord) -> Purchase {
        if !for_sale(kind) {
            return Purchase::NotForSale;
        }
        if !self.stats.unlocked.contains(&kind) {
            return Purchase::Locked;
        }
        let info = kind.info();
        if !self.stats.can_afford(info.buy_price) {
            return Purchase::InsufficientFunds;
        }

        let outcome = if info.is_entity() {
            self.place_building(kind, tile)
        } else {
            self.apply_item(kind)
        };

        if outcome.succeeded() {
            self.stats.money -= info.buy_price;
            self.sound(SoundCue::Buy, 1.0);
            debug!(?kind, ?tile, money = self.stats.money, "Bought");
        }
        outcome
    }

    fn place_building(&mut self, kind: EntityKind, tile: TileCoord) -> Purchase {
        if !self.can_place(kind, tile) {
            return Purchase::InvalidPlacement;
        }
        match self.new_entity(kind) {
            Ok(id) => {
                self.set_position(id, Grid::tile_to_px(tile).as_vec2());
                Purchase::Placed(id)
            }
            Err(_) => Purchase::RegistryFull,
        }
    }

    fn apply_item(&mut self, kind: EntityKind) -> Purchase {
        if matches!(self.stage, Stage::Done(_)) {
            return Purchase::InvalidPlacement;
        }
        match kind {
            EntityKind::Repair => {
                let Some(truck) = self.entities.find_first(EntityKind::Truck) else {
                    return Purchase::InvalidPlacement;
                };
                let Some(e) = self.entities.get_mut(truck) else {
                    return Purchase::InvalidPlacement;
                };
                let max = e.info().max_health as f32;
                e.health = (e.health + REPAIR_AMOUNT).min(max);
                e.last_health = e.health;
                self.stats.truck_health = e.health;
            }
            EntityKind::ArmorUpgrade => self.stats.armor_level += 1,
            EntityKind::SpeedUpgrade => self.stats.speed_level += 1,
            _ => return Purchase::NotForSale,
        }
        Purchase::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::grid::TileType;
    use crate::math::IVec2;

    fn level(money: u32) -> Level {
        let config = SimConfig {
            starting_money: money,
            ..SimConfig::default()
        };
        Level::from_grid(Grid::new(6, 6, TileType::Base), IVec2::ZERO, IVec2::ZERO, &config)
    }

    #[test]
    fn test_free_kinds_unlocked_at_start() {
        let stats = Stats::new(0);
        assert!(stats.unlocked.contains(&EntityKind::TurretL0));
        assert!(!stats.unlocked.contains(&EntityKind::TurretL1));
        assert!(!stats.unlocked.contains(&EntityKind::AlienL0));
    }

    #[test]
    fn test_buy_places_and_charges() {
        let mut level = level(100);
        let price = EntityKind::TurretL0.info().buy_price;

        let Purchase::Placed(id) = level.buy(EntityKind::TurretL0, IVec2::new(2, 2)) else {
            panic!("turret not placed");
        };
        assert_eq!(level.get(id).unwrap().tile(), IVec2::new(2, 2));
        assert_eq!(level.stats().money, 100 - price);

        // Occupied now.
        assert_eq!(
            level.buy(EntityKind::TurretL0, IVec2::new(2, 2)),
            Purchase::InvalidPlacement
        );
        assert_eq!(level.stats().money, 100 - price);
    }

    #[test]
    fn test_buy_refusals() {
        let mut level = level(10);
        assert_eq!(level.buy(EntityKind::AlienL0, IVec2::ZERO), Purchase::NotForSale);
        assert_eq!(level.buy(EntityKind::CannonL0, IVec2::ZERO), Purchase::Locked);
        assert_eq!(
            level.buy(EntityKind::TurretL0, IVec2::ZERO),
            Purchase::InsufficientFunds
        );
        assert_eq!(level.stats().money, 10);
    }

    #[test]
    fn test_no_placement_during_play() {
        let mut level = level(500);
        level.go();
        assert_eq!(
            level.buy(EntityKind::TurretL0, IVec2::new(1, 1)),
            Purchase::InvalidPlacement
        );
        assert_eq!(level.stats().money, 500);
    }

    #[test]
    fn test_unlock_then_buy() {
        let mut level = level(1000);
        assert_eq!(level.unlock(EntityKind::TurretL1), Purchase::Unlocked);
        assert_eq!(level.unlock(EntityKind::TurretL1), Purchase::AlreadyUnlocked);
        assert_eq!(level.stats().money, 1000 - EntityKind::TurretL1.info().unlock_price);
        assert!(level.buy(EntityKind::TurretL1, IVec2::new(3, 3)).succeeded());
    }

    #[test]
    fn test_repair_clamps_to_max() {
        let mut level = level(1000);
        let truck = level.new_entity(EntityKind::Truck).unwrap();
        level.get_mut(truck).unwrap().health = 4.0;

        assert_eq!(level.buy(EntityKind::Repair, IVec2::ZERO), Purchase::Applied);
        assert_eq!(level.get(truck).unwrap().health, 10.0);
        assert_eq!(level.stats().truck_health, 10.0);
    }

    #[test]
    fn test_repair_needs_truck() {
        let mut level = level(1000);
        assert_eq!(
            level.buy(EntityKind::Repair, IVec2::ZERO),
            Purchase::InvalidPlacement
        );
        assert_eq!(level.stats().money, 1000);
    }

    #[test]
    fn test_upgrade_factors() {
        let mut stats = Stats::new(0);
        assert_eq!(stats.armor_factor(), 1.0);
        assert_eq!(stats.speed_factor(), 1.0);
        stats.armor_level = 2;
        stats.speed_level = 2;
        assert_eq!(stats.armor_factor(), 0.5);
        assert_eq!(stats.speed_factor(), 1.5);
    }
}
