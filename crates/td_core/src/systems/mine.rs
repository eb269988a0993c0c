//! Mines: detonate when an enemy steps onto their tile.

use crate::consts::QUERY_CAPACITY;
use crate::draw::palette;
use crate::entity::EntityId;
use crate::events::{EffectKind, SoundCue};
use crate::level::{Level, Stage};
use crate::math::IVec2;

use super::explode;

/// Peak damage per mine tier.
pub const MINE_BASE_DAMAGE: f32 = 32.0;

/// Mine tick.
pub fn tick(level: &mut Level, id: EntityId) {
    if level.stage() != Stage::Play {
        return;
    }
    let Some(e) = level.get(id) else {
        return;
    };
    let tier = e.info().mine.map_or(1, |m| m.tier);
    let (tile, aabb, center) = (e.tile(), e.aabb(), e.center());

    let triggered = level
        .tile_entities(tile, QUERY_CAPACITY)
        .into_iter()
        .filter_map(|other| level.get(other))
        .any(|f| f.info().is_enemy() && !f.is_deleted());
    if !triggered {
        return;
    }

    if let Some(e) = level.get_mut(id) {
        e.mark_deleted();
    }
    level.sound(SoundCue::Mine, 1.0);

    let area = aabb.scale_center(IVec2::splat(4 + tier));
    explode(level, center, area, MINE_BASE_DAMAGE * tier as f32);

    level.effect(
        EffectKind::MultiSmoke { count: 10 },
        center,
        palette::LIGHT_GRAY,
        35,
    );
    level.effect(
        EffectKind::MultiSplat {
            count: 5,
            spread: 10 * tier as u32,
        },
        center,
        palette::ORANGE,
        15,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::EntityKind;
    use crate::config::SimConfig;
    use crate::grid::{Grid, TileType};
    use crate::math::Vec2;

    fn level(stage_play: bool) -> Level {
        let mut level = Level::from_grid(
            Grid::new(8, 8, TileType::Base),
            IVec2::ZERO,
            IVec2::new(7, 7),
            &SimConfig::default(),
        );
        if stage_play {
            level.go();
        }
        level
    }

    fn put(level: &mut Level, kind: EntityKind, pos: Vec2) -> EntityId {
        let id = level.new_entity(kind).unwrap();
        level.set_position(id, pos);
        id
    }

    #[test]
    fn test_mine_waits_for_enemy() {
        let mut level = level(true);
        let mine = put(&mut level, EntityKind::MineL0, Vec2::new(24.0, 24.0));
        level.tick();
        assert!(level.get(mine).is_some());
    }

    #[test]
    fn test_mine_inert_while_building() {
        let mut level = level(false);
        let mine = put(&mut level, EntityKind::MineL0, Vec2::new(24.0, 24.0));
        put(&mut level, EntityKind::AlienL0, Vec2::new(26.0, 26.0));
        level.tick();
        assert!(level.get(mine).is_some());
    }

    #[test]
    fn test_higher_tier_hits_harder() {
        let damage_for = |kind| {
            let mut level = level(true);
            let alien = put(&mut level, EntityKind::AlienL1, Vec2::new(29.0, 24.0));
            put(&mut level, kind, Vec2::new(24.0, 24.0));
            let before = level.get(alien).unwrap().health;
            level.tick();
            before - level.get(alien).map_or(0.0, |a| a.health)
        };

        let low = damage_for(EntityKind::MineL0);
        let high = damage_for(EntityKind::MineL2);
        assert!(low > 0.0);
        assert!(high > low);
    }
}
