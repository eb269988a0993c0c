//! Bullets and shells.
//!
//! Projectiles move in [`update`] with the frame delta so their motion stays
//! smooth whatever the tick rate; collisions and detonation happen in the
//! fixed tick.

use crate::consts::COLLISION_QUERY_CAPACITY;
use crate::entity::{EntityId, EntityState};
use crate::events::{EffectKind, SoundCue};
use crate::grid::Grid;
use crate::level::{Level, Stage};
use crate::math::{Aabb, IVec2};

use super::explode;

/// Integrate projectile velocity over `dt` seconds.
pub fn update(level: &mut Level, id: EntityId, dt: f32) {
    if level.stage() != Stage::Play {
        return;
    }
    let Some(e) = level.get(id) else {
        return;
    };
    let velocity = match e.state {
        EntityState::Bullet { velocity } | EntityState::Shell { velocity, .. } => velocity,
        _ => return,
    };
    let pos = e.pos() + velocity * dt;
    level.set_position(id, pos);
}

/// Bullet tick: damage the first enemy overlapping the bullet and vanish.
pub fn tick_bullet(level: &mut Level, id: EntityId) {
    if level.stage() != Stage::Play {
        return;
    }
    let Some(e) = level.get(id) else {
        return;
    };
    let damage = e.info().projectile.map_or(1.0, |p| p.damage);
    let area = e.aabb();

    for other in level.box_entities(area, COLLISION_QUERY_CAPACITY) {
        let Some(f) = level.get_mut(other) else {
            continue;
        };
        if !f.info().is_enemy() || f.is_deleted() {
            continue;
        }

        f.damage(damage);
        let (pos, palette) = (f.center(), f.info().palette);
        if let Some(e) = level.get_mut(id) {
            e.mark_deleted();
        }
        level.effect(EffectKind::Splat, pos, palette, 10);
        break;
    }
}

/// Shell tick: detonate on the target tile, on impassable terrain, or once
/// the shell has flown past its target.
pub fn tick_shell(level: &mut Level, id: EntityId) {
    if level.stage() != Stage::Play {
        return;
    }
    let Some(e) = level.get(id) else {
        return;
    };
    let (velocity, target_tile) = match e.state {
        EntityState::Shell { velocity, target_tile } => (velocity, target_tile),
        _ => return,
    };
    let Some(params) = e.info().projectile else {
        return;
    };

    let center = e.center();
    let tile = e.tile();
    let to_target = Grid::tile_center_px(target_tile).as_vec2() - center;

    let arrived = tile == target_tile;
    let blocked = level
        .grid()
        .tile_type(tile)
        .is_some_and(|t| t.path_cost().is_none());
    let overshot = to_target.dot(velocity) < 0.0;
    if !(arrived || blocked || overshot) {
        return;
    }

    let radius = params.blast.map_or(8, |b| b.radius_px);
    let area = Aabb::from_center_half(center.round(), IVec2::splat(radius));
    explode(level, center, area, params.damage);

    if let Some(e) = level.get_mut(id) {
        e.mark_deleted();
    }
    level.effect(EffectKind::MultiSmoke { count: 6 }, center, crate::draw::palette::LIGHT_GRAY, 20);
    level.sound(SoundCue::Explode, 0.5);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::EntityKind;
    use crate::config::SimConfig;
    use crate::grid::TileType;
    use crate::math::Vec2;

    fn play_level() -> Level {
        let mut level = Level::from_grid(
            Grid::new(10, 10, TileType::Base),
            IVec2::ZERO,
            IVec2::new(9, 9),
            &SimConfig::default(),
        );
        level.go();
        level
    }

    fn put(level: &mut Level, kind: EntityKind, pos: Vec2) -> EntityId {
        let id = level.new_entity(kind).unwrap();
        level.set_position(id, pos);
        id
    }

    #[test]
    fn test_update_moves_bullet() {
        let mut level = play_level();
        let bullet = put(&mut level, EntityKind::BulletL0, Vec2::new(10.0, 10.0));
        level.get_mut(bullet).unwrap().state = EntityState::Bullet {
            velocity: Vec2::new(30.0, 0.0),
        };

        level.update(0.5);
        assert_eq!(level.get(bullet).unwrap().pos(), Vec2::new(25.0, 10.0));
        assert_eq!(level.get(bullet).unwrap().tile(), IVec2::new(3, 1));
    }

    #[test]
    fn test_update_paused_outside_play() {
        let mut level = Level::from_grid(
            Grid::new(10, 10, TileType::Base),
            IVec2::ZERO,
            IVec2::ZERO,
            &SimConfig::default(),
        );
        let bullet = put(&mut level, EntityKind::BulletL0, Vec2::new(10.0, 10.0));
        level.get_mut(bullet).unwrap().state = EntityState::Bullet {
            velocity: Vec2::new(30.0, 0.0),
        };

        level.update(0.5);
        assert_eq!(level.get(bullet).unwrap().pos(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_bullet_hits_enemy_once() {
        let mut level = play_level();
        let alien = put(&mut level, EntityKind::AlienL0, Vec2::new(16.0, 16.0));
        let bullet = put(&mut level, EntityKind::BulletL0, Vec2::new(17.0, 17.0));
        let health = level.get(alien).unwrap().health;

        level.tick();

        assert!(level.get(bullet).is_none());
        assert_eq!(level.get(alien).unwrap().health, health - 1.0);
    }

    #[test]
    fn test_bullet_ignores_buildings() {
        let mut level = play_level();
        put(&mut level, EntityKind::MineL0, Vec2::new(40.0, 40.0));
        let bullet = put(&mut level, EntityKind::BulletL0, Vec2::new(41.0, 43.0));

        level.tick();
        assert!(level.get(bullet).is_some());
    }

    #[test]
    fn test_shell_detonates_on_target_tile() {
        let mut level = play_level();
        let alien = put(&mut level, EntityKind::AlienL0, Vec2::new(40.0, 40.0));
        let shell = put(&mut level, EntityKind::ShellL0, Vec2::new(41.0, 41.0));
        level.get_mut(shell).unwrap().state = EntityState::Shell {
            velocity: Vec2::new(80.0, 0.0),
            target_tile: IVec2::new(5, 5),
        };
        let health = level.get(alien).unwrap().health;

        level.tick();

        assert!(level.get(shell).is_none());
        assert!(level.get(alien).map_or(true, |a| a.health < health));
    }

    #[test]
    fn test_shell_flies_until_target() {
        let mut level = play_level();
        let shell = put(&mut level, EntityKind::ShellL0, Vec2::new(9.0, 9.0));
        level.get_mut(shell).unwrap().state = EntityState::Shell {
            velocity: Vec2::new(80.0, 0.0),
            target_tile: IVec2::new(7, 1),
        };

        level.tick();
        assert!(level.get(shell).is_some());
    }

    #[test]
    fn test_shell_detonates_on_rock() {
        let mut level = play_level();
        level.grid.set_tile_type(IVec2::new(2, 1), TileType::Rock);
        let shell = put(&mut level, EntityKind::ShellL0, Vec2::new(17.0, 9.0));
        level.get_mut(shell).unwrap().state = EntityState::Shell {
            velocity: Vec2::new(80.0, 0.0),
            target_tile: IVec2::new(7, 1),
        };

        level.tick();
        assert!(level.get(shell).is_none());
    }
}
