//! Turrets and cannons: target acquisition and firing.

use crate::behavior::{EntityFlags, TurretParams};
use crate::consts::RETARGET_INTERVAL;
use crate::entity::{Entity, EntityId, EntityState};
use crate::events::SoundCue;
use crate::level::{Level, Stage};
use crate::math::{wrap_angle, Vec2};

use super::{check_building_death, rate_count};

/// Barrel rotation per tick while idle.
const IDLE_SPIN: f32 = 0.1;

/// Muzzle offset from the turret's position.
const MUZZLE: Vec2 = Vec2::new(4.0, 5.0);

/// Ships first, then any other enemy.
pub fn target_priority(e: &Entity) -> Option<u32> {
    let flags = e.info().flags;
    if !flags.contains(EntityFlags::ENEMY) {
        None
    } else if flags.contains(EntityFlags::SHIP) {
        Some(2)
    } else {
        Some(1)
    }
}

fn spin(level: &mut Level, id: EntityId) {
    if let Some(EntityState::Turret { angle, .. }) = level.get_mut(id).map(|e| &mut e.state) {
        *angle = wrap_angle(*angle + IDLE_SPIN);
    }
}

/// Turret tick.
pub fn tick(level: &mut Level, id: EntityId) {
    let Some(params) = level.get(id).and_then(|e| e.info().turret) else {
        return;
    };

    if level.stage() != Stage::Play {
        spin(level, id);
        return;
    }

    if check_building_death(level, id) {
        return;
    }

    let tick = level.tick_count();
    let count = rate_count(tick, params.shots_per_second);
    let Some(target) = acquire(level, id, &params, count > 0) else {
        spin(level, id);
        return;
    };

    let Some(aim) = level.get(target).map(Entity::center) else {
        return;
    };
    let Some(origin) = level.get(id).map(|e| e.pos() + MUZZLE) else {
        return;
    };
    let dir = (aim - origin).normalize_or_zero();

    if let Some(EntityState::Turret { angle, .. }) = level.get_mut(id).map(|e| &mut e.state) {
        // Barrel frames run clockwise.
        *angle = -dir.y.atan2(dir.x);
    }

    for _ in 0..count {
        fire(level, &params, origin, dir, aim);
    }
}

/// Keep a live target or look for a new one on this turret's schedule.
///
/// A stored handle that no longer resolves (the entity died, or its slot
/// was reused) is dropped before anything else looks at it.
fn acquire(level: &mut Level, id: EntityId, params: &TurretParams, firing: bool) -> Option<EntityId> {
    let e = level.get(id)?;
    let tile = e.tile();
    let index = u64::from(id.index());
    let stored = match e.state {
        EntityState::Turret { target, .. } => target,
        _ => None,
    };

    let current = stored.filter(|&t| level.get(t).is_some_and(|t| !t.is_deleted()));
    let scheduled = current.is_none() && (index + level.tick_count()) % RETARGET_INTERVAL == 0;
    let forced = params.retarget_before_fire && firing;

    let target = if scheduled || forced {
        level.find_nearest(tile, target_priority)
    } else {
        current
    };

    if let Some(EntityState::Turret { target: slot, .. }) = level.get_mut(id).map(|e| &mut e.state) {
        *slot = target;
    }
    target
}

fn fire(level: &mut Level, params: &TurretParams, origin: Vec2, dir: Vec2, aim: Vec2) {
    let kind = params.projectile;
    let Some(projectile) = kind.info().projectile else {
        return;
    };
    let Some(shot) = level.spawn(kind, origin) else {
        return;
    };

    let velocity = dir * projectile.speed;
    let target_tile = level.grid().px_to_tile(aim.as_ivec2());
    if let Some(e) = level.get_mut(shot) {
        e.state = match e.state {
            EntityState::Shell { .. } => EntityState::Shell { velocity, target_tile },
            _ => EntityState::Bullet { velocity },
        };
    }
    level.sound(SoundCue::Shoot, 0.25);
}
