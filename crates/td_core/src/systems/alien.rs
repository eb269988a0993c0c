//! Aliens: pick a target, walk to it, chew on it.

use tracing::warn;

use crate::behavior::{EntityFlags, EntityKind};
use crate::consts::{QUERY_CAPACITY, RETARGET_INTERVAL, TICKS_PER_SECOND};
use crate::entity::{Entity, EntityId, EntityState, Path};
use crate::level::{Level, Stage};
use crate::math::Vec2;
use crate::pathfinding::{alien_weight, find_path};

use super::{check_enemy_death, dominant_axis, facing, move_on_path, Step};

/// Pixels per tick at enemy speed 1.
pub const ALIEN_BASE_SPEED: f32 = 0.6;

/// Contact damage per second at enemy strength 1.
pub const ALIEN_BASE_DPS: f32 = 2.0;

/// Distance in pixels beyond which a candidate scores zero.
const ATTENTION_RANGE: f32 = 512.0;

/// How much an alien wants to go after `candidate`, standing at `from`.
///
/// Only the truck and player buildings are candidates. The truck is worth
/// five times a building and a decoy three times; other buildings lose a
/// quarter of their appeal for every enemy already on their tile. Closer is
/// better.
pub fn target_priority(level: &Level, candidate: &Entity, from: Vec2) -> Option<u32> {
    let kind = candidate.kind();
    if kind != EntityKind::Truck && !candidate.info().flags.contains(EntityFlags::PLACEABLE) {
        return None;
    }

    let modifier = match kind {
        EntityKind::Truck => 5.0,
        EntityKind::DecoyTruck => 3.0,
        _ => {
            let mob = level
                .tile_entities(candidate.tile(), QUERY_CAPACITY)
                .into_iter()
                .filter_map(|id| level.get(id))
                .filter(|e| e.info().is_enemy())
                .count();
            (1.0 - 0.25 * mob as f32).max(0.1)
        }
    };

    let closeness = (ATTENTION_RANGE - candidate.pos().distance(from)).max(0.0);
    Some((modifier * closeness) as u32)
}

/// Alien tick.
pub fn tick(level: &mut Level, id: EntityId) {
    if let Some(e) = level.get_mut(id) {
        e.last_move = Vec2::ZERO;
    }
    if level.stage() != Stage::Play {
        return;
    }
    if check_enemy_death(level, id) {
        return;
    }

    let Some(e) = level.get(id) else {
        return;
    };
    let Some(enemy) = e.info().enemy else {
        return;
    };
    let EntityState::Alien {
        target: stored,
        stalled,
        ..
    } = e.state
    else {
        return;
    };
    let (tile, pos) = (e.tile(), e.pos());
    let path_done = e.path.as_ref().map(Path::is_exhausted);

    let current = stored.filter(|&t| level.get(t).is_some_and(|t| !t.is_deleted()));
    let (target, fresh) = match current {
        Some(t) => (Some(t), false),
        None => (level.find_nearest(tile, |c| target_priority(level, c, pos)), true),
    };
    set_target(level, id, target, stalled);
    let Some(target) = target else {
        return;
    };
    let Some(target_tile) = level.get(target).map(Entity::tile) else {
        return;
    };

    let scheduled = (u64::from(id.index()) + level.tick_count()) % RETARGET_INTERVAL == 0;
    let lost = path_done == Some(true) && !colocated(level, id, target);
    // A stalled alien waits for its schedule or a new target before searching again.
    let unrouted = path_done.is_none() && !stalled;
    if unrouted || fresh || scheduled || lost {
        let path = find_path(level.grid(), tile, target_tile, alien_weight);
        let found = path.is_some();
        if !found && !stalled {
            warn!(alien = %id, ?tile, ?target_tile, "Alien has no path");
        }
        if let Some(e) = level.get_mut(id) {
            e.path = path.map(|tiles| Path::departing(tiles, tile));
        }
        set_target(level, id, Some(target), !found);
    }

    let speed = ALIEN_BASE_SPEED * enemy.speed;
    match move_on_path(level, id, speed) {
        Step::Moved(step) => {
            if let Some(e) = level.get_mut(id) {
                e.last_move = step;
                if let EntityState::Alien { dir, .. } = &mut e.state {
                    *dir = facing(step, *dir);
                }
            }
        }
        Step::Arrived => {
            if colocated(level, id, target) {
                attack(level, id, target, speed, enemy.strength);
            }
        }
        Step::NoPath => {}
    }
}

fn set_target(level: &mut Level, id: EntityId, new_target: Option<EntityId>, now_stalled: bool) {
    if let Some(EntityState::Alien { target, stalled, .. }) = level.get_mut(id).map(|e| &mut e.state) {
        *target = new_target;
        *stalled = now_stalled;
    }
}

/// Same tile, or touching bounding boxes.
fn colocated(level: &Level, id: EntityId, target: EntityId) -> bool {
    match (level.get(id), level.get(target)) {
        (Some(a), Some(b)) => a.tile() == b.tile() || a.aabb().collides(b.aabb()),
        _ => false,
    }
}

/// Shuffle toward the target and deal a tick's worth of contact damage.
fn attack(level: &mut Level, id: EntityId, target: EntityId, speed: f32, strength: f32) {
    let (Some(a), Some(b)) = (level.get(id), level.get(target)) else {
        return;
    };
    let delta = b.pos() - a.pos();
    let pos = a.pos();
    let is_truck = b.kind() == EntityKind::Truck;

    let axis = dominant_axis(delta);
    let reach = if axis.x != 0.0 { delta.x.abs() } else { delta.y.abs() };
    if reach > speed {
        level.set_position(id, pos + axis * speed);
    }

    if let Some(e) = level.get_mut(id) {
        if let EntityState::Alien { dir, .. } = &mut e.state {
            *dir = facing(delta, *dir);
        }
    }

    let mut damage = ALIEN_BASE_DPS * strength / TICKS_PER_SECOND as f32;
    if is_truck {
        damage *= level.stats().armor_factor();
    }
    if let Some(t) = level.get_mut(target) {
        t.damage(damage);
    }
}
