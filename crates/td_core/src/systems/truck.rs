//! The convoy truck: drives the road to the finish warehouse.

use tracing::debug;

use crate::consts::RETARGET_INTERVAL;
use crate::draw::palette;
use crate::entity::{EntityId, EntityState, Path};
use crate::events::{EffectKind, SoundCue};
use crate::level::{Level, Outcome, Stage};
use crate::math::Vec2;
use crate::pathfinding::{find_path, truck_weight};

use super::{facing, move_on_path, Step};

/// Pixels per tick before upgrades.
pub const TRUCK_BASE_SPEED: f32 = 0.35;

/// Truck tick.
pub fn tick(level: &mut Level, id: EntityId) {
    if level.stage() != Stage::Play {
        return;
    }

    let tick = level.tick_count();
    let Some(e) = level.get_mut(id) else {
        return;
    };
    let hit = e.health < e.last_health;
    e.last_health = e.health;
    let (health, dead, tile, center) = (e.health, e.is_dead(), e.tile(), e.center());
    let needs_path = e.path.is_none();

    level.stats.truck_health = health;
    if hit && tick % 5 == 0 {
        level.sound(SoundCue::Hit, 1.0);
    }
    if dead {
        level.sound(SoundCue::Lose, 1.0);
        level.finish_with(Outcome::Defeat);
        return;
    }

    // The route is kept until it runs out, so the truck never turns around
    // halfway between two waypoints.
    if needs_path {
        let path = find_path(level.grid(), tile, level.finish(), truck_weight);
        if path.is_none() {
            debug!(truck = %id, ?tile, finish = ?level.finish(), "Truck has no route");
        }
        if let Some(e) = level.get_mut(id) {
            e.path = path.map(|tiles| Path::departing(tiles, tile));
        }
    }

    if level.get(id).is_some_and(|e| e.path.is_none()) {
        return;
    }

    if tick % RETARGET_INTERVAL == 0 {
        level.effect(
            EffectKind::Smoke,
            center + Vec2::new(1.0, 2.0),
            palette::LIGHT_GRAY,
            35,
        );
    }

    let speed = TRUCK_BASE_SPEED * level.stats.speed_factor();
    match move_on_path(level, id, speed) {
        Step::Arrived => {
            level.sound(SoundCue::Win, 1.0);
            level.finish_with(Outcome::Victory);
        }
        Step::Moved(step) => {
            if let Some(e) = level.get_mut(id) {
                e.last_move = step;
                if let EntityState::Truck { dir } = &mut e.state {
                    *dir = facing(step, *dir);
                }
            }
        }
        Step::NoPath => {}
    }
}
