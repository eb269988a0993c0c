//! Ships: land, then keep dropping aliens until shot down.

use std::f32::consts::TAU;

use crate::consts::TICKS_PER_SECOND;
use crate::draw::palette;
use crate::entity::EntityId;
use crate::events::{EffectKind, SoundCue};
use crate::level::{Level, Stage};
use crate::math::Vec2;
use crate::rng::SimRng;

use super::{check_enemy_death, rate_count};

/// Distance from the ship at which aliens appear.
const SPAWN_DISTANCE: f32 = 5.0;

/// Ship tick.
pub fn tick(level: &mut Level, id: EntityId) {
    if level.stage() != Stage::Play {
        return;
    }
    if check_enemy_death(level, id) {
        return;
    }

    let Some(e) = level.get(id) else {
        return;
    };
    let Some(ship) = e.info().ship else {
        return;
    };
    let (pos, center, age) = (e.pos(), e.center(), e.ticks_alive);

    if age < u64::from(TICKS_PER_SECOND) {
        if age == 0 {
            level.sound(SoundCue::Ship, 1.0);
        }
        level.effect(EffectKind::Fancy, center, palette::LIGHT_BLUE, 20);
        return;
    }

    // One direction per ship per tick: every alien dropped this tick leaves
    // from the same side.
    let tick = level.tick_count();
    let angle = SimRng::new(tick + u64::from(id.index())).next_f32() * TAU;
    let at = pos + Vec2::from_angle(angle) * SPAWN_DISTANCE;

    for spawn in ship.spawns {
        for _ in 0..rate_count(tick, spawn.per_second) {
            if !level.rng.roll(spawn.chance) {
                continue;
            }
            if level.spawn(spawn.kind, at).is_some() {
                level.sound(SoundCue::Spawn, 1.0);
            }
        }
    }
}
