//! Per-kind simulation behaviors and the helpers they share.
//!
//! Each submodule holds the tick (and where needed, update) functions the
//! entity table points at. Behaviors receive the whole level and the handle
//! of the entity being processed; they never hold entity references across
//! calls that may mutate the level.

pub mod alien;
pub mod building;
pub mod mine;
pub mod projectile;
pub mod ship;
pub mod truck;
pub mod turret;

use crate::consts::{QUERY_CAPACITY, TICKS_PER_SECOND};
use crate::draw::palette;
use crate::entity::EntityId;
use crate::events::{EffectKind, SimEvent, SoundCue};
use crate::grid::Grid;
use crate::level::Level;
use crate::math::{Aabb, Direction, Vec2};

/// Events due on `tick` for something happening `per_second` times a second.
///
/// Computed as `floor(t * r) - floor((t - 1) * r)` with `r` per tick, so the
/// running total over ticks `1..=T` is exactly `floor(T * r)` and never
/// drifts, with no remainder state to carry between ticks.
#[must_use]
pub fn rate_count(tick: u64, per_second: f32) -> u32 {
    let per_tick = f64::from(per_second) / f64::from(TICKS_PER_SECOND);
    let t = tick as f64;
    let n = (t * per_tick).floor() - ((t - 1.0) * per_tick).floor();
    n.max(0.0) as u32
}

/// Result of one step along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// The last waypoint has been reached.
    Arrived,
    /// Moved by this offset.
    Moved(Vec2),
    /// The entity has no path.
    NoPath,
}

/// Advance an entity along its path by up to `speed` pixels.
///
/// Movement is along the dominant axis toward the center of the next
/// waypoint. A waypoint within reach is snapped to and consumed.
pub(crate) fn move_on_path(level: &mut Level, id: EntityId, speed: f32) -> Step {
    let Some(e) = level.get(id) else {
        return Step::NoPath;
    };
    let Some(path) = e.path.as_ref() else {
        return Step::NoPath;
    };
    let Some(waypoint) = path.waypoint() else {
        return Step::Arrived;
    };

    let delta = Grid::tile_center_px(waypoint).as_vec2() - e.center();
    let pos = e.pos();

    if delta.x.abs() <= speed && delta.y.abs() <= speed {
        level.set_position(id, pos + delta);
        let exhausted = level.get_mut(id).and_then(|e| e.path.as_mut()).map_or(true, |p| {
            p.advance();
            p.is_exhausted()
        });
        return if exhausted { Step::Arrived } else { Step::Moved(delta) };
    }

    let step = dominant_axis(delta) * speed;
    level.set_position(id, pos + step);
    Step::Moved(step)
}

/// Unit vector along the larger component of `v`.
pub(crate) fn dominant_axis(v: Vec2) -> Vec2 {
    if v.x.abs() > v.y.abs() {
        Vec2::new(v.x.signum(), 0.0)
    } else if v.y != 0.0 {
        Vec2::new(0.0, v.y.signum())
    } else {
        Vec2::ZERO
    }
}

/// Facing for a movement offset.
pub(crate) fn facing(step: Vec2, fallback: Direction) -> Direction {
    Direction::from_vec2(step, fallback)
}

/// Enemy death: award the bounty, emit effects and mark for deletion.
pub(crate) fn check_enemy_death(level: &mut Level, id: EntityId) -> bool {
    let Some(e) = level.get_mut(id) else {
        return false;
    };
    if !e.is_dead() {
        return false;
    }

    e.mark_deleted();
    let info = e.info();
    let kind = e.kind();
    let center = e.center();
    let bounty = info.enemy.map_or(0, |en| en.bounty);

    level.stats.money += bounty;
    level.stats.kills += 1;
    level.emit(SimEvent::Bounty {
        kind,
        amount: bounty,
        pos: center,
    });
    level.effect(EffectKind::Text(format!("+{bounty}")), center, palette::YELLOW, TICKS_PER_SECOND);
    level.effect(
        EffectKind::MultiSplat { count: 3, spread: 5 },
        center,
        info.palette,
        TICKS_PER_SECOND,
    );
    true
}

/// Building damage feedback and death.
pub(crate) fn check_building_death(level: &mut Level, id: EntityId) -> bool {
    let tick = level.tick_count();
    let Some(e) = level.get_mut(id) else {
        return false;
    };

    let hit = e.health < e.last_health;
    e.last_health = e.health;
    let dead = e.is_dead();
    if dead {
        e.mark_deleted();
    }
    let center = e.center();
    let palette = e.info().palette;

    if hit && tick % 5 == 0 {
        level.sound(SoundCue::Hit, 1.0);
    }
    if dead {
        level.effect(
            EffectKind::MultiSplat { count: 5, spread: 10 },
            center,
            palette,
            TICKS_PER_SECOND,
        );
        level.sound(SoundCue::Explode, 1.0);
    }
    dead
}

/// Damage every enemy overlapping `area`, falling off linearly from `peak`
/// at `center` to zero at the area's half-diagonal.
pub(crate) fn explode(level: &mut Level, center: Vec2, area: Aabb, peak: f32) {
    let radius = area.half().as_vec2().length().max(1.0);

    for target in level.box_entities(area, QUERY_CAPACITY) {
        let Some(f) = level.get_mut(target) else {
            continue;
        };
        if !f.info().is_enemy() || f.is_deleted() {
            continue;
        }

        let falloff = (1.0 - f.center().distance(center) / radius).max(0.0);
        f.damage(peak * falloff);
        let (pos, palette) = (f.center(), f.info().palette);
        level.effect(EffectKind::MultiSplat { count: 2, spread: 4 }, pos, palette, 10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_count_totals() {
        // 4 per second at 30 ticks per second.
        let total: u32 = (1..=300).map(|t| rate_count(t, 4.0)).sum();
        assert_eq!(total, 40);

        let total: u32 = (1..=30).map(|t| rate_count(t, 7.5)).sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn test_rate_count_fast_rate() {
        // More than one event per tick.
        let total: u32 = (1..=30).map(|t| rate_count(t, 90.0)).sum();
        assert_eq!(total, 90);
        assert_eq!(rate_count(10, 90.0), 3);
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(dominant_axis(Vec2::new(3.0, -1.0)), Vec2::new(1.0, 0.0));
        assert_eq!(dominant_axis(Vec2::new(1.0, -3.0)), Vec2::new(0.0, -1.0));
        assert_eq!(dominant_axis(Vec2::ZERO), Vec2::ZERO);
    }
}
