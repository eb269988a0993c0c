//! Render command emission.
//!
//! Draw behaviors turn entity state into [`DrawCommand`]s. Batching, atlas
//! lookup and actual rendering happen outside the core.

use serde::{Deserialize, Serialize};

use crate::consts::{TICKS_PER_SECOND, TILE_SIZE_PX};
use crate::entity::{Entity, EntityState};
use crate::grid::Grid;
use crate::level::{Level, Stage};
use crate::math::{wrap_angle, Direction, IVec2, Vec2};

/// Palette indices used by the entity table and effects.
pub mod palette {
    /// Black.
    pub const BLACK: u8 = 0;
    /// Tier 1 and alien grey.
    pub const L0: u8 = 6;
    /// Light gray, used for smoke.
    pub const LIGHT_GRAY: u8 = 7;
    /// White.
    pub const WHITE: u8 = 8;
    /// Tier 2.
    pub const L1: u8 = 12;
    /// Orange.
    pub const ORANGE: u8 = 30;
    /// Yellow, used for bounty text.
    pub const YELLOW: u8 = 33;
    /// Small alien green.
    pub const ALIEN_GREEN: u8 = 36;
    /// Ship grey.
    pub const ALIEN_GREY: u8 = 6;
    /// Light blue, used for landing sparkles.
    pub const LIGHT_BLUE: u8 = 45;
    /// Red.
    pub const RED: u8 = 61;
    /// Large alien red.
    pub const ALIEN_RED: u8 = 61;
    /// Tier 3.
    pub const L2: u8 = 62;
}

/// Draw layer, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Entity body.
    Entity,
    /// Health bars, turret heads, radar overlays.
    Overlay,
}

/// What to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    /// One atlas cell.
    Sprite(IVec2),
    /// Sub-rectangle of the atlas in pixels.
    SubImage {
        /// Pixel offset into the atlas.
        offset: IVec2,
        /// Pixel size.
        size: IVec2,
    },
}

/// One render primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    /// Atlas source.
    pub source: DrawSource,
    /// Pixel position of the lower-left corner.
    pub pos: Vec2,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Draw layer.
    pub layer: Layer,
    /// Mirror horizontally.
    pub flip_x: bool,
}

impl DrawCommand {
    fn sprite(index: IVec2, pos: Vec2, layer: Layer) -> Self {
        Self {
            source: DrawSource::Sprite(index),
            pos,
            alpha: 1.0,
            layer,
            flip_x: false,
        }
    }
}

/// Base sprite at the entity's pixel position.
pub fn draw_basic(_level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::sprite(e.info().base_sprite, e.px().as_vec2(), Layer::Entity));
}

fn draw_health(level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    if level.stage() == Stage::Build {
        return;
    }

    let max = e.info().max_health.max(1) as f32;
    let fill = ((e.health / max).clamp(0.0, 1.0) * 7.0) as i32;
    let pos = Grid::tile_to_px(e.tile()).as_vec2() + Vec2::new(0.0, 7.0);

    for (offset, width) in [(IVec2::new(40, 0), 7), (IVec2::new(32, 0), fill)] {
        out.push(DrawCommand {
            source: DrawSource::SubImage {
                offset,
                size: IVec2::new(width, 1),
            },
            pos,
            alpha: 1.0,
            layer: Layer::Overlay,
            flip_x: false,
        });
    }
}

/// Turret head animation frames.
const TURRET_FRAMES: i32 = 6;

/// Turret base, health bar and a rotating head frame.
pub fn draw_turret(level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    draw_basic(level, e, out);
    draw_health(level, e, out);

    let angle = match e.state {
        EntityState::Turret { angle, .. } => angle,
        _ => 0.0,
    };
    let step = std::f32::consts::TAU / TURRET_FRAMES as f32;
    let frame = (wrap_angle(angle + std::f32::consts::PI) / step).round() as i32 % TURRET_FRAMES;

    out.push(DrawCommand::sprite(
        IVec2::new(frame, 6),
        Grid::tile_to_px(e.tile()).as_vec2(),
        Layer::Overlay,
    ));
}

/// Radar body, health bar and a blinking light.
pub fn draw_radar(level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    draw_basic(level, e, out);
    draw_health(level, e, out);

    let phase = (u64::from(e.id().index()) * 17 + level.tick_count() / 5) % 6;
    if phase == 0 {
        return;
    }
    out.push(DrawCommand::sprite(
        IVec2::new(5, 5),
        Grid::tile_to_px(e.tile()).as_vec2(),
        Layer::Overlay,
    ));
}

/// Truck sprite for its facing.
pub fn draw_truck(_level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    let dir = match e.state {
        EntityState::Truck { dir } => dir,
        _ => Direction::South,
    };
    let offset = match dir {
        Direction::West | Direction::South => IVec2::new(0, 0),
        Direction::East => IVec2::new(1, 0),
        Direction::North => IVec2::new(2, 0),
    };
    out.push(DrawCommand::sprite(
        e.info().base_sprite + offset,
        e.px().as_vec2(),
        Layer::Entity,
    ));
}

/// Alien sprite for its facing, with a two-frame walk cycle while moving.
pub fn draw_alien(level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    let info = e.info();
    let speed = info.enemy.map_or(1.0, |en| en.speed).max(0.1);
    let frame = if e.last_move.length() > 0.0001 {
        ((level.tick_count() as f32 / (4.0 / speed)).round() as i32) % 2
    } else {
        0
    };
    let dir = match e.state {
        EntityState::Alien { dir, .. } => dir,
        _ => Direction::South,
    };

    let (index_offset, sprite_offset, flip_x) = match dir {
        Direction::North if frame == 1 => (IVec2::new(0, 1), IVec2::new(-2, 0), true),
        Direction::North => (IVec2::new(0, 1), IVec2::new(-1, 0), false),
        Direction::South => (IVec2::new(frame, 0), IVec2::ZERO, false),
        Direction::East => (IVec2::new(frame, 2), IVec2::ZERO, false),
        Direction::West => (IVec2::new(frame, 2), IVec2::new(-3, 0), true),
    };

    out.push(DrawCommand {
        source: DrawSource::Sprite(info.base_sprite + index_offset),
        pos: e.pos() + sprite_offset.as_vec2(),
        alpha: 1.0,
        layer: Layer::Overlay,
        flip_x,
    });
}

/// Ship sprite fading in over its first second.
pub fn draw_ship(_level: &Level, e: &Entity, out: &mut Vec<DrawCommand>) {
    let mut cmd = DrawCommand::sprite(e.info().base_sprite, e.px().as_vec2(), Layer::Entity);
    cmd.alpha = (e.ticks_alive as f32 / TICKS_PER_SECOND as f32).min(1.0);
    out.push(cmd);
}

/// Marker drawn on alien spawn tiles a radar reveals during the build stage.
#[must_use]
pub fn spawn_hint(tile: IVec2) -> DrawCommand {
    DrawCommand::sprite(IVec2::new(0, 14), (tile * TILE_SIZE_PX).as_vec2(), Layer::Overlay)
}
