//! # TD Core
//!
//! Deterministic level simulation for a convoy tower-defense game.
//!
//! This crate contains **only** simulation logic:
//! - No rendering (draw behaviors emit [`draw::DrawCommand`]s)
//! - No IO or wall clock
//! - No system randomness (one seeded [`rng::SimRng`] per level)
//!
//! A level is a tile grid with an intrusive entity list per tile, a fixed
//! capacity entity registry addressed by generation-checked handles, and a
//! static behavior table keyed by entity kind. Every fixed tick walks the
//! entity list in creation order, dispatches each kind's behavior and
//! flushes deletions after the walk.
//!
//! ## Crate Structure
//!
//! - [`grid`] - Terrain and per-tile entity list heads
//! - [`registry`] - Entity slots, handles and the global list
//! - [`behavior`] - Entity kinds and the static behavior table
//! - [`systems`] - Per-kind tick behaviors
//! - [`pathfinding`] - Uniform-cost grid search
//! - [`search`] - Nearest-entity spiral search
//! - [`level`] - The live level and its tick loop
//! - [`economy`] - Money, unlocks and the shop
//! - [`design`] - Level design data and the built-in campaign
//! - [`campaign`] - Level sequencing
//! - [`clock`] - Fixed-step frame clock

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod behavior;
pub mod campaign;
pub mod clock;
pub mod config;
pub mod consts;
pub mod design;
pub mod draw;
pub mod economy;
pub mod entity;
pub mod error;
pub mod events;
pub mod grid;
pub mod level;
mod list;
pub mod math;
pub mod pathfinding;
pub mod registry;
pub mod rng;
pub mod search;
pub mod systems;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::behavior::{EntityFlags, EntityInfo, EntityKind};
    pub use crate::campaign::Campaign;
    pub use crate::clock::FrameClock;
    pub use crate::config::SimConfig;
    pub use crate::design::{LevelDesign, ShipEntry};
    pub use crate::draw::DrawCommand;
    pub use crate::economy::{Purchase, Stats};
    pub use crate::entity::{Entity, EntityId, EntityState, Path};
    pub use crate::error::{GameError, Result};
    pub use crate::events::{EffectKind, SimEvent, SoundCue};
    pub use crate::grid::{Grid, Tile, TileFlags, TileType};
    pub use crate::level::{Level, Outcome, Stage};
    pub use crate::math::{Aabb, Direction, IVec2, TileCoord, Vec2};
    pub use crate::pathfinding::find_path;
}
