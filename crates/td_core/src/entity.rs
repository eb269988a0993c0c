//! Entity data: handles, per-kind state and owned paths.

use serde::{Deserialize, Serialize};

use crate::behavior::{EntityInfo, EntityKind};
use crate::math::{Aabb, Direction, IVec2, TileCoord, Vec2};

/// Generations are 15 bits wide and wrap.
pub const GENERATION_MASK: u16 = 0x7FFF;

/// Generation-checked handle to an entity slot.
///
/// The slot generation is bumped every time the slot is handed out, so a
/// handle kept past its entity's destruction never resolves to whatever
/// reuses the slot later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    generation: u16,
    index: u16,
}

impl EntityId {
    pub(crate) const fn new(generation: u16, index: u16) -> Self {
        Self {
            generation: generation & GENERATION_MASK,
            index,
        }
    }

    /// Slot index.
    #[must_use]
    pub const fn index(self) -> u16 {
        self.index
    }

    /// Slot generation at creation time.
    #[must_use]
    pub const fn generation(self) -> u16 {
        self.generation
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Ordered waypoints plus the index of the next one to reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    tiles: Vec<TileCoord>,
    next: usize,
}

impl Path {
    /// Wrap a start-to-goal tile sequence.
    #[must_use]
    pub fn new(tiles: Vec<TileCoord>) -> Self {
        Self { tiles, next: 0 }
    }

    /// Wrap a path searched from `from`. When the first tile is `from`
    /// itself the mover is already there, so it heads for the second.
    #[must_use]
    pub fn departing(tiles: Vec<TileCoord>, from: TileCoord) -> Self {
        let next = usize::from(tiles.len() > 1 && tiles.first() == Some(&from));
        Self { tiles, next }
    }

    /// All waypoints, start first.
    #[must_use]
    pub fn tiles(&self) -> &[TileCoord] {
        &self.tiles
    }

    /// Index of the next waypoint.
    #[must_use]
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Next waypoint, if any remain.
    #[must_use]
    pub fn waypoint(&self) -> Option<TileCoord> {
        self.tiles.get(self.next).copied()
    }

    /// Final waypoint.
    #[must_use]
    pub fn goal(&self) -> Option<TileCoord> {
        self.tiles.last().copied()
    }

    /// Mark the current waypoint reached.
    pub fn advance(&mut self) {
        self.next = (self.next + 1).min(self.tiles.len());
    }

    /// True once every waypoint has been reached.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next >= self.tiles.len()
    }
}

/// Behavior-specific state, tagged by the kind of entity that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityState {
    /// Kinds with no mutable behavior state.
    None,
    /// Turrets and cannons.
    Turret {
        /// Barrel angle in radians.
        angle: f32,
        /// Current target, if still believed alive.
        target: Option<EntityId>,
    },
    /// Straight-line projectiles.
    Bullet {
        /// Velocity in pixels per second.
        velocity: Vec2,
    },
    /// Area-damage projectiles that detonate at a tile.
    Shell {
        /// Velocity in pixels per second.
        velocity: Vec2,
        /// Tile the shell detonates on.
        target_tile: TileCoord,
    },
    /// Aliens.
    Alien {
        /// Sprite facing.
        dir: Direction,
        /// Entity being chased.
        target: Option<EntityId>,
        /// Set while no path exists, so the stall is logged once.
        stalled: bool,
    },
    /// The truck and decoy trucks.
    Truck {
        /// Sprite facing.
        dir: Direction,
    },
}

impl EntityState {
    /// Default state for a freshly created entity of `kind`.
    #[must_use]
    pub fn initial(kind: EntityKind) -> Self {
        let info = kind.info();
        if info.turret.is_some() {
            Self::Turret {
                angle: 0.0,
                target: None,
            }
        } else if let Some(projectile) = info.projectile {
            if projectile.blast.is_some() {
                Self::Shell {
                    velocity: Vec2::ZERO,
                    target_tile: IVec2::ZERO,
                }
            } else {
                Self::Bullet {
                    velocity: Vec2::ZERO,
                }
            }
        } else if info.enemy.is_some() && info.ship.is_none() {
            Self::Alien {
                dir: Direction::South,
                target: None,
                stalled: false,
            }
        } else if matches!(kind, EntityKind::Truck | EntityKind::DecoyTruck) {
            Self::Truck {
                dir: Direction::South,
            }
        } else {
            Self::None
        }
    }
}

/// A live simulation object.
///
/// Position fields are private to the crate: they change only through
/// [`crate::level::Level::set_position`], which keeps the tile lists in sync.
#[derive(Debug, Clone)]
pub struct Entity {
    id: EntityId,
    kind: EntityKind,
    pub(crate) pos: Vec2,
    pub(crate) px: IVec2,
    pub(crate) tile: TileCoord,
    pub(crate) on_tile: bool,
    /// Current health.
    pub health: f32,
    /// Health at the end of the previous tick.
    pub last_health: f32,
    /// Ticks since creation.
    pub ticks_alive: u64,
    /// Kind-specific state.
    pub state: EntityState,
    /// Current route, owned by the entity.
    pub path: Option<Path>,
    /// Movement applied during the last tick.
    pub last_move: Vec2,
    pub(crate) delete: bool,
}

impl Entity {
    pub(crate) fn new(id: EntityId, kind: EntityKind) -> Self {
        let info = kind.info();
        Self {
            id,
            kind,
            pos: Vec2::ZERO,
            px: IVec2::ZERO,
            tile: IVec2::ZERO,
            on_tile: false,
            health: info.base_health,
            last_health: info.base_health,
            ticks_alive: 0,
            state: EntityState::initial(kind),
            path: None,
            last_move: Vec2::ZERO,
            delete: false,
        }
    }

    /// Handle of this entity.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Kind of this entity.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Static table row for this entity's kind.
    #[must_use]
    pub fn info(&self) -> &'static EntityInfo {
        self.kind.info()
    }

    /// Continuous pixel position.
    #[must_use]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Position snapped to whole pixels.
    #[must_use]
    pub fn px(&self) -> IVec2 {
        self.px
    }

    /// Tile the position falls on (clamped into the grid).
    #[must_use]
    pub fn tile(&self) -> TileCoord {
        self.tile
    }

    /// True while linked into a tile list.
    #[must_use]
    pub fn on_tile(&self) -> bool {
        self.on_tile
    }

    /// True once marked for deletion at the end of the tick.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.delete
    }

    /// Mark for deletion. The slot is freed after the current tick walk.
    pub fn mark_deleted(&mut self) {
        self.delete = true;
    }

    /// Bounding box in level pixels.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        self.info().aabb.translate(self.px)
    }

    /// Center of the bounding box as a float position.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.aabb().center().as_vec2()
    }

    /// True when health has run out.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage, never healing.
    pub fn damage(&mut self, amount: f32) {
        if amount > 0.0 {
            self.health -= amount;
        }
    }
}
