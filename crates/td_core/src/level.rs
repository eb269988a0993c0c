//! The live level: grid, entities, stage and the fixed-step tick loop.
//!
//! # Tick order
//!
//! [`Level::tick`] walks the global entity list once, in creation order.
//! Entities created during the walk are appended at the tail and are visited
//! in the same walk. Each visit dispatches the kind's tick behavior, then
//! applies a bounds check. Entities marked for deletion are collected and
//! destroyed only after the walk has finished.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::behavior::{EntityFlags, EntityKind};
use crate::config::SimConfig;
use crate::design::LevelDesign;
use crate::draw::{self, DrawCommand};
use crate::economy::Stats;
use crate::entity::{Entity, EntityId};
use crate::error::{GameError, Result};
use crate::events::{EffectKind, SimEvent, SoundCue};
use crate::grid::{Grid, TileFlags};
use crate::math::{Aabb, IVec2, TileCoord, Vec2};
use crate::registry::EntityRegistry;
use crate::rng::SimRng;

/// How a finished level ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The truck reached the finish warehouse.
    Victory,
    /// The truck was destroyed.
    Defeat,
}

/// Level phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Player places buildings; nothing moves.
    Build,
    /// Ships land, aliens attack, the truck drives.
    Play,
    /// The level is over.
    Done(Outcome),
}

/// One level being simulated.
#[derive(Debug, Clone)]
pub struct Level {
    pub(crate) grid: Grid,
    pub(crate) entities: EntityRegistry,
    pub(crate) design: LevelDesign,
    pub(crate) start: TileCoord,
    pub(crate) finish: TileCoord,
    pub(crate) tick: u64,
    pub(crate) stage: Stage,
    pub(crate) stats: Stats,
    pub(crate) rng: SimRng,
    events: Vec<SimEvent>,
    deferred: Vec<EntityId>,
}

impl Level {
    /// Build a level from design data with fresh stats.
    pub fn new(design: &LevelDesign, config: &SimConfig) -> Result<Self> {
        Self::with_stats(design, config, Stats::new(config.starting_money))
    }

    /// Build a level from design data, carrying over `stats`.
    ///
    /// The truck is placed on the start warehouse and a flag on the finish.
    pub fn with_stats(design: &LevelDesign, config: &SimConfig, stats: Stats) -> Result<Self> {
        let map = design.parse_map()?;
        let mut level = Self::from_grid(map.grid, map.start, map.finish, config);
        level.design = design.clone();
        level.stats = stats;

        level.place(EntityKind::Truck, map.start)?;
        level.place(EntityKind::Flag, map.finish)?;
        if let Some(health) = level.truck().map(|t| t.health) {
            level.stats.truck_health = health;
        }

        info!(title = %design.title, width = level.grid.width(), height = level.grid.height(), "Level loaded");
        Ok(level)
    }

    /// Level over an existing grid with no entities and no ship manifest.
    #[must_use]
    pub fn from_grid(grid: Grid, start: TileCoord, finish: TileCoord, config: &SimConfig) -> Self {
        Self {
            grid,
            entities: EntityRegistry::with_capacity(config.clamped_capacity()),
            design: LevelDesign::default(),
            start,
            finish,
            tick: 0,
            stage: Stage::Build,
            stats: Stats::new(config.starting_money),
            rng: SimRng::new(config.seed),
            events: Vec::new(),
            deferred: Vec::new(),
        }
    }

    fn place(&mut self, kind: EntityKind, tile: TileCoord) -> Result<EntityId> {
        let id = self.new_entity(kind)?;
        self.set_position(id, Grid::tile_to_px(tile).as_vec2());
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Tile grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Entity storage.
    #[must_use]
    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    /// Design this level was built from.
    #[must_use]
    pub fn design(&self) -> &LevelDesign {
        &self.design
    }

    /// Start warehouse tile.
    #[must_use]
    pub fn start(&self) -> TileCoord {
        self.start
    }

    /// Finish warehouse tile.
    #[must_use]
    pub fn finish(&self) -> TileCoord {
        self.finish
    }

    /// Ticks simulated so far.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Player stats.
    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Mutable player stats.
    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    /// Look up an entity by handle.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Mutable entity lookup. Use [`Level::set_position`] to move entities.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// The truck, if still alive.
    #[must_use]
    pub fn truck(&self) -> Option<&Entity> {
        self.entities
            .find_first(EntityKind::Truck)
            .and_then(|id| self.entities.get(id))
    }

    // ------------------------------------------------------------------
    // Entity lifecycle
    // ------------------------------------------------------------------

    /// Create an entity with the base stats of `kind`.
    ///
    /// The entity has no position yet and is absent from every tile list
    /// until [`Level::set_position`] is called.
    pub fn new_entity(&mut self, kind: EntityKind) -> Result<EntityId> {
        let info = kind.info();
        if !info.is_entity() {
            return Err(GameError::NotAnEntity(info.name));
        }
        self.entities.create(kind)
    }

    /// Create and position an entity, dropping the spawn with a warning if
    /// the registry is full.
    pub(crate) fn spawn(&mut self, kind: EntityKind, pos: Vec2) -> Option<EntityId> {
        match self.new_entity(kind) {
            Ok(id) => {
                self.set_position(id, pos);
                Some(id)
            }
            Err(err) => {
                warn!(?kind, %err, "Spawn dropped");
                None
            }
        }
    }

    /// Move an entity, relinking it into the tile list of its new tile.
    ///
    /// Returns false for stale handles.
    pub fn set_position(&mut self, id: EntityId, pos: Vec2) -> bool {
        let Some(index) = self.entities.resolve(id) else {
            return false;
        };
        let Some((was_on_tile, old_tile)) = self.entities.get(id).map(|e| (e.on_tile, e.tile)) else {
            return false;
        };

        let new_tile = self.grid.px_to_tile(pos.as_ivec2());
        let is_new_tile = !was_on_tile || old_tile != new_tile;

        if was_on_tile && is_new_tile {
            if let Some(list) = self.grid.list_mut(old_tile) {
                self.entities.unlink_tile(index, list);
            }
        }

        let on_tile = self.grid.in_bounds(new_tile);
        if let Some(e) = self.entities.get_mut(id) {
            e.pos = pos;
            e.px = pos.round();
            e.tile = new_tile;
            e.on_tile = on_tile;
        }

        if is_new_tile && on_tile {
            if let Some(list) = self.grid.list_mut(new_tile) {
                self.entities.link_tile(index, list);
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Spatial queries
    // ------------------------------------------------------------------

    /// Entities linked to one tile, in link order.
    pub fn entities_on_tile(&self, tile: TileCoord) -> impl Iterator<Item = &Entity> + '_ {
        self.grid
            .list(tile)
            .copied()
            .into_iter()
            .flat_map(move |list| self.entities.tile_iter(&list))
    }

    /// Handles of up to `max` entities on a tile. Overflow is logged and the
    /// result truncated.
    #[must_use]
    pub fn tile_entities(&self, tile: TileCoord, max: usize) -> Vec<EntityId> {
        let mut out = Vec::new();
        for e in self.entities_on_tile(tile) {
            if out.len() == max {
                warn!(?tile, max, "Tile query overflow");
                break;
            }
            out.push(e.id());
        }
        out
    }

    /// Handles of up to `max` entities whose bounding box overlaps `area`.
    ///
    /// Scans the tiles under `area` plus a one-tile margin, so entities whose
    /// box straddles a tile edge are still found. Overflow is logged and the
    /// result truncated.
    #[must_use]
    pub fn box_entities(&self, area: Aabb, max: usize) -> Vec<EntityId> {
        let margin = IVec2::splat(1);
        let tmin = self.grid.clamp_tile(self.grid.px_to_tile(area.min) - margin);
        let tmax = self.grid.clamp_tile(self.grid.px_to_tile(area.max) + margin);

        let mut out = Vec::new();
        for x in tmin.x..=tmax.x {
            for y in tmin.y..=tmax.y {
                for e in self.entities_on_tile(IVec2::new(x, y)) {
                    if !area.collides(e.aabb()) {
                        continue;
                    }
                    if out.len() == max {
                        warn!(?area, max, "Box query overflow");
                        return out;
                    }
                    out.push(e.id());
                }
            }
        }
        out
    }

    /// True if an entity that blocks placement stands on `tile`.
    #[must_use]
    pub fn tile_blocked(&self, tile: TileCoord) -> bool {
        self.entities_on_tile(tile)
            .any(|e| !e.info().flags.contains(EntityFlags::DOES_NOT_BLOCK))
    }

    /// Check that every on-tile entity is linked exactly once, into the tile
    /// its position maps to, and that off-tile entities are linked nowhere.
    #[must_use]
    pub fn validate_spatial(&self) -> bool {
        let mut seen: HashMap<EntityId, (TileCoord, usize)> = HashMap::new();
        for tile in self.grid.coords() {
            for e in self.entities_on_tile(tile) {
                let entry = seen.entry(e.id()).or_insert((tile, 0));
                entry.1 += 1;
            }
        }

        self.entities.iter().all(|e| {
            let expected = self.grid.px_to_tile(e.pos().as_ivec2());
            match (e.on_tile(), seen.get(&e.id())) {
                (true, Some(&(tile, count))) => count == 1 && tile == e.tile() && tile == expected,
                (false, None) => true,
                _ => false,
            }
        })
    }

    // ------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------

    /// Run one fixed simulation step.
    pub fn tick(&mut self) {
        self.refresh_music();

        let mut deferred = std::mem::take(&mut self.deferred);
        let mut cursor = self.entities.first_index();
        while let Some(index) = cursor {
            if let Some(id) = self.entities.id_at(index) {
                self.tick_entity(id);
                if self.entities.get(id).is_some_and(Entity::is_deleted) {
                    deferred.push(id);
                }
            }
            cursor = self.entities.next_index(index);
        }

        for id in deferred.drain(..) {
            self.entities.destroy(id, &mut self.grid);
        }
        self.deferred = deferred;
        self.tick += 1;

        #[cfg(feature = "debug-validation")]
        debug_assert!(self.validate_spatial(), "tile lists out of sync at tick {}", self.tick);

        #[cfg(debug_assertions)]
        {
            let hash = self.state_hash();
            debug!(tick = self.tick, state_hash = hash, "Level state hash");
        }
    }

    fn tick_entity(&mut self, id: EntityId) {
        let Some(kind) = self.entities.get(id).filter(|e| !e.is_deleted()).map(Entity::kind) else {
            return;
        };

        if let Some(tick) = kind.info().behavior.tick {
            tick(self, id);
        }

        let grid = &self.grid;
        if let Some(e) = self.entities.get_mut(id) {
            e.ticks_alive += 1;
            if !grid.px_in_bounds(e.pos) {
                e.delete = true;
            }
        }
    }

    /// Per-frame continuous update with the frame delta in seconds.
    pub fn update(&mut self, dt: f32) {
        for id in self.entities.ids() {
            let Some(kind) = self.entities.get(id).map(Entity::kind) else {
                continue;
            };
            if let Some(update) = kind.info().behavior.update {
                update(self, id, dt);
            }
        }
    }

    /// Recompute per-tile music levels from boombox entities.
    fn refresh_music(&mut self) {
        self.grid.clear_music();

        let sources: Vec<(TileCoord, i32)> = self
            .entities
            .iter()
            .filter(|e| e.on_tile() && !e.is_deleted())
            .filter_map(|e| e.info().music.map(|m| (e.tile(), m.radius)))
            .collect();

        for (center, radius) in sources {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let ring = dx.abs().max(dy.abs());
                    let strength = (radius + 1 - ring) as u8;
                    if let Some(tile) = self.grid.tile_mut(center + IVec2::new(dx, dy)) {
                        tile.music = tile.music.saturating_add(strength);
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Stage
    // ------------------------------------------------------------------

    /// Switch stage, emitting a [`SimEvent::StageChanged`].
    pub fn set_stage(&mut self, stage: Stage) {
        if self.stage == stage {
            return;
        }
        let from = self.stage;
        self.stage = stage;
        info!(?from, to = ?stage, tick = self.tick, "Stage changed");
        self.emit(SimEvent::StageChanged { from, to: stage });
    }

    /// Leave the build stage: land the ship manifest on random free spawn
    /// tiles and start play. Returns false outside the build stage.
    pub fn go(&mut self) -> bool {
        if self.stage != Stage::Build {
            return false;
        }
        self.place_ships();
        self.set_stage(Stage::Play);
        true
    }

    fn place_ships(&mut self) {
        let mut free: Vec<TileCoord> = self
            .grid
            .tiles_with_flags(TileFlags::ALIEN_SPAWN)
            .filter(|&t| !self.tile_blocked(t))
            .collect();

        for entry in self.design.ships.clone() {
            for _ in 0..entry.count {
                if free.is_empty() {
                    warn!(kind = ?entry.kind, "No free alien spawn tile left for ship");
                    return;
                }
                let tile = free.swap_remove(self.rng.next_index(free.len()));
                self.spawn(entry.kind, Grid::tile_to_px(tile).as_vec2());
            }
        }
    }

    /// End the level. Ignored if it is already over.
    pub(crate) fn finish_with(&mut self, outcome: Outcome) {
        if matches!(self.stage, Stage::Done(_)) {
            return;
        }
        info!(?outcome, tick = self.tick, money = self.stats.money, "Level finished");
        self.set_stage(Stage::Done(outcome));
    }

    /// Outcome once the level is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.stage {
            Stage::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Alien spawn tiles within reach of any radar.
    #[must_use]
    pub fn revealed_spawn_tiles(&self) -> Vec<TileCoord> {
        let radars: Vec<(TileCoord, i32)> = self
            .entities
            .iter()
            .filter_map(|e| e.info().radar.map(|r| (e.tile(), r.radius)))
            .collect();

        self.grid
            .tiles_with_flags(TileFlags::ALIEN_SPAWN)
            .filter(|&t| {
                radars
                    .iter()
                    .any(|&(center, radius)| t.chebyshev(center) <= radius as u32)
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    pub(crate) fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub(crate) fn sound(&mut self, cue: SoundCue, volume: f32) {
        self.emit(SimEvent::Sound { cue, volume });
    }

    pub(crate) fn effect(&mut self, effect: EffectKind, pos: Vec2, palette: u8, lifetime: u32) {
        self.emit(SimEvent::Effect {
            effect,
            pos,
            palette,
            lifetime,
        });
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render commands for every entity, plus radar hints while building.
    #[must_use]
    pub fn draw(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        for e in self.entities.iter() {
            if let Some(draw) = e.info().behavior.draw {
                draw(self, e, &mut out);
            }
        }
        if self.stage == Stage::Build {
            out.extend(self.revealed_spawn_tiles().into_iter().map(draw::spawn_hint));
        }
        out
    }

    /// Hash of the simulation state, for determinism checks.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.tick.hash(&mut hasher);
        self.stage.hash(&mut hasher);
        self.stats.money.hash(&mut hasher);
        self.entities.len().hash(&mut hasher);

        for e in self.entities.iter() {
            e.id().hash(&mut hasher);
            e.kind().hash(&mut hasher);
            e.pos().x.to_bits().hash(&mut hasher);
            e.pos().y.to_bits().hash(&mut hasher);
            e.health.to_bits().hash(&mut hasher);
        }

        hasher.finish()
    }
}
