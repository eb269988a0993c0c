//! Fixed-capacity entity arena with generation-checked handles.
//!
//! Slots are never reallocated. Each slot carries the intrusive links for the
//! global list (creation order) and for the tile list of the tile its entity
//! stands on.

use crate::behavior::EntityKind;
use crate::entity::{Entity, EntityId, GENERATION_MASK};
use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::list::{self, Link, Linked, ListHead, ListIter, ListKind};

#[derive(Debug, Clone, Default)]
pub(crate) struct Slot {
    generation: u16,
    entity: Option<Entity>,
    links: [Link; 2],
}

impl Linked for Slot {
    fn link(&self, kind: ListKind) -> Link {
        self.links[kind as usize]
    }

    fn link_mut(&mut self, kind: ListKind) -> &mut Link {
        &mut self.links[kind as usize]
    }
}

/// Storage for every entity of a level.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    slots: Vec<Slot>,
    global: ListHead,
    cursor: usize,
}

impl EntityRegistry {
    /// Create a registry with `capacity` slots (at most `u16::MAX`).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, u16::MAX as usize);
        Self {
            slots: vec![Slot::default(); capacity],
            global: ListHead::default(),
            cursor: 0,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.global.len
    }

    /// True if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global.len == 0
    }

    /// Allocate a slot for a new entity of `kind` and append it to the
    /// global list. Probing starts at the last allocated or freed slot.
    pub(crate) fn create(&mut self, kind: EntityKind) -> Result<EntityId> {
        let capacity = self.slots.len();
        for step in 0..capacity {
            let index = (self.cursor + step) % capacity;
            let slot = &mut self.slots[index];
            if slot.entity.is_some() {
                continue;
            }

            slot.generation = slot.generation.wrapping_add(1) & GENERATION_MASK;
            let id = EntityId::new(slot.generation, index as u16);
            slot.entity = Some(Entity::new(id, kind));
            slot.links = [Link::default(); 2];

            list::push_back(&mut self.slots, &mut self.global, index as u16, ListKind::Global);
            self.cursor = index;
            return Ok(id);
        }

        Err(GameError::RegistryFull { capacity })
    }

    /// Unlink the entity from its tile and the global list, then free the
    /// slot. Returns false for stale handles.
    pub(crate) fn destroy(&mut self, id: EntityId, grid: &mut Grid) -> bool {
        let Some(index) = self.resolve(id) else {
            return false;
        };

        let placement = self.slots[index as usize]
            .entity
            .as_ref()
            .and_then(|e| e.on_tile.then_some(e.tile));
        if let Some(tile) = placement {
            if let Some(tile_list) = grid.list_mut(tile) {
                list::unlink(&mut self.slots, tile_list, index, ListKind::Tile);
            }
        }
        list::unlink(&mut self.slots, &mut self.global, index, ListKind::Global);

        self.slots[index as usize].entity = None;
        self.cursor = index as usize;
        true
    }

    /// Slot index for a handle, if the handle is current.
    pub(crate) fn resolve(&self, id: EntityId) -> Option<u16> {
        let slot = self.slots.get(id.index() as usize)?;
        (slot.entity.is_some() && slot.generation == id.generation()).then_some(id.index())
    }

    /// True if the handle refers to a live entity.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.resolve(id).is_some()
    }

    /// Look up an entity. Stale handles resolve to `None`.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let index = self.resolve(id)?;
        self.slots[index as usize].entity.as_ref()
    }

    /// Mutable lookup. Stale handles resolve to `None`.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = self.resolve(id)?;
        self.slots[index as usize].entity.as_mut()
    }

    /// First live entity of `kind` in creation order.
    #[must_use]
    pub fn find_first(&self, kind: EntityKind) -> Option<EntityId> {
        self.iter()
            .find(|e| e.kind() == kind && !e.is_deleted())
            .map(Entity::id)
    }

    /// Live entities in global-list order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        ListIter::new(&self.slots, &self.global, ListKind::Global)
            .filter_map(move |i| self.slots[i as usize].entity.as_ref())
    }

    /// Handles of live entities in global-list order.
    #[must_use]
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(Entity::id).collect()
    }

    pub(crate) fn first_index(&self) -> Option<u16> {
        self.global.head
    }

    pub(crate) fn next_index(&self, index: u16) -> Option<u16> {
        self.slots[index as usize].link(ListKind::Global).next
    }

    pub(crate) fn id_at(&self, index: u16) -> Option<EntityId> {
        self.slots
            .get(index as usize)
            .and_then(|s| s.entity.as_ref())
            .map(Entity::id)
    }

    pub(crate) fn link_tile(&mut self, index: u16, tile_list: &mut ListHead) {
        list::push_back(&mut self.slots, tile_list, index, ListKind::Tile);
    }

    pub(crate) fn unlink_tile(&mut self, index: u16, tile_list: &mut ListHead) {
        list::unlink(&mut self.slots, tile_list, index, ListKind::Tile);
    }

    /// Entities on one tile list, in link order.
    pub(crate) fn tile_iter<'a>(&'a self, tile_list: &ListHead) -> impl Iterator<Item = &'a Entity> + 'a {
        ListIter::new(&self.slots, tile_list, ListKind::Tile)
            .filter_map(move |i| self.slots[i as usize].entity.as_ref())
    }
}
