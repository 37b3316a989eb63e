//! Per-scene entity storage addressed by stable ids.
//!
//! Entities are created when a scene mounts and live until it unmounts, so the
//! arena never removes single entries; ids stay valid for the arena's lifetime.

use fnv::FnvHashMap;
use std::ops::{Index, IndexMut};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct Arena<T> {
    items: Vec<T>,
    names: FnvHashMap<&'static str, EntityId>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            names: FnvHashMap::default(),
        }
    }

    /// Insert under a unique name. A repeated name rebinds to the newest entity.
    pub fn insert(&mut self, name: &'static str, item: T) -> EntityId {
        let id = EntityId(self.items.len() as u32);
        self.items.push(item);
        self.names.insert(name, id);
        id
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.items.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.get_mut(id.index())
    }

    pub fn id_of(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&T> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut T> {
        let id = self.id_of(name)?;
        self.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> {
        (0..self.items.len() as u32).map(EntityId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (EntityId(i as u32), item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, item)| (EntityId(i as u32), item))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<EntityId> for Arena<T> {
    type Output = T;

    fn index(&self, id: EntityId) -> &T {
        &self.items[id.index()]
    }
}

impl<T> IndexMut<EntityId> for Arena<T> {
    fn index_mut(&mut self, id: EntityId) -> &mut T {
        &mut self.items[id.index()]
    }
}
