//! In-memory storage backend.
//!
//! Holds one hero snapshot in insertion order with an id index. Used by the
//! server (loaded from a JSON snapshot), embedded callers and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::hero::{Hero, HeroId};
use crate::storage::traits::{HeroStore, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

#[derive(Debug, Default)]
struct HeroState {
    heroes: Vec<Hero>,
    by_id: HashMap<HeroId, usize>,
}

/// Thread-safe in-memory hero store.
#[derive(Debug, Default)]
pub struct InMemoryHeroStore {
    state: RwLock<HeroState>,
}

impl InMemoryHeroStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from heroes, rejecting duplicate ids.
    pub fn from_heroes(heroes: impl IntoIterator<Item = Hero>) -> Result<Self, StorageError> {
        let store = Self::new();
        for hero in heroes {
            store.insert(hero)?;
        }
        Ok(store)
    }

    /// Append a hero. Returns `DuplicateKey` if the id is already present.
    pub fn insert(&self, hero: Hero) -> Result<(), StorageError> {
        let mut state = self.state.write().map_err(|_| lock_err("hero.insert"))?;
        if state.by_id.contains_key(&hero.id) {
            return Err(StorageError::DuplicateKey(hero.id));
        }
        let index = state.heroes.len();
        state.by_id.insert(hero.id, index);
        state.heroes.push(hero);
        Ok(())
    }
}

impl HeroStore for InMemoryHeroStore {
    fn get(&self, id: HeroId) -> Result<Option<Hero>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("hero.get"))?;
        Ok(state.by_id.get(&id).map(|&index| state.heroes[index].clone()))
    }

    fn list(&self) -> Result<Vec<Hero>, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("hero.list"))?;
        Ok(state.heroes.clone())
    }

    fn count(&self) -> Result<usize, StorageError> {
        let state = self.state.read().map_err(|_| lock_err("hero.count"))?;
        Ok(state.heroes.len())
    }
}
