use tracing::{error, info};

use super::CategorizedCollection;
use crate::models::Entity;
use crate::storage::{JsonFileStorage, LoadReport, Storage};
use crate::TrackerError;

/// Categorized entities of one kind plus the adapter that persists them.
///
/// Every successful `add` and `delete` is followed by a save. When the save
/// fails the in-memory change is kept and the error is returned, so memory
/// may run ahead of disk until the next successful save.
#[derive(Debug)]
pub struct EntityStore<E, S = JsonFileStorage<E>> {
    items: CategorizedCollection<E>,
    storage: S,
}

impl<E: Entity, S: Storage<E>> EntityStore<E, S> {
    /// Empty store seeded with the kind's declared categories.
    pub fn new(storage: S) -> Self {
        Self {
            items: CategorizedCollection::new(),
            storage,
        }
    }

    /// Empty store seeded with an explicit category set.
    #[cfg(test)]
    pub fn with_categories<I, C>(categories: I, storage: S) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self {
            items: CategorizedCollection::with_categories(categories),
            storage,
        }
    }

    /// Append `entity` to its category and persist.
    pub fn add(&mut self, entity: E) -> Result<(), TrackerError> {
        let before = self.items.len();
        self.items.insert(entity.clone())?;
        debug_assert!(self.items.contains(&entity));
        debug_assert_eq!(self.items.len(), before + 1);
        info!("Added {} to {}: {}", E::KIND, entity.category(), entity.describe());
        self.persist()
    }

    /// Remove the entity at `position` (0-based) in `category` and persist.
    ///
    /// The removed entity is returned only when the save succeeded; callers
    /// that need to report it on failure should read it with `get` first.
    pub fn delete(&mut self, category: &str, position: usize) -> Result<E, TrackerError> {
        let removed = self.items.remove(category, position)?;
        info!("Deleted {} from {}: {}", E::KIND, category, removed.describe());
        self.persist()?;
        Ok(removed)
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.items.contains(entity)
    }

    pub fn get(&self, category: &str, position: usize) -> Option<&E> {
        self.items.get(category, position)
    }

    pub fn items(&self) -> &CategorizedCollection<E> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write the whole collection through the adapter.
    pub fn persist(&self) -> Result<(), TrackerError> {
        self.storage.save(&self.items).inspect_err(|e| {
            error!("Failed to persist {} entries: {}", E::KIND, e);
        })
    }

    /// Load persisted entities into this store.
    ///
    /// Records go through the same insertion path as `add` but the file is
    /// not rewritten, so skipped records stay on disk for manual repair.
    pub fn load(&mut self) -> LoadReport {
        self.storage.load(&mut self.items)
    }
}
