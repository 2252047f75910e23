//! Array-backed entity stores.
//!
//! Each store owns an ordered `Vec` of one entity type. Mutations are
//! synchronous and last-write-wins; a store attached to a [`Storage`] writes
//! its whole array under the entity's key after every change and reads it
//! back once when loaded.

mod queries;

use log::{debug, error, warn};
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{Archivable, Dated, Entity, new_id};
use crate::storage::Storage;
use chrono::NaiveDate;

pub struct EntityStore<T: Entity> {
    items: Vec<T>,
    storage: Option<Arc<dyn Storage>>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<T: Entity> std::fmt::Debug for EntityStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("key", &T::STORAGE_KEY)
            .field("len", &self.items.len())
            .field("persistent", &self.storage.is_some())
            .finish()
    }
}

impl<T: Entity> EntityStore<T> {
    /// A store that never touches durable storage.
    pub fn in_memory() -> Self {
        Self {
            items: Vec::new(),
            storage: None,
        }
    }

    /// Loads the store from `storage`. Missing, unreadable or corrupt data
    /// yields an empty store; the failure is logged, never returned.
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let items = match storage.get_item(T::STORAGE_KEY) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<T>>(&text) {
                Ok(items) => {
                    debug!("Loaded {} {} records", items.len(), T::KIND);
                    items
                }
                Err(e) => {
                    error!("Error parsing stored {} data: {}", T::KIND, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Error reading stored {} data: {}", T::KIND, e);
                Vec::new()
            }
        };

        let mut store = Self {
            items,
            storage: Some(storage),
        };
        store.repair_ids();
        store
    }

    /// Gives records with empty or repeated ids a fresh one.
    fn repair_ids(&mut self) {
        let mut seen = HashSet::new();
        let mut repaired = 0;
        for item in &mut self.items {
            if item.id().is_empty() || !seen.insert(item.id().to_string()) {
                let id = new_id();
                seen.insert(id.clone());
                item.set_id(id);
                repaired += 1;
            }
        }
        if repaired > 0 {
            warn!("Assigned fresh ids to {} {} records", repaired, T::KIND);
            self.persist();
        }
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        let text = match serde_json::to_string(&self.items) {
            Ok(text) => text,
            Err(e) => {
                error!("Error serializing {} data: {}", T::KIND, e);
                return;
            }
        };
        if let Err(e) = storage.set_item(T::STORAGE_KEY, &text) {
            error!("Error saving {} data: {}", T::KIND, e);
        }
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Appends `record` and returns its id. A record arriving with an empty
    /// id, or one already in use, is given a fresh id.
    pub fn add(&mut self, mut record: T) -> String {
        if record.id().is_empty() || self.contains(record.id()) {
            record.set_id(new_id());
        }
        let id = record.id().to_string();
        self.items.push(record);
        debug!("Added {} {}", T::KIND, id);
        self.persist();
        id
    }

    /// Replaces the record with the same id. Returns `false` and leaves the
    /// store untouched when no record matches.
    pub fn update(&mut self, record: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                self.persist();
                true
            }
            None => {
                debug!("Ignoring update of unknown {} {}", T::KIND, record.id());
                false
            }
        }
    }

    /// Applies `f` to the record with `id`, if any.
    pub fn modify<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                // Keep the id stable even if `f` touched it.
                item.set_id(id.to_string());
                self.persist();
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() != before;
        if removed {
            debug!("Deleted {} {}", T::KIND, id);
            self.persist();
        }
        removed
    }

    /// Removes every record matching `predicate`, returning how many went.
    pub fn delete_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        let removed = before - self.items.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    /// Swaps the whole collection, e.g. on import.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
        self.repair_ids();
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }
}

impl<T: Entity + Dated> EntityStore<T> {
    /// Records dated within `from..=to`, oldest first.
    pub fn by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&T> {
        let mut items: Vec<&T> = self
            .items
            .iter()
            .filter(|item| item.date() >= from && item.date() <= to)
            .collect();
        items.sort_by_key(|item| item.date());
        items
    }

    pub fn on_date(&self, date: NaiveDate) -> Vec<&T> {
        self.by_date_range(date, date)
    }

    pub fn latest(&self) -> Option<&T> {
        self.items.iter().max_by_key(|item| item.date())
    }
}

impl<T: Entity + Archivable> EntityStore<T> {
    pub fn set_archived(&mut self, id: &str, archived: bool) -> bool {
        self.modify(id, |item| item.set_archived(archived))
    }

    pub fn unarchived(&self) -> Vec<&T> {
        self.filter(|item| !item.is_archived())
    }
}
