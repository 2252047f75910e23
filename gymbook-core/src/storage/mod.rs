//! Durable key/value storage the entity stores mirror themselves into.
//!
//! A backend only ever sees opaque text under fixed keys; encoding is the
//! store's business.

mod schema;
mod sqlite;

pub use sqlite::SqliteStorage;

use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;

    fn clear(&self) -> Result<()> {
        for key in self.keys()? {
            self.remove_item(&key)?;
        }
        Ok(())
    }
}

/// Opens the backend named by a database url: `:memory:` (or empty) keeps
/// everything in process, anything else is a SQLite path.
pub fn open(database_url: &str) -> Result<Arc<dyn Storage>> {
    let url = database_url.trim();
    if url.is_empty() || url == ":memory:" {
        return Ok(Arc::new(MemoryStorage::new()));
    }
    Ok(Arc::new(SqliteStorage::open(url)?))
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>> {
        self.items
            .lock()
            .map_err(|e| anyhow!("memory storage poisoned: {}", e))
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_items() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("workouts").unwrap(), None);

        storage.set_item("workouts", "[]").unwrap();
        storage.set_item("moodLogs", "[1]").unwrap();
        assert_eq!(storage.get_item("workouts").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.keys().unwrap(), vec!["moodLogs", "workouts"]);

        storage.remove_item("workouts").unwrap();
        assert_eq!(storage.get_item("workouts").unwrap(), None);

        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn open_memory_url() {
        let storage = open(":memory:").unwrap();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
