use anyhow::{Result, anyhow};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use super::Storage;
use super::schema::local_storage;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type Manager = ConnectionManager<SqliteConnection>;

/// Key/value storage in a single SQLite table.
///
/// The pool holds exactly one connection so `:memory:` databases survive
/// between calls.
pub struct SqliteStorage {
    pool: Pool<Manager>,
}

impl SqliteStorage {
    pub fn open(path: &str) -> Result<Self> {
        info!("Opening local storage at {}", path);
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(Manager::new(path))
            .map_err(|e| anyhow!("Failed to create DB pool: {}", e))?;

        let storage = Self { pool };
        storage.init()?;
        Ok(storage)
    }

    fn conn(&self) -> Result<PooledConnection<Manager>> {
        self.pool
            .get()
            .map_err(|e| anyhow!("Failed to get DB connection: {}", e))
    }

    fn init(&self) -> Result<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;

        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; PRAGMA busy_timeout = 5000;",
        )?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("Failed to run migrations: {}", e))?;
        if applied.is_empty() {
            debug!("Local storage schema up to date");
        }
        for version in applied {
            info!("Migration {} applied successfully", version);
        }
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let value = local_storage::table
            .find(key)
            .select(local_storage::value)
            .first::<String>(conn)
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let now = chrono::Utc::now().timestamp();
        diesel::replace_into(local_storage::table)
            .values((
                local_storage::key.eq(key),
                local_storage::value.eq(value),
                local_storage::updated_at.eq(now),
            ))
            .execute(conn)?;
        debug!("Stored {} bytes under {}", value.len(), key);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        diesel::delete(local_storage::table.find(key)).execute(conn)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let keys = local_storage::table
            .select(local_storage::key)
            .order(local_storage::key.asc())
            .load::<String>(conn)?;
        Ok(keys)
    }

    fn clear(&self) -> Result<()> {
        let mut pooled = self.conn()?;
        let conn: &mut SqliteConnection = &mut pooled;
        diesel::delete(local_storage::table).execute(conn)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_replaces_and_removes_items() {
        let storage = SqliteStorage::open(":memory:").unwrap();
        assert_eq!(storage.get_item("workouts").unwrap(), None);

        storage.set_item("workouts", r#"[{"id":"a"}]"#).unwrap();
        storage.set_item("workouts", "[]").unwrap();
        storage.set_item("reminders", "[]").unwrap();

        assert_eq!(storage.get_item("workouts").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.keys().unwrap(), vec!["reminders", "workouts"]);

        storage.remove_item("workouts").unwrap();
        assert_eq!(storage.get_item("workouts").unwrap(), None);

        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }
}
