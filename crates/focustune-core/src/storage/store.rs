//! SQLite-backed key/blob state store.
//!
//! Three logical tables (`model`, `zones`, `capacity`) are rows in a
//! single kv table; each row holds a whole-table JSON image. A write
//! replaces the prior image. The table names and the JSON envelope are
//! the on-disk compatibility contract for backup/restore.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::data_dir;
use crate::error::StorageError;

/// Logical table holding per-context arm posteriors.
pub const MODEL_TABLE: &str = "model";
/// Logical table holding per-context zone records.
pub const ZONES_TABLE: &str = "zones";
/// Logical table holding per-context capacity windows.
pub const CAPACITY_TABLE: &str = "capacity";

const ALL_TABLES: [&str; 3] = [MODEL_TABLE, ZONES_TABLE, CAPACITY_TABLE];

/// Durable store for the recommender's three state tables.
pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    /// Open the store at `~/.focustune/focustune.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir().join("focustune.db"))
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests and dry runs).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS state (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Load a whole logical table.
    ///
    /// Read failures (missing row, parse error) degrade to the default
    /// empty image: the recommender proceeds as if cold-started.
    pub fn load<T: DeserializeOwned + Default>(&self, table: &str) -> T {
        let raw = match self.read_raw(table) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(table, error = %e, "state read failed; treating as empty");
                return T::default();
            }
        };
        match raw {
            None => T::default(),
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(table, error = %e, "state parse failed; treating as empty");
                    T::default()
                }
            },
        }
    }

    /// Replace a whole logical table.
    ///
    /// # Errors
    /// Returns an error if encoding or the write fails; callers treat this
    /// as best-effort.
    pub fn save<T: Serialize>(&self, table: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::EncodeFailed {
            table: table.to_string(),
            source,
        })?;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO state (key, value) VALUES (?1, ?2)",
                params![table, json],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Replace all three tables in one transaction.
    ///
    /// # Errors
    /// Returns an error if any write fails; on error no table is changed.
    pub fn replace_all(&mut self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let tx = self.conn.transaction().map_err(StorageError::from)?;
        for table in ALL_TABLES {
            tx.execute("DELETE FROM state WHERE key = ?1", params![table])
                .map_err(StorageError::from)?;
        }
        for (table, json) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO state (key, value) VALUES (?1, ?2)",
                params![table, json],
            )
            .map_err(StorageError::from)?;
        }
        tx.commit().map_err(StorageError::from)
    }

    /// Wipe all three tables atomically.
    ///
    /// # Errors
    /// Returns an error if the delete fails; on error no table is changed.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        self.replace_all(&[])
    }

    fn read_raw(&self, table: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM state WHERE key = ?1")
            .map_err(StorageError::from)?;
        match stmt.query_row(params![table], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }
}
