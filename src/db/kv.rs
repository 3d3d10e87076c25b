//! Raw key-value backends holding JSON documents.
//!
//! The application keeps every piece of state as a JSON document under a
//! well-known key (`users.json`, `session_<id>`, ...). [`SqliteKv`] stores the
//! documents in the local database; [`MemoryKv`] keeps them in a map and is
//! used by tests and throwaway runs.

use crate::db::db::Db;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

const SELECT_VALUE: &str = "SELECT value FROM kv_store WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_VALUE: &str = "DELETE FROM kv_store WHERE key = ?1";
const SELECT_KEYS_BY_PREFIX: &str = "SELECT key FROM kv_store WHERE substr(key, 1, length(?1)) = ?1 ORDER BY updated_at DESC, key";

/// Minimal contract of a document store.
pub trait KeyValue: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Keys starting with `prefix`.
    fn keys(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Documents stored in the `kv_store` table.
#[derive(Clone)]
pub struct SqliteKv {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKv {
    /// Uses the database in the application data directory.
    pub fn new() -> Result<Self> {
        Ok(Self::from_db(Db::new()?))
    }

    /// Opens (and migrates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn from_db(db: Db) -> Self {
        Self {
            conn: Arc::new(Mutex::new(db.conn)),
        }
    }
}

impl KeyValue for SqliteKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock();
        let value = conn.query_row(SELECT_VALUE, params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock();
        conn.execute(DELETE_VALUE, params![key])?;
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_KEYS_BY_PREFIX)?;
        let keys = stmt
            .query_map(params![prefix], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

/// Documents kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryKv {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self.entries.lock().keys().filter(|k| k.starts_with(prefix)).cloned().collect())
    }
}
