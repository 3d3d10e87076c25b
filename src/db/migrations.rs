//! Versioned schema migrations.
//!
//! Each migration runs once, inside the same transaction as the bookkeeping
//! row that records it in the `migrations` table. Opening a database through
//! [`crate::db::db::Db`] always brings it up to the latest version.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fichaje::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("fichaje.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Bookkeeping table, one row per applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change.
#[derive(Debug, Clone)]
struct Migration {
    /// Strictly increasing version number.
    version: u32,
    /// Short description stored in the bookkeeping table.
    name: &'static str,
    /// Applies the change inside the migration transaction.
    up: fn(&Transaction) -> Result<()>,
}

/// Ordered list of every known migration.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    /// Creates a manager with all migrations registered.
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: JSON documents keyed by name, one row per key.
        self.add_migration(1, "create_kv_store", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT NOT NULL PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            Ok(())
        });

        // Version 2: prefix scans return the most recently written documents first.
        self.add_migration(2, "index_kv_store_updated_at", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_kv_store_updated_at ON kv_store(updated_at)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the database version.
    ///
    /// Pending migrations run in one transaction; a failure rolls all of them
    /// back and is returned to the caller.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));
            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }

    /// Version the schema reaches once every migration has run.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings a connection up to the latest schema.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

/// Highest applied migration version, `0` for a fresh database.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    conn.execute(MIGRATIONS_TABLE, [])?;
    MigrationManager::new().get_current_version(conn)
}

/// True when the database is behind the latest migration.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(get_db_version(conn)? < manager.latest_version())
}
