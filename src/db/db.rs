//! SQLite database file of the application.
//!
//! The file lives in the data directory resolved by [`DataStorage`] and is
//! migrated to the latest schema every time it is opened.

use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;

/// Name of the database file inside the data directory.
pub const DB_FILE_NAME: &str = "fichaje.db";

/// An open, migrated database.
pub struct Db {
    /// Connection handed to the key-value backend.
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    /// Opens (creating if needed) a database file and brings its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }

    /// Opens a database file without touching its schema.
    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        Ok(Connection::open(path)?)
    }
}
