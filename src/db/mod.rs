//! Local persistence.
//!
//! - [`db`]: SQLite connection in the application data directory
//! - [`migrations`]: versioned schema changes
//! - [`kv`]: key-value backends (SQLite table, in-memory map)
//! - [`storage`]: typed stores for sessions, logs, users and products

pub mod db;
pub mod kv;
pub mod migrations;
pub mod storage;
