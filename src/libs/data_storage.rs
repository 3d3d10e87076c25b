//! Platform data directory.
//!
//! - Linux: `~/.local/share/fichaje`
//! - macOS: `~/Library/Application Support/fichaje`
//! - Windows: `%LOCALAPPDATA%\fichaje`

use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "fichaje";

/// Overrides the platform data directory when set.
pub const HOME_ENV: &str = "FICHAJE_HOME";

/// Resolves where the database and the configuration file live.
#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        if let Ok(home) = var(HOME_ENV) {
            return Self::at(home);
        }
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        Self::at(Path::new(&base_path).join(APP_NAME))
    }

    /// Uses `base_path` as is, ignoring the environment.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }

    /// Path of `file_name` in the data directory, creating the directory first.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
