//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, SantaError};
use crate::schemas::{Config, DataStore};

use super::paths::get_config_path;

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SantaError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            SantaError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SantaError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| SantaError::InvalidJson(e.to_string()))?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read `config.json` from the data directory.
///
/// Returns the default configuration if the file doesn't exist.
pub fn read_config(data_dir: &Path) -> Result<Config> {
    let path = get_config_path(data_dir);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Read the event document; a missing file is an empty store.
pub fn read_store(path: &Path) -> Result<DataStore> {
    if !path.exists() {
        return Ok(DataStore::new());
    }
    read_json(path)
}

/// Rewrite the whole event document.
pub fn write_store(path: &Path, store: &DataStore) -> Result<()> {
    write_json(path, store)
}
