//! File-backed store: one pretty-printed JSON document

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::fs::{read_store, write_store};
use crate::schemas::DataStore;

use super::EventStore;

/// Stores every community's event in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventStore for JsonFileStore {
    fn load(&self) -> Result<DataStore> {
        read_store(&self.path)
    }

    fn save(&self, data: &DataStore) -> Result<()> {
        write_store(&self.path, data)
    }
}
