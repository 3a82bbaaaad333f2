//! In-memory store for tests and embedding

use std::sync::Mutex;

use crate::errors::{Result, SantaError};
use crate::schemas::DataStore;

use super::EventStore;

/// Keeps the document in process memory; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<DataStore>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: DataStore) -> Self {
        MemoryStore {
            data: Mutex::new(data),
        }
    }
}

impl EventStore for MemoryStore {
    fn load(&self) -> Result<DataStore> {
        self.data
            .lock()
            .map(|data| data.clone())
            .map_err(|e| SantaError::Persistence(e.to_string()))
    }

    fn save(&self, data: &DataStore) -> Result<()> {
        let mut guard = self
            .data
            .lock()
            .map_err(|e| SantaError::Persistence(e.to_string()))?;
        *guard = data.clone();
        Ok(())
    }
}
