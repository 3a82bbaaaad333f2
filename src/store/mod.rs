//! Event storage
//!
//! A store owns the whole document: `load` reads every community's event,
//! `save` rewrites all of them. Serializing load-mutate-save cycles is the
//! caller's job (see `Exchange`).

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::errors::Result;
use crate::schemas::DataStore;

/// Backing storage for the community → event document
pub trait EventStore: Send + Sync {
    /// Read the full document. A missing document is an empty store.
    fn load(&self) -> Result<DataStore>;

    /// Replace the full document.
    fn save(&self, data: &DataStore) -> Result<()>;
}
