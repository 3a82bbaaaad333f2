//! Data store schema - The whole persisted document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Event;

/// Every community's event, keyed by community id.
///
/// Serializes as a bare JSON object so the document matches the legacy
/// data file. Inactive records are kept on disk as found but never
/// returned by [`DataStore::active`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataStore {
    events: BTreeMap<String, Event>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The community's event, if one exists and is active
    pub fn active(&self, community: &str) -> Option<&Event> {
        self.events.get(community).filter(|e| e.active)
    }

    /// Replace the community's slot: `Some` stores the event, `None` deletes the record
    pub fn set(&mut self, community: &str, event: Option<Event>) {
        match event {
            Some(event) => {
                self.events.insert(community.to_string(), event);
            }
            None => {
                self.events.remove(community);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
