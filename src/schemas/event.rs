//! Event schema - One Secret Santa exchange within a community

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Giver → receiver assignments
pub type Matches = BTreeMap<String, String>;

/// Lifecycle state of an existing, active event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    /// Open for joining and leaving
    Open,
    /// Assignments made; participants locked
    Started,
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventState::Open => write!(f, "open"),
            EventState::Started => write!(f, "started"),
        }
    }
}

/// A Secret Santa event as persisted in the data file.
///
/// Field names match the on-disk document so files written by earlier
/// versions of the bot load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Display name, fixed at creation
    pub name: String,

    /// User who created the event
    pub organizer: String,

    /// Participants in join order, no duplicates
    #[serde(default)]
    pub participants: Vec<String>,

    /// Giver → receiver, empty until started
    #[serde(default)]
    pub matches: Matches,

    /// False once cancelled; inactive records are treated as absent
    #[serde(default = "default_active")]
    pub active: bool,

    /// Whether assignments have been made
    #[serde(default)]
    pub started: bool,

    /// ISO 8601 creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Event {
    /// Create a new open event with no participants
    pub fn new(name: impl Into<String>, organizer: impl Into<String>) -> Self {
        Event {
            name: name.into(),
            organizer: organizer.into(),
            participants: Vec::new(),
            matches: Matches::new(),
            active: true,
            started: false,
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    pub fn state(&self) -> EventState {
        if self.started {
            EventState::Started
        } else {
            EventState::Open
        }
    }

    pub fn is_organizer(&self, user: &str) -> bool {
        self.organizer == user
    }

    pub fn is_participant(&self, user: &str) -> bool {
        self.participants.iter().any(|p| p == user)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Who the given participant gifts, once the event has started
    pub fn receiver_for(&self, giver: &str) -> Option<&str> {
        self.matches.get(giver).map(String::as_str)
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    /// Return a new Event with `user` appended to the participants
    pub fn with_participant(mut self, user: impl Into<String>) -> Self {
        self.participants.push(user.into());
        self
    }

    /// Return a new Event with `user` removed from the participants
    pub fn without_participant(mut self, user: &str) -> Self {
        self.participants.retain(|p| p != user);
        self
    }

    /// Return a new Event carrying `matches`, marked started
    pub fn with_matches(mut self, matches: Matches) -> Self {
        self.matches = matches;
        self.started = true;
        self
    }
}
