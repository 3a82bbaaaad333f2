//! Read models returned by the exchange operations

use serde::{Deserialize, Serialize};

use super::{Event, EventState};

/// Short description of an event, returned by `create` and `cancel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub name: String,
    pub organizer: String,
    pub participant_count: usize,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        EventSummary {
            name: event.name.clone(),
            organizer: event.organizer.clone(),
            participant_count: event.participant_count(),
        }
    }
}

/// Participant count after a `join` or `leave`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantCount {
    pub event_name: String,
    pub count: usize,
}

/// Public view of an event, returned by `status`.
///
/// Deliberately carries no assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub name: String,
    pub organizer: String,
    pub state: EventState,
    pub participants: Vec<String>,
    pub participant_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<&Event> for EventSnapshot {
    fn from(event: &Event) -> Self {
        EventSnapshot {
            name: event.name.clone(),
            organizer: event.organizer.clone(),
            state: event.state(),
            participants: event.participants.clone(),
            participant_count: event.participant_count(),
            created_at: event.created_at.clone(),
        }
    }
}

/// Outcome of `start`: the transition is committed, deliveries are counted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartReport {
    pub event_name: String,
    pub success_count: usize,
    pub fail_count: usize,
    pub total: usize,
}

impl StartReport {
    pub fn all_delivered(&self) -> bool {
        self.fail_count == 0
    }
}

/// The private message telling one giver who they gift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentNotice {
    pub event_name: String,
    pub giver: String,
    pub receiver: String,
}

impl AssignmentNotice {
    /// Message body as shown to the giver
    pub fn render(&self) -> String {
        format!(
            "{}\nYou have to gift: {}\n\nKeep this a secret! Don't tell anyone who you got.",
            self.event_name, self.receiver
        )
    }
}
