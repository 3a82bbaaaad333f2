//! Event lifecycle definitions
//!
//! none → open → started, with `cancel` returning any active event to none.
//! There is no completed state: a started event stays started until cancelled.

use crate::schemas::{Event, EventState};

/// An operation an actor may attempt against a community's event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Create,
    Join,
    Leave,
    Start,
    Status,
    Cancel,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Create => write!(f, "create"),
            Transition::Join => write!(f, "join"),
            Transition::Leave => write!(f, "leave"),
            Transition::Start => write!(f, "start"),
            Transition::Status => write!(f, "status"),
            Transition::Cancel => write!(f, "cancel"),
        }
    }
}

/// Lifecycle state of a community slot; `None` means no active event.
pub fn lifecycle_state(slot: Option<&Event>) -> Option<EventState> {
    slot.filter(|e| e.active).map(Event::state)
}

/// Transitions whose state guard passes from `state`.
///
/// Authorization and membership are checked per actor in `transitions`.
pub fn get_allowed_transitions(state: Option<EventState>) -> Vec<Transition> {
    match state {
        None => vec![Transition::Create],
        Some(EventState::Open) => vec![
            Transition::Join,
            Transition::Leave,
            Transition::Start,
            Transition::Status,
            Transition::Cancel,
        ],
        Some(EventState::Started) => vec![Transition::Status, Transition::Cancel],
    }
}
