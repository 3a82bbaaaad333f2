//! Guarded lifecycle transitions
//!
//! Pure functions over a community's slot. None of them mutate their input;
//! each returns the event the slot should hold next, or the first failing
//! guard. Guards run in a fixed order (existence, then authorization, then
//! state, then membership or cardinality) because the user sees only the
//! first failure.

use rand::Rng;

use crate::errors::{Result, SantaError};
use crate::schemas::{Config, Event};

use super::assignment::{assign_with_rng, MAX_ASSIGNMENT_ATTEMPTS};
use super::states::{lifecycle_state, Transition};

/// Limits applied by `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartPolicy {
    /// Participants required before assignment
    pub min_participants: usize,
    /// Cap on derangement resampling
    pub max_attempts: u32,
}

impl Default for StartPolicy {
    fn default() -> Self {
        StartPolicy {
            min_participants: 3,
            max_attempts: MAX_ASSIGNMENT_ATTEMPTS,
        }
    }
}

impl From<&Config> for StartPolicy {
    fn from(config: &Config) -> Self {
        StartPolicy {
            min_participants: config.min_participants,
            max_attempts: config.max_assignment_attempts,
        }
    }
}

fn require_active(slot: Option<&Event>) -> Result<&Event> {
    slot.filter(|e| e.active).ok_or(SantaError::NotActive)
}

fn require_open(event: &Event, transition: Transition) -> Result<()> {
    if event.started {
        return Err(SantaError::AlreadyStarted(transition));
    }
    Ok(())
}

fn require_organizer(event: &Event, actor: &str, transition: Transition) -> Result<()> {
    if !event.is_organizer(actor) {
        return Err(SantaError::NotOrganizer(transition));
    }
    Ok(())
}

/// Open a new event organized by `actor`.
///
/// The organizer is not enrolled; they `join` like everyone else.
pub fn apply_create(slot: Option<&Event>, name: &str, actor: &str) -> Result<Event> {
    if lifecycle_state(slot).is_some() {
        return Err(SantaError::AlreadyActive);
    }
    Ok(Event::new(name, actor))
}

/// Append `actor` to the participants.
pub fn apply_join(slot: Option<&Event>, actor: &str) -> Result<Event> {
    let event = require_active(slot)?;
    require_open(event, Transition::Join)?;
    if event.is_participant(actor) {
        return Err(SantaError::AlreadyJoined);
    }
    Ok(event.clone().with_participant(actor))
}

/// Remove `actor` from the participants.
pub fn apply_leave(slot: Option<&Event>, actor: &str) -> Result<Event> {
    let event = require_active(slot)?;
    require_open(event, Transition::Leave)?;
    if !event.is_participant(actor) {
        return Err(SantaError::NotJoined);
    }
    Ok(event.clone().without_participant(actor))
}

/// Lock the participants and assign everyone a receiver.
///
/// Assignment runs over the participants in join order.
pub fn apply_start<R: Rng + ?Sized>(
    slot: Option<&Event>,
    actor: &str,
    policy: &StartPolicy,
    rng: &mut R,
) -> Result<Event> {
    let event = require_active(slot)?;
    require_organizer(event, actor, Transition::Start)?;
    require_open(event, Transition::Start)?;
    if event.participant_count() < policy.min_participants {
        return Err(SantaError::TooFewParticipants {
            required: policy.min_participants,
            actual: event.participant_count(),
        });
    }

    let matches = assign_with_rng(&event.participants, rng, policy.max_attempts)?;
    Ok(event.clone().with_matches(matches))
}

/// Read the active event.
pub fn apply_status(slot: Option<&Event>) -> Result<&Event> {
    require_active(slot)
}

/// Authorize deleting the active event; returns the event being removed.
pub fn apply_cancel<'a>(slot: Option<&'a Event>, actor: &str) -> Result<&'a Event> {
    let event = require_active(slot)?;
    require_organizer(event, actor, Transition::Cancel)?;
    Ok(event)
}
