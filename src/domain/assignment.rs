//! Derangement assignment
//!
//! Rejection sampling over uniform shuffles: shuffle, accept if nobody landed
//! on their own position, otherwise reshuffle. The expected number of tries
//! tends to e (about 2.72) as the group grows, so the attempt cap only bounds
//! pathological cases and never shapes the distribution in practice.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::errors::{Result, SantaError};
use crate::schemas::Matches;

/// Default cap on shuffles before giving up
pub const MAX_ASSIGNMENT_ATTEMPTS: u32 = 10_000;

/// Assign every participant someone else to gift, using the thread-local RNG.
///
/// # Errors
/// * `InsufficientParticipants` - fewer than two participants
/// * `DuplicateParticipant` - an id appears more than once
/// * `AssignmentExhausted` - no derangement within `MAX_ASSIGNMENT_ATTEMPTS`
pub fn assign(participants: &[String]) -> Result<Matches> {
    assign_with_rng(participants, &mut rand::thread_rng(), MAX_ASSIGNMENT_ATTEMPTS)
}

/// Assign with an explicit RNG and attempt cap.
///
/// The result maps `participants[i]` to `shuffled[i]` for the accepted
/// shuffle. It is a bijection on the participant set with no fixed point;
/// it may split into several disjoint cycles.
pub fn assign_with_rng<R: Rng + ?Sized>(
    participants: &[String],
    rng: &mut R,
    max_attempts: u32,
) -> Result<Matches> {
    if participants.len() < 2 {
        return Err(SantaError::InsufficientParticipants {
            actual: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant.as_str()) {
            return Err(SantaError::DuplicateParticipant(participant.clone()));
        }
    }

    let mut shuffled = participants.to_vec();
    for attempt in 1..=max_attempts {
        shuffled.shuffle(rng);
        if has_no_fixed_point(participants, &shuffled) {
            debug!(attempt, participants = participants.len(), "derangement accepted");
            return Ok(participants.iter().cloned().zip(shuffled).collect());
        }
    }

    Err(SantaError::AssignmentExhausted {
        attempts: max_attempts,
    })
}

fn has_no_fixed_point(original: &[String], shuffled: &[String]) -> bool {
    original.iter().zip(shuffled).all(|(a, b)| a != b)
}

/// Check that `matches` is a derangement of exactly `participants`:
/// every participant gives once, receives once, and never to themselves.
pub fn is_derangement(participants: &[String], matches: &Matches) -> bool {
    if matches.len() != participants.len() {
        return false;
    }

    let givers: HashSet<&str> = participants.iter().map(String::as_str).collect();
    if givers.len() != participants.len() {
        return false;
    }

    let mut receivers = HashSet::with_capacity(matches.len());
    for (giver, receiver) in matches {
        if giver == receiver
            || !givers.contains(giver.as_str())
            || !givers.contains(receiver.as_str())
            || !receivers.insert(receiver.as_str())
        {
            return false;
        }
    }
    true
}
