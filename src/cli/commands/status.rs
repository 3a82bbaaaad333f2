//! Status command - Show the community's event

use std::path::Path;

use crate::cli::Actor;
use crate::domain::get_allowed_transitions;
use crate::errors::{Result, SantaError};
use crate::schemas::{EventSnapshot, EventState};

use super::Session;

pub async fn run(data_dir: Option<&Path>, actor: &Actor, json: bool) -> Result<()> {
    let session = Session::open(data_dir)?;
    let snapshot = session.exchange.status(&actor.community, &actor.user).await?;
    if json {
        let out = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| SantaError::wrap(e, "Failed to serialize status"))?;
        println!("{}", out);
    } else {
        println!("{}", render(&snapshot));
    }
    Ok(())
}

pub fn render(snapshot: &EventSnapshot) -> String {
    let state = match snapshot.state {
        EventState::Open => "Open for joining",
        EventState::Started => "Started",
    };
    let participants = if snapshot.participants.is_empty() {
        "No participants yet".to_string()
    } else {
        snapshot.participants.join("\n")
    };
    let actions: Vec<String> = get_allowed_transitions(Some(snapshot.state))
        .iter()
        .map(ToString::to_string)
        .collect();

    format!(
        "{}\nStatus: {}\nOrganizer: {}\nParticipants: {}\nParticipant list:\n{}\nAvailable: {}",
        snapshot.name,
        state,
        snapshot.organizer,
        snapshot.participant_count,
        participants,
        actions.join(", ")
    )
}
