//! Create command - Open a new event in a community

use std::path::Path;

use crate::cli::Actor;
use crate::errors::Result;
use crate::schemas::EventSummary;

use super::Session;

pub async fn run(data_dir: Option<&Path>, name: &str, actor: &Actor) -> Result<()> {
    let session = Session::open(data_dir)?;
    let summary = session
        .exchange
        .create(&actor.community, name, &actor.user)
        .await?;
    println!("{}", render(&summary));
    Ok(())
}

pub fn render(summary: &EventSummary) -> String {
    format!(
        "Secret Santa event created!\n{} has been created!\nOrganizer: {}\nParticipants: {}\nUse `secret-santa join` to participate!",
        summary.name, summary.organizer, summary.participant_count
    )
}
