//! Join command - Add yourself to the open event

use std::path::Path;

use crate::cli::Actor;
use crate::errors::Result;
use crate::schemas::ParticipantCount;

use super::Session;

pub async fn run(data_dir: Option<&Path>, actor: &Actor) -> Result<()> {
    let session = Session::open(data_dir)?;
    let count = session.exchange.join(&actor.community, &actor.user).await?;
    println!("{}", render(&count));
    Ok(())
}

pub fn render(count: &ParticipantCount) -> String {
    format!(
        "You have joined {}! Current participants: {}",
        count.event_name, count.count
    )
}
