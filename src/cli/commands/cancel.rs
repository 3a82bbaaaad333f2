//! Cancel command - Delete the community's event (organizer only)

use std::path::Path;

use crate::cli::Actor;
use crate::errors::Result;

use super::Session;

pub async fn run(data_dir: Option<&Path>, actor: &Actor) -> Result<()> {
    let session = Session::open(data_dir)?;
    let summary = session.exchange.cancel(&actor.community, &actor.user).await?;
    println!("{} has been cancelled.", summary.name);
    Ok(())
}
