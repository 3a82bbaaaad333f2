//! Start command - Assign matches and deliver them to the outbox

use std::path::Path;

use crate::cli::Actor;
use crate::errors::Result;
use crate::exchange::OutboxNotifier;
use crate::fs::get_outbox_root;
use crate::schemas::StartReport;

use super::Session;

pub async fn run(data_dir: Option<&Path>, actor: &Actor) -> Result<()> {
    let session = Session::open(data_dir)?;
    let outbox = OutboxNotifier::new(
        get_outbox_root(&session.data_dir, &session.config),
        &actor.community,
    );
    let report = session
        .exchange
        .start(&actor.community, &actor.user, &outbox)
        .await?;
    println!("{}", render(&report));
    Ok(())
}

pub fn render(report: &StartReport) -> String {
    let footer = if report.all_delivered() {
        "All matches assigned!"
    } else {
        "Some users may have DMs disabled."
    };
    format!(
        "Secret Santa started!\n{} has been started!\nDMs sent: {}\nDMs failed: {}\nTotal participants: {}\n{}",
        report.event_name, report.success_count, report.fail_count, report.total, footer
    )
}
