//! Assignment notices: the outbound side of `start`
//!
//! One notice per giver, sent concurrently. Failures are counted and logged;
//! they never undo the committed assignment and are never retried.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::DeliveryError;
use crate::fs::{is_plain_file_name, write_json};
use crate::schemas::{AssignmentNotice, Matches};

/// Delivers a notice privately to one recipient
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        recipient: &str,
        notice: &AssignmentNotice,
    ) -> std::result::Result<(), DeliveryError>;
}

/// Delivery tally for one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutResult {
    pub delivered: usize,
    pub failed: usize,
}

/// Send each giver their receiver. Order of delivery is unspecified.
pub async fn fan_out(notifier: &dyn Notifier, event_name: &str, matches: &Matches) -> FanOutResult {
    let sends = matches.iter().map(|(giver, receiver)| async move {
        let notice = AssignmentNotice {
            event_name: event_name.to_string(),
            giver: giver.clone(),
            receiver: receiver.clone(),
        };
        notifier.notify(giver, &notice).await
    });

    let mut result = FanOutResult::default();
    for outcome in join_all(sends).await {
        match outcome {
            Ok(()) => result.delivered += 1,
            Err(e) => {
                warn!(recipient = %e.recipient, error = %e, "Failed to deliver assignment notice");
                result.failed += 1;
            }
        }
    }
    result
}

/// Logs that a notice was sent without revealing the receiver
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        recipient: &str,
        notice: &AssignmentNotice,
    ) -> std::result::Result<(), DeliveryError> {
        info!(recipient, event = %notice.event_name, "Assignment notice sent");
        Ok(())
    }
}

#[derive(Serialize)]
struct OutboxEntry<'a> {
    #[serde(flatten)]
    notice: &'a AssignmentNotice,
    message: String,
    sent_at: String,
}

/// Writes each notice to `<root>/<community>/<recipient>.json`, one private
/// file per giver. Ids that are not plain file names fail delivery.
#[derive(Debug, Clone)]
pub struct OutboxNotifier {
    root: PathBuf,
    community: String,
}

impl OutboxNotifier {
    pub fn new(root: impl Into<PathBuf>, community: impl Into<String>) -> Self {
        OutboxNotifier {
            root: root.into(),
            community: community.into(),
        }
    }

    fn path_for(&self, recipient: &str) -> std::result::Result<PathBuf, &'static str> {
        if !is_plain_file_name(&self.community) {
            return Err("community id is not a valid directory name");
        }
        if !is_plain_file_name(recipient) {
            return Err("recipient id is not a valid file name");
        }
        Ok(self
            .root
            .join(&self.community)
            .join(format!("{}.json", recipient)))
    }
}

#[async_trait]
impl Notifier for OutboxNotifier {
    async fn notify(
        &self,
        recipient: &str,
        notice: &AssignmentNotice,
    ) -> std::result::Result<(), DeliveryError> {
        let path = self
            .path_for(recipient)
            .map_err(|reason| DeliveryError::new(recipient, reason))?;

        let entry = OutboxEntry {
            notice,
            message: notice.render(),
            sent_at: chrono::Utc::now().to_rfc3339(),
        };
        write_json(&path, &entry).map_err(|e| DeliveryError::new(recipient, e))
    }
}
