//! The exchange service: the six operations a chat front end calls
//!
//! Every mutating operation is one load-mutate-save cycle over the whole
//! document, run under a single async lock so concurrent commands cannot
//! overwrite each other's changes. `start` commits the assignment before any
//! notice goes out; delivery problems are only counted.

mod notify;

pub use notify::{fan_out, FanOutResult, LogNotifier, Notifier, OutboxNotifier};

use std::path::Path;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::{
    apply_cancel, apply_create, apply_join, apply_leave, apply_start, apply_status, StartPolicy,
    Transition,
};
use crate::errors::{Result, SantaError};
use crate::fs::get_store_path;
use crate::schemas::{
    Config, DataStore, Event, EventSnapshot, EventSummary, ParticipantCount, StartReport,
};
use crate::store::{EventStore, JsonFileStore};

/// Coordinates Secret Santa events across communities
pub struct Exchange<S> {
    store: S,
    policy: StartPolicy,
    write_lock: Mutex<()>,
}

impl Exchange<JsonFileStore> {
    /// Exchange backed by the configured JSON document in `data_dir`
    pub fn open(data_dir: &Path, config: &Config) -> Self {
        Exchange::new(JsonFileStore::new(get_store_path(data_dir, config)))
            .with_policy(StartPolicy::from(config))
    }
}

impl<S: EventStore> Exchange<S> {
    pub fn new(store: S) -> Self {
        Exchange {
            store,
            policy: StartPolicy::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_policy(mut self, policy: StartPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a new event in `community`, organized by `actor`.
    pub async fn create(&self, community: &str, name: &str, actor: &str) -> Result<EventSummary> {
        let summary = self
            .commit(community, Transition::Create, |slot| {
                let event = apply_create(slot, name, actor)?;
                let summary = EventSummary::from(&event);
                Ok((Some(event), summary))
            })
            .await?;
        info!(community, organizer = actor, name, "Event created");
        Ok(summary)
    }

    /// Add `actor` to the community's open event.
    pub async fn join(&self, community: &str, actor: &str) -> Result<ParticipantCount> {
        let count = self
            .commit(community, Transition::Join, |slot| {
                let event = apply_join(slot, actor)?;
                let count = participant_count(&event);
                Ok((Some(event), count))
            })
            .await?;
        info!(community, user = actor, participants = count.count, "Participant joined");
        Ok(count)
    }

    /// Remove `actor` from the community's open event.
    pub async fn leave(&self, community: &str, actor: &str) -> Result<ParticipantCount> {
        let count = self
            .commit(community, Transition::Leave, |slot| {
                let event = apply_leave(slot, actor)?;
                let count = participant_count(&event);
                Ok((Some(event), count))
            })
            .await?;
        info!(community, user = actor, participants = count.count, "Participant left");
        Ok(count)
    }

    /// Assign everyone a receiver, persist, then notify each giver.
    ///
    /// The assignment is saved before the first notice is sent. A failed
    /// save aborts without notifying anyone.
    pub async fn start(
        &self,
        community: &str,
        actor: &str,
        notifier: &dyn Notifier,
    ) -> Result<StartReport> {
        let policy = self.policy;
        let event = self
            .commit(community, Transition::Start, |slot| {
                let event = apply_start(slot, actor, &policy, &mut rand::thread_rng())?;
                Ok((Some(event.clone()), event))
            })
            .await?;
        info!(community, participants = event.participant_count(), "Event started, sending assignments");

        let delivery = fan_out(notifier, &event.name, &event.matches).await;
        if delivery.failed > 0 {
            warn!(community, failed = delivery.failed, "Some assignment notices were not delivered");
        }

        Ok(StartReport {
            event_name: event.name,
            success_count: delivery.delivered,
            fail_count: delivery.failed,
            total: event.participants.len(),
        })
    }

    /// Public view of the community's event. `actor` is only logged.
    pub async fn status(&self, community: &str, actor: &str) -> Result<EventSnapshot> {
        let data = self.load();
        let snapshot = apply_status(data.active(community))
            .map(EventSnapshot::from)
            .map_err(|e| rejected(community, Transition::Status, e))?;
        debug!(community, user = actor, state = %snapshot.state, "Status read");
        Ok(snapshot)
    }

    /// Delete the community's event. Only the organizer may cancel.
    pub async fn cancel(&self, community: &str, actor: &str) -> Result<EventSummary> {
        let summary = self
            .commit(community, Transition::Cancel, |slot| {
                let event = apply_cancel(slot, actor)?;
                Ok((None, EventSummary::from(event)))
            })
            .await?;
        info!(community, name = %summary.name, "Event cancelled");
        Ok(summary)
    }

    /// Read the document, treating an unreadable one as empty.
    fn load(&self) -> DataStore {
        match self.store.load() {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Failed to load event data, starting from an empty store");
                DataStore::new()
            }
        }
    }

    /// Run one serialized load-mutate-save cycle for `community`.
    ///
    /// `apply` sees the active event (if any) and returns what the slot
    /// should hold next plus the caller's output. Nothing is saved when it fails.
    async fn commit<T, F>(&self, community: &str, transition: Transition, apply: F) -> Result<T>
    where
        F: FnOnce(Option<&Event>) -> Result<(Option<Event>, T)>,
    {
        let _guard = self.write_lock.lock().await;

        let mut data = self.load();
        let (next, output) =
            apply(data.active(community)).map_err(|e| rejected(community, transition, e))?;
        data.set(community, next);

        self.store.save(&data).map_err(|e| {
            error!(community, %transition, error = %e, "Failed to save event data");
            if matches!(e, SantaError::Persistence(_)) {
                e
            } else {
                SantaError::Persistence(e.to_string())
            }
        })?;

        Ok(output)
    }
}

fn participant_count(event: &Event) -> ParticipantCount {
    ParticipantCount {
        event_name: event.name.clone(),
        count: event.participant_count(),
    }
}

fn rejected(community: &str, transition: Transition, e: SantaError) -> SantaError {
    if e.is_rejection() {
        debug!(community, %transition, code = e.code(), "Transition rejected");
    } else {
        error!(community, %transition, error = %e, "Transition failed");
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::is_derangement;
    use crate::errors::DeliveryError;
    use crate::schemas::{AssignmentNotice, EventState};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        refuse: HashSet<String>,
        sent: std::sync::Mutex<Vec<AssignmentNotice>>,
    }

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(
            &self,
            recipient: &str,
            notice: &AssignmentNotice,
        ) -> std::result::Result<(), DeliveryError> {
            if self.refuse.contains(recipient) {
                return Err(DeliveryError::new(recipient, "DMs disabled"));
            }
            self.sent.lock().unwrap().push(notice.clone());
            Ok(())
        }
    }

    /// Loads normally, fails every save
    #[derive(Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
        save_attempts: AtomicUsize,
    }

    impl EventStore for ReadOnlyStore {
        fn load(&self) -> Result<DataStore> {
            self.inner.load()
        }

        fn save(&self, _data: &DataStore) -> Result<()> {
            self.save_attempts.fetch_add(1, Ordering::SeqCst);
            Err(SantaError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn exchange() -> Exchange<MemoryStore> {
        Exchange::new(MemoryStore::new())
    }

    async fn open_with(ex: &Exchange<MemoryStore>, participants: &[&str]) {
        ex.create("g1", "Office Party", "U1").await.unwrap();
        for p in participants {
            ex.join("g1", p).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_create_twice_is_already_active() {
        let ex = exchange();
        let summary = ex.create("g1", "Office Party", "U1").await.unwrap();
        assert_eq!(summary.name, "Office Party");
        assert_eq!(summary.participant_count, 0);

        let err = ex.create("g1", "Second", "U2").await.unwrap_err();
        assert!(matches!(err, SantaError::AlreadyActive));

        // Other communities are independent
        assert!(ex.create("g2", "Elsewhere", "U2").await.is_ok());
    }

    #[tokio::test]
    async fn test_full_exchange() {
        let ex = exchange();
        ex.create("g1", "Office Party", "U1").await.unwrap();
        ex.join("g1", "U1").await.unwrap();
        ex.join("g1", "U2").await.unwrap();
        let count = ex.join("g1", "U3").await.unwrap();
        assert_eq!(count, ParticipantCount { event_name: "Office Party".into(), count: 3 });

        let recorder = Recorder::default();
        let report = ex.start("g1", "U1", &recorder).await.unwrap();
        assert_eq!(report.success_count, 3);
        assert_eq!(report.fail_count, 0);
        assert_eq!(report.total, 3);

        let data = ex.store().load().unwrap();
        let event = data.active("g1").unwrap();
        assert_eq!(event.participants, vec!["U1", "U2", "U3"]);
        assert!(is_derangement(&event.participants, &event.matches));

        for notice in recorder.sent.lock().unwrap().iter() {
            assert_eq!(event.receiver_for(&notice.giver), Some(notice.receiver.as_str()));
        }

        let snapshot = ex.status("g1", "U2").await.unwrap();
        assert_eq!(snapshot.state, EventState::Started);
    }

    #[tokio::test]
    async fn test_organizer_is_not_auto_joined() {
        let ex = exchange();
        open_with(&ex, &["U2", "U3"]).await;

        let snapshot = ex.status("g1", "U1").await.unwrap();
        assert_eq!(snapshot.participants, vec!["U2", "U3"]);

        let err = ex.start("g1", "U1", &LogNotifier).await.unwrap_err();
        assert!(matches!(err, SantaError::TooFewParticipants { required: 3, actual: 2 }));
        assert_eq!(ex.status("g1", "U1").await.unwrap().state, EventState::Open);
    }

    #[tokio::test]
    async fn test_join_twice_is_already_joined() {
        let ex = exchange();
        open_with(&ex, &["U2"]).await;
        let err = ex.join("g1", "U2").await.unwrap_err();
        assert!(matches!(err, SantaError::AlreadyJoined));
    }

    #[tokio::test]
    async fn test_leave_then_rejoin_moves_to_end() {
        let ex = exchange();
        open_with(&ex, &["U2", "U3", "U4"]).await;
        assert_eq!(ex.leave("g1", "U2").await.unwrap().count, 2);
        ex.join("g1", "U2").await.unwrap();
        assert_eq!(ex.status("g1", "U1").await.unwrap().participants, vec!["U3", "U4", "U2"]);
    }

    #[tokio::test]
    async fn test_started_event_is_locked() {
        let ex = exchange();
        open_with(&ex, &["U1", "U2", "U3"]).await;
        ex.start("g1", "U1", &LogNotifier).await.unwrap();
        let matches = ex.store().load().unwrap().active("g1").unwrap().matches.clone();

        assert!(matches!(
            ex.join("g1", "U4").await.unwrap_err(),
            SantaError::AlreadyStarted(Transition::Join)
        ));
        assert!(matches!(
            ex.leave("g1", "U2").await.unwrap_err(),
            SantaError::AlreadyStarted(Transition::Leave)
        ));
        assert!(matches!(
            ex.start("g1", "U1", &LogNotifier).await.unwrap_err(),
            SantaError::AlreadyStarted(Transition::Start)
        ));

        // Matches are never reassigned
        assert_eq!(ex.store().load().unwrap().active("g1").unwrap().matches, matches);
    }

    #[tokio::test]
    async fn test_cancel_by_non_organizer_is_rejected() {
        let ex = exchange();
        open_with(&ex, &["U2"]).await;

        let err = ex.cancel("g1", "U2").await.unwrap_err();
        assert!(matches!(err, SantaError::NotOrganizer(Transition::Cancel)));
        assert_eq!(ex.status("g1", "U2").await.unwrap().participant_count, 1);
    }

    #[tokio::test]
    async fn test_status_after_cancel_is_not_active() {
        let ex = exchange();
        open_with(&ex, &["U2"]).await;

        let summary = ex.cancel("g1", "U1").await.unwrap();
        assert_eq!(summary.name, "Office Party");
        assert!(matches!(ex.status("g1", "U1").await.unwrap_err(), SantaError::NotActive));
        assert!(ex.store().load().unwrap().is_empty());

        // The community is free for a new event
        assert!(ex.create("g1", "Round Two", "U2").await.is_ok());
    }

    #[tokio::test]
    async fn test_delivery_failures_do_not_roll_back() {
        let ex = exchange();
        open_with(&ex, &["U1", "U2", "U3", "U4"]).await;

        let recorder = Recorder {
            refuse: ["U2".to_string(), "U4".to_string()].into_iter().collect(),
            ..Recorder::default()
        };
        let report = ex.start("g1", "U1", &recorder).await.unwrap();
        assert_eq!(report.success_count, 2);
        assert_eq!(report.fail_count, 2);
        assert_eq!(report.total, 4);
        assert!(!report.all_delivered());

        assert_eq!(ex.status("g1", "U1").await.unwrap().state, EventState::Started);
    }

    #[tokio::test]
    async fn test_save_failure_is_surfaced_and_nothing_is_sent() {
        let mut data = DataStore::new();
        let event = ["U1", "U2", "U3"]
            .iter()
            .fold(Event::new("Office Party", "U1"), |e, p| e.with_participant(*p));
        data.set("g1", Some(event));
        let ex = Exchange::new(ReadOnlyStore {
            inner: MemoryStore::with_data(data),
            ..ReadOnlyStore::default()
        });

        let recorder = Recorder::default();
        let err = ex.start("g1", "U1", &recorder).await.unwrap_err();
        assert_eq!(err.code(), "PERSISTENCE_FAILURE");
        assert!(recorder.sent.lock().unwrap().is_empty());
        assert_eq!(ex.store().save_attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejection_does_not_save() {
        let ex = Exchange::new(ReadOnlyStore::default());
        let err = ex.join("g1", "U2").await.unwrap_err();
        assert!(matches!(err, SantaError::NotActive));
        assert_eq!(ex.store().save_attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_behaves_as_empty() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();
        std::fs::write(get_store_path(temp.path(), &config), "{ corrupt").unwrap();

        let ex = Exchange::open(temp.path(), &config);
        assert!(matches!(ex.status("g1", "U1").await.unwrap_err(), SantaError::NotActive));
        assert!(ex.create("g1", "Fresh", "U1").await.is_ok());
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let temp = TempDir::new().unwrap();
        let config = Config::default();

        let ex = Exchange::open(temp.path(), &config);
        ex.create("g1", "Office Party", "U1").await.unwrap();
        ex.join("g1", "U2").await.unwrap();
        drop(ex);

        let reopened = Exchange::open(temp.path(), &config);
        let snapshot = reopened.status("g1", "U1").await.unwrap();
        assert_eq!(snapshot.participants, vec!["U2"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_are_not_lost() {
        let temp = TempDir::new().unwrap();
        let ex = Arc::new(Exchange::open(temp.path(), &Config::default()));
        ex.create("g1", "Office Party", "U0").await.unwrap();
        ex.create("g2", "Other Party", "U0").await.unwrap();

        let handles: Vec<_> = (0..24)
            .map(|i| {
                let ex = Arc::clone(&ex);
                tokio::spawn(async move {
                    let community = if i % 2 == 0 { "g1" } else { "g2" };
                    ex.join(community, &format!("U{}", i + 1)).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(ex.status("g1", "U0").await.unwrap().participant_count, 12);
        assert_eq!(ex.status("g2", "U0").await.unwrap().participant_count, 12);
    }

    #[tokio::test]
    async fn test_policy_minimum_applies() {
        let ex = exchange().with_policy(StartPolicy {
            min_participants: 4,
            ..StartPolicy::default()
        });
        open_with(&ex, &["U1", "U2", "U3"]).await;
        let err = ex.start("g1", "U1", &LogNotifier).await.unwrap_err();
        assert!(matches!(err, SantaError::TooFewParticipants { required: 4, actual: 3 }));
    }
}
