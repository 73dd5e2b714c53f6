//! Periodic automatic-closure sweep. One instance per process; the sweep
//! guards against overlapping itself but assumes no second service instance
//! runs the same schedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::pkg::internal::adaptors::audit::spec::AuditAction;
use crate::pkg::internal::adaptors::postings::mutators::PostingMutator;
use crate::pkg::internal::adaptors::postings::selectors::PostingSelector;
use crate::pkg::internal::adaptors::postings::spec::{JobPosting, Status};
use crate::pkg::internal::clock::Clock;
use crate::pkg::internal::recorder::AuditRecorder;
use crate::pkg::internal::store::MemoryStore;
use crate::pkg::internal::transitions::{self, Transition};
use crate::prelude::{Error, Result};

/// Attribution recorded on sweep-initiated transitions.
pub const SWEEP_ACTOR: &str = "Server";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub closed: usize,
    pub failed: usize,
    pub skipped: bool,
}

#[derive(Clone)]
pub struct Scheduler {
    store: MemoryStore,
    recorder: AuditRecorder,
    clock: Arc<dyn Clock>,
    interval: Duration,
    in_flight: Arc<AtomicBool>,
}

pub struct SchedulerHandle {
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    pub async fn stop(self) {
        self.shutdown.notify_one();
        let _ = self.task.await;
    }
}

impl Scheduler {
    pub fn new(
        store: MemoryStore,
        recorder: AuditRecorder,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Scheduler {
            store,
            recorder,
            clock,
            interval,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Spawns the periodic trigger. The first sweep fires one full interval
    /// after start; missed ticks are skipped, never bursted.
    pub fn start(&self) -> SchedulerHandle {
        let scheduler = self.clone();
        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(scheduler.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await; // the immediate first tick
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = scheduler.sweep().await;
                        tracing::info!(
                            closed = report.closed,
                            failed = report.failed,
                            "sweep finished"
                        );
                    }
                    _ = signal.notified() => {
                        tracing::info!("scheduler stopping");
                        break;
                    }
                }
            }
        });
        SchedulerHandle { shutdown, task }
    }

    /// One pass over all active postings. Never surfaces errors: a failure on
    /// one posting is logged and the rest of the sweep continues.
    pub async fn sweep(&self) -> SweepReport {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::warn!("previous sweep still running, skipping this trigger");
            return SweepReport {
                skipped: true,
                ..SweepReport::default()
            };
        }
        let report = self.run().await;
        self.in_flight.store(false, Ordering::SeqCst);
        report
    }

    async fn run(&self) -> SweepReport {
        let mut report = SweepReport::default();
        let now = self.clock.now();
        let postings = match PostingSelector::new(&self.store)
            .get_by_status(Status::Active)
            .await
        {
            Ok(postings) => postings,
            Err(err) => {
                tracing::error!("sweep could not list active postings: {}", err);
                return report;
            }
        };
        for posting in postings {
            let Some(transition) = transitions::evaluate_automatic(&posting, now) else {
                continue;
            };
            match self.close(&posting, &transition).await {
                Ok(()) => report.closed += 1,
                Err(err) => {
                    tracing::error!(job_id = %posting.id, "automatic closure failed: {}", err);
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Status first, audit entry second. A crash in between leaves a closed
    /// posting with a missing entry, never an entry for an uncommitted change.
    async fn close(&self, posting: &JobPosting, transition: &Transition) -> Result<()> {
        PostingMutator::new(&self.store)
            .set_status(&posting.id, transition.status, self.clock.now())
            .await?
            .ok_or_else(|| Error::NotFound(posting.id.clone()))?;
        self.recorder
            .record(
                &posting.id,
                AuditAction::StatusChange,
                &transition.description,
                SWEEP_ACTOR,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

    use super::*;
    use crate::pkg::internal::adaptors::postings::spec::SalaryRange;
    use crate::pkg::internal::clock::ManualClock;
    use crate::pkg::internal::recorder::ALL_JOBS;
    use crate::pkg::internal::transitions::DEADLINE_CLOSED_DESCRIPTION;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn posting(id: &str, status: Status, deadline: DateTime<Utc>) -> JobPosting {
        JobPosting {
            id: id.to_string(),
            job_title: "Backend Engineer".into(),
            job_type: vec!["Full-time".into()],
            department: "Engineering".into(),
            job_level: "Senior".into(),
            salary_range: SalaryRange {
                currency: "EUR".into(),
                min: None,
                max: None,
            },
            technical_skills: vec!["Rust".into()],
            languages_required: vec!["English".into()],
            status,
            application_deadline: deadline,
            created_at: start() - ChronoDuration::days(30),
            updated_at: start() - ChronoDuration::days(30),
        }
    }

    fn setup(interval: Duration) -> (Scheduler, MemoryStore, AuditRecorder, ManualClock) {
        let store = MemoryStore::new();
        let clock = ManualClock::new(start());
        let recorder = AuditRecorder::new(store.clone(), Arc::new(clock.clone()));
        let scheduler = Scheduler::new(
            store.clone(),
            recorder.clone(),
            Arc::new(clock.clone()),
            interval,
        );
        (scheduler, store, recorder, clock)
    }

    #[tokio::test]
    async fn sweep_closes_expired_postings_with_one_entry() {
        let (scheduler, store, recorder, _) = setup(Duration::from_secs(3600));
        store
            .insert_posting(posting(
                "expired",
                Status::Active,
                start() - ChronoDuration::hours(1),
            ))
            .await
            .unwrap();

        let report = scheduler.sweep().await;
        assert_eq!(report.closed, 1);
        assert_eq!(report.failed, 0);

        let closed = store.find_posting_by_id("expired").await.unwrap().unwrap();
        assert_eq!(closed.status, Status::Closed);

        let trail = recorder.get_for_job("expired").await.unwrap();
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].action, AuditAction::StatusChange);
        assert_eq!(trail[0].description, DEADLINE_CLOSED_DESCRIPTION);
        assert_eq!(trail[0].recruiter, SWEEP_ACTOR);
    }

    #[tokio::test]
    async fn second_sweep_is_a_noop() {
        let (scheduler, store, recorder, clock) = setup(Duration::from_secs(3600));
        store
            .insert_posting(posting(
                "expired",
                Status::Active,
                start() - ChronoDuration::hours(1),
            ))
            .await
            .unwrap();

        assert_eq!(scheduler.sweep().await.closed, 1);
        clock.advance(ChronoDuration::hours(1));
        let report = scheduler.sweep().await;
        assert_eq!(report.closed, 0);
        assert_eq!(recorder.get_for_job("expired").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unexpired_and_draft_postings_are_untouched() {
        let (scheduler, store, recorder, _) = setup(Duration::from_secs(3600));
        store
            .insert_posting(posting(
                "open",
                Status::Active,
                start() + ChronoDuration::days(7),
            ))
            .await
            .unwrap();
        store
            .insert_posting(posting(
                "draft",
                Status::Draft,
                start() - ChronoDuration::days(7),
            ))
            .await
            .unwrap();

        let report = scheduler.sweep().await;
        assert_eq!(report.closed, 0);
        assert!(recorder.get_for_job(ALL_JOBS).await.unwrap().is_empty());
        let draft = store.find_posting_by_id("draft").await.unwrap().unwrap();
        assert_eq!(draft.status, Status::Draft);
    }

    #[tokio::test]
    async fn failure_on_one_posting_does_not_stop_the_sweep() {
        let (scheduler, store, recorder, _) = setup(Duration::from_secs(3600));
        let deadline = start() - ChronoDuration::hours(1);
        store
            .insert_posting(posting("broken", Status::Active, deadline))
            .await
            .unwrap();
        store
            .insert_posting(posting("healthy", Status::Active, deadline))
            .await
            .unwrap();
        store.inject_update_failure("broken").await;

        let report = scheduler.sweep().await;
        assert_eq!(report.closed, 1);
        assert_eq!(report.failed, 1);

        let healthy = store.find_posting_by_id("healthy").await.unwrap().unwrap();
        assert_eq!(healthy.status, Status::Closed);
        // the failed posting got no status change and no audit entry
        let broken = store.find_posting_by_id("broken").await.unwrap().unwrap();
        assert_eq!(broken.status, Status::Active);
        assert!(recorder.get_for_job("broken").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recorder_failure_after_commit_leaves_a_closed_posting_with_a_gap() {
        let (scheduler, store, recorder, _) = setup(Duration::from_secs(3600));
        store
            .insert_posting(posting(
                "expired",
                Status::Active,
                start() - ChronoDuration::hours(1),
            ))
            .await
            .unwrap();
        store.inject_audit_failure("expired").await;

        let report = scheduler.sweep().await;
        assert_eq!(report.closed, 0);
        assert_eq!(report.failed, 1);

        // status first, audit second: the closure committed, the entry did not
        let closed = store.find_posting_by_id("expired").await.unwrap().unwrap();
        assert_eq!(closed.status, Status::Closed);
        assert!(recorder.get_for_job("expired").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_trigger_is_skipped() {
        let (scheduler, _, _, _) = setup(Duration::from_secs(3600));
        scheduler.in_flight.store(true, Ordering::SeqCst);
        let report = scheduler.sweep().await;
        assert!(report.skipped);
        assert_eq!(report.closed, 0);

        scheduler.in_flight.store(false, Ordering::SeqCst);
        assert!(!scheduler.sweep().await.skipped);
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_trigger_sweeps_and_stops() {
        let (scheduler, store, recorder, _) = setup(Duration::from_secs(60));
        store
            .insert_posting(posting(
                "expired",
                Status::Active,
                start() - ChronoDuration::hours(1),
            ))
            .await
            .unwrap();

        let handle = scheduler.start();
        tokio::time::sleep(Duration::from_secs(90)).await;
        handle.stop().await;

        let closed = store.find_posting_by_id("expired").await.unwrap().unwrap();
        assert_eq!(closed.status, Status::Closed);
        assert_eq!(recorder.get_for_job("expired").await.unwrap().len(), 1);
    }
}
