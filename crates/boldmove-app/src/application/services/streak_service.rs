use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::sync::Arc;

use boldmove_domain::shared::{DomainError, UserId};
use boldmove_domain::streak::{
    check_milestone, derive_week_activity, next_milestone, RemoteStreakSync, StreakRecord,
    StreakStore,
};

use crate::application::dtos::{MilestoneDto, RecordOutcomeDto, StreakDto, StreakStatusDto};

/// Orchestrates the streak tracker: loads state through the local store
/// (authoritative) and an optional remote mirror, applies the domain rules,
/// and persists results. Remote failures are logged and dropped, never
/// surfaced; the next local mutation is the next sync attempt.
pub struct StreakService {
    store: Arc<dyn StreakStore>,
    remote: Option<Arc<dyn RemoteStreakSync>>,
    user_id: UserId,
}

impl StreakService {
    pub fn new(
        store: Arc<dyn StreakStore>,
        remote: Option<Arc<dyn RemoteStreakSync>>,
        user_id: UserId,
    ) -> Self {
        Self {
            store,
            remote,
            user_id,
        }
    }

    /// Record one qualifying action for today
    pub async fn record_activity(&self) -> Result<RecordOutcomeDto, DomainError> {
        self.record_activity_on(Local::now().date_naive()).await
    }

    pub async fn record_activity_on(
        &self,
        today: NaiveDate,
    ) -> Result<RecordOutcomeDto, DomainError> {
        let mut record = self.load_record(today).await;

        let update = record.record_activity(today);
        if update.is_no_op() {
            info!(
                "[streak] activity already recorded user_id={} date={}",
                self.user_id, today
            );
            return Ok(RecordOutcomeDto {
                streak: StreakDto::from_record(&self.user_id, &record),
                already_recorded: true,
                milestone: None,
            });
        }

        // Local save is authoritative; a failure here is a real error
        self.store.save(&record).await?;
        self.push_remote(&record).await;

        let milestone = check_milestone(record.current_streak());
        if let Some(m) = milestone {
            info!(
                "[streak] milestone reached user_id={} streak={} title={}",
                self.user_id, m.streak, m.title
            );
        }

        info!(
            "[streak] activity recorded user_id={} current={} longest={} total={}",
            self.user_id,
            record.current_streak(),
            record.longest_streak(),
            record.total_active_days()
        );

        Ok(RecordOutcomeDto {
            streak: StreakDto::from_record(&self.user_id, &record),
            already_recorded: false,
            milestone: milestone.map(MilestoneDto::from),
        })
    }

    /// Current streak state plus the derived trailing-week activity
    pub async fn status(&self) -> Result<StreakStatusDto, DomainError> {
        self.status_on(Local::now().date_naive()).await
    }

    pub async fn status_on(&self, today: NaiveDate) -> Result<StreakStatusDto, DomainError> {
        let record = self.load_record(today).await;

        let week = derive_week_activity(record.last_active_date(), record.current_streak(), today);

        Ok(StreakStatusDto {
            streak: StreakDto::from_record(&self.user_id, &record),
            week: week.into(),
            active_today: record.last_active_date() == Some(today),
            next_milestone: next_milestone(record.current_streak()).map(MilestoneDto::from),
        })
    }

    /// Wipe the record back to the zero state (testing/debugging affordance)
    pub async fn reset(&self) -> Result<StreakDto, DomainError> {
        let record = StreakRecord::new();
        self.store.save(&record).await?;
        self.push_remote(&record).await;

        info!("[streak] record reset user_id={}", self.user_id);
        Ok(StreakDto::from_record(&self.user_id, &record))
    }

    /// Paired local + remote read. Local wins when present; a remote record
    /// only seeds an absent local store. Read failures on either side are
    /// logged and treated as "no prior record". The loaded record is
    /// self-healed, and a seeded or healed record is written back locally
    /// best-effort.
    async fn load_record(&self, today: NaiveDate) -> StreakRecord {
        let (local, remote) = match &self.remote {
            Some(sync) => tokio::join!(self.store.load(), sync.fetch(&self.user_id)),
            None => (self.store.load().await, Ok(None)),
        };

        let local = local.unwrap_or_else(|e| {
            warn!("[streak] local load failed, starting fresh: {}", e);
            None
        });
        let remote = remote.unwrap_or_else(|e| {
            warn!("[streak] remote fetch failed (ignored): {}", e);
            None
        });

        let seeded_from_remote = local.is_none() && remote.is_some();
        let mut record = local.or(remote).unwrap_or_default();

        let healed = record.self_heal(today);
        if healed {
            info!(
                "[streak] streak broken by inactivity, reset to 0 user_id={} last_active={:?}",
                self.user_id,
                record.last_active_date()
            );
        }

        if seeded_from_remote || healed {
            if let Err(e) = self.store.save(&record).await {
                warn!("[streak] local write-back failed (ignored): {}", e);
            }
        }

        record
    }

    async fn push_remote(&self, record: &StreakRecord) {
        if let Some(sync) = &self.remote {
            if let Err(e) = sync.push(&self.user_id, record).await {
                // No retry/backoff: the next local mutation retries naturally
                warn!("[streak] remote sync failed (dropped): {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::always;

    mock! {
        Store {}

        #[async_trait]
        impl StreakStore for Store {
            async fn load(&self) -> Result<Option<StreakRecord>, DomainError>;
            async fn save(&self, record: &StreakRecord) -> Result<(), DomainError>;
        }
    }

    mock! {
        Remote {}

        #[async_trait]
        impl RemoteStreakSync for Remote {
            async fn fetch(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DomainError>;
            async fn push(&self, user_id: &UserId, record: &StreakRecord) -> Result<(), DomainError>;
        }
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn service(store: MockStore) -> StreakService {
        StreakService::new(Arc::new(store), None, UserId::from_string("user-1"))
    }

    fn service_with_remote(store: MockStore, remote: MockRemote) -> StreakService {
        StreakService::new(
            Arc::new(store),
            Some(Arc::new(remote)),
            UserId::from_string("user-1"),
        )
    }

    #[tokio::test]
    async fn test_first_activity_starts_streak_and_saves() {
        let today = day("2026-08-23");

        let mut store = MockStore::new();
        store.expect_load().times(1).returning(|| Ok(None));
        store
            .expect_save()
            .withf(|r| r.current_streak() == 1 && r.total_active_days() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(store).record_activity_on(today).await.unwrap();

        assert!(!outcome.already_recorded);
        assert_eq!(outcome.streak.current_streak, 1);
        assert_eq!(outcome.streak.last_active_date.as_deref(), Some("2026-08-23"));
        assert!(outcome.milestone.is_none());
    }

    #[tokio::test]
    async fn test_consecutive_day_extends_streak() {
        let today = day("2026-08-23");
        let yesterday = today - Duration::days(1);

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(StreakRecord::restore(5, 5, Some(yesterday), 5))));
        store
            .expect_save()
            .withf(|r| r.current_streak() == 6 && r.longest_streak() == 6)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(store).record_activity_on(today).await.unwrap();

        assert_eq!(outcome.streak.current_streak, 6);
        assert_eq!(outcome.streak.longest_streak, 6);
    }

    #[tokio::test]
    async fn test_same_day_record_is_no_op() {
        let today = day("2026-08-23");

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(StreakRecord::restore(3, 3, Some(today), 3))));
        store.expect_save().times(0);

        let outcome = service(store).record_activity_on(today).await.unwrap();

        assert!(outcome.already_recorded);
        assert_eq!(outcome.streak.current_streak, 3);
        assert_eq!(outcome.streak.total_active_days, 3);
    }

    #[tokio::test]
    async fn test_milestone_fires_on_seventh_day() {
        let today = day("2026-08-23");
        let yesterday = today - Duration::days(1);

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(StreakRecord::restore(6, 10, Some(yesterday), 20))));
        store.expect_save().times(1).returning(|_| Ok(()));

        let outcome = service(store).record_activity_on(today).await.unwrap();

        let milestone = outcome.milestone.expect("milestone at 7");
        assert_eq!(milestone.streak, 7);
        assert_eq!(milestone.title, "Week Warrior");
    }

    #[tokio::test]
    async fn test_local_load_failure_starts_fresh() {
        let today = day("2026-08-23");

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(|| Err(DomainError::Repository("db locked".into())));
        store.expect_save().times(1).returning(|_| Ok(()));

        let outcome = service(store).record_activity_on(today).await.unwrap();

        assert_eq!(outcome.streak.current_streak, 1);
    }

    #[tokio::test]
    async fn test_remote_push_failure_is_dropped() {
        let today = day("2026-08-23");

        let mut store = MockStore::new();
        store.expect_load().times(1).returning(|| Ok(None));
        store.expect_save().times(1).returning(|_| Ok(()));

        let mut remote = MockRemote::new();
        remote.expect_fetch().times(1).returning(|_| Ok(None));
        remote
            .expect_push()
            .with(always(), always())
            .times(1)
            .returning(|_, _| Err(DomainError::Infrastructure("offline".into())));

        let outcome = service_with_remote(store, remote)
            .record_activity_on(today)
            .await
            .expect("remote failure must not surface");

        assert_eq!(outcome.streak.current_streak, 1);
    }

    #[tokio::test]
    async fn test_remote_record_seeds_empty_local_store() {
        let today = day("2026-08-23");
        let yesterday = today - Duration::days(1);

        let mut store = MockStore::new();
        store.expect_load().times(1).returning(|| Ok(None));
        // Seeded record is written back locally
        store
            .expect_save()
            .withf(|r| r.current_streak() == 4 && r.total_active_days() == 12)
            .times(1)
            .returning(|_| Ok(()));

        let mut remote = MockRemote::new();
        remote
            .expect_fetch()
            .times(1)
            .returning(move |_| Ok(Some(StreakRecord::restore(4, 9, Some(yesterday), 12))));

        let status = service_with_remote(store, remote)
            .status_on(today)
            .await
            .unwrap();

        assert_eq!(status.streak.current_streak, 4);
        assert_eq!(status.streak.longest_streak, 9);
        assert!(!status.active_today);
    }

    #[tokio::test]
    async fn test_local_record_wins_over_remote() {
        let today = day("2026-08-23");

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(StreakRecord::restore(2, 2, Some(today), 2))));
        store.expect_save().times(0);

        let mut remote = MockRemote::new();
        remote
            .expect_fetch()
            .times(1)
            .returning(move |_| Ok(Some(StreakRecord::restore(8, 8, Some(today), 8))));

        let status = service_with_remote(store, remote)
            .status_on(today)
            .await
            .unwrap();

        assert_eq!(status.streak.current_streak, 2);
        assert!(status.active_today);
    }

    #[tokio::test]
    async fn test_status_self_heals_stale_streak() {
        let today = day("2026-08-23");
        let four_days_ago = today - Duration::days(4);

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(StreakRecord::restore(6, 10, Some(four_days_ago), 30))));
        // Healed record is written back
        store
            .expect_save()
            .withf(|r| r.current_streak() == 0 && r.longest_streak() == 10)
            .times(1)
            .returning(|_| Ok(()));

        let status = service(store).status_on(today).await.unwrap();

        assert_eq!(status.streak.current_streak, 0);
        assert_eq!(status.streak.longest_streak, 10);
        assert_eq!(status.week.active_count, 0);
        assert_eq!(status.next_milestone.unwrap().streak, 3);
    }

    #[tokio::test]
    async fn test_status_week_window_never_exceeds_seven() {
        let today = day("2026-08-23");

        let mut store = MockStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(StreakRecord::restore(42, 42, Some(today), 42))));

        let status = service(store).status_on(today).await.unwrap();

        assert_eq!(status.week.days.len(), 7);
        assert_eq!(status.week.active_count, 7);
        assert!(status.active_today);
    }

    #[tokio::test]
    async fn test_reset_writes_zero_state() {
        let mut store = MockStore::new();
        store
            .expect_save()
            .withf(|r| *r == StreakRecord::new())
            .times(1)
            .returning(|_| Ok(()));

        let streak = service(store).reset().await.unwrap();

        assert_eq!(streak.current_streak, 0);
        assert_eq!(streak.total_active_days, 0);
        assert!(streak.last_active_date.is_none());
    }
}
