use crate::shared::{DomainError, UserId};
use crate::streak::StreakRecord;
use async_trait::async_trait;

/// Local, authoritative persistence for the single per-user streak record
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// Load the persisted record. `None` means no prior record (fresh start).
    async fn load(&self) -> Result<Option<StreakRecord>, DomainError>;

    async fn save(&self, record: &StreakRecord) -> Result<(), DomainError>;
}

/// Optional remote mirror of the streak record, upserted by user id.
/// Failures are best-effort territory: callers log and move on, local state
/// stays authoritative for the session.
#[async_trait]
pub trait RemoteStreakSync: Send + Sync {
    async fn fetch(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DomainError>;

    async fn push(&self, user_id: &UserId, record: &StreakRecord) -> Result<(), DomainError>;
}
