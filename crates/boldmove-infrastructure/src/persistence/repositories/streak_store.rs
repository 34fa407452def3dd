use async_trait::async_trait;
use log::warn;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use boldmove_domain::shared::DomainError;
use boldmove_domain::streak::{StreakRecord, StreakStore};

use crate::persistence::ResultExt;

/// Fixed key under which the single per-user record lives
const STORE_KEY: &str = "boldmove.streak";

#[derive(FromRow)]
struct StreakStoreRow {
    record: String,
}

pub struct SqliteStreakStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStreakStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StreakStore for SqliteStreakStore {
    async fn load(&self) -> Result<Option<StreakRecord>, DomainError> {
        let query = "SELECT record FROM streak_store WHERE store_key = ?1";

        let row: Option<StreakStoreRow> = sqlx::query_as(query)
            .bind(STORE_KEY)
            .fetch_optional(&*self.pool)
            .await
            .to_repo_err()?;

        let Some(row) = row else {
            return Ok(None);
        };

        // A corrupt row is not fatal: log it and fall back to a fresh start
        match serde_json::from_str::<StreakRecord>(&row.record) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(
                    "[streak] discarding unreadable streak record key={} err={}",
                    STORE_KEY, e
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, record: &StreakRecord) -> Result<(), DomainError> {
        let json = serde_json::to_string(record)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        let query = r#"
            INSERT INTO streak_store (store_key, record, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(store_key) DO UPDATE SET
                record = ?2,
                updated_at = datetime('now')
        "#;

        sqlx::query(query)
            .bind(STORE_KEY)
            .bind(&json)
            .execute(&*self.pool)
            .await
            .to_repo_err()?;

        Ok(())
    }
}
