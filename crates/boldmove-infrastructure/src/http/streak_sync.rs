use async_trait::async_trait;
use chrono::NaiveDate;
use log::warn;
use reqwest::header;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use boldmove_domain::shared::{DomainError, UserId};
use boldmove_domain::streak::{RemoteStreakSync, StreakRecord};

use crate::config::RemoteSyncConfig;
use crate::persistence::ResultExt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row in the remote single-row-per-user streak table
#[derive(Debug, Serialize, Deserialize)]
struct UserStreakRow {
    user_id: String,
    current_streak: u32,
    longest_streak: u32,
    total_active_days: u32,
    last_active_date: Option<String>,
}

impl UserStreakRow {
    fn from_record(user_id: &UserId, record: &StreakRecord) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            current_streak: record.current_streak(),
            longest_streak: record.longest_streak(),
            total_active_days: record.total_active_days(),
            last_active_date: record
                .last_active_date()
                .map(|d| d.format(DATE_FORMAT).to_string()),
        }
    }

    fn into_record(self) -> StreakRecord {
        let last_active_date = self.last_active_date.as_deref().and_then(|raw| {
            match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    warn!(
                        "[streak] remote row has invalid last_active_date value={} err={}",
                        raw, e
                    );
                    None
                }
            }
        });

        StreakRecord::restore(
            self.current_streak,
            self.longest_streak,
            last_active_date,
            self.total_active_days,
        )
    }
}

/// Supabase-style REST client for the remote streak table: filtered GET to
/// read the user's row, upsert POST (merge-duplicates) to write it back.
pub struct HttpStreakSync {
    client: reqwest::Client,
    table_url: Url,
}

impl HttpStreakSync {
    pub fn new(config: &RemoteSyncConfig) -> Result<Self, DomainError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::HeaderName::from_static("apikey"),
            header::HeaderValue::from_str(&config.api_key)
                .map_err(|e| DomainError::Infrastructure(format!("invalid api key: {}", e)))?,
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| DomainError::Infrastructure(format!("invalid api key: {}", e)))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .to_infra_err()?;

        let table_url = config
            .base_url
            .join(&format!("rest/v1/{}", config.table))
            .map_err(|e| DomainError::Infrastructure(format!("invalid remote url: {}", e)))?;

        Ok(Self { client, table_url })
    }
}

#[async_trait]
impl RemoteStreakSync for HttpStreakSync {
    async fn fetch(&self, user_id: &UserId) -> Result<Option<StreakRecord>, DomainError> {
        let filter = format!("eq.{}", user_id.as_str());
        let response = self
            .client
            .get(self.table_url.clone())
            .query(&[("user_id", filter.as_str()), ("select", "*")])
            .send()
            .await
            .to_infra_err()?
            .error_for_status()
            .to_infra_err()?;

        let mut rows: Vec<UserStreakRow> = response
            .json()
            .await
            .map_err(|e| DomainError::Deserialization(e.to_string()))?;

        if rows.len() > 1 {
            warn!(
                "[streak] remote returned {} rows for user_id={}, using first",
                rows.len(),
                user_id
            );
        }

        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into_record())
        })
    }

    async fn push(&self, user_id: &UserId, record: &StreakRecord) -> Result<(), DomainError> {
        let row = UserStreakRow::from_record(user_id, record);

        self.client
            .post(self.table_url.clone())
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[row])
            .send()
            .await
            .to_infra_err()?
            .error_for_status()
            .to_infra_err()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_row_conversion_round_trip() {
        let user_id = UserId::from_string("user-7");
        let date = NaiveDate::from_ymd_opt(2026, 8, 22).unwrap();
        let record = StreakRecord::restore(4, 9, Some(date), 15);

        let row = UserStreakRow::from_record(&user_id, &record);
        assert_eq!(row.user_id, "user-7");
        assert_eq!(row.last_active_date.as_deref(), Some("2026-08-22"));

        assert_eq!(row.into_record(), record);
    }

    #[test]
    fn test_invalid_remote_date_treated_as_absent() {
        let row = UserStreakRow {
            user_id: "user-7".to_string(),
            current_streak: 3,
            longest_streak: 3,
            total_active_days: 3,
            last_active_date: Some("not-a-date".to_string()),
        };

        let record = row.into_record();
        assert!(record.last_active_date().is_none());
        assert_eq!(record.current_streak(), 3);
    }

    #[test]
    fn test_table_url_built_from_config() {
        let config = RemoteSyncConfig {
            base_url: Url::parse("https://example.supabase.co").unwrap(),
            api_key: "anon-key".to_string(),
            table: "user_streaks".to_string(),
            request_timeout_secs: 5,
        };

        let sync = HttpStreakSync::new(&config).unwrap();
        assert_eq!(
            sync.table_url.as_str(),
            "https://example.supabase.co/rest/v1/user_streaks"
        );
    }
}
