use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use boldmove_domain::shared::DomainError;

const DEFAULT_REMOTE_TABLE: &str = "user_streaks";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote mirror of the streak table (Supabase-style REST contract).
/// Absent section means the tracker runs purely local.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSyncConfig {
    pub base_url: Url,
    pub api_key: String,
    #[serde(default = "default_remote_table")]
    pub table: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_remote_table() -> String {
    DEFAULT_REMOTE_TABLE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default)]
    pub remote: Option<RemoteSyncConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            database_path: default_database_path(),
            log_dir: default_log_dir(),
            remote: None,
        }
    }
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("boldmove")
}

fn default_database_path() -> PathBuf {
    data_dir().join("boldmove.db")
}

fn default_log_dir() -> PathBuf {
    data_dir().join("logs")
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        data_dir().join("config.json")
    }

    /// Load configuration from `path`, falling back to defaults when no
    /// file exists, then apply environment overrides.
    pub fn load_from(path: &std::path::Path) -> Result<Self, DomainError> {
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(path)
                .map_err(|e| DomainError::Infrastructure(format!("read config: {}", e)))?;
            serde_json::from_str(&text)
                .map_err(|e| DomainError::Deserialization(format!("parse config: {}", e)))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(user_id) = std::env::var("BOLDMOVE_USER_ID") {
            self.user_id = Some(user_id);
        }
        if let Ok(db_path) = std::env::var("BOLDMOVE_DB_PATH") {
            self.database_path = PathBuf::from(db_path);
        }
        if let Ok(log_dir) = std::env::var("BOLDMOVE_LOG_DIR") {
            self.log_dir = PathBuf::from(log_dir);
        }

        // A remote section can be supplied entirely from the environment
        if let (Ok(base_url), Ok(api_key)) = (
            std::env::var("BOLDMOVE_REMOTE_URL"),
            std::env::var("BOLDMOVE_REMOTE_API_KEY"),
        ) {
            if let Ok(base_url) = Url::parse(&base_url) {
                self.remote = Some(RemoteSyncConfig {
                    base_url,
                    api_key,
                    table: std::env::var("BOLDMOVE_REMOTE_TABLE")
                        .unwrap_or_else(|_| default_remote_table()),
                    request_timeout_secs: default_request_timeout_secs(),
                });
            }
        }
    }
}
