use anyhow::Context;
use std::path::Path;
use std::sync::Arc;

use boldmove_domain::shared::UserId;
use boldmove_domain::streak::RemoteStreakSync;
use boldmove_infrastructure::config::AppConfig;
use boldmove_infrastructure::http::HttpStreakSync;
use boldmove_infrastructure::persistence::{repositories::SqliteStreakStore, Database};

use crate::application::services::StreakService;

/// Wire config -> database -> repositories -> service
pub async fn build_service(
    config: &mut AppConfig,
    config_path: &Path,
) -> anyhow::Result<StreakService> {
    let user_id = ensure_user_id(config, config_path)?;

    let db_path = config
        .database_path
        .to_str()
        .context("database path is not valid UTF-8")?;
    let db = Database::new(db_path).await?;
    db.run_migrations().await?;

    let store = Arc::new(SqliteStreakStore::new(Arc::new(db.pool().clone())));

    let remote: Option<Arc<dyn RemoteStreakSync>> = match &config.remote {
        Some(remote_config) => Some(Arc::new(HttpStreakSync::new(remote_config)?)),
        None => None,
    };

    Ok(StreakService::new(store, remote, user_id))
}

/// The user id keys the remote row, so it must be stable across runs.
/// Generate one on first launch and persist it back into the config file.
fn ensure_user_id(config: &mut AppConfig, config_path: &Path) -> anyhow::Result<UserId> {
    if let Some(user_id) = &config.user_id {
        return Ok(UserId::from_string(user_id));
    }

    let user_id = UserId::new();
    config.user_id = Some(user_id.as_str().to_string());

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(config)?;
    std::fs::write(config_path, text)
        .with_context(|| format!("write config {}", config_path.display()))?;

    log::info!("[streak] generated user_id={}", user_id);
    Ok(user_id)
}
