//! Application state wiring the adapters together.
//!
//! `AppState` holds the data directory and the effective configuration.
//! Storage and the assistant client are opened on demand, so commands that
//! need neither (`config`, `completions`) never touch the database.

use std::path::PathBuf;

use anyhow::Context;

use panicpal_core::assistant::box_client::BoxAssistantClient;
use panicpal_infra::assistant::http::HttpAssistantClient;
use panicpal_infra::config::{load_app_config, resolve_access_token};
use panicpal_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use panicpal_infra::sqlite::kv::SqliteKvStore;
use panicpal_infra::sqlite::pool::DatabasePool;
use panicpal_types::config::AppConfig;

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: AppConfig,
}

impl AppState {
    /// Resolve the data directory and load `config.toml`.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        ensure_data_dir(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_app_config(&data_dir).await;
        tracing::debug!(data_dir = %data_dir.display(), endpoint = %config.endpoint_url, "Loaded configuration");

        Ok(Self { data_dir, config })
    }

    /// Open the SQLite-backed key-value store in the data directory.
    pub async fn open_store(&self) -> anyhow::Result<SqliteKvStore> {
        let pool = DatabasePool::open_in(&self.data_dir)
            .await
            .context("failed to open the conversation database")?;
        Ok(SqliteKvStore::new(pool))
    }

    /// Build the HTTP assistant client from configuration.
    pub fn assistant_client(&self) -> anyhow::Result<BoxAssistantClient> {
        let token = resolve_access_token(&self.config);
        if token.is_none() {
            tracing::warn!("No access token configured; requests may be rejected by the endpoint");
        }

        let client = HttpAssistantClient::new(self.config.endpoint_url.clone(), token)
            .context("failed to build the assistant client")?;
        Ok(BoxAssistantClient::new(client))
    }
}
