use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use backend_application::{AppState, Metrics};
use backend_infrastructure::{AppConfig, LedNotifyService, SqliteStore};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(SqliteStore::connect(&runtime_config.database_url).await?);
        store.ensure_schema().await?;

        let metrics = Arc::new(Metrics::default());
        let state = AppState {
            config: runtime_config,
            lookup_repo: store.clone(),
            wine_repo: store.clone(),
            purchase_repo: store.clone(),
            score_repo: store.clone(),
            metrics_repo: store.clone(),
            slot_repo: store.clone(),
            event_repo: store,
            notifier: Arc::new(LedNotifyService::new(metrics.clone())),
            slotting_lock: Arc::new(Mutex::new(())),
            metrics,
        };

        Ok(Self { state })
    }
}
