use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use backend_application::Metrics;
use backend_domain::ports::SlotNotifier;
use backend_domain::{RuntimeConfig, SlotLedChange};

/// Pushes slot state changes to the LED controller over HTTP.
/// Delivery is fire-and-forget: the spawned task logs and counts
/// failures, and nothing propagates back to the slotting command.
pub struct LedNotifyService {
    metrics: Arc<Metrics>,
}

impl LedNotifyService {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }
}

#[async_trait]
impl SlotNotifier for LedNotifyService {
    fn spawn_notify(&self, config: RuntimeConfig, change: SlotLedChange) {
        let Some(url) = config.led_controller_url.clone() else {
            debug!(slot_id = %change.slot_id, "led controller not configured, skipping notify");
            return;
        };
        let metrics = self.metrics.clone();
        tokio::spawn(async move {
            if let Err(err) = send_notify(&config, &url, &change).await {
                metrics.record_notify_failure();
                warn!(slot_id = %change.slot_id, "led notification failed: {}", err);
            }
        });
    }

    async fn check_target(&self, config: &RuntimeConfig) -> Result<()> {
        let url = config
            .led_controller_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("led controller url not configured"))?;
        let client = client_for(config)?;
        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("led controller responded {}", response.status());
        }
        Ok(())
    }
}

fn client_for(config: &RuntimeConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds.max(3)))
        .build()?)
}

async fn send_notify(config: &RuntimeConfig, url: &str, change: &SlotLedChange) -> Result<()> {
    let client = client_for(config)?;
    client
        .post(url)
        .json(&json!({
            "node": change.led_node_id,
            "slot_id": change.slot_id,
            "state": change.state.as_str(),
        }))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}
