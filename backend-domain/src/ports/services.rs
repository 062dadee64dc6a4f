use async_trait::async_trait;

use crate::entities::{RuntimeConfig, SlotLedChange};

/// Hardware-notification hook fired after a slotting mutation.
/// `spawn_notify` is fire-and-forget: delivery failures must never reach
/// the caller, and the surrounding request does not wait on it.
#[async_trait]
pub trait SlotNotifier: Send + Sync {
    fn spawn_notify(&self, config: RuntimeConfig, change: SlotLedChange);
    async fn check_target(&self, config: &RuntimeConfig) -> anyhow::Result<()>;
}
