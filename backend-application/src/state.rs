use std::sync::Arc;

use backend_domain::ports::{
    CriticScoreRepository, LookupRepository, MetricsRepository, PurchaseRepository,
    ScanEventRepository, SlotNotifier, SlotRepository, WineRepository,
};
use backend_domain::RuntimeConfig;
use tokio::sync::Mutex;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub lookup_repo: Arc<dyn LookupRepository>,
    pub wine_repo: Arc<dyn WineRepository>,
    pub purchase_repo: Arc<dyn PurchaseRepository>,
    pub score_repo: Arc<dyn CriticScoreRepository>,
    pub metrics_repo: Arc<dyn MetricsRepository>,
    pub slot_repo: Arc<dyn SlotRepository>,
    pub event_repo: Arc<dyn ScanEventRepository>,
    pub notifier: Arc<dyn SlotNotifier>,
    /// Serializes every check-then-append slotting transition. The store
    /// is an embedded single-process database, so this mutex is the
    /// serialization point for concurrent slot-in/slot-out calls.
    pub slotting_lock: Arc<Mutex<()>>,
    pub metrics: Arc<Metrics>,
}
