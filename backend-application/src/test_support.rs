// In-memory repository fakes backing the command/query tests

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Mutex as AsyncMutex;
use uuid::Uuid;

use backend_domain::ports::{
    CriticScoreRepository, LookupRepository, MetricsRepository, PurchaseRepository,
    ScanEventRepository, SlotNotifier, SlotRepository, WineRepository,
};
use backend_domain::{
    BottleSize, CellarSlot, Classification, ClassificationQuery, ClosureType, Country, CriticScore,
    CriticScoreQuery, NewScanEvent, PageQuery, Purchase, PurchaseQuery, Region, RuntimeConfig,
    ScanEvent, SlotLedChange, Subregion, Varietal, VarietalShare, Wine, WineFilter, WineMetrics,
};

use crate::{AppState, Metrics};

#[derive(Default)]
struct Inner {
    countries: BTreeMap<Uuid, Country>,
    regions: BTreeMap<Uuid, Region>,
    subregions: BTreeMap<Uuid, Subregion>,
    classifications: BTreeMap<Uuid, Classification>,
    varietals: BTreeMap<Uuid, Varietal>,
    wines: BTreeMap<Uuid, Wine>,
    wine_varietals: BTreeMap<Uuid, Vec<VarietalShare>>,
    purchases: BTreeMap<Uuid, Purchase>,
    scores: BTreeMap<Uuid, CriticScore>,
    metrics: BTreeMap<Uuid, WineMetrics>,
    slots: BTreeMap<Uuid, CellarSlot>,
    events: Vec<ScanEvent>,
    next_seq: i64,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

fn paged<T: Clone>(items: Vec<T>, page: PageQuery) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

#[async_trait]
impl LookupRepository for InMemoryStore {
    async fn insert_country(&self, country: &Country) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .countries
            .insert(country.id, country.clone());
        Ok(())
    }

    async fn list_countries(&self, page: PageQuery) -> anyhow::Result<Vec<Country>> {
        let items = self.inner.lock().unwrap().countries.values().cloned().collect();
        Ok(paged(items, page))
    }

    async fn get_country(&self, id: Uuid) -> anyhow::Result<Option<Country>> {
        Ok(self.inner.lock().unwrap().countries.get(&id).cloned())
    }

    async fn update_country(&self, country: &Country) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .countries
            .insert(country.id, country.clone())
            .is_some())
    }

    async fn delete_country(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().countries.remove(&id).is_some())
    }

    async fn find_country_by_name(&self, name: &str) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .countries
            .values()
            .find(|c| c.name == name)
            .map(|c| c.id))
    }

    async fn country_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.regions.values().any(|r| r.country_id == id)
            || inner.wines.values().any(|w| w.country_id == id)
            || inner
                .classifications
                .values()
                .any(|c| c.country_id == Some(id)))
    }

    async fn insert_region(&self, region: &Region) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .regions
            .insert(region.id, region.clone());
        Ok(())
    }

    async fn list_regions(&self, page: PageQuery) -> anyhow::Result<Vec<Region>> {
        let items = self.inner.lock().unwrap().regions.values().cloned().collect();
        Ok(paged(items, page))
    }

    async fn get_region(&self, id: Uuid) -> anyhow::Result<Option<Region>> {
        Ok(self.inner.lock().unwrap().regions.get(&id).cloned())
    }

    async fn update_region(&self, region: &Region) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.regions.insert(region.id, region.clone()).is_some())
    }

    async fn delete_region(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().regions.remove(&id).is_some())
    }

    async fn find_region_by_name(
        &self,
        name: &str,
        country_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .regions
            .values()
            .find(|r| r.name == name && r.country_id == country_id)
            .map(|r| r.id))
    }

    async fn region_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.subregions.values().any(|s| s.region_id == id)
            || inner.wines.values().any(|w| w.region_id == id)
            || inner
                .classifications
                .values()
                .any(|c| c.region_id == Some(id)))
    }

    async fn insert_subregion(&self, subregion: &Subregion) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .subregions
            .insert(subregion.id, subregion.clone());
        Ok(())
    }

    async fn list_subregions(&self, page: PageQuery) -> anyhow::Result<Vec<Subregion>> {
        let items = self
            .inner
            .lock()
            .unwrap()
            .subregions
            .values()
            .cloned()
            .collect();
        Ok(paged(items, page))
    }

    async fn get_subregion(&self, id: Uuid) -> anyhow::Result<Option<Subregion>> {
        Ok(self.inner.lock().unwrap().subregions.get(&id).cloned())
    }

    async fn update_subregion(&self, subregion: &Subregion) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .subregions
            .insert(subregion.id, subregion.clone())
            .is_some())
    }

    async fn delete_subregion(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().subregions.remove(&id).is_some())
    }

    async fn find_subregion_by_name(
        &self,
        name: &str,
        region_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .subregions
            .values()
            .find(|s| s.name == name && s.region_id == region_id)
            .map(|s| s.id))
    }

    async fn subregion_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.wines.values().any(|w| w.subregion_id == id))
    }

    async fn insert_classification(&self, classification: &Classification) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .classifications
            .insert(classification.id, classification.clone());
        Ok(())
    }

    async fn list_classifications(
        &self,
        query: &ClassificationQuery,
    ) -> anyhow::Result<Vec<Classification>> {
        let inner = self.inner.lock().unwrap();
        let items: Vec<Classification> = inner
            .classifications
            .values()
            .filter(|c| query.country_id.is_none() || c.country_id == query.country_id)
            .filter(|c| query.region_id.is_none() || c.region_id == query.region_id)
            .cloned()
            .collect();
        Ok(paged(items, PageQuery::new(query.skip, query.limit)))
    }

    async fn get_classification(&self, id: Uuid) -> anyhow::Result<Option<Classification>> {
        Ok(self.inner.lock().unwrap().classifications.get(&id).cloned())
    }

    async fn update_classification(
        &self,
        classification: &Classification,
    ) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .classifications
            .insert(classification.id, classification.clone())
            .is_some())
    }

    async fn delete_classification(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .classifications
            .remove(&id)
            .is_some())
    }

    async fn find_classification_by_scope(
        &self,
        name: &str,
        country_id: Option<Uuid>,
        region_id: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .classifications
            .values()
            .find(|c| c.name == name && c.country_id == country_id && c.region_id == region_id)
            .map(|c| c.id))
    }

    async fn classification_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .wines
            .values()
            .any(|w| w.classification_id == Some(id)))
    }

    async fn insert_varietal(&self, varietal: &Varietal) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .varietals
            .insert(varietal.id, varietal.clone());
        Ok(())
    }

    async fn list_varietals(&self, page: PageQuery) -> anyhow::Result<Vec<Varietal>> {
        let items = self.inner.lock().unwrap().varietals.values().cloned().collect();
        Ok(paged(items, page))
    }

    async fn get_varietal(&self, id: Uuid) -> anyhow::Result<Option<Varietal>> {
        Ok(self.inner.lock().unwrap().varietals.get(&id).cloned())
    }

    async fn update_varietal(&self, varietal: &Varietal) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .varietals
            .insert(varietal.id, varietal.clone())
            .is_some())
    }

    async fn delete_varietal(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().varietals.remove(&id).is_some())
    }

    async fn find_varietal_by_name(&self, name: &str) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .varietals
            .values()
            .find(|v| v.name == name)
            .map(|v| v.id))
    }

    async fn varietal_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .wine_varietals
            .values()
            .any(|shares| shares.iter().any(|s| s.varietal_id == id)))
    }
}

#[async_trait]
impl WineRepository for InMemoryStore {
    async fn insert_wine(&self, wine: &Wine) -> anyhow::Result<()> {
        self.inner.lock().unwrap().wines.insert(wine.id, wine.clone());
        Ok(())
    }

    async fn list_wines(&self, page: PageQuery) -> anyhow::Result<Vec<Wine>> {
        let items = self.inner.lock().unwrap().wines.values().cloned().collect();
        Ok(paged(items, page))
    }

    async fn get_wine(&self, id: Uuid) -> anyhow::Result<Option<Wine>> {
        Ok(self.inner.lock().unwrap().wines.get(&id).cloned())
    }

    async fn update_wine(&self, wine: &Wine) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.wines.insert(wine.id, wine.clone()).is_some())
    }

    async fn delete_wine(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        inner.wine_varietals.remove(&id);
        inner.metrics.remove(&id);
        Ok(inner.wines.remove(&id).is_some())
    }

    async fn wine_exists(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().wines.contains_key(&id))
    }

    async fn wine_has_history(&self, id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.purchases.values().any(|p| p.wine_id == id)
            || inner.scores.values().any(|s| s.wine_id == id)
            || inner.events.iter().any(|e| e.wine_id == id))
    }

    async fn find_wine_duplicate(
        &self,
        producer: &str,
        label: &str,
        vintage: i32,
        bottle_size: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .wines
            .values()
            .find(|w| {
                w.producer == producer
                    && w.label == label
                    && w.vintage == vintage
                    && w.bottle_size.as_str() == bottle_size
            })
            .map(|w| w.id))
    }

    async fn varietals_of(&self, wine_id: Uuid) -> anyhow::Result<Vec<VarietalShare>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.wine_varietals.get(&wine_id).cloned().unwrap_or_default())
    }

    async fn replace_varietals(
        &self,
        wine_id: Uuid,
        varietals: &[VarietalShare],
    ) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .wine_varietals
            .insert(wine_id, varietals.to_vec());
        Ok(())
    }

    async fn filter_wine_ids(&self, filter: &WineFilter) -> anyhow::Result<Vec<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .wines
            .values()
            .filter(|w| filter.country_id.is_none() || Some(w.country_id) == filter.country_id)
            .filter(|w| filter.region_id.is_none() || Some(w.region_id) == filter.region_id)
            .filter(|w| {
                filter.subregion_id.is_none() || Some(w.subregion_id) == filter.subregion_id
            })
            .filter(|w| match filter.varietal_id {
                None => true,
                Some(varietal_id) => inner
                    .wine_varietals
                    .get(&w.id)
                    .map(|shares| shares.iter().any(|s| s.varietal_id == varietal_id))
                    .unwrap_or(false),
            })
            .map(|w| w.id)
            .collect())
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryStore {
    async fn insert_purchase(&self, purchase: &Purchase) -> anyhow::Result<()> {
        self.inner
            .lock()
            .unwrap()
            .purchases
            .insert(purchase.id, purchase.clone());
        Ok(())
    }

    async fn list_purchases(&self, query: &PurchaseQuery) -> anyhow::Result<Vec<Purchase>> {
        let inner = self.inner.lock().unwrap();
        let items: Vec<Purchase> = inner
            .purchases
            .values()
            .filter(|p| query.wine_id.is_none() || Some(p.wine_id) == query.wine_id)
            .cloned()
            .collect();
        Ok(paged(items, PageQuery::new(query.skip, query.limit)))
    }

    async fn get_purchase(&self, id: Uuid) -> anyhow::Result<Option<Purchase>> {
        Ok(self.inner.lock().unwrap().purchases.get(&id).cloned())
    }

    async fn update_purchase(&self, purchase: &Purchase) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner
            .purchases
            .insert(purchase.id, purchase.clone())
            .is_some())
    }

    async fn delete_purchase(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().purchases.remove(&id).is_some())
    }
}

#[async_trait]
impl CriticScoreRepository for InMemoryStore {
    async fn insert_score(&self, score: &CriticScore) -> anyhow::Result<()> {
        self.inner.lock().unwrap().scores.insert(score.id, score.clone());
        Ok(())
    }

    async fn list_scores(&self, query: &CriticScoreQuery) -> anyhow::Result<Vec<CriticScore>> {
        let inner = self.inner.lock().unwrap();
        let items: Vec<CriticScore> = inner
            .scores
            .values()
            .filter(|s| query.wine_id.is_none() || Some(s.wine_id) == query.wine_id)
            .cloned()
            .collect();
        Ok(paged(items, PageQuery::new(query.skip, query.limit)))
    }

    async fn get_score(&self, id: Uuid) -> anyhow::Result<Option<CriticScore>> {
        Ok(self.inner.lock().unwrap().scores.get(&id).cloned())
    }

    async fn update_score(&self, score: &CriticScore) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.scores.insert(score.id, score.clone()).is_some())
    }

    async fn delete_score(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().scores.remove(&id).is_some())
    }

    async fn scores_for_wine(&self, wine_id: Uuid) -> anyhow::Result<Vec<CriticScore>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .scores
            .values()
            .filter(|s| s.wine_id == wine_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MetricsRepository for InMemoryStore {
    async fn get_metrics(&self, wine_id: Uuid) -> anyhow::Result<Option<WineMetrics>> {
        Ok(self.inner.lock().unwrap().metrics.get(&wine_id).cloned())
    }

    async fn upsert_metrics(
        &self,
        wine_id: Uuid,
        avg_score: f64,
        review_count: i64,
    ) -> anyhow::Result<WineMetrics> {
        let mut inner = self.inner.lock().unwrap();
        let entry = inner.metrics.entry(wine_id).or_insert(WineMetrics {
            wine_id,
            avg_score: 0.0,
            review_count: 0,
            current_market: None,
            rarity_score: None,
            qpr: None,
        });
        entry.avg_score = avg_score;
        entry.review_count = review_count;
        Ok(entry.clone())
    }
}

#[async_trait]
impl SlotRepository for InMemoryStore {
    async fn insert_slot(&self, slot: &CellarSlot) -> anyhow::Result<()> {
        self.inner.lock().unwrap().slots.insert(slot.id, slot.clone());
        Ok(())
    }

    async fn list_slots(&self, page: PageQuery) -> anyhow::Result<Vec<CellarSlot>> {
        let items = self.inner.lock().unwrap().slots.values().cloned().collect();
        Ok(paged(items, page))
    }

    async fn all_slots(&self) -> anyhow::Result<Vec<CellarSlot>> {
        Ok(self.inner.lock().unwrap().slots.values().cloned().collect())
    }

    async fn get_slot(&self, id: Uuid) -> anyhow::Result<Option<CellarSlot>> {
        Ok(self.inner.lock().unwrap().slots.get(&id).cloned())
    }

    async fn update_slot(&self, slot: &CellarSlot) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.slots.insert(slot.id, slot.clone()).is_some())
    }

    async fn delete_slot(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.inner.lock().unwrap().slots.remove(&id).is_some())
    }

    async fn find_slot_by_position(&self, rack: i32, row: &str) -> anyhow::Result<Option<Uuid>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .slots
            .values()
            .find(|s| s.rack == rack && s.row == row)
            .map(|s| s.id))
    }
}

#[async_trait]
impl ScanEventRepository for InMemoryStore {
    async fn append_event(&self, event: &NewScanEvent) -> anyhow::Result<ScanEvent> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_seq += 1;
        let stored = ScanEvent {
            id: Uuid::new_v4(),
            seq: inner.next_seq,
            wine_id: event.wine_id,
            slot_id: event.slot_id,
            direction: event.direction,
            timestamp: event.timestamp,
        };
        inner.events.push(stored.clone());
        Ok(stored)
    }

    async fn events_for_wine(&self, wine_id: Uuid) -> anyhow::Result<Vec<ScanEvent>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .events
            .iter()
            .filter(|e| e.wine_id == wine_id)
            .cloned()
            .collect())
    }

    async fn events_for_slot(&self, slot_id: Uuid) -> anyhow::Result<Vec<ScanEvent>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .events
            .iter()
            .filter(|e| e.slot_id == slot_id)
            .cloned()
            .collect())
    }

    async fn all_events(&self) -> anyhow::Result<Vec<ScanEvent>> {
        Ok(self.inner.lock().unwrap().events.clone())
    }

    async fn list_events(&self, page: PageQuery) -> anyhow::Result<Vec<ScanEvent>> {
        Ok(paged(self.inner.lock().unwrap().events.clone(), page))
    }

    async fn get_event(&self, id: Uuid) -> anyhow::Result<Option<ScanEvent>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.iter().find(|e| e.id == id).cloned())
    }

    async fn update_event(&self, event: &ScanEvent) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.events.iter_mut().find(|e| e.id == event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_event(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.events.len();
        inner.events.retain(|e| e.id != id);
        Ok(inner.events.len() != before)
    }

    async fn slot_has_events(&self, slot_id: Uuid) -> anyhow::Result<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.events.iter().any(|e| e.slot_id == slot_id))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    changes: Mutex<Vec<SlotLedChange>>,
}

impl RecordingNotifier {
    pub fn changes(&self) -> Vec<SlotLedChange> {
        self.changes.lock().unwrap().clone()
    }
}

#[async_trait]
impl SlotNotifier for RecordingNotifier {
    fn spawn_notify(&self, _config: RuntimeConfig, change: SlotLedChange) {
        self.changes.lock().unwrap().push(change);
    }

    async fn check_target(&self, _config: &RuntimeConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState {
            config: RuntimeConfig::default(),
            lookup_repo: store.clone(),
            wine_repo: store.clone(),
            purchase_repo: store.clone(),
            score_repo: store.clone(),
            metrics_repo: store.clone(),
            slot_repo: store.clone(),
            event_repo: store.clone(),
            notifier: notifier.clone(),
            slotting_lock: Arc::new(AsyncMutex::new(())),
            metrics: Arc::new(Metrics::default()),
        };
        Self {
            state,
            store,
            notifier,
        }
    }

    pub async fn add_wine(&self, producer: &str) -> Uuid {
        self.add_wine_in_country(producer, Uuid::new_v4()).await
    }

    pub async fn add_wine_in_country(&self, producer: &str, country_id: Uuid) -> Uuid {
        let wine = Wine {
            id: Uuid::new_v4(),
            producer: producer.to_string(),
            label: "Grand Vin".to_string(),
            vintage: 2015,
            country_id,
            region_id: Uuid::new_v4(),
            subregion_id: Uuid::new_v4(),
            classification_id: None,
            bottle_size: BottleSize::Standard,
            closure_type: ClosureType::Cork,
            abv: Some(13.5),
        };
        self.store.insert_wine(&wine).await.expect("insert wine");
        wine.id
    }

    pub async fn add_slot(&self, rack: i32, row: &str) -> Uuid {
        let slot = CellarSlot {
            id: Uuid::new_v4(),
            rack,
            row: row.to_string(),
            led_node_id: format!("led-{rack}-{row}"),
        };
        self.store.insert_slot(&slot).await.expect("insert slot");
        slot.id
    }

    pub async fn add_score(&self, wine_id: Uuid, source: &str, score: f64) -> Uuid {
        let record = CriticScore {
            id: Uuid::new_v4(),
            wine_id,
            source: source.to_string(),
            score,
            review_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        self.store.insert_score(&record).await.expect("insert score");
        record.id
    }
}
