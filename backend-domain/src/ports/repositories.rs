use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{
    CellarSlot,
    Classification,
    ClassificationQuery,
    Country,
    CriticScore,
    CriticScoreQuery,
    NewScanEvent,
    Purchase,
    PurchaseQuery,
    Region,
    ScanEvent,
    Subregion,
    Varietal,
    VarietalShare,
    Wine,
    WineFilter,
    WineMetrics,
};
use crate::value_objects::PageQuery;

/// Taxonomy lookups: countries, regions, subregions, classifications,
/// varietals. Duplicate detection is part of the port because every
/// lookup has its own unique key shape.
#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn insert_country(&self, country: &Country) -> anyhow::Result<()>;
    async fn list_countries(&self, page: PageQuery) -> anyhow::Result<Vec<Country>>;
    async fn get_country(&self, id: Uuid) -> anyhow::Result<Option<Country>>;
    async fn update_country(&self, country: &Country) -> anyhow::Result<bool>;
    async fn delete_country(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_country_by_name(&self, name: &str) -> anyhow::Result<Option<Uuid>>;
    async fn country_in_use(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn insert_region(&self, region: &Region) -> anyhow::Result<()>;
    async fn list_regions(&self, page: PageQuery) -> anyhow::Result<Vec<Region>>;
    async fn get_region(&self, id: Uuid) -> anyhow::Result<Option<Region>>;
    async fn update_region(&self, region: &Region) -> anyhow::Result<bool>;
    async fn delete_region(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_region_by_name(&self, name: &str, country_id: Uuid) -> anyhow::Result<Option<Uuid>>;
    async fn region_in_use(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn insert_subregion(&self, subregion: &Subregion) -> anyhow::Result<()>;
    async fn list_subregions(&self, page: PageQuery) -> anyhow::Result<Vec<Subregion>>;
    async fn get_subregion(&self, id: Uuid) -> anyhow::Result<Option<Subregion>>;
    async fn update_subregion(&self, subregion: &Subregion) -> anyhow::Result<bool>;
    async fn delete_subregion(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_subregion_by_name(&self, name: &str, region_id: Uuid)
        -> anyhow::Result<Option<Uuid>>;
    async fn subregion_in_use(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn insert_classification(&self, classification: &Classification) -> anyhow::Result<()>;
    async fn list_classifications(
        &self,
        query: &ClassificationQuery,
    ) -> anyhow::Result<Vec<Classification>>;
    async fn get_classification(&self, id: Uuid) -> anyhow::Result<Option<Classification>>;
    async fn update_classification(&self, classification: &Classification) -> anyhow::Result<bool>;
    async fn delete_classification(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_classification_by_scope(
        &self,
        name: &str,
        country_id: Option<Uuid>,
        region_id: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn classification_in_use(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn insert_varietal(&self, varietal: &Varietal) -> anyhow::Result<()>;
    async fn list_varietals(&self, page: PageQuery) -> anyhow::Result<Vec<Varietal>>;
    async fn get_varietal(&self, id: Uuid) -> anyhow::Result<Option<Varietal>>;
    async fn update_varietal(&self, varietal: &Varietal) -> anyhow::Result<bool>;
    async fn delete_varietal(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_varietal_by_name(&self, name: &str) -> anyhow::Result<Option<Uuid>>;
    async fn varietal_in_use(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait WineRepository: Send + Sync {
    async fn insert_wine(&self, wine: &Wine) -> anyhow::Result<()>;
    async fn list_wines(&self, page: PageQuery) -> anyhow::Result<Vec<Wine>>;
    async fn get_wine(&self, id: Uuid) -> anyhow::Result<Option<Wine>>;
    async fn update_wine(&self, wine: &Wine) -> anyhow::Result<bool>;
    async fn delete_wine(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn wine_exists(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn wine_has_history(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_wine_duplicate(
        &self,
        producer: &str,
        label: &str,
        vintage: i32,
        bottle_size: &str,
    ) -> anyhow::Result<Option<Uuid>>;
    async fn varietals_of(&self, wine_id: Uuid) -> anyhow::Result<Vec<VarietalShare>>;
    async fn replace_varietals(
        &self,
        wine_id: Uuid,
        varietals: &[VarietalShare],
    ) -> anyhow::Result<()>;
    /// Ids of wines satisfying the conjunctive taxonomy filter; an empty
    /// filter matches every wine.
    async fn filter_wine_ids(&self, filter: &WineFilter) -> anyhow::Result<Vec<Uuid>>;
}

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn insert_purchase(&self, purchase: &Purchase) -> anyhow::Result<()>;
    async fn list_purchases(&self, query: &PurchaseQuery) -> anyhow::Result<Vec<Purchase>>;
    async fn get_purchase(&self, id: Uuid) -> anyhow::Result<Option<Purchase>>;
    async fn update_purchase(&self, purchase: &Purchase) -> anyhow::Result<bool>;
    async fn delete_purchase(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait CriticScoreRepository: Send + Sync {
    async fn insert_score(&self, score: &CriticScore) -> anyhow::Result<()>;
    async fn list_scores(&self, query: &CriticScoreQuery) -> anyhow::Result<Vec<CriticScore>>;
    async fn get_score(&self, id: Uuid) -> anyhow::Result<Option<CriticScore>>;
    async fn update_score(&self, score: &CriticScore) -> anyhow::Result<bool>;
    async fn delete_score(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn scores_for_wine(&self, wine_id: Uuid) -> anyhow::Result<Vec<CriticScore>>;
}

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    async fn get_metrics(&self, wine_id: Uuid) -> anyhow::Result<Option<WineMetrics>>;
    /// Upsert the aggregate columns only; the placeholder columns
    /// (market, rarity, qpr) keep whatever value they already have.
    async fn upsert_metrics(
        &self,
        wine_id: Uuid,
        avg_score: f64,
        review_count: i64,
    ) -> anyhow::Result<WineMetrics>;
}

#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn insert_slot(&self, slot: &CellarSlot) -> anyhow::Result<()>;
    async fn list_slots(&self, page: PageQuery) -> anyhow::Result<Vec<CellarSlot>>;
    /// The full registry, used by the map-rendering queries.
    async fn all_slots(&self) -> anyhow::Result<Vec<CellarSlot>>;
    async fn get_slot(&self, id: Uuid) -> anyhow::Result<Option<CellarSlot>>;
    async fn update_slot(&self, slot: &CellarSlot) -> anyhow::Result<bool>;
    async fn delete_slot(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn find_slot_by_position(&self, rack: i32, row: &str) -> anyhow::Result<Option<Uuid>>;
}

/// The append-only scan-event log. `append_event` is the only write used
/// by the slotting state machine; update/delete exist solely for the
/// administrative surface and bypass every occupancy guarantee.
#[async_trait]
pub trait ScanEventRepository: Send + Sync {
    async fn append_event(&self, event: &NewScanEvent) -> anyhow::Result<ScanEvent>;
    async fn events_for_wine(&self, wine_id: Uuid) -> anyhow::Result<Vec<ScanEvent>>;
    async fn events_for_slot(&self, slot_id: Uuid) -> anyhow::Result<Vec<ScanEvent>>;
    async fn all_events(&self) -> anyhow::Result<Vec<ScanEvent>>;
    async fn list_events(&self, page: PageQuery) -> anyhow::Result<Vec<ScanEvent>>;
    async fn get_event(&self, id: Uuid) -> anyhow::Result<Option<ScanEvent>>;
    async fn update_event(&self, event: &ScanEvent) -> anyhow::Result<bool>;
    async fn delete_event(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn slot_has_events(&self, slot_id: Uuid) -> anyhow::Result<bool>;
    async fn ping(&self) -> anyhow::Result<()>;
}
