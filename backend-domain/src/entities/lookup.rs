// Taxonomy lookup entities
// Country -> Region -> Subregion hierarchy, plus classifications and varietals

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subregion {
    pub id: Uuid,
    pub name: String,
    pub region_id: Uuid,
}

/// A named classification (e.g. an appellation tier), optionally scoped
/// to a country and/or region. Both scope ids absent means a general
/// classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub id: Uuid,
    pub name: String,
    pub country_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Varietal {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryPayload {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionPayload {
    pub name: String,
    pub country_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubregionPayload {
    pub name: String,
    pub region_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassificationPayload {
    pub name: String,
    pub country_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VarietalPayload {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationQuery {
    pub country_id: Option<Uuid>,
    pub region_id: Option<Uuid>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}
