// Critic score history and the derived per-wine metrics record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticScore {
    pub id: Uuid,
    pub wine_id: Uuid,
    pub source: String,
    pub score: f64,
    pub review_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CriticScorePayload {
    pub wine_id: Uuid,
    pub source: String,
    pub score: f64,
    pub review_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CriticScoreQuery {
    pub wine_id: Option<Uuid>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

/// Aggregated metrics, recomputed on demand from the critic scores.
/// The market/rarity/qpr columns are placeholders carried through the
/// recompute untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineMetrics {
    pub wine_id: Uuid,
    pub avg_score: f64,
    pub review_count: i64,
    pub current_market: Option<f64>,
    pub rarity_score: Option<f64>,
    pub qpr: Option<f64>,
}
