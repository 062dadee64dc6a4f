// Purchase history entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub wine_id: Uuid,
    pub purchase_date: NaiveDate,
    pub price_amount: f64,
    pub price_currency: String,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchasePayload {
    pub wine_id: Uuid,
    pub purchase_date: NaiveDate,
    pub price_amount: f64,
    pub price_currency: String,
    pub receipt_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseQuery {
    pub wine_id: Option<Uuid>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}
