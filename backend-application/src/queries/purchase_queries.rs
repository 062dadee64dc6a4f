use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{Purchase, PurchaseQuery};

pub async fn list_purchases(
    state: &AppState,
    query: PurchaseQuery,
) -> Result<Vec<Purchase>, AppError> {
    Ok(state.purchase_repo.list_purchases(&query).await?)
}

pub async fn get_purchase(state: &AppState, id: Uuid) -> Result<Purchase, AppError> {
    state
        .purchase_repo
        .get_purchase(id)
        .await?
        .ok_or_else(|| AppError::NotFound("purchase not found".to_string()))
}
