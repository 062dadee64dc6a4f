use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{Purchase, PurchasePayload};

pub async fn create_purchase(
    state: &AppState,
    payload: PurchasePayload,
) -> Result<Purchase, AppError> {
    if !state.wine_repo.wine_exists(payload.wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    let purchase = Purchase {
        id: Uuid::new_v4(),
        wine_id: payload.wine_id,
        purchase_date: payload.purchase_date,
        price_amount: payload.price_amount,
        price_currency: payload.price_currency,
        receipt_url: payload.receipt_url,
    };
    state.purchase_repo.insert_purchase(&purchase).await?;
    Ok(purchase)
}

pub async fn update_purchase(
    state: &AppState,
    id: Uuid,
    payload: PurchasePayload,
) -> Result<Purchase, AppError> {
    let mut purchase = state
        .purchase_repo
        .get_purchase(id)
        .await?
        .ok_or_else(|| AppError::NotFound("purchase not found".to_string()))?;
    if !state.wine_repo.wine_exists(payload.wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    purchase.wine_id = payload.wine_id;
    purchase.purchase_date = payload.purchase_date;
    purchase.price_amount = payload.price_amount;
    purchase.price_currency = payload.price_currency;
    purchase.receipt_url = payload.receipt_url;
    state.purchase_repo.update_purchase(&purchase).await?;
    Ok(purchase)
}

pub async fn delete_purchase(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if !state.purchase_repo.delete_purchase(id).await? {
        return Err(AppError::NotFound("purchase not found".to_string()));
    }
    Ok(())
}
