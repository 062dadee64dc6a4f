use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{Wine, WinePayload, WineRead};

async fn validate_wine_refs(state: &AppState, payload: &WinePayload) -> Result<(), AppError> {
    if state
        .lookup_repo
        .get_country(payload.country_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("country not found".to_string()));
    }
    if state
        .lookup_repo
        .get_region(payload.region_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("region not found".to_string()));
    }
    if state
        .lookup_repo
        .get_subregion(payload.subregion_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("subregion not found".to_string()));
    }
    if let Some(classification_id) = payload.classification_id {
        if state
            .lookup_repo
            .get_classification(classification_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("classification not found".to_string()));
        }
    }
    for share in &payload.varietals {
        if state
            .lookup_repo
            .get_varietal(share.varietal_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("varietal not found".to_string()));
        }
        if share.blend_pct <= 0.0 || share.blend_pct > 100.0 {
            return Err(AppError::BadRequest(
                "blend_pct must be within (0, 100]".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn create_wine(state: &AppState, payload: WinePayload) -> Result<WineRead, AppError> {
    validate_wine_refs(state, &payload).await?;
    if state
        .wine_repo
        .find_wine_duplicate(
            &payload.producer,
            &payload.label,
            payload.vintage,
            payload.bottle_size.as_str(),
        )
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "wine already exists for this producer, label, vintage and size".to_string(),
        ));
    }

    let wine = Wine {
        id: Uuid::new_v4(),
        producer: payload.producer,
        label: payload.label,
        vintage: payload.vintage,
        country_id: payload.country_id,
        region_id: payload.region_id,
        subregion_id: payload.subregion_id,
        classification_id: payload.classification_id,
        bottle_size: payload.bottle_size,
        closure_type: payload.closure_type,
        abv: payload.abv,
    };
    state.wine_repo.insert_wine(&wine).await?;
    state
        .wine_repo
        .replace_varietals(wine.id, &payload.varietals)
        .await?;
    Ok(WineRead {
        wine,
        varietals: payload.varietals,
    })
}

pub async fn update_wine(
    state: &AppState,
    id: Uuid,
    payload: WinePayload,
) -> Result<WineRead, AppError> {
    let mut wine = state
        .wine_repo
        .get_wine(id)
        .await?
        .ok_or_else(|| AppError::NotFound("wine not found".to_string()))?;
    validate_wine_refs(state, &payload).await?;
    if let Some(other) = state
        .wine_repo
        .find_wine_duplicate(
            &payload.producer,
            &payload.label,
            payload.vintage,
            payload.bottle_size.as_str(),
        )
        .await?
    {
        if other != id {
            return Err(AppError::Conflict(
                "wine already exists for this producer, label, vintage and size".to_string(),
            ));
        }
    }

    wine.producer = payload.producer;
    wine.label = payload.label;
    wine.vintage = payload.vintage;
    wine.country_id = payload.country_id;
    wine.region_id = payload.region_id;
    wine.subregion_id = payload.subregion_id;
    wine.classification_id = payload.classification_id;
    wine.bottle_size = payload.bottle_size;
    wine.closure_type = payload.closure_type;
    wine.abv = payload.abv;
    state.wine_repo.update_wine(&wine).await?;
    state
        .wine_repo
        .replace_varietals(id, &payload.varietals)
        .await?;
    Ok(WineRead {
        wine,
        varietals: payload.varietals,
    })
}

/// Deleting a wine drops its varietal associations and metrics row, but
/// is rejected while purchases, critic scores or scan events still
/// reference it.
pub async fn delete_wine(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if !state.wine_repo.wine_exists(id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    if state.wine_repo.wine_has_history(id).await? {
        return Err(AppError::Conflict(
            "wine has purchase, score or scan history".to_string(),
        ));
    }
    state.wine_repo.delete_wine(id).await?;
    Ok(())
}
