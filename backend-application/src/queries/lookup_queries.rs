use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{
    Classification, ClassificationQuery, Country, PageQuery, Region, Subregion, Varietal,
};

pub async fn list_countries(state: &AppState, page: PageQuery) -> Result<Vec<Country>, AppError> {
    Ok(state.lookup_repo.list_countries(page).await?)
}

pub async fn get_country(state: &AppState, id: Uuid) -> Result<Country, AppError> {
    state
        .lookup_repo
        .get_country(id)
        .await?
        .ok_or_else(|| AppError::NotFound("country not found".to_string()))
}

pub async fn list_regions(state: &AppState, page: PageQuery) -> Result<Vec<Region>, AppError> {
    Ok(state.lookup_repo.list_regions(page).await?)
}

pub async fn get_region(state: &AppState, id: Uuid) -> Result<Region, AppError> {
    state
        .lookup_repo
        .get_region(id)
        .await?
        .ok_or_else(|| AppError::NotFound("region not found".to_string()))
}

pub async fn list_subregions(
    state: &AppState,
    page: PageQuery,
) -> Result<Vec<Subregion>, AppError> {
    Ok(state.lookup_repo.list_subregions(page).await?)
}

pub async fn get_subregion(state: &AppState, id: Uuid) -> Result<Subregion, AppError> {
    state
        .lookup_repo
        .get_subregion(id)
        .await?
        .ok_or_else(|| AppError::NotFound("subregion not found".to_string()))
}

pub async fn list_classifications(
    state: &AppState,
    query: ClassificationQuery,
) -> Result<Vec<Classification>, AppError> {
    Ok(state.lookup_repo.list_classifications(&query).await?)
}

pub async fn get_classification(state: &AppState, id: Uuid) -> Result<Classification, AppError> {
    state
        .lookup_repo
        .get_classification(id)
        .await?
        .ok_or_else(|| AppError::NotFound("classification not found".to_string()))
}

pub async fn list_varietals(state: &AppState, page: PageQuery) -> Result<Vec<Varietal>, AppError> {
    Ok(state.lookup_repo.list_varietals(page).await?)
}

pub async fn get_varietal(state: &AppState, id: Uuid) -> Result<Varietal, AppError> {
    state
        .lookup_repo
        .get_varietal(id)
        .await?
        .ok_or_else(|| AppError::NotFound("varietal not found".to_string()))
}
