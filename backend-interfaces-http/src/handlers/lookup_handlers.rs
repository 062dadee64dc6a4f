use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use uuid::Uuid;

use backend_application::commands::lookup_commands;
use backend_application::queries::lookup_queries;
use backend_application::AppState;
use backend_domain::{
    Classification, ClassificationPayload, ClassificationQuery, Country, CountryPayload,
    PageQuery, Region, RegionPayload, Subregion, SubregionPayload, Varietal, VarietalPayload,
};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn create_country(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CountryPayload>,
) -> Result<(StatusCode, Json<Country>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let country = lookup_commands::create_country(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

pub async fn list_countries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Country>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let countries = lookup_queries::list_countries(&state, page).await?;
    Ok(Json(countries))
}

pub async fn get_country(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Country>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let country = lookup_queries::get_country(&state, id).await?;
    Ok(Json(country))
}

pub async fn update_country(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<CountryPayload>,
) -> Result<Json<Country>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let country = lookup_commands::update_country(&state, id, payload).await?;
    Ok(Json(country))
}

pub async fn delete_country(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    lookup_commands::delete_country(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_region(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<RegionPayload>,
) -> Result<(StatusCode, Json<Region>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let region = lookup_commands::create_region(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(region)))
}

pub async fn list_regions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Region>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let regions = lookup_queries::list_regions(&state, page).await?;
    Ok(Json(regions))
}

pub async fn get_region(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Region>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let region = lookup_queries::get_region(&state, id).await?;
    Ok(Json(region))
}

pub async fn update_region(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<RegionPayload>,
) -> Result<Json<Region>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let region = lookup_commands::update_region(&state, id, payload).await?;
    Ok(Json(region))
}

pub async fn delete_region(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    lookup_commands::delete_region(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_subregion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubregionPayload>,
) -> Result<(StatusCode, Json<Subregion>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let subregion = lookup_commands::create_subregion(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(subregion)))
}

pub async fn list_subregions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Subregion>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let subregions = lookup_queries::list_subregions(&state, page).await?;
    Ok(Json(subregions))
}

pub async fn get_subregion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Subregion>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let subregion = lookup_queries::get_subregion(&state, id).await?;
    Ok(Json(subregion))
}

pub async fn update_subregion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubregionPayload>,
) -> Result<Json<Subregion>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let subregion = lookup_commands::update_subregion(&state, id, payload).await?;
    Ok(Json(subregion))
}

pub async fn delete_subregion(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    lookup_commands::delete_subregion(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_classification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ClassificationPayload>,
) -> Result<(StatusCode, Json<Classification>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let classification = lookup_commands::create_classification(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(classification)))
}

pub async fn list_classifications(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ClassificationQuery>,
) -> Result<Json<Vec<Classification>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let classifications = lookup_queries::list_classifications(&state, query).await?;
    Ok(Json(classifications))
}

pub async fn get_classification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Classification>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let classification = lookup_queries::get_classification(&state, id).await?;
    Ok(Json(classification))
}

pub async fn update_classification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClassificationPayload>,
) -> Result<Json<Classification>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let classification = lookup_commands::update_classification(&state, id, payload).await?;
    Ok(Json(classification))
}

pub async fn delete_classification(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    lookup_commands::delete_classification(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_varietal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<VarietalPayload>,
) -> Result<(StatusCode, Json<Varietal>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let varietal = lookup_commands::create_varietal(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(varietal)))
}

pub async fn list_varietals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<Varietal>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let varietals = lookup_queries::list_varietals(&state, page).await?;
    Ok(Json(varietals))
}

pub async fn get_varietal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Varietal>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let varietal = lookup_queries::get_varietal(&state, id).await?;
    Ok(Json(varietal))
}

pub async fn update_varietal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<VarietalPayload>,
) -> Result<Json<Varietal>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let varietal = lookup_commands::update_varietal(&state, id, payload).await?;
    Ok(Json(varietal))
}

pub async fn delete_varietal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    lookup_commands::delete_varietal(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
