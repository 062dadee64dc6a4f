use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{
    Classification, ClassificationPayload, Country, CountryPayload, Region, RegionPayload,
    Subregion, SubregionPayload, Varietal, VarietalPayload,
};

fn normalized_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

// --- countries ---------------------------------------------------------

pub async fn create_country(
    state: &AppState,
    payload: CountryPayload,
) -> Result<Country, AppError> {
    let name = normalized_name(&payload.name)?;
    if state.lookup_repo.find_country_by_name(&name).await?.is_some() {
        return Err(AppError::Conflict("country already exists".to_string()));
    }
    let country = Country {
        id: Uuid::new_v4(),
        name,
    };
    state.lookup_repo.insert_country(&country).await?;
    Ok(country)
}

pub async fn update_country(
    state: &AppState,
    id: Uuid,
    payload: CountryPayload,
) -> Result<Country, AppError> {
    let mut country = state
        .lookup_repo
        .get_country(id)
        .await?
        .ok_or_else(|| AppError::NotFound("country not found".to_string()))?;
    let name = normalized_name(&payload.name)?;
    if let Some(other) = state.lookup_repo.find_country_by_name(&name).await? {
        if other != id {
            return Err(AppError::Conflict("country already exists".to_string()));
        }
    }
    country.name = name;
    state.lookup_repo.update_country(&country).await?;
    Ok(country)
}

pub async fn delete_country(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.lookup_repo.get_country(id).await?.is_none() {
        return Err(AppError::NotFound("country not found".to_string()));
    }
    if state.lookup_repo.country_in_use(id).await? {
        return Err(AppError::Conflict(
            "country is referenced by regions, wines or classifications".to_string(),
        ));
    }
    state.lookup_repo.delete_country(id).await?;
    Ok(())
}

// --- regions -----------------------------------------------------------

pub async fn create_region(state: &AppState, payload: RegionPayload) -> Result<Region, AppError> {
    let name = normalized_name(&payload.name)?;
    if state.lookup_repo.get_country(payload.country_id).await?.is_none() {
        return Err(AppError::NotFound("country not found".to_string()));
    }
    if state
        .lookup_repo
        .find_region_by_name(&name, payload.country_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("region already exists".to_string()));
    }
    let region = Region {
        id: Uuid::new_v4(),
        name,
        country_id: payload.country_id,
    };
    state.lookup_repo.insert_region(&region).await?;
    Ok(region)
}

pub async fn update_region(
    state: &AppState,
    id: Uuid,
    payload: RegionPayload,
) -> Result<Region, AppError> {
    let mut region = state
        .lookup_repo
        .get_region(id)
        .await?
        .ok_or_else(|| AppError::NotFound("region not found".to_string()))?;
    let name = normalized_name(&payload.name)?;
    if state.lookup_repo.get_country(payload.country_id).await?.is_none() {
        return Err(AppError::NotFound("country not found".to_string()));
    }
    if let Some(other) = state
        .lookup_repo
        .find_region_by_name(&name, payload.country_id)
        .await?
    {
        if other != id {
            return Err(AppError::Conflict("region already exists".to_string()));
        }
    }
    region.name = name;
    region.country_id = payload.country_id;
    state.lookup_repo.update_region(&region).await?;
    Ok(region)
}

pub async fn delete_region(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.lookup_repo.get_region(id).await?.is_none() {
        return Err(AppError::NotFound("region not found".to_string()));
    }
    if state.lookup_repo.region_in_use(id).await? {
        return Err(AppError::Conflict(
            "region is referenced by subregions, wines or classifications".to_string(),
        ));
    }
    state.lookup_repo.delete_region(id).await?;
    Ok(())
}

// --- subregions --------------------------------------------------------

pub async fn create_subregion(
    state: &AppState,
    payload: SubregionPayload,
) -> Result<Subregion, AppError> {
    let name = normalized_name(&payload.name)?;
    if state.lookup_repo.get_region(payload.region_id).await?.is_none() {
        return Err(AppError::NotFound("region not found".to_string()));
    }
    if state
        .lookup_repo
        .find_subregion_by_name(&name, payload.region_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("subregion already exists".to_string()));
    }
    let subregion = Subregion {
        id: Uuid::new_v4(),
        name,
        region_id: payload.region_id,
    };
    state.lookup_repo.insert_subregion(&subregion).await?;
    Ok(subregion)
}

pub async fn update_subregion(
    state: &AppState,
    id: Uuid,
    payload: SubregionPayload,
) -> Result<Subregion, AppError> {
    let mut subregion = state
        .lookup_repo
        .get_subregion(id)
        .await?
        .ok_or_else(|| AppError::NotFound("subregion not found".to_string()))?;
    let name = normalized_name(&payload.name)?;
    if state.lookup_repo.get_region(payload.region_id).await?.is_none() {
        return Err(AppError::NotFound("region not found".to_string()));
    }
    if let Some(other) = state
        .lookup_repo
        .find_subregion_by_name(&name, payload.region_id)
        .await?
    {
        if other != id {
            return Err(AppError::Conflict("subregion already exists".to_string()));
        }
    }
    subregion.name = name;
    subregion.region_id = payload.region_id;
    state.lookup_repo.update_subregion(&subregion).await?;
    Ok(subregion)
}

pub async fn delete_subregion(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.lookup_repo.get_subregion(id).await?.is_none() {
        return Err(AppError::NotFound("subregion not found".to_string()));
    }
    if state.lookup_repo.subregion_in_use(id).await? {
        return Err(AppError::Conflict(
            "subregion is referenced by wines".to_string(),
        ));
    }
    state.lookup_repo.delete_subregion(id).await?;
    Ok(())
}

// --- classifications ---------------------------------------------------

async fn validate_classification_scope(
    state: &AppState,
    payload: &ClassificationPayload,
) -> Result<(), AppError> {
    if let Some(country_id) = payload.country_id {
        if state.lookup_repo.get_country(country_id).await?.is_none() {
            return Err(AppError::NotFound("country not found".to_string()));
        }
    }
    if let Some(region_id) = payload.region_id {
        if state.lookup_repo.get_region(region_id).await?.is_none() {
            return Err(AppError::NotFound("region not found".to_string()));
        }
    }
    Ok(())
}

pub async fn create_classification(
    state: &AppState,
    payload: ClassificationPayload,
) -> Result<Classification, AppError> {
    let name = normalized_name(&payload.name)?;
    validate_classification_scope(state, &payload).await?;
    if state
        .lookup_repo
        .find_classification_by_scope(&name, payload.country_id, payload.region_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "classification already exists for this scope".to_string(),
        ));
    }
    let classification = Classification {
        id: Uuid::new_v4(),
        name,
        country_id: payload.country_id,
        region_id: payload.region_id,
    };
    state
        .lookup_repo
        .insert_classification(&classification)
        .await?;
    Ok(classification)
}

pub async fn update_classification(
    state: &AppState,
    id: Uuid,
    payload: ClassificationPayload,
) -> Result<Classification, AppError> {
    let mut classification = state
        .lookup_repo
        .get_classification(id)
        .await?
        .ok_or_else(|| AppError::NotFound("classification not found".to_string()))?;
    let name = normalized_name(&payload.name)?;
    validate_classification_scope(state, &payload).await?;
    if let Some(other) = state
        .lookup_repo
        .find_classification_by_scope(&name, payload.country_id, payload.region_id)
        .await?
    {
        if other != id {
            return Err(AppError::Conflict(
                "classification already exists for this scope".to_string(),
            ));
        }
    }
    classification.name = name;
    classification.country_id = payload.country_id;
    classification.region_id = payload.region_id;
    state
        .lookup_repo
        .update_classification(&classification)
        .await?;
    Ok(classification)
}

pub async fn delete_classification(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.lookup_repo.get_classification(id).await?.is_none() {
        return Err(AppError::NotFound("classification not found".to_string()));
    }
    if state.lookup_repo.classification_in_use(id).await? {
        return Err(AppError::Conflict(
            "classification is referenced by wines".to_string(),
        ));
    }
    state.lookup_repo.delete_classification(id).await?;
    Ok(())
}

// --- varietals ---------------------------------------------------------

pub async fn create_varietal(
    state: &AppState,
    payload: VarietalPayload,
) -> Result<Varietal, AppError> {
    let name = normalized_name(&payload.name)?;
    if state.lookup_repo.find_varietal_by_name(&name).await?.is_some() {
        return Err(AppError::Conflict("varietal already exists".to_string()));
    }
    let varietal = Varietal {
        id: Uuid::new_v4(),
        name,
    };
    state.lookup_repo.insert_varietal(&varietal).await?;
    Ok(varietal)
}

pub async fn update_varietal(
    state: &AppState,
    id: Uuid,
    payload: VarietalPayload,
) -> Result<Varietal, AppError> {
    let mut varietal = state
        .lookup_repo
        .get_varietal(id)
        .await?
        .ok_or_else(|| AppError::NotFound("varietal not found".to_string()))?;
    let name = normalized_name(&payload.name)?;
    if let Some(other) = state.lookup_repo.find_varietal_by_name(&name).await? {
        if other != id {
            return Err(AppError::Conflict("varietal already exists".to_string()));
        }
    }
    varietal.name = name;
    state.lookup_repo.update_varietal(&varietal).await?;
    Ok(varietal)
}

pub async fn delete_varietal(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if state.lookup_repo.get_varietal(id).await?.is_none() {
        return Err(AppError::NotFound("varietal not found".to_string()));
    }
    if state.lookup_repo.varietal_in_use(id).await? {
        return Err(AppError::Conflict(
            "varietal is referenced by wines".to_string(),
        ));
    }
    state.lookup_repo.delete_varietal(id).await?;
    Ok(())
}
