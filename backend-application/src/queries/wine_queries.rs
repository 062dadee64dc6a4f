use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{PageQuery, WineRead};

pub async fn list_wines(state: &AppState, page: PageQuery) -> Result<Vec<WineRead>, AppError> {
    let wines = state.wine_repo.list_wines(page).await?;
    let mut out = Vec::with_capacity(wines.len());
    for wine in wines {
        let varietals = state.wine_repo.varietals_of(wine.id).await?;
        out.push(WineRead { wine, varietals });
    }
    Ok(out)
}

pub async fn get_wine(state: &AppState, id: Uuid) -> Result<WineRead, AppError> {
    let wine = state
        .wine_repo
        .get_wine(id)
        .await?
        .ok_or_else(|| AppError::NotFound("wine not found".to_string()))?;
    let varietals = state.wine_repo.varietals_of(id).await?;
    Ok(WineRead { wine, varietals })
}
