use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{CriticScore, CriticScoreQuery};

pub async fn list_scores(
    state: &AppState,
    query: CriticScoreQuery,
) -> Result<Vec<CriticScore>, AppError> {
    Ok(state.score_repo.list_scores(&query).await?)
}

pub async fn get_score(state: &AppState, id: Uuid) -> Result<CriticScore, AppError> {
    state
        .score_repo
        .get_score(id)
        .await?
        .ok_or_else(|| AppError::NotFound("critic score not found".to_string()))
}
