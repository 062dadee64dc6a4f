use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::{CriticScore, CriticScorePayload};

pub async fn create_score(
    state: &AppState,
    payload: CriticScorePayload,
) -> Result<CriticScore, AppError> {
    if !state.wine_repo.wine_exists(payload.wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    let score = CriticScore {
        id: Uuid::new_v4(),
        wine_id: payload.wine_id,
        source: payload.source,
        score: payload.score,
        review_date: payload.review_date,
    };
    state.score_repo.insert_score(&score).await?;
    Ok(score)
}

pub async fn update_score(
    state: &AppState,
    id: Uuid,
    payload: CriticScorePayload,
) -> Result<CriticScore, AppError> {
    let mut score = state
        .score_repo
        .get_score(id)
        .await?
        .ok_or_else(|| AppError::NotFound("critic score not found".to_string()))?;
    if !state.wine_repo.wine_exists(payload.wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    score.wine_id = payload.wine_id;
    score.source = payload.source;
    score.score = payload.score;
    score.review_date = payload.review_date;
    state.score_repo.update_score(&score).await?;
    Ok(score)
}

pub async fn delete_score(state: &AppState, id: Uuid) -> Result<(), AppError> {
    if !state.score_repo.delete_score(id).await? {
        return Err(AppError::NotFound("critic score not found".to_string()));
    }
    Ok(())
}
