use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::WineMetrics;

pub async fn get_metrics(state: &AppState, wine_id: Uuid) -> Result<WineMetrics, AppError> {
    state
        .metrics_repo
        .get_metrics(wine_id)
        .await?
        .ok_or_else(|| AppError::NotFound("metrics not found for this wine".to_string()))
}
