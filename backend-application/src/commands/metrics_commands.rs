use uuid::Uuid;

use crate::{AppError, AppState};
use backend_domain::WineMetrics;

/// Recompute avg_score and review_count from the wine's critic scores
/// and upsert the metrics row. The market/rarity/qpr placeholders are
/// left as they are.
pub async fn recompute_metrics(state: &AppState, wine_id: Uuid) -> Result<WineMetrics, AppError> {
    if !state.wine_repo.wine_exists(wine_id).await? {
        return Err(AppError::NotFound("wine not found".to_string()));
    }
    let scores = state.score_repo.scores_for_wine(wine_id).await?;
    if scores.is_empty() {
        return Err(AppError::Conflict(
            "no critic scores to compute".to_string(),
        ));
    }

    let count = scores.len() as i64;
    let avg = scores.iter().map(|s| s.score).sum::<f64>() / count as f64;
    let avg = (avg * 100.0).round() / 100.0;

    let metrics = state
        .metrics_repo
        .upsert_metrics(wine_id, avg, count)
        .await?;
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;

    #[tokio::test]
    async fn recompute_averages_and_rounds() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;
        ctx.add_score(wine, "WA", 95.0).await;
        ctx.add_score(wine, "JS", 96.0).await;
        ctx.add_score(wine, "WS", 94.0).await;

        let metrics = recompute_metrics(&ctx.state, wine).await.expect("recompute");
        assert_eq!(metrics.review_count, 3);
        assert!((metrics.avg_score - 95.0).abs() < f64::EPSILON);

        // A fourth score shifts the average; rounding stays at 2 decimals.
        ctx.add_score(wine, "Decanter", 92.0).await;
        let metrics = recompute_metrics(&ctx.state, wine).await.expect("recompute");
        assert_eq!(metrics.review_count, 4);
        assert!((metrics.avg_score - 94.25).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn recompute_without_scores_conflicts() {
        let ctx = TestContext::new().await;
        let wine = ctx.add_wine("Ch. Margaux").await;

        let err = recompute_metrics(&ctx.state, wine).await.expect_err("no scores");
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn recompute_unknown_wine_is_not_found() {
        let ctx = TestContext::new().await;
        let err = recompute_metrics(&ctx.state, Uuid::new_v4())
            .await
            .expect_err("unknown wine");
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
