// Purchase, critic-score and metrics persistence

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use backend_domain::ports::{CriticScoreRepository, MetricsRepository, PurchaseRepository};
use backend_domain::{
    CriticScore, CriticScoreQuery, PageQuery, Purchase, PurchaseQuery, WineMetrics,
};

use super::sqlite::SqliteStore;

#[derive(sqlx::FromRow)]
struct PurchaseRow {
    id: Uuid,
    wine_id: Uuid,
    purchase_date: NaiveDate,
    price_amount: f64,
    price_currency: String,
    receipt_url: Option<String>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Purchase {
            id: row.id,
            wine_id: row.wine_id,
            purchase_date: row.purchase_date,
            price_amount: row.price_amount,
            price_currency: row.price_currency,
            receipt_url: row.receipt_url,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CriticScoreRow {
    id: Uuid,
    wine_id: Uuid,
    source: String,
    score: f64,
    review_date: NaiveDate,
}

impl From<CriticScoreRow> for CriticScore {
    fn from(row: CriticScoreRow) -> Self {
        CriticScore {
            id: row.id,
            wine_id: row.wine_id,
            source: row.source,
            score: row.score,
            review_date: row.review_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WineMetricsRow {
    wine_id: Uuid,
    avg_score: f64,
    review_count: i64,
    current_market: Option<f64>,
    rarity_score: Option<f64>,
    qpr: Option<f64>,
}

impl From<WineMetricsRow> for WineMetrics {
    fn from(row: WineMetricsRow) -> Self {
        WineMetrics {
            wine_id: row.wine_id,
            avg_score: row.avg_score,
            review_count: row.review_count,
            current_market: row.current_market,
            rarity_score: row.rarity_score,
            qpr: row.qpr,
        }
    }
}

#[async_trait]
impl PurchaseRepository for SqliteStore {
    async fn insert_purchase(&self, purchase: &Purchase) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO purchases (id, wine_id, purchase_date, price_amount, price_currency, \
             receipt_url) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(purchase.id)
        .bind(purchase.wine_id)
        .bind(purchase.purchase_date)
        .bind(purchase.price_amount)
        .bind(&purchase.price_currency)
        .bind(&purchase.receipt_url)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn list_purchases(&self, query: &PurchaseQuery) -> anyhow::Result<Vec<Purchase>> {
        let page = PageQuery::new(query.skip, query.limit);
        let mut sql = String::from(
            "SELECT id, wine_id, purchase_date, price_amount, price_currency, receipt_url \
             FROM purchases WHERE 1=1",
        );
        if query.wine_id.is_some() {
            sql.push_str(" AND wine_id = ?");
        }
        sql.push_str(" ORDER BY purchase_date DESC LIMIT ? OFFSET ?");

        let mut q = sqlx::query_as::<_, PurchaseRow>(&sql);
        if let Some(wine_id) = query.wine_id {
            q = q.bind(wine_id);
        }
        let rows = q
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(Purchase::from).collect())
    }

    async fn get_purchase(&self, id: Uuid) -> anyhow::Result<Option<Purchase>> {
        let row = sqlx::query_as::<_, PurchaseRow>(
            "SELECT id, wine_id, purchase_date, price_amount, price_currency, receipt_url \
             FROM purchases WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Purchase::from))
    }

    async fn update_purchase(&self, purchase: &Purchase) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE purchases SET wine_id = ?, purchase_date = ?, price_amount = ?, \
             price_currency = ?, receipt_url = ? WHERE id = ?",
        )
        .bind(purchase.wine_id)
        .bind(purchase.purchase_date)
        .bind(purchase.price_amount)
        .bind(&purchase.price_currency)
        .bind(&purchase.receipt_url)
        .bind(purchase.id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_purchase(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CriticScoreRepository for SqliteStore {
    async fn insert_score(&self, score: &CriticScore) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO critic_scores (id, wine_id, source, score, review_date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(score.id)
        .bind(score.wine_id)
        .bind(&score.source)
        .bind(score.score)
        .bind(score.review_date)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn list_scores(&self, query: &CriticScoreQuery) -> anyhow::Result<Vec<CriticScore>> {
        let page = PageQuery::new(query.skip, query.limit);
        let mut sql = String::from(
            "SELECT id, wine_id, source, score, review_date FROM critic_scores WHERE 1=1",
        );
        if query.wine_id.is_some() {
            sql.push_str(" AND wine_id = ?");
        }
        sql.push_str(" ORDER BY review_date DESC LIMIT ? OFFSET ?");

        let mut q = sqlx::query_as::<_, CriticScoreRow>(&sql);
        if let Some(wine_id) = query.wine_id {
            q = q.bind(wine_id);
        }
        let rows = q
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(CriticScore::from).collect())
    }

    async fn get_score(&self, id: Uuid) -> anyhow::Result<Option<CriticScore>> {
        let row = sqlx::query_as::<_, CriticScoreRow>(
            "SELECT id, wine_id, source, score, review_date FROM critic_scores WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(CriticScore::from))
    }

    async fn update_score(&self, score: &CriticScore) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE critic_scores SET wine_id = ?, source = ?, score = ?, review_date = ? \
             WHERE id = ?",
        )
        .bind(score.wine_id)
        .bind(&score.source)
        .bind(score.score)
        .bind(score.review_date)
        .bind(score.id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_score(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM critic_scores WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn scores_for_wine(&self, wine_id: Uuid) -> anyhow::Result<Vec<CriticScore>> {
        let rows = sqlx::query_as::<_, CriticScoreRow>(
            "SELECT id, wine_id, source, score, review_date FROM critic_scores WHERE wine_id = ?",
        )
        .bind(wine_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(CriticScore::from).collect())
    }
}

#[async_trait]
impl MetricsRepository for SqliteStore {
    async fn get_metrics(&self, wine_id: Uuid) -> anyhow::Result<Option<WineMetrics>> {
        let row = sqlx::query_as::<_, WineMetricsRow>(
            "SELECT wine_id, avg_score, review_count, current_market, rarity_score, qpr \
             FROM wine_metrics WHERE wine_id = ?",
        )
        .bind(wine_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(WineMetrics::from))
    }

    async fn upsert_metrics(
        &self,
        wine_id: Uuid,
        avg_score: f64,
        review_count: i64,
    ) -> anyhow::Result<WineMetrics> {
        sqlx::query(
            "INSERT INTO wine_metrics (wine_id, avg_score, review_count) VALUES (?, ?, ?) \
             ON CONFLICT (wine_id) DO UPDATE SET avg_score = excluded.avg_score, \
             review_count = excluded.review_count",
        )
        .bind(wine_id)
        .bind(avg_score)
        .bind(review_count)
        .execute(self.pool())
        .await?;

        let row = sqlx::query_as::<_, WineMetricsRow>(
            "SELECT wine_id, avg_score, review_count, current_market, rarity_score, qpr \
             FROM wine_metrics WHERE wine_id = ?",
        )
        .bind(wine_id)
        .fetch_one(self.pool())
        .await?;
        Ok(WineMetrics::from(row))
    }
}
