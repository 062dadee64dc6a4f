use async_trait::async_trait;
use uuid::Uuid;

use backend_domain::ports::WineRepository;
use backend_domain::{PageQuery, VarietalShare, Wine, WineFilter};

use super::sqlite::SqliteStore;

#[derive(sqlx::FromRow)]
struct WineRow {
    id: Uuid,
    producer: String,
    label: String,
    vintage: i32,
    country_id: Uuid,
    region_id: Uuid,
    subregion_id: Uuid,
    classification_id: Option<Uuid>,
    bottle_size: String,
    closure_type: String,
    abv: Option<f64>,
}

impl From<WineRow> for Wine {
    fn from(row: WineRow) -> Self {
        Wine {
            id: row.id,
            producer: row.producer,
            label: row.label,
            vintage: row.vintage,
            country_id: row.country_id,
            region_id: row.region_id,
            subregion_id: row.subregion_id,
            classification_id: row.classification_id,
            bottle_size: row.bottle_size.as_str().into(),
            closure_type: row.closure_type.as_str().into(),
            abv: row.abv,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VarietalShareRow {
    varietal_id: Uuid,
    blend_pct: f64,
}

const WINE_COLUMNS: &str = "id, producer, label, vintage, country_id, region_id, subregion_id, \
                            classification_id, bottle_size, closure_type, abv";

#[async_trait]
impl WineRepository for SqliteStore {
    async fn insert_wine(&self, wine: &Wine) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO wines (id, producer, label, vintage, country_id, region_id, \
             subregion_id, classification_id, bottle_size, closure_type, abv) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(wine.id)
        .bind(&wine.producer)
        .bind(&wine.label)
        .bind(wine.vintage)
        .bind(wine.country_id)
        .bind(wine.region_id)
        .bind(wine.subregion_id)
        .bind(wine.classification_id)
        .bind(wine.bottle_size.as_str())
        .bind(wine.closure_type.as_str())
        .bind(wine.abv)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn list_wines(&self, page: PageQuery) -> anyhow::Result<Vec<Wine>> {
        let sql = format!(
            "SELECT {WINE_COLUMNS} FROM wines ORDER BY producer, label, vintage LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, WineRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(Wine::from).collect())
    }

    async fn get_wine(&self, id: Uuid) -> anyhow::Result<Option<Wine>> {
        let sql = format!("SELECT {WINE_COLUMNS} FROM wines WHERE id = ?");
        let row = sqlx::query_as::<_, WineRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(Wine::from))
    }

    async fn update_wine(&self, wine: &Wine) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE wines SET producer = ?, label = ?, vintage = ?, country_id = ?, \
             region_id = ?, subregion_id = ?, classification_id = ?, bottle_size = ?, \
             closure_type = ?, abv = ? WHERE id = ?",
        )
        .bind(&wine.producer)
        .bind(&wine.label)
        .bind(wine.vintage)
        .bind(wine.country_id)
        .bind(wine.region_id)
        .bind(wine.subregion_id)
        .bind(wine.classification_id)
        .bind(wine.bottle_size.as_str())
        .bind(wine.closure_type.as_str())
        .bind(wine.abv)
        .bind(wine.id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_wine(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut tx = self.pool().begin().await?;
        sqlx::query("DELETE FROM wine_varietals WHERE wine_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM wine_metrics WHERE wine_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM wines WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn wine_exists(&self, id: Uuid) -> anyhow::Result<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM wines WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(count > 0)
    }

    async fn wine_has_history(&self, id: Uuid) -> anyhow::Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(1) FROM purchases WHERE wine_id = ?) \
             + (SELECT COUNT(1) FROM critic_scores WHERE wine_id = ?) \
             + (SELECT COUNT(1) FROM scan_events WHERE wine_id = ?)",
        )
        .bind(id)
        .bind(id)
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(count > 0)
    }

    async fn find_wine_duplicate(
        &self,
        producer: &str,
        label: &str,
        vintage: i32,
        bottle_size: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM wines WHERE producer = ? AND label = ? AND vintage = ? \
             AND bottle_size = ?",
        )
        .bind(producer)
        .bind(label)
        .bind(vintage)
        .bind(bottle_size)
        .fetch_optional(self.pool())
        .await?;
        Ok(id)
    }

    async fn varietals_of(&self, wine_id: Uuid) -> anyhow::Result<Vec<VarietalShare>> {
        let rows = sqlx::query_as::<_, VarietalShareRow>(
            "SELECT varietal_id, blend_pct FROM wine_varietals WHERE wine_id = ?",
        )
        .bind(wine_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows
            .into_iter()
            .map(|row| VarietalShare {
                varietal_id: row.varietal_id,
                blend_pct: row.blend_pct,
            })
            .collect())
    }

    async fn replace_varietals(
        &self,
        wine_id: Uuid,
        varietals: &[VarietalShare],
    ) -> anyhow::Result<()> {
        let mut tx = self.pool().begin().await?;
        sqlx::query("DELETE FROM wine_varietals WHERE wine_id = ?")
            .bind(wine_id)
            .execute(&mut *tx)
            .await?;
        for share in varietals {
            sqlx::query(
                "INSERT INTO wine_varietals (wine_id, varietal_id, blend_pct) VALUES (?, ?, ?)",
            )
            .bind(wine_id)
            .bind(share.varietal_id)
            .bind(share.blend_pct)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn filter_wine_ids(&self, filter: &WineFilter) -> anyhow::Result<Vec<Uuid>> {
        let mut sql = String::from("SELECT DISTINCT w.id FROM wines w");
        if filter.varietal_id.is_some() {
            sql.push_str(" JOIN wine_varietals wv ON wv.wine_id = w.id");
        }
        sql.push_str(" WHERE 1=1");
        if filter.country_id.is_some() {
            sql.push_str(" AND w.country_id = ?");
        }
        if filter.region_id.is_some() {
            sql.push_str(" AND w.region_id = ?");
        }
        if filter.subregion_id.is_some() {
            sql.push_str(" AND w.subregion_id = ?");
        }
        if filter.varietal_id.is_some() {
            sql.push_str(" AND wv.varietal_id = ?");
        }

        let mut query = sqlx::query_scalar::<_, Uuid>(&sql);
        if let Some(country_id) = filter.country_id {
            query = query.bind(country_id);
        }
        if let Some(region_id) = filter.region_id {
            query = query.bind(region_id);
        }
        if let Some(subregion_id) = filter.subregion_id {
            query = query.bind(subregion_id);
        }
        if let Some(varietal_id) = filter.varietal_id {
            query = query.bind(varietal_id);
        }
        Ok(query.fetch_all(self.pool()).await?)
    }
}
