use async_trait::async_trait;
use uuid::Uuid;

use backend_domain::ports::LookupRepository;
use backend_domain::{
    Classification, ClassificationQuery, Country, PageQuery, Region, Subregion, Varietal,
};

use super::sqlite::SqliteStore;

#[derive(sqlx::FromRow)]
struct CountryRow {
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct RegionRow {
    id: Uuid,
    name: String,
    country_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct SubregionRow {
    id: Uuid,
    name: String,
    region_id: Uuid,
}

#[derive(sqlx::FromRow)]
struct ClassificationRow {
    id: Uuid,
    name: String,
    country_id: Option<Uuid>,
    region_id: Option<Uuid>,
}

#[derive(sqlx::FromRow)]
struct VarietalRow {
    id: Uuid,
    name: String,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Country {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<RegionRow> for Region {
    fn from(row: RegionRow) -> Self {
        Region {
            id: row.id,
            name: row.name,
            country_id: row.country_id,
        }
    }
}

impl From<SubregionRow> for Subregion {
    fn from(row: SubregionRow) -> Self {
        Subregion {
            id: row.id,
            name: row.name,
            region_id: row.region_id,
        }
    }
}

impl From<ClassificationRow> for Classification {
    fn from(row: ClassificationRow) -> Self {
        Classification {
            id: row.id,
            name: row.name,
            country_id: row.country_id,
            region_id: row.region_id,
        }
    }
}

impl From<VarietalRow> for Varietal {
    fn from(row: VarietalRow) -> Self {
        Varietal {
            id: row.id,
            name: row.name,
        }
    }
}

#[async_trait]
impl LookupRepository for SqliteStore {
    async fn insert_country(&self, country: &Country) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO countries (id, name) VALUES (?, ?)")
            .bind(country.id)
            .bind(&country.name)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn list_countries(&self, page: PageQuery) -> anyhow::Result<Vec<Country>> {
        let rows = sqlx::query_as::<_, CountryRow>(
            "SELECT id, name FROM countries ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Country::from).collect())
    }

    async fn get_country(&self, id: Uuid) -> anyhow::Result<Option<Country>> {
        let row = sqlx::query_as::<_, CountryRow>("SELECT id, name FROM countries WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(Country::from))
    }

    async fn update_country(&self, country: &Country) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE countries SET name = ? WHERE id = ?")
            .bind(&country.name)
            .bind(country.id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_country(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM countries WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_country_by_name(&self, name: &str) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM countries WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(id)
    }

    async fn country_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(1) FROM regions WHERE country_id = ?) \
             + (SELECT COUNT(1) FROM wines WHERE country_id = ?) \
             + (SELECT COUNT(1) FROM classifications WHERE country_id = ?)",
        )
        .bind(id)
        .bind(id)
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(count > 0)
    }

    async fn insert_region(&self, region: &Region) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO regions (id, name, country_id) VALUES (?, ?, ?)")
            .bind(region.id)
            .bind(&region.name)
            .bind(region.country_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn list_regions(&self, page: PageQuery) -> anyhow::Result<Vec<Region>> {
        let rows = sqlx::query_as::<_, RegionRow>(
            "SELECT id, name, country_id FROM regions ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Region::from).collect())
    }

    async fn get_region(&self, id: Uuid) -> anyhow::Result<Option<Region>> {
        let row = sqlx::query_as::<_, RegionRow>(
            "SELECT id, name, country_id FROM regions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Region::from))
    }

    async fn update_region(&self, region: &Region) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE regions SET name = ?, country_id = ? WHERE id = ?")
            .bind(&region.name)
            .bind(region.country_id)
            .bind(region.id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_region(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM regions WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_region_by_name(
        &self,
        name: &str,
        country_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM regions WHERE name = ? AND country_id = ?",
        )
        .bind(name)
        .bind(country_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(id)
    }

    async fn region_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(1) FROM subregions WHERE region_id = ?) \
             + (SELECT COUNT(1) FROM wines WHERE region_id = ?) \
             + (SELECT COUNT(1) FROM classifications WHERE region_id = ?)",
        )
        .bind(id)
        .bind(id)
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(count > 0)
    }

    async fn insert_subregion(&self, subregion: &Subregion) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO subregions (id, name, region_id) VALUES (?, ?, ?)")
            .bind(subregion.id)
            .bind(&subregion.name)
            .bind(subregion.region_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn list_subregions(&self, page: PageQuery) -> anyhow::Result<Vec<Subregion>> {
        let rows = sqlx::query_as::<_, SubregionRow>(
            "SELECT id, name, region_id FROM subregions ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Subregion::from).collect())
    }

    async fn get_subregion(&self, id: Uuid) -> anyhow::Result<Option<Subregion>> {
        let row = sqlx::query_as::<_, SubregionRow>(
            "SELECT id, name, region_id FROM subregions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Subregion::from))
    }

    async fn update_subregion(&self, subregion: &Subregion) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE subregions SET name = ?, region_id = ? WHERE id = ?")
            .bind(&subregion.name)
            .bind(subregion.region_id)
            .bind(subregion.id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_subregion(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM subregions WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_subregion_by_name(
        &self,
        name: &str,
        region_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM subregions WHERE name = ? AND region_id = ?",
        )
        .bind(name)
        .bind(region_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(id)
    }

    async fn subregion_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM wines WHERE subregion_id = ?")
                .bind(id)
                .fetch_one(self.pool())
                .await?;
        Ok(count > 0)
    }

    async fn insert_classification(&self, classification: &Classification) -> anyhow::Result<()> {
        sqlx::query(
            "INSERT INTO classifications (id, name, country_id, region_id) VALUES (?, ?, ?, ?)",
        )
        .bind(classification.id)
        .bind(&classification.name)
        .bind(classification.country_id)
        .bind(classification.region_id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn list_classifications(
        &self,
        query: &ClassificationQuery,
    ) -> anyhow::Result<Vec<Classification>> {
        let page = PageQuery::new(query.skip, query.limit);
        let mut sql = String::from(
            "SELECT id, name, country_id, region_id FROM classifications WHERE 1=1",
        );
        if query.country_id.is_some() {
            sql.push_str(" AND country_id = ?");
        }
        if query.region_id.is_some() {
            sql.push_str(" AND region_id = ?");
        }
        sql.push_str(" ORDER BY name LIMIT ? OFFSET ?");

        let mut q = sqlx::query_as::<_, ClassificationRow>(&sql);
        if let Some(country_id) = query.country_id {
            q = q.bind(country_id);
        }
        if let Some(region_id) = query.region_id {
            q = q.bind(region_id);
        }
        let rows = q
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(Classification::from).collect())
    }

    async fn get_classification(&self, id: Uuid) -> anyhow::Result<Option<Classification>> {
        let row = sqlx::query_as::<_, ClassificationRow>(
            "SELECT id, name, country_id, region_id FROM classifications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(Classification::from))
    }

    async fn update_classification(
        &self,
        classification: &Classification,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE classifications SET name = ?, country_id = ?, region_id = ? WHERE id = ?",
        )
        .bind(&classification.name)
        .bind(classification.country_id)
        .bind(classification.region_id)
        .bind(classification.id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_classification(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM classifications WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_classification_by_scope(
        &self,
        name: &str,
        country_id: Option<Uuid>,
        region_id: Option<Uuid>,
    ) -> anyhow::Result<Option<Uuid>> {
        // IS compares NULL scope columns correctly where = would not.
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM classifications WHERE name = ? AND country_id IS ? AND region_id IS ?",
        )
        .bind(name)
        .bind(country_id)
        .bind(region_id)
        .fetch_optional(self.pool())
        .await?;
        Ok(id)
    }

    async fn classification_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM wines WHERE classification_id = ?")
                .bind(id)
                .fetch_one(self.pool())
                .await?;
        Ok(count > 0)
    }

    async fn insert_varietal(&self, varietal: &Varietal) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO varietals (id, name) VALUES (?, ?)")
            .bind(varietal.id)
            .bind(&varietal.name)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn list_varietals(&self, page: PageQuery) -> anyhow::Result<Vec<Varietal>> {
        let rows = sqlx::query_as::<_, VarietalRow>(
            "SELECT id, name FROM varietals ORDER BY name LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(Varietal::from).collect())
    }

    async fn get_varietal(&self, id: Uuid) -> anyhow::Result<Option<Varietal>> {
        let row = sqlx::query_as::<_, VarietalRow>("SELECT id, name FROM varietals WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(Varietal::from))
    }

    async fn update_varietal(&self, varietal: &Varietal) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE varietals SET name = ? WHERE id = ?")
            .bind(&varietal.name)
            .bind(varietal.id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_varietal(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM varietals WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_varietal_by_name(&self, name: &str) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM varietals WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(id)
    }

    async fn varietal_in_use(&self, id: Uuid) -> anyhow::Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM wine_varietals WHERE varietal_id = ?",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await?;
        Ok(count > 0)
    }
}
