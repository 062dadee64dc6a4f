use async_trait::async_trait;
use uuid::Uuid;

use backend_domain::ports::SlotRepository;
use backend_domain::{CellarSlot, PageQuery};

use super::sqlite::SqliteStore;

#[derive(sqlx::FromRow)]
struct CellarSlotRow {
    id: Uuid,
    rack: i32,
    row: String,
    led_node_id: String,
}

impl From<CellarSlotRow> for CellarSlot {
    fn from(row: CellarSlotRow) -> Self {
        CellarSlot {
            id: row.id,
            rack: row.rack,
            row: row.row,
            led_node_id: row.led_node_id,
        }
    }
}

#[async_trait]
impl SlotRepository for SqliteStore {
    async fn insert_slot(&self, slot: &CellarSlot) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO cellar_slots (id, rack, row, led_node_id) VALUES (?, ?, ?, ?)")
            .bind(slot.id)
            .bind(slot.rack)
            .bind(&slot.row)
            .bind(&slot.led_node_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn list_slots(&self, page: PageQuery) -> anyhow::Result<Vec<CellarSlot>> {
        let rows = sqlx::query_as::<_, CellarSlotRow>(
            "SELECT id, rack, row, led_node_id FROM cellar_slots ORDER BY rack, row \
             LIMIT ? OFFSET ?",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(CellarSlot::from).collect())
    }

    async fn all_slots(&self) -> anyhow::Result<Vec<CellarSlot>> {
        let rows = sqlx::query_as::<_, CellarSlotRow>(
            "SELECT id, rack, row, led_node_id FROM cellar_slots ORDER BY rack, row",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(CellarSlot::from).collect())
    }

    async fn get_slot(&self, id: Uuid) -> anyhow::Result<Option<CellarSlot>> {
        let row = sqlx::query_as::<_, CellarSlotRow>(
            "SELECT id, rack, row, led_node_id FROM cellar_slots WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(CellarSlot::from))
    }

    async fn update_slot(&self, slot: &CellarSlot) -> anyhow::Result<bool> {
        let result =
            sqlx::query("UPDATE cellar_slots SET rack = ?, row = ?, led_node_id = ? WHERE id = ?")
                .bind(slot.rack)
                .bind(&slot.row)
                .bind(&slot.led_node_id)
                .bind(slot.id)
                .execute(self.pool())
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_slot(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM cellar_slots WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_slot_by_position(&self, rack: i32, row: &str) -> anyhow::Result<Option<Uuid>> {
        let id =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM cellar_slots WHERE rack = ? AND row = ?")
                .bind(rack)
                .bind(row)
                .fetch_optional(self.pool())
                .await?;
        Ok(id)
    }
}
