// Scan-event log persistence
// Append assigns the seq surrogate; reads return rows in insertion order
// and leave "latest event" resolution to the domain service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use backend_domain::ports::ScanEventRepository;
use backend_domain::{NewScanEvent, PageQuery, ScanEvent};

use super::sqlite::SqliteStore;

#[derive(sqlx::FromRow)]
struct ScanEventRow {
    seq: i64,
    id: Uuid,
    wine_id: Uuid,
    slot_id: Uuid,
    direction: String,
    timestamp: DateTime<Utc>,
}

impl From<ScanEventRow> for ScanEvent {
    fn from(row: ScanEventRow) -> Self {
        ScanEvent {
            id: row.id,
            seq: row.seq,
            wine_id: row.wine_id,
            slot_id: row.slot_id,
            direction: row.direction.as_str().into(),
            timestamp: row.timestamp,
        }
    }
}

const EVENT_COLUMNS: &str = "seq, id, wine_id, slot_id, direction, timestamp";

#[async_trait]
impl ScanEventRepository for SqliteStore {
    async fn append_event(&self, event: &NewScanEvent) -> anyhow::Result<ScanEvent> {
        let id = Uuid::new_v4();
        let result = sqlx::query(
            "INSERT INTO scan_events (id, wine_id, slot_id, direction, timestamp) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(event.wine_id)
        .bind(event.slot_id)
        .bind(event.direction.as_str())
        .bind(event.timestamp)
        .execute(self.pool())
        .await?;
        Ok(ScanEvent {
            id,
            seq: result.last_insert_rowid(),
            wine_id: event.wine_id,
            slot_id: event.slot_id,
            direction: event.direction,
            timestamp: event.timestamp,
        })
    }

    async fn events_for_wine(&self, wine_id: Uuid) -> anyhow::Result<Vec<ScanEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM scan_events WHERE wine_id = ? ORDER BY seq"
        );
        let rows = sqlx::query_as::<_, ScanEventRow>(&sql)
            .bind(wine_id)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(ScanEvent::from).collect())
    }

    async fn events_for_slot(&self, slot_id: Uuid) -> anyhow::Result<Vec<ScanEvent>> {
        let sql = format!(
            "SELECT {EVENT_COLUMNS} FROM scan_events WHERE slot_id = ? ORDER BY seq"
        );
        let rows = sqlx::query_as::<_, ScanEventRow>(&sql)
            .bind(slot_id)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(ScanEvent::from).collect())
    }

    async fn all_events(&self) -> anyhow::Result<Vec<ScanEvent>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM scan_events ORDER BY seq");
        let rows = sqlx::query_as::<_, ScanEventRow>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(ScanEvent::from).collect())
    }

    async fn list_events(&self, page: PageQuery) -> anyhow::Result<Vec<ScanEvent>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM scan_events ORDER BY seq LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, ScanEventRow>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(ScanEvent::from).collect())
    }

    async fn get_event(&self, id: Uuid) -> anyhow::Result<Option<ScanEvent>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM scan_events WHERE id = ?");
        let row = sqlx::query_as::<_, ScanEventRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(ScanEvent::from))
    }

    async fn update_event(&self, event: &ScanEvent) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE scan_events SET wine_id = ?, slot_id = ?, direction = ?, timestamp = ? \
             WHERE id = ?",
        )
        .bind(event.wine_id)
        .bind(event.slot_id)
        .bind(event.direction.as_str())
        .bind(event.timestamp)
        .bind(event.id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_event(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM scan_events WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn slot_has_events(&self, slot_id: Uuid) -> anyhow::Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(1) FROM scan_events WHERE slot_id = ?",
        )
        .bind(slot_id)
        .fetch_one(self.pool())
        .await?;
        Ok(count > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }
}
