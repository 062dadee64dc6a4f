use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// The embedded relational store. One struct implements every repository
/// port; the trait impls live in the sibling modules, grouped by
/// aggregate.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS countries (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS regions (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    country_id BLOB NOT NULL REFERENCES countries(id),
    UNIQUE (name, country_id)
);

CREATE TABLE IF NOT EXISTS subregions (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    region_id BLOB NOT NULL REFERENCES regions(id),
    UNIQUE (name, region_id)
);

CREATE TABLE IF NOT EXISTS classifications (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    country_id BLOB REFERENCES countries(id),
    region_id BLOB REFERENCES regions(id),
    UNIQUE (name, country_id, region_id)
);

CREATE TABLE IF NOT EXISTS varietals (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS wines (
    id BLOB PRIMARY KEY,
    producer TEXT NOT NULL,
    label TEXT NOT NULL,
    vintage INTEGER NOT NULL,
    country_id BLOB NOT NULL REFERENCES countries(id),
    region_id BLOB NOT NULL REFERENCES regions(id),
    subregion_id BLOB NOT NULL REFERENCES subregions(id),
    classification_id BLOB REFERENCES classifications(id),
    bottle_size TEXT NOT NULL,
    closure_type TEXT NOT NULL,
    abv REAL,
    UNIQUE (producer, label, vintage, bottle_size)
);

CREATE TABLE IF NOT EXISTS wine_varietals (
    wine_id BLOB NOT NULL REFERENCES wines(id),
    varietal_id BLOB NOT NULL REFERENCES varietals(id),
    blend_pct REAL NOT NULL,
    PRIMARY KEY (wine_id, varietal_id)
);

CREATE TABLE IF NOT EXISTS purchases (
    id BLOB PRIMARY KEY,
    wine_id BLOB NOT NULL REFERENCES wines(id),
    purchase_date TEXT NOT NULL,
    price_amount REAL NOT NULL,
    price_currency TEXT NOT NULL,
    receipt_url TEXT
);

CREATE TABLE IF NOT EXISTS critic_scores (
    id BLOB PRIMARY KEY,
    wine_id BLOB NOT NULL REFERENCES wines(id),
    source TEXT NOT NULL,
    score REAL NOT NULL,
    review_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS wine_metrics (
    wine_id BLOB PRIMARY KEY REFERENCES wines(id),
    avg_score REAL NOT NULL,
    review_count INTEGER NOT NULL,
    current_market REAL,
    rarity_score REAL,
    qpr REAL
);

CREATE TABLE IF NOT EXISTS cellar_slots (
    id BLOB PRIMARY KEY,
    rack INTEGER NOT NULL,
    row TEXT NOT NULL,
    led_node_id TEXT NOT NULL,
    UNIQUE (rack, row)
);

CREATE TABLE IF NOT EXISTS scan_events (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id BLOB NOT NULL UNIQUE,
    wine_id BLOB NOT NULL REFERENCES wines(id),
    slot_id BLOB NOT NULL REFERENCES cellar_slots(id),
    direction TEXT NOT NULL CHECK (direction IN ('IN', 'OUT')),
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scan_events_wine ON scan_events(wine_id);
CREATE INDEX IF NOT EXISTS idx_scan_events_slot ON scan_events(slot_id);
"#;

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
