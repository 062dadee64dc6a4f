// Integration tests for the sqlite store against an in-memory database

use std::str::FromStr;

use chrono::{TimeZone, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use backend_domain::ports::{
    CriticScoreRepository, LookupRepository, MetricsRepository, ScanEventRepository,
    SlotRepository, WineRepository,
};
use backend_domain::{
    BottleSize, CellarSlot, ClosureType, Country, CriticScore, NewScanEvent, PageQuery, Region,
    ScanDirection, Subregion, Varietal, VarietalShare, Wine, WineFilter,
};
use backend_infrastructure::SqliteStore;

async fn store() -> SqliteStore {
    // A single connection keeps every test statement on the same
    // in-memory database.
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse options")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect");
    let store = SqliteStore::new(pool);
    store.ensure_schema().await.expect("schema");
    store
}

async fn seed_wine(store: &SqliteStore) -> Wine {
    let country = Country {
        id: Uuid::new_v4(),
        name: format!("country-{}", Uuid::new_v4()),
    };
    store.insert_country(&country).await.expect("country");
    let region = Region {
        id: Uuid::new_v4(),
        name: "Bordeaux".to_string(),
        country_id: country.id,
    };
    store.insert_region(&region).await.expect("region");
    let subregion = Subregion {
        id: Uuid::new_v4(),
        name: "Margaux".to_string(),
        region_id: region.id,
    };
    store.insert_subregion(&subregion).await.expect("subregion");

    let wine = Wine {
        id: Uuid::new_v4(),
        producer: format!("producer-{}", Uuid::new_v4()),
        label: "Grand Vin".to_string(),
        vintage: 2015,
        country_id: country.id,
        region_id: region.id,
        subregion_id: subregion.id,
        classification_id: None,
        bottle_size: BottleSize::Standard,
        closure_type: ClosureType::Cork,
        abv: Some(13.5),
    };
    store.insert_wine(&wine).await.expect("wine");
    wine
}

async fn seed_slot(store: &SqliteStore, rack: i32, row: &str) -> CellarSlot {
    let slot = CellarSlot {
        id: Uuid::new_v4(),
        rack,
        row: row.to_string(),
        led_node_id: format!("led-{rack}-{row}"),
    };
    store.insert_slot(&slot).await.expect("slot");
    slot
}

#[tokio::test]
async fn schema_creation_is_idempotent_and_store_pings() {
    let store = store().await;
    store.ensure_schema().await.expect("second run");
    store.ping().await.expect("ping");
}

#[tokio::test]
async fn country_round_trip_and_unique_name() {
    let store = store().await;
    let country = Country {
        id: Uuid::new_v4(),
        name: "France".to_string(),
    };
    store.insert_country(&country).await.expect("insert");

    let loaded = store
        .get_country(country.id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(loaded.name, "France");
    assert_eq!(
        store.find_country_by_name("France").await.expect("find"),
        Some(country.id)
    );

    let duplicate = Country {
        id: Uuid::new_v4(),
        name: "France".to_string(),
    };
    assert!(store.insert_country(&duplicate).await.is_err());
}

#[tokio::test]
async fn wine_insert_enforces_foreign_keys() {
    let store = store().await;
    let orphan = Wine {
        id: Uuid::new_v4(),
        producer: "Nobody".to_string(),
        label: "Nothing".to_string(),
        vintage: 2020,
        country_id: Uuid::new_v4(),
        region_id: Uuid::new_v4(),
        subregion_id: Uuid::new_v4(),
        classification_id: None,
        bottle_size: BottleSize::Standard,
        closure_type: ClosureType::Cork,
        abv: None,
    };
    assert!(store.insert_wine(&orphan).await.is_err());
}

#[tokio::test]
async fn wine_round_trips_enum_columns() {
    let store = store().await;
    let mut wine = seed_wine(&store).await;
    wine.bottle_size = BottleSize::Magnum;
    wine.closure_type = ClosureType::ScrewCap;
    store.update_wine(&wine).await.expect("update");

    let loaded = store
        .get_wine(wine.id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(loaded.bottle_size, BottleSize::Magnum);
    assert_eq!(loaded.closure_type, ClosureType::ScrewCap);
    assert_eq!(loaded.abv, Some(13.5));
}

#[tokio::test]
async fn append_assigns_monotone_seq() {
    let store = store().await;
    let wine = seed_wine(&store).await;
    let slot = seed_slot(&store, 1, "A").await;

    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let first = store
        .append_event(&NewScanEvent {
            wine_id: wine.id,
            slot_id: slot.id,
            direction: ScanDirection::IN,
            timestamp: at,
        })
        .await
        .expect("append");
    let second = store
        .append_event(&NewScanEvent {
            wine_id: wine.id,
            slot_id: slot.id,
            direction: ScanDirection::OUT,
            timestamp: at,
        })
        .await
        .expect("append");
    assert!(second.seq > first.seq);

    let events = store.events_for_wine(wine.id).await.expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].seq, first.seq);
    assert_eq!(events[0].direction, ScanDirection::IN);
    assert_eq!(events[1].direction, ScanDirection::OUT);
    assert_eq!(events[0].timestamp, at);

    let loaded = store
        .get_event(first.id)
        .await
        .expect("get")
        .expect("present");
    assert_eq!(loaded.seq, first.seq);
    assert_eq!(loaded.slot_id, slot.id);
}

#[tokio::test]
async fn event_rejects_unknown_wine_or_slot() {
    let store = store().await;
    let wine = seed_wine(&store).await;
    let slot = seed_slot(&store, 1, "A").await;
    let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let bad_wine = NewScanEvent {
        wine_id: Uuid::new_v4(),
        slot_id: slot.id,
        direction: ScanDirection::IN,
        timestamp: at,
    };
    assert!(store.append_event(&bad_wine).await.is_err());

    let bad_slot = NewScanEvent {
        wine_id: wine.id,
        slot_id: Uuid::new_v4(),
        direction: ScanDirection::IN,
        timestamp: at,
    };
    assert!(store.append_event(&bad_slot).await.is_err());
}

#[tokio::test]
async fn slot_position_is_unique() {
    let store = store().await;
    let slot = seed_slot(&store, 3, "C").await;
    assert_eq!(
        store.find_slot_by_position(3, "C").await.expect("find"),
        Some(slot.id)
    );

    let duplicate = CellarSlot {
        id: Uuid::new_v4(),
        rack: 3,
        row: "C".to_string(),
        led_node_id: "led-dup".to_string(),
    };
    assert!(store.insert_slot(&duplicate).await.is_err());
}

#[tokio::test]
async fn slot_history_tracking() {
    let store = store().await;
    let wine = seed_wine(&store).await;
    let slot = seed_slot(&store, 1, "A").await;
    let empty = seed_slot(&store, 1, "B").await;

    store
        .append_event(&NewScanEvent {
            wine_id: wine.id,
            slot_id: slot.id,
            direction: ScanDirection::IN,
            timestamp: Utc::now(),
        })
        .await
        .expect("append");

    assert!(store.slot_has_events(slot.id).await.expect("has events"));
    assert!(!store.slot_has_events(empty.id).await.expect("no events"));
}

#[tokio::test]
async fn varietal_shares_replace_and_filter() {
    let store = store().await;
    let wine = seed_wine(&store).await;
    let other = seed_wine(&store).await;

    let merlot = Varietal {
        id: Uuid::new_v4(),
        name: "Merlot".to_string(),
    };
    let cabernet = Varietal {
        id: Uuid::new_v4(),
        name: "Cabernet Sauvignon".to_string(),
    };
    store.insert_varietal(&merlot).await.expect("varietal");
    store.insert_varietal(&cabernet).await.expect("varietal");

    store
        .replace_varietals(
            wine.id,
            &[
                VarietalShare {
                    varietal_id: merlot.id,
                    blend_pct: 60.0,
                },
                VarietalShare {
                    varietal_id: cabernet.id,
                    blend_pct: 40.0,
                },
            ],
        )
        .await
        .expect("replace");

    let shares = store.varietals_of(wine.id).await.expect("shares");
    assert_eq!(shares.len(), 2);

    // Conjunctive filter: varietal restricts, empty filter matches all.
    let filter = WineFilter {
        varietal_id: Some(merlot.id),
        ..WineFilter::default()
    };
    let ids = store.filter_wine_ids(&filter).await.expect("filter");
    assert_eq!(ids, vec![wine.id]);

    let all = store
        .filter_wine_ids(&WineFilter::default())
        .await
        .expect("filter");
    assert!(all.contains(&wine.id));
    assert!(all.contains(&other.id));

    let filter = WineFilter {
        country_id: Some(wine.country_id),
        varietal_id: Some(merlot.id),
        ..WineFilter::default()
    };
    assert_eq!(store.filter_wine_ids(&filter).await.expect("filter"), vec![wine.id]);

    let filter = WineFilter {
        country_id: Some(other.country_id),
        varietal_id: Some(merlot.id),
        ..WineFilter::default()
    };
    assert!(store.filter_wine_ids(&filter).await.expect("filter").is_empty());
}

#[tokio::test]
async fn metrics_upsert_preserves_placeholders() {
    let store = store().await;
    let wine = seed_wine(&store).await;

    let metrics = store
        .upsert_metrics(wine.id, 94.5, 2)
        .await
        .expect("upsert");
    assert_eq!(metrics.review_count, 2);
    assert!(metrics.current_market.is_none());

    sqlx::query("UPDATE wine_metrics SET current_market = ? WHERE wine_id = ?")
        .bind(120.0_f64)
        .bind(wine.id)
        .execute(store.pool())
        .await
        .expect("set placeholder");

    let metrics = store
        .upsert_metrics(wine.id, 95.0, 3)
        .await
        .expect("upsert again");
    assert_eq!(metrics.review_count, 3);
    assert_eq!(metrics.current_market, Some(120.0));
}

#[tokio::test]
async fn scores_list_filters_by_wine() {
    let store = store().await;
    let wine = seed_wine(&store).await;
    let other = seed_wine(&store).await;

    for (target, score) in [(&wine, 95.0), (&wine, 93.0), (&other, 88.0)] {
        store
            .insert_score(&CriticScore {
                id: Uuid::new_v4(),
                wine_id: target.id,
                source: "WA".to_string(),
                score,
                review_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            })
            .await
            .expect("insert score");
    }

    let scores = store.scores_for_wine(wine.id).await.expect("scores");
    assert_eq!(scores.len(), 2);

    let page = PageQuery::default();
    let all = store.list_wines(page).await.expect("wines");
    assert!(all.len() >= 2);
}
