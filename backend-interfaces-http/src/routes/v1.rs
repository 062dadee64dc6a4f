use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{
    admin_handlers, cellar_handlers, history_handlers, lookup_handlers, ops_handlers,
    wine_handlers,
};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/lookups/countries",
            post(lookup_handlers::create_country).get(lookup_handlers::list_countries),
        )
        .route(
            "/v1/lookups/countries/:id",
            get(lookup_handlers::get_country)
                .put(lookup_handlers::update_country)
                .delete(lookup_handlers::delete_country),
        )
        .route(
            "/v1/lookups/regions",
            post(lookup_handlers::create_region).get(lookup_handlers::list_regions),
        )
        .route(
            "/v1/lookups/regions/:id",
            get(lookup_handlers::get_region)
                .put(lookup_handlers::update_region)
                .delete(lookup_handlers::delete_region),
        )
        .route(
            "/v1/lookups/subregions",
            post(lookup_handlers::create_subregion).get(lookup_handlers::list_subregions),
        )
        .route(
            "/v1/lookups/subregions/:id",
            get(lookup_handlers::get_subregion)
                .put(lookup_handlers::update_subregion)
                .delete(lookup_handlers::delete_subregion),
        )
        .route(
            "/v1/lookups/classifications",
            post(lookup_handlers::create_classification)
                .get(lookup_handlers::list_classifications),
        )
        .route(
            "/v1/lookups/classifications/:id",
            get(lookup_handlers::get_classification)
                .put(lookup_handlers::update_classification)
                .delete(lookup_handlers::delete_classification),
        )
        .route(
            "/v1/lookups/varietals",
            post(lookup_handlers::create_varietal).get(lookup_handlers::list_varietals),
        )
        .route(
            "/v1/lookups/varietals/:id",
            get(lookup_handlers::get_varietal)
                .put(lookup_handlers::update_varietal)
                .delete(lookup_handlers::delete_varietal),
        )
        .route(
            "/v1/wines",
            post(wine_handlers::create_wine).get(wine_handlers::list_wines),
        )
        .route(
            "/v1/wines/:id",
            get(wine_handlers::get_wine)
                .put(wine_handlers::update_wine)
                .delete(wine_handlers::delete_wine),
        )
        .route(
            "/v1/purchases",
            post(history_handlers::create_purchase).get(history_handlers::list_purchases),
        )
        .route(
            "/v1/purchases/:id",
            get(history_handlers::get_purchase)
                .put(history_handlers::update_purchase)
                .delete(history_handlers::delete_purchase),
        )
        .route(
            "/v1/critic-scores",
            post(history_handlers::create_score).get(history_handlers::list_scores),
        )
        .route(
            "/v1/critic-scores/:id",
            get(history_handlers::get_score)
                .put(history_handlers::update_score)
                .delete(history_handlers::delete_score),
        )
        .route("/v1/metrics/:wine_id", get(history_handlers::get_metrics))
        .route(
            "/v1/metrics/:wine_id/recompute",
            post(history_handlers::recompute_metrics),
        )
        .route(
            "/v1/cellar/slots",
            post(cellar_handlers::create_slot).get(cellar_handlers::list_slots),
        )
        .route(
            "/v1/cellar/slots/:id",
            get(cellar_handlers::get_slot)
                .put(cellar_handlers::update_slot)
                .delete(cellar_handlers::delete_slot),
        )
        .route("/v1/cellar/locate-bottle", post(cellar_handlers::locate_bottle))
        .route("/v1/cellar/lookup-map", post(cellar_handlers::lookup_map))
        .route("/v1/cellar/free-slots", get(cellar_handlers::free_slot_map))
        .route("/v1/cellar/slot-in", post(cellar_handlers::slot_in))
        .route("/v1/cellar/slot-out", post(cellar_handlers::slot_out))
        .route(
            "/v1/admin/scan-events",
            post(admin_handlers::create_event).get(admin_handlers::list_events),
        )
        .route(
            "/v1/admin/scan-events/:id",
            get(admin_handlers::get_event)
                .put(admin_handlers::update_event)
                .delete(admin_handlers::delete_event),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
