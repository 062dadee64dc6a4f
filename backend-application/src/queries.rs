pub mod cellar_queries;
pub mod critic_score_queries;
pub mod lookup_queries;
pub mod metrics_queries;
pub mod purchase_queries;
pub mod scan_event_queries;
pub mod slot_queries;
pub mod wine_queries;
