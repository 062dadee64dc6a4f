pub mod critic_score_commands;
pub mod lookup_commands;
pub mod metrics_commands;
pub mod purchase_commands;
pub mod scan_event_commands;
pub mod slot_commands;
pub mod slotting_commands;
pub mod wine_commands;
