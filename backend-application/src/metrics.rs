use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    slot_in: AtomicU64,
    slot_out: AtomicU64,
    slotting_conflicts: AtomicU64,
    notify_failures: AtomicU64,
}

impl Metrics {
    pub fn record_slot_in(&self) {
        self.slot_in.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_slot_out(&self) {
        self.slot_out.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_slotting_conflict(&self) {
        self.slotting_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notify_failure(&self) {
        self.notify_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let slot_in = self.slot_in.load(Ordering::Relaxed);
        let slot_out = self.slot_out.load(Ordering::Relaxed);
        let conflicts = self.slotting_conflicts.load(Ordering::Relaxed);
        let notify_failures = self.notify_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE cellar_slot_in_total counter\n\
cellar_slot_in_total {}\n\
# TYPE cellar_slot_out_total counter\n\
cellar_slot_out_total {}\n\
# TYPE cellar_slotting_conflicts_total counter\n\
cellar_slotting_conflicts_total {}\n\
# TYPE cellar_notify_failures_total counter\n\
cellar_notify_failures_total {}\n",
            slot_in, slot_out, conflicts, notify_failures
        )
    }
}
