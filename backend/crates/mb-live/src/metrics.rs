use metrics::{counter, gauge, histogram};

/// Metrics collector for membership transitions and live updates
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "mb_live" }
    }

    pub fn join_accepted(&self) {
        counter!(format!("{}.joins.accepted", self.prefix)).increment(1);
    }

    /// Record a refused join, keyed by error code
    pub fn join_rejected(&self, reason: &str) {
        counter!(format!("{}.joins.rejected", self.prefix)).increment(1);
        counter!(format!("{}.joins.rejected.{}", self.prefix, reason)).increment(1);
    }

    pub fn leave_accepted(&self) {
        counter!(format!("{}.leaves.accepted", self.prefix)).increment(1);
    }

    pub fn leave_rejected(&self, reason: &str) {
        counter!(format!("{}.leaves.rejected", self.prefix)).increment(1);
        counter!(format!("{}.leaves.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record a tracker decision undone after a durable write failed
    pub fn compensation(&self, operation: &str) {
        counter!(format!("{}.compensations", self.prefix)).increment(1);
        counter!(format!("{}.compensations.{}", self.prefix, operation)).increment(1);
    }

    /// Record a room dropped from the tracker to be rebuilt from storage
    pub fn tracker_evicted(&self) {
        counter!(format!("{}.tracker.evictions", self.prefix)).increment(1);
    }

    pub fn rooms_tracked(&self, count: usize) {
        gauge!(format!("{}.tracker.rooms", self.prefix)).set(count as f64);
    }

    pub fn event_published(&self, subscriber_count: usize) {
        counter!(format!("{}.events.published", self.prefix)).increment(1);
        gauge!(format!("{}.events.subscribers", self.prefix)).set(subscriber_count as f64);
    }

    pub fn subscriber_lagged(&self, missed: u64) {
        counter!(format!("{}.events.skipped", self.prefix)).increment(missed);
    }

    pub fn subscription_changed(&self, action: &str) {
        counter!(format!("{}.subscriptions.{}", self.prefix, action)).increment(1);
    }

    /// Record how long one deadline-bounded store call took
    pub fn store_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.store.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
