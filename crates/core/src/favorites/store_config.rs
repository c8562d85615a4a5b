use std::time::Duration;

use crate::constants::DEFAULT_MAILBOX_CAPACITY;

/// Tuning for the in-memory favorite store worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Fixed delay applied before every operation, simulating a storage round trip.
    pub latency: Duration,
    /// Bound of the worker's job queue.
    pub mailbox_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency: Duration::ZERO,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl StoreConfig {
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }
}
