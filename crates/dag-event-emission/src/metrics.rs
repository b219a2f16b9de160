//! Metrics collection for event emission

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for event emission
#[derive(Debug, Default)]
pub struct EmissionMetrics {
    /// Total events emitted
    pub events_emitted: AtomicU64,

    /// Total transactions included in emitted events
    pub transactions_included: AtomicU64,

    /// Total parents referenced by emitted events
    pub parents_referenced: AtomicU64,

    /// Candidates dropped during parent resolution
    pub parents_skipped: AtomicU64,

    /// Emissions aborted by the signer
    pub signing_failures: AtomicU64,

    /// Emissions aborted by the store (reads of the local chain or persist)
    pub store_failures: AtomicU64,

    /// Emissions aborted by an invariant check
    pub invariant_violations: AtomicU64,

    /// Transactions returned to the buffer after an aborted emission
    pub transactions_requeued: AtomicU64,
}

impl EmissionMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted event
    pub fn record_event_emitted(&self, tx_count: usize, parent_count: usize, skipped: usize) {
        self.events_emitted.fetch_add(1, Ordering::Relaxed);
        self.transactions_included
            .fetch_add(tx_count as u64, Ordering::Relaxed);
        self.parents_referenced
            .fetch_add(parent_count as u64, Ordering::Relaxed);
        self.parents_skipped
            .fetch_add(skipped as u64, Ordering::Relaxed);
    }

    /// Record a signer failure
    pub fn record_signing_failure(&self) {
        self.signing_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a store failure
    pub fn record_store_failure(&self) {
        self.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an invariant violation
    pub fn record_invariant_violation(&self) {
        self.invariant_violations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record transactions put back into the buffer
    pub fn record_requeued(&self, count: usize) {
        self.transactions_requeued
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get events emitted
    pub fn get_events_emitted(&self) -> u64 {
        self.events_emitted.load(Ordering::Relaxed)
    }

    /// Get average transactions per event
    pub fn get_avg_transactions_per_event(&self) -> f64 {
        let events = self.events_emitted.load(Ordering::Relaxed);
        if events == 0 {
            return 0.0;
        }
        self.transactions_included.load(Ordering::Relaxed) as f64 / events as f64
    }

    /// Get average parents per event
    pub fn get_avg_parents_per_event(&self) -> f64 {
        let events = self.events_emitted.load(Ordering::Relaxed);
        if events == 0 {
            return 0.0;
        }
        self.parents_referenced.load(Ordering::Relaxed) as f64 / events as f64
    }
}
