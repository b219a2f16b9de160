//! Emission pipeline
//!
//! drain buffer → resolve parents → build → check invariants → sign →
//! persist → notify.
//!
//! The buffer lock is held only for the drain. The rest of the pipeline runs
//! under a separate per-node async guard, so at most one emission is in
//! flight while submissions keep flowing. Any failure after the drain puts
//! the drained transactions back at the front of the buffer.

use crate::config::EmissionConfig;
use crate::domain::{invariants, EmissionState, EmissionStatus, Event, PeerId, TransactionBuffer};
use crate::error::{EmissionError, Result};
use crate::events::EventEmitted;
use crate::metrics::EmissionMetrics;
use crate::ports::{EventSigner, EventStore, PeerSnapshot};
use crate::service::resolver::ParentResolver;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info};

/// Builds, signs and persists events for one node identity.
pub struct EventEmitter {
    creator: PeerId,
    buffer: TransactionBuffer,
    resolver: ParentResolver,
    store: Arc<dyn EventStore>,
    signer: Arc<dyn EventSigner>,
    metrics: EmissionMetrics,
    /// Serializes emissions for this identity
    emission_guard: Mutex<()>,
    last_index: AtomicU64,
    last_logical_clock: AtomicU64,
    notifications: broadcast::Sender<EventEmitted>,
}

impl EventEmitter {
    /// Create an emitter. The creator identity comes from the signer.
    pub fn new(
        config: &EmissionConfig,
        store: Arc<dyn EventStore>,
        peers: Arc<dyn PeerSnapshot>,
        signer: Arc<dyn EventSigner>,
    ) -> Result<Self> {
        config.validate()?;

        let creator = signer.creator();
        let resolver = ParentResolver::new(
            creator,
            Arc::clone(&store),
            peers,
            config.ranking_policy,
            config.event_parents_count,
        );
        let (notifications, _) = broadcast::channel(config.event_channel_capacity);

        info!("[dag-emit] Initializing event emitter for {}", creator);
        info!("  Fan-in width: {}", config.event_parents_count);
        info!("  Ranking policy: {:?}", config.ranking_policy);

        Ok(Self {
            creator,
            buffer: TransactionBuffer::new(),
            resolver,
            store,
            signer,
            metrics: EmissionMetrics::new(),
            emission_guard: Mutex::new(()),
            last_index: AtomicU64::new(0),
            last_logical_clock: AtomicU64::new(0),
            notifications,
        })
    }

    /// Identity events are authored under.
    pub fn creator(&self) -> PeerId {
        self.creator
    }

    /// Queue a transaction for the next event.
    pub fn submit_transaction(&self, payload: Vec<u8>) {
        self.buffer.submit(payload);
    }

    /// Number of transactions waiting for the next event.
    pub fn pending_transactions(&self) -> usize {
        self.buffer.len()
    }

    /// Emission counters.
    pub fn metrics(&self) -> &EmissionMetrics {
        &self.metrics
    }

    /// Subscribe to notifications for every persisted event.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEmitted> {
        self.notifications.subscribe()
    }

    /// Status with the given scheduler state filled in.
    pub fn status(&self, state: EmissionState) -> EmissionStatus {
        EmissionStatus {
            state,
            events_emitted: self.metrics.get_events_emitted(),
            last_index: self.last_index.load(Ordering::Acquire),
            last_logical_clock: self.last_logical_clock.load(Ordering::Acquire),
            pending_transactions: self.buffer.len(),
        }
    }

    /// Run the pipeline once and return the persisted event.
    pub async fn emit_event(&self) -> Result<Event> {
        let _guard = self.emission_guard.lock().await;

        let transactions = self.buffer.drain();

        let resolved = match self.resolver.resolve().await {
            Ok(resolved) => resolved,
            Err(e) => {
                self.record_failure(&e);
                self.restore(transactions, &e);
                return Err(e);
            }
        };

        let logical_clock = match resolved.logical_clock() {
            Ok(clock) => clock,
            Err(e) => {
                self.record_failure(&e);
                self.restore(transactions, &e);
                return Err(e);
            }
        };

        let previous_height = resolved.previous_height;
        let max_parent_clock = resolved.max_parent_clock;
        let skipped = resolved.skipped.len();
        let unsigned = resolved.into_unsigned(self.creator, logical_clock, transactions);

        if let Err(e) = invariants::check_all(
            &unsigned,
            previous_height,
            self.last_index.load(Ordering::Acquire),
            max_parent_clock,
        ) {
            self.metrics.record_invariant_violation();
            self.restore(unsigned.external_transactions, &e);
            return Err(e);
        }

        let signature = match self.signer.sign(&unsigned).await {
            Ok(signature) => signature,
            Err(e) => {
                let e = match e {
                    EmissionError::SigningFailed(_) => e,
                    other => EmissionError::SigningFailed(other.to_string()),
                };
                self.metrics.record_signing_failure();
                self.restore(unsigned.external_transactions, &e);
                return Err(e);
            }
        };
        let event = unsigned.into_signed(signature);

        if let Err(e) = self.store.persist_event(&event).await {
            self.metrics.record_store_failure();
            let (unsigned, _) = event.into_unsigned();
            self.restore(unsigned.external_transactions, &e);
            return Err(e);
        }

        self.last_index.store(event.index(), Ordering::Release);
        self.last_logical_clock
            .store(event.logical_clock(), Ordering::Release);
        self.metrics.record_event_emitted(
            event.external_transactions().len(),
            event.parents().len(),
            skipped,
        );

        let hash = event.hash();
        info!(
            "[dag-emit] Event #{} emitted | hash: {} | clock: {} | parents: {} | txs: {}",
            event.index(),
            hash,
            event.logical_clock(),
            event.parents().len(),
            event.external_transactions().len()
        );

        let notification = EventEmitted::new(Arc::new(event.clone()), hash);
        debug!("{}", notification.to_log_json());
        // No subscribers is fine: gossip may not be wired up.
        let _ = self.notifications.send(notification);

        Ok(event)
    }

    fn record_failure(&self, cause: &EmissionError) {
        match cause {
            EmissionError::InvariantViolation { .. } => self.metrics.record_invariant_violation(),
            EmissionError::SigningFailed(_) => self.metrics.record_signing_failure(),
            _ => self.metrics.record_store_failure(),
        }
    }

    fn restore(&self, transactions: Vec<Vec<u8>>, cause: &EmissionError) {
        let count = transactions.len();
        self.buffer.requeue(transactions);
        self.metrics.record_requeued(count);
        error!(
            "[dag-emit] Emission aborted: {} ({} transactions re-queued)",
            cause, count
        );
    }
}
