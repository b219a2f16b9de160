//! Event Emission Service
//!
//! [`EmissionService`] is the node-facing entry point: it owns the emitter
//! pipeline and the scheduler that drives it, and implements
//! [`EventEmissionApi`].

pub mod emitter;
pub mod resolver;
pub mod scheduler;

pub use emitter::EventEmitter;
pub use resolver::ParentResolver;
pub use scheduler::EmissionScheduler;

use crate::config::EmissionConfig;
use crate::domain::{EmissionStatus, Event, PeerId};
use crate::error::Result;
use crate::events::EventEmitted;
use crate::metrics::EmissionMetrics;
use crate::ports::{EventEmissionApi, EventSigner, EventStore, PeerSnapshot};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event emission for one node identity.
pub struct EmissionService {
    emitter: Arc<EventEmitter>,
    scheduler: EmissionScheduler,
}

impl EmissionService {
    /// Create a stopped service. Fails on invalid configuration.
    pub fn new(
        config: EmissionConfig,
        store: Arc<dyn EventStore>,
        peers: Arc<dyn PeerSnapshot>,
        signer: Arc<dyn EventSigner>,
    ) -> Result<Self> {
        let emitter = Arc::new(EventEmitter::new(&config, store, peers, signer)?);
        Ok(Self {
            emitter,
            scheduler: EmissionScheduler::new(config.emit_interval()),
        })
    }

    /// Identity events are authored under.
    pub fn creator(&self) -> PeerId {
        self.emitter.creator()
    }

    /// Emission counters.
    pub fn metrics(&self) -> &EmissionMetrics {
        self.emitter.metrics()
    }

    /// Subscribe to notifications for every persisted event.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEmitted> {
        self.emitter.subscribe()
    }
}

#[async_trait]
impl EventEmissionApi for EmissionService {
    fn submit_transaction(&self, payload: Vec<u8>) {
        self.emitter.submit_transaction(payload);
    }

    async fn emit_event(&self) -> Result<Event> {
        self.emitter.emit_event().await
    }

    fn start_emission(&self) -> bool {
        self.scheduler.start(Arc::clone(&self.emitter))
    }

    async fn stop_emission(&self) -> bool {
        self.scheduler.stop().await
    }

    fn status(&self) -> EmissionStatus {
        self.emitter.status(self.scheduler.state())
    }
}
