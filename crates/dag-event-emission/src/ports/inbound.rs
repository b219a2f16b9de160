//! Inbound ports (driving side - API)

use crate::domain::{EmissionStatus, Event};
use crate::error::Result;
use async_trait::async_trait;

/// Primary port: Event emission service
#[async_trait]
pub trait EventEmissionApi: Send + Sync {
    /// Queue a client transaction for the next event
    fn submit_transaction(&self, payload: Vec<u8>);

    /// Build, sign and persist one event now.
    ///
    /// Same pipeline the periodic loop runs; returns the persisted event.
    async fn emit_event(&self) -> Result<Event>;

    /// Start periodic emission. Returns `false` if it was already running.
    ///
    /// The loop is spawned onto the ambient tokio runtime, so this must be
    /// called from within one (it panics otherwise).
    fn start_emission(&self) -> bool;

    /// Stop periodic emission and wait for the loop to exit.
    ///
    /// Returns `false` if it was already stopped. Once this returns, no
    /// further automatic emission happens.
    async fn stop_emission(&self) -> bool;

    /// Current emitter status
    fn status(&self) -> EmissionStatus;
}
