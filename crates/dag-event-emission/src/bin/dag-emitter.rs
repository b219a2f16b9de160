//! Standalone emitter node
//!
//! Runs the emission engine against an in-memory store with a generated
//! key. Useful for watching emission behaviour and tuning the interval.
//!
//! ```bash
//! RUST_LOG=debug DAG_EMIT_INTERVAL_MS=500 cargo run -p dag-event-emission --bin dag-emitter
//! ```
//!
//! Set `DAG_NODE_SEED` to a 32-byte hex seed for a stable identity.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use dag_event_emission::{
    Ed25519EventSigner, EmissionConfig, EmissionService, EventEmissionApi, InMemoryEventStore,
    StaticPeerSet,
};
use shared_crypto::Ed25519KeyPair;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let config = EmissionConfig::from_env();
    config.validate().context("invalid emission configuration")?;

    let keypair = match std::env::var("DAG_NODE_SEED") {
        Ok(seed) => Ed25519KeyPair::from_hex_seed(&seed).context("invalid DAG_NODE_SEED")?,
        Err(_) => Ed25519KeyPair::generate(),
    };

    let store = Arc::new(InMemoryEventStore::new());
    let service = Arc::new(
        EmissionService::new(
            config.clone(),
            store.clone(),
            Arc::new(StaticPeerSet::default()),
            Arc::new(Ed25519EventSigner::new(keypair)),
        )
        .context("failed to create emission service")?,
    );

    info!("===========================================");
    info!("  DAG Emitter Node");
    info!("  Creator: {}", service.creator());
    info!("  Interval: {:?}", config.emit_interval());
    info!("===========================================");

    service.start_emission();

    // Demo load: one transaction per half interval
    let feeder = {
        let service = Arc::clone(&service);
        let period = (config.emit_interval() / 2).max(Duration::from_millis(1));
        tokio::spawn(async move {
            let mut n: u64 = 0;
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                n += 1;
                service.submit_transaction(format!("demo-tx-{n}").into_bytes());
            }
        })
    };

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    feeder.abort();
    service.stop_emission().await;

    let status = service.status();
    info!(
        "Emitted {} events (last index {}, clock {}), {} transactions left in buffer, {} events stored",
        status.events_emitted,
        status.last_index,
        status.last_logical_clock,
        status.pending_transactions,
        store.len()
    );
    Ok(())
}
