//! # DAG Node - Event Emission Engine
//!
//! **Bounded Context:** Event Authoring
//! **Architecture:** DDD + Hexagonal + EDA
//!
//! ## Purpose
//!
//! Periodically turns buffered client transactions into a new event
//! authored by the local node:
//! - Drains the transaction buffer
//! - Picks parents: the node's own chain tip plus the tips of up to K-1 ranked peers
//! - Stamps a Lamport clock one past the highest parent clock
//! - Signs, persists, and announces the event
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - In-memory event store, static peer set           │
//! │  - Ed25519 signer                                   │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: EventEmissionApi                        │
//! │  - Outbound: EventStore, PeerSnapshot, EventSigner  │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Service                                            │
//! │  - ParentResolver, EventEmitter, EmissionScheduler  │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - Event, TransactionBuffer, RankingPolicy          │
//! │  - ResolvedParents, invariants                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Index continuity**: per creator, indices run 1, 2, 3, ... without gaps
//! 2. **Clock monotonicity**: clock = 1 + max(parent clocks)
//! 3. **Signed before stored**: nothing unsigned reaches the store
//! 4. **Exactly-once transactions**: every submitted payload lands in one event
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let service = EmissionService::new(
//!     EmissionConfig::from_env(),
//!     Arc::new(InMemoryEventStore::new()),
//!     Arc::new(StaticPeerSet::default()),
//!     Arc::new(Ed25519EventSigner::generate()),
//! )?;
//! service.submit_transaction(b"payload".to_vec());
//! service.start_emission();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// In-process adapters for the outbound ports
pub mod adapters;
/// Domain models and pure logic
pub mod domain;
/// Published notifications
pub mod events;
pub mod ports;
pub mod service;

mod config;
mod error;
mod metrics;

pub use config::EmissionConfig;
pub use error::{EmissionError, Result};
pub use metrics::EmissionMetrics;

pub use domain::{
    EmissionState, EmissionStatus, Event, EventHash, LogicalClock, PeerChainTip, PeerId,
    RankingPolicy, TransactionBuffer, UnsignedEvent,
};

pub use ports::{EventEmissionApi, EventSigner, EventStore, PeerSnapshot};

pub use events::EventEmitted;

pub use adapters::{Ed25519EventSigner, InMemoryEventStore, StaticPeerSet};

pub use service::{EmissionScheduler, EmissionService, EventEmitter, ParentResolver};

/// Default interval between emission ticks (1 second)
pub const DEFAULT_EMIT_INTERVAL_MS: u64 = 1_000;

/// Default fan-in width K (self-parent plus two peers)
pub const DEFAULT_EVENT_PARENTS_COUNT: usize = 3;

/// Default notification channel capacity
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 256;
