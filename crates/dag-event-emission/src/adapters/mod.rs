//! Adapters for the outbound ports

pub mod memory;
pub mod signer;

pub use memory::{InMemoryEventStore, StaticPeerSet};
pub use signer::Ed25519EventSigner;
