//! Hexagonal architecture ports

pub mod inbound;
pub mod outbound;

pub use inbound::EventEmissionApi;
pub use outbound::{EventSigner, EventStore, PeerSnapshot};
