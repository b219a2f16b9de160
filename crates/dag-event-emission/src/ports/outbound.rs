//! Outbound ports (driven side - SPI)

use crate::domain::{Event, EventHash, PeerId, UnsignedEvent};
use crate::error::Result;
use async_trait::async_trait;

/// Port: Event store tracking per-peer chains
///
/// Heights, hashes and bodies are separate lookups with no transactional
/// guarantee between them; callers treat a dangling entry as absent.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Latest known chain height of `peer` (0 if nothing recorded)
    async fn peer_height(&self, peer: &PeerId) -> Result<u64>;

    /// Hash of `peer`'s event at `height`
    async fn event_hash_at(&self, peer: &PeerId, height: u64) -> Result<Option<EventHash>>;

    /// Full event by hash
    async fn event_by_hash(&self, hash: &EventHash) -> Result<Option<Event>>;

    /// Persist a signed event and advance its creator's height
    async fn persist_event(&self, event: &Event) -> Result<()>;
}

/// Port: Snapshot of peers currently known to the node
#[async_trait]
pub trait PeerSnapshot: Send + Sync {
    /// Peer identities at this moment
    async fn snapshot(&self) -> Vec<PeerId>;
}

/// Port: Sign events with the node key
#[async_trait]
pub trait EventSigner: Send + Sync {
    /// Identity whose key this signer holds
    fn creator(&self) -> PeerId;

    /// Sign the canonical encoding of `event`
    async fn sign(&self, event: &UnsignedEvent) -> Result<Vec<u8>>;
}
