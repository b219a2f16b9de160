//! In-memory adapters
//!
//! Event store and peer set for tests, the demo binary, and single-process
//! setups. The store keeps the same three indexes a persistent backend
//! would (height per peer, hash per height, body per hash) so inconsistent
//! states can be reproduced by editing one index without the others.

use crate::domain::{Event, EventHash, PeerId};
use crate::error::Result;
use crate::ports::{EventStore, PeerSnapshot};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
struct StoreIndexes {
    heights: HashMap<PeerId, u64>,
    hashes: HashMap<(PeerId, u64), EventHash>,
    events: HashMap<EventHash, Event>,
}

/// Event store held in process memory.
#[derive(Default)]
pub struct InMemoryEventStore {
    inner: RwLock<StoreIndexes>,
}

impl InMemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event authored by anyone, advancing its creator's height.
    pub fn insert(&self, event: Event) -> EventHash {
        let hash = event.hash();
        let creator = event.creator();
        let index = event.index();

        let mut inner = self.inner.write();
        inner.hashes.insert((creator, index), hash);
        inner.events.insert(hash, event);
        let height = inner.heights.entry(creator).or_insert(0);
        *height = (*height).max(index);
        hash
    }

    /// Drop an event body while leaving its height and hash entries behind.
    pub fn forget_event(&self, hash: &EventHash) -> Option<Event> {
        self.inner.write().events.remove(hash)
    }

    /// Drop the hash entry at `(peer, height)`.
    pub fn forget_hash(&self, peer: &PeerId, height: u64) -> Option<EventHash> {
        self.inner.write().hashes.remove(&(*peer, height))
    }

    /// Overwrite a peer's recorded height.
    pub fn set_height(&self, peer: PeerId, height: u64) {
        self.inner.write().heights.insert(peer, height);
    }

    /// Events authored by `peer`, ordered by index.
    pub fn events_by(&self, peer: &PeerId) -> Vec<Event> {
        let inner = self.inner.read();
        let mut events: Vec<Event> = inner
            .events
            .values()
            .filter(|e| e.creator() == *peer)
            .cloned()
            .collect();
        events.sort_by_key(Event::index);
        events
    }

    /// Total number of stored event bodies.
    pub fn len(&self) -> usize {
        self.inner.read().events.len()
    }

    /// Whether no event bodies are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.read().events.is_empty()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn peer_height(&self, peer: &PeerId) -> Result<u64> {
        Ok(self.inner.read().heights.get(peer).copied().unwrap_or(0))
    }

    async fn event_hash_at(&self, peer: &PeerId, height: u64) -> Result<Option<EventHash>> {
        Ok(self.inner.read().hashes.get(&(*peer, height)).copied())
    }

    async fn event_by_hash(&self, hash: &EventHash) -> Result<Option<Event>> {
        Ok(self.inner.read().events.get(hash).cloned())
    }

    async fn persist_event(&self, event: &Event) -> Result<()> {
        self.insert(event.clone());
        Ok(())
    }
}

/// Fixed, mutable set of known peers.
#[derive(Default)]
pub struct StaticPeerSet {
    peers: RwLock<Vec<PeerId>>,
}

impl StaticPeerSet {
    /// Create from an initial list.
    pub fn new(peers: Vec<PeerId>) -> Self {
        Self {
            peers: RwLock::new(peers),
        }
    }

    /// Add a peer if not already known.
    pub fn add(&self, peer: PeerId) {
        let mut peers = self.peers.write();
        if !peers.contains(&peer) {
            peers.push(peer);
        }
    }

    /// Forget a peer.
    pub fn remove(&self, peer: &PeerId) {
        self.peers.write().retain(|p| p != peer);
    }
}

#[async_trait]
impl PeerSnapshot for StaticPeerSet {
    async fn snapshot(&self) -> Vec<PeerId> {
        self.peers.read().clone()
    }
}
