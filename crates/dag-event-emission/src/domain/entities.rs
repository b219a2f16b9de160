//! Domain entities for event emission
//!
//! An event goes through two shapes: [`UnsignedEvent`] while it is being
//! assembled, and [`Event`] once a signature is attached. `Event` has no
//! public constructor that skips the signature and its fields are read-only.

use serde::{Deserialize, Serialize};
use shared_crypto::{domain_hash, CryptoError, Ed25519PublicKey};
use std::collections::BTreeSet;
use std::fmt;

/// Lamport-style logical clock value.
pub type LogicalClock = u64;

/// Context string for event identity hashing.
const EVENT_HASH_CONTEXT: &str = "dag-event-emission 2024 event identity v1";

/// Identity of a node on the DAG (its Ed25519 public key bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(pub [u8; 32]);

impl PeerId {
    /// Raw identity bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<Ed25519PublicKey> for PeerId {
    fn from(key: Ed25519PublicKey) -> Self {
        Self(*key.as_bytes())
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..6]))
    }
}

impl fmt::Debug for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerId({})", self)
    }
}

/// Hash identifying an event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventHash(pub [u8; 32]);

impl EventHash {
    /// Genesis marker: self-parent of a creator's first event.
    pub const GENESIS: EventHash = EventHash([0u8; 32]);

    /// Whether this is the genesis marker.
    pub fn is_genesis(&self) -> bool {
        *self == Self::GENESIS
    }

    /// Raw hash bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for EventHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0[..8]))
    }
}

impl fmt::Debug for EventHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHash({})", self)
    }
}

/// Event under construction, before signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedEvent {
    /// Sequence number within the creator's chain (first event is 1)
    pub index: u64,
    /// Authoring node
    pub creator: PeerId,
    /// Hashes of causal predecessors
    pub parents: BTreeSet<EventHash>,
    /// Lamport time
    pub logical_clock: LogicalClock,
    /// Opaque client payloads, in buffer order
    pub external_transactions: Vec<Vec<u8>>,
}

impl UnsignedEvent {
    /// Canonical byte encoding; this is what gets signed.
    ///
    /// Layout (all integers little-endian):
    /// `[index u64][creator 32][parent count u32][parents 32 each, ascending]`
    /// `[logical clock u64][tx count u32]([tx len u32][tx bytes])*`
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(
            self.index,
            &self.creator,
            &self.parents,
            self.logical_clock,
            &self.external_transactions,
        )
    }

    /// Attach a signature, producing the immutable event.
    pub fn into_signed(self, signature: Vec<u8>) -> Event {
        Event {
            index: self.index,
            creator: self.creator,
            parents: self.parents,
            logical_clock: self.logical_clock,
            external_transactions: self.external_transactions,
            signature,
        }
    }
}

/// A signed DAG event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    index: u64,
    creator: PeerId,
    parents: BTreeSet<EventHash>,
    logical_clock: LogicalClock,
    external_transactions: Vec<Vec<u8>>,
    signature: Vec<u8>,
}

impl Event {
    /// Sequence number within the creator's chain.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Authoring node.
    pub fn creator(&self) -> PeerId {
        self.creator
    }

    /// Parent hashes.
    pub fn parents(&self) -> &BTreeSet<EventHash> {
        &self.parents
    }

    /// Lamport time.
    pub fn logical_clock(&self) -> LogicalClock {
        self.logical_clock
    }

    /// Client payloads carried by this event.
    pub fn external_transactions(&self) -> &[Vec<u8>] {
        &self.external_transactions
    }

    /// Signature over [`Event::canonical_bytes`].
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Canonical encoding of the signed fields.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonical_bytes(
            self.index,
            &self.creator,
            &self.parents,
            self.logical_clock,
            &self.external_transactions,
        )
    }

    /// Event identity: BLAKE3 over the canonical bytes and the signature.
    pub fn hash(&self) -> EventHash {
        EventHash(domain_hash(
            EVENT_HASH_CONTEXT,
            &[&self.canonical_bytes(), &self.signature],
        ))
    }

    /// Check the signature against the creator identity.
    pub fn verify(&self) -> Result<(), CryptoError> {
        let key = Ed25519PublicKey::from_bytes(self.creator.0)?;
        key.verify(&self.canonical_bytes(), &self.signature)
    }

    /// Split back into the unsigned body and the signature.
    pub fn into_unsigned(self) -> (UnsignedEvent, Vec<u8>) {
        (
            UnsignedEvent {
                index: self.index,
                creator: self.creator,
                parents: self.parents,
                logical_clock: self.logical_clock,
                external_transactions: self.external_transactions,
            },
            self.signature,
        )
    }
}

fn canonical_bytes(
    index: u64,
    creator: &PeerId,
    parents: &BTreeSet<EventHash>,
    logical_clock: LogicalClock,
    transactions: &[Vec<u8>],
) -> Vec<u8> {
    let tx_bytes: usize = transactions.iter().map(|tx| 4 + tx.len()).sum();
    let mut out = Vec::with_capacity(8 + 32 + 4 + parents.len() * 32 + 8 + 4 + tx_bytes);

    out.extend_from_slice(&index.to_le_bytes());
    out.extend_from_slice(creator.as_bytes());
    out.extend_from_slice(&(parents.len() as u32).to_le_bytes());
    for parent in parents {
        out.extend_from_slice(parent.as_bytes());
    }
    out.extend_from_slice(&logical_clock.to_le_bytes());
    out.extend_from_slice(&(transactions.len() as u32).to_le_bytes());
    for tx in transactions {
        out.extend_from_slice(&(tx.len() as u32).to_le_bytes());
        out.extend_from_slice(tx);
    }
    out
}

/// Latest event known locally for one peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerChainTip {
    /// Chain height (index of the tip event)
    pub height: u64,
    /// Hash of the tip event
    pub hash: EventHash,
    /// The tip event itself
    pub event: Event,
}

/// Lifecycle state of the periodic emission loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionState {
    /// No background loop
    Stopped,
    /// Background loop emitting on every tick
    Running,
}

/// Snapshot of the emitter for operators and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmissionStatus {
    /// Scheduler state
    pub state: EmissionState,
    /// Events emitted since startup
    pub events_emitted: u64,
    /// Index of the last emitted event (0 if none yet)
    pub last_index: u64,
    /// Logical clock of the last emitted event
    pub last_logical_clock: LogicalClock,
    /// Transactions waiting in the buffer
    pub pending_transactions: usize,
}
