//! Ed25519 signing adapter

use crate::domain::{PeerId, UnsignedEvent};
use crate::error::Result;
use crate::ports::EventSigner;
use async_trait::async_trait;
use shared_crypto::Ed25519KeyPair;

/// Signs events with a node-local Ed25519 key.
///
/// The creator identity is the key's public half.
pub struct Ed25519EventSigner {
    keypair: Ed25519KeyPair,
    creator: PeerId,
}

impl Ed25519EventSigner {
    /// Wrap a keypair.
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        let creator = keypair.public_key().into();
        Self { keypair, creator }
    }

    /// Signer with a freshly generated key.
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate())
    }
}

#[async_trait]
impl EventSigner for Ed25519EventSigner {
    fn creator(&self) -> PeerId {
        self.creator
    }

    async fn sign(&self, event: &UnsignedEvent) -> Result<Vec<u8>> {
        Ok(self.keypair.sign(&event.canonical_bytes()).to_vec())
    }
}
