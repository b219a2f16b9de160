//! Integration tests across domain, service and adapters.

pub mod failure_flows;
pub mod lifecycle;

#[cfg(test)]
pub(crate) mod fixtures {
    use dag_event_emission::{
        Ed25519EventSigner, EmissionConfig, EmissionService, EventSigner, EventStore,
        PeerSnapshot, StaticPeerSet,
    };
    use shared_crypto::Ed25519KeyPair;
    use std::sync::Arc;

    /// Deterministic signer for node number `n`.
    pub fn signer(n: u8) -> Arc<Ed25519EventSigner> {
        Arc::new(Ed25519EventSigner::new(Ed25519KeyPair::from_seed([n; 32])))
    }

    /// Service for node `n` over the given store and peers.
    pub fn node(
        n: u8,
        config: EmissionConfig,
        store: Arc<dyn EventStore>,
        peers: Arc<dyn PeerSnapshot>,
    ) -> EmissionService {
        let signer: Arc<dyn EventSigner> = signer(n);
        EmissionService::new(config, store, peers, signer).expect("valid config")
    }

    /// Service for node `n` with no known peers.
    pub fn lone_node(n: u8, store: Arc<dyn EventStore>) -> EmissionService {
        node(
            n,
            EmissionConfig::default(),
            store,
            Arc::new(StaticPeerSet::default()),
        )
    }
}
