//! # Failure Flows
//!
//! Store and signer faults seen through the public service API.
//!
//! ## Flows Tested
//!
//! 1. **Dangling peer tip**: hash or body missing, peer excluded from parents
//! 2. **Unreadable peer**: height lookup fails, peer excluded, emission proceeds
//! 3. **Unreadable self**: own height lookup fails, emission aborts, nothing lost
//! 4. **Persist failure**: transactions re-queued ahead of newer submissions
//! 5. **Signer failure**: no event stored, next emission reuses the same index
//! 6. **Dangling own tip**: own previous event missing, chain still advances
//! 7. **Exhausted peer clock**: every tick aborts cleanly, loop stays up

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use dag_event_emission::{
        EmissionConfig, EmissionError, EmissionState, Event, EventEmissionApi, EventHash,
        EventSigner, EventStore, InMemoryEventStore, PeerId, Result, StaticPeerSet,
        UnsignedEvent,
    };

    use crate::integration::fixtures::{lone_node, node, signer};

    // =============================================================================
    // FAULTY ADAPTERS
    // =============================================================================

    /// Wraps the in-memory store with switchable faults.
    struct FaultyStore {
        inner: Arc<InMemoryEventStore>,
        fail_persist: AtomicBool,
        unreadable_peer: parking_lot::Mutex<Option<PeerId>>,
    }

    impl FaultyStore {
        fn new(inner: Arc<InMemoryEventStore>) -> Self {
            Self {
                inner,
                fail_persist: AtomicBool::new(false),
                unreadable_peer: parking_lot::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl EventStore for FaultyStore {
        async fn peer_height(&self, peer: &PeerId) -> Result<u64> {
            if *self.unreadable_peer.lock() == Some(*peer) {
                return Err(EmissionError::StoreError("height index offline".into()));
            }
            self.inner.peer_height(peer).await
        }

        async fn event_hash_at(&self, peer: &PeerId, height: u64) -> Result<Option<EventHash>> {
            self.inner.event_hash_at(peer, height).await
        }

        async fn event_by_hash(&self, hash: &EventHash) -> Result<Option<Event>> {
            self.inner.event_by_hash(hash).await
        }

        async fn persist_event(&self, event: &Event) -> Result<()> {
            if self.fail_persist.load(Ordering::SeqCst) {
                return Err(EmissionError::StoreError("disk full".into()));
            }
            self.inner.persist_event(event).await
        }
    }

    /// Signer that refuses while `locked` is set.
    struct LockableSigner {
        creator: PeerId,
        inner: Arc<dyn EventSigner>,
        locked: AtomicBool,
    }

    #[async_trait]
    impl EventSigner for LockableSigner {
        fn creator(&self) -> PeerId {
            self.creator
        }

        async fn sign(&self, event: &UnsignedEvent) -> Result<Vec<u8>> {
            if self.locked.load(Ordering::SeqCst) {
                return Err(EmissionError::StoreError("keystore unavailable".into()));
            }
            self.inner.sign(event).await
        }
    }

    async fn seed_peer(n: u8, store: &Arc<InMemoryEventStore>) -> Event {
        lone_node(n, store.clone()).emit_event().await.unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_peer_with_missing_body_is_skipped() {
        let store = Arc::new(InMemoryEventStore::new());
        let peer_event = seed_peer(2, &store).await;
        store.forget_event(&peer_event.hash());

        let local = node(
            1,
            EmissionConfig::default(),
            store.clone(),
            Arc::new(StaticPeerSet::new(vec![peer_event.creator()])),
        );
        let event = local.emit_event().await.unwrap();

        assert_eq!(
            event.parents().iter().copied().collect::<Vec<_>>(),
            vec![EventHash::GENESIS]
        );
        assert_eq!(event.logical_clock(), 1);
        assert_eq!(local.metrics().parents_skipped.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_peer_with_missing_hash_is_skipped() {
        let store = Arc::new(InMemoryEventStore::new());
        let healthy = seed_peer(2, &store).await;
        let broken = seed_peer(3, &store).await;
        store.forget_hash(&broken.creator(), 1);

        let local = node(
            1,
            EmissionConfig::default(),
            store.clone(),
            Arc::new(StaticPeerSet::new(vec![healthy.creator(), broken.creator()])),
        );
        let event = local.emit_event().await.unwrap();

        assert!(event.parents().contains(&healthy.hash()));
        assert!(!event.parents().contains(&broken.hash()));
        assert_eq!(event.parents().len(), 2);
        assert_eq!(event.logical_clock(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_peer_height_does_not_block_emission() {
        let inner = Arc::new(InMemoryEventStore::new());
        let peer_event = seed_peer(2, &inner).await;
        let store = Arc::new(FaultyStore::new(inner.clone()));
        *store.unreadable_peer.lock() = Some(peer_event.creator());

        let local = node(
            1,
            EmissionConfig::default(),
            store.clone(),
            Arc::new(StaticPeerSet::new(vec![peer_event.creator()])),
        );
        let event = local.emit_event().await.unwrap();

        assert!(!event.parents().contains(&peer_event.hash()));
        assert_eq!(inner.events_by(&local.creator()).len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_own_height_aborts_and_keeps_transactions() {
        let inner = Arc::new(InMemoryEventStore::new());
        let store = Arc::new(FaultyStore::new(inner.clone()));
        let local = node(
            1,
            EmissionConfig::default(),
            store.clone(),
            Arc::new(StaticPeerSet::default()),
        );
        *store.unreadable_peer.lock() = Some(local.creator());

        local.submit_transaction(b"tx1".to_vec());
        let err = local.emit_event().await.unwrap_err();
        assert!(matches!(err, EmissionError::StoreError(_)));
        assert!(err.is_recoverable());
        assert_eq!(local.status().pending_transactions, 1);
        assert!(inner.is_empty());

        *store.unreadable_peer.lock() = None;
        let event = local.emit_event().await.unwrap();
        assert_eq!(event.index(), 1);
        assert_eq!(event.external_transactions(), &[b"tx1".to_vec()]);
    }

    #[tokio::test]
    async fn test_persist_failure_requeues_ahead_of_new_submissions() {
        let inner = Arc::new(InMemoryEventStore::new());
        let store = Arc::new(FaultyStore::new(inner.clone()));
        let local = node(
            1,
            EmissionConfig::default(),
            store.clone(),
            Arc::new(StaticPeerSet::default()),
        );

        local.submit_transaction(b"tx1".to_vec());
        local.submit_transaction(b"tx2".to_vec());
        store.fail_persist.store(true, Ordering::SeqCst);

        let err = local.emit_event().await.unwrap_err();
        assert!(matches!(err, EmissionError::StoreError(_)));
        assert_eq!(local.status().pending_transactions, 2);
        assert_eq!(local.status().events_emitted, 0);
        assert_eq!(local.status().last_index, 0);

        store.fail_persist.store(false, Ordering::SeqCst);
        local.submit_transaction(b"tx3".to_vec());

        let event = local.emit_event().await.unwrap();
        assert_eq!(event.index(), 1);
        assert_eq!(
            event.external_transactions(),
            &[b"tx1".to_vec(), b"tx2".to_vec(), b"tx3".to_vec()]
        );
        assert_eq!(local.status().pending_transactions, 0);
    }

    #[tokio::test]
    async fn test_signer_failure_stores_nothing() {
        let store = Arc::new(InMemoryEventStore::new());
        let inner = signer(1);
        let lockable = Arc::new(LockableSigner {
            creator: inner.creator(),
            inner,
            locked: AtomicBool::new(true),
        });
        let local = dag_event_emission::EmissionService::new(
            EmissionConfig::default(),
            store.clone(),
            Arc::new(StaticPeerSet::default()),
            lockable.clone(),
        )
        .unwrap();

        local.submit_transaction(b"tx1".to_vec());
        let err = local.emit_event().await.unwrap_err();
        assert!(matches!(err, EmissionError::SigningFailed(_)));
        assert!(store.is_empty());
        assert_eq!(local.status().pending_transactions, 1);

        lockable.locked.store(false, Ordering::SeqCst);
        let event = local.emit_event().await.unwrap();
        assert_eq!(event.index(), 1);
        assert!(event.verify().is_ok());
        assert_eq!(event.external_transactions(), &[b"tx1".to_vec()]);
    }

    #[tokio::test]
    async fn test_own_tip_with_missing_body_is_skipped() {
        let store = Arc::new(InMemoryEventStore::new());
        let local = lone_node(1, store.clone());
        let first = local.emit_event().await.unwrap();
        store.forget_event(&first.hash());

        let second = local.emit_event().await.unwrap();

        assert_eq!(second.index(), 2);
        assert!(!second.parents().contains(&first.hash()));
        assert!(!second.parents().contains(&EventHash::GENESIS));
        assert!(second.parents().is_empty());
        assert_eq!(second.logical_clock(), 1);
        assert!(second.verify().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_peer_clock_at_max_keeps_loop_alive() {
        let store = Arc::new(InMemoryEventStore::new());
        let peer = PeerId([9; 32]);
        store.insert(
            UnsignedEvent {
                index: 1,
                creator: peer,
                parents: Default::default(),
                logical_clock: u64::MAX,
                external_transactions: vec![],
            }
            .into_signed(vec![0; 64]),
        );
        let local = node(
            1,
            EmissionConfig::default().with_interval(Duration::from_millis(100)),
            store.clone(),
            Arc::new(StaticPeerSet::new(vec![peer])),
        );

        local.submit_transaction(b"tx1".to_vec());
        assert!(local.start_emission());
        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(local.status().state, EmissionState::Running);
        assert_eq!(local.status().pending_transactions, 1);
        assert!(store.events_by(&local.creator()).is_empty());
        assert!(local.stop_emission().await);
        assert_eq!(
            local.metrics().invariant_violations.load(Ordering::Relaxed),
            3
        );
    }
}
