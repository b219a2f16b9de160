//! # Lifecycle Flows
//!
//! Periodic emission start/stop behaviour on a paused tokio clock.
//!
//! ## Flows Tested
//!
//! 1. **In-flight stop**: stop waits for a running emission, then nothing more
//! 2. **Start/stop races**: many tasks toggling leave exactly one or zero loops
//! 3. **Mixed triggers**: scheduled and manual emissions share one chain
//! 4. **Notifications**: scheduled emissions reach subscribers

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use dag_event_emission::{
        Ed25519EventSigner, EmissionConfig, EmissionService, EmissionState, EventEmissionApi,
        EventSigner, InMemoryEventStore, PeerId, Result, StaticPeerSet, UnsignedEvent,
    };

    use crate::integration::fixtures::{node, signer};

    /// Signer that takes `delay` of (virtual) time per signature.
    struct SlowSigner {
        inner: Arc<Ed25519EventSigner>,
        delay: Duration,
    }

    #[async_trait]
    impl EventSigner for SlowSigner {
        fn creator(&self) -> PeerId {
            self.inner.creator()
        }

        async fn sign(&self, event: &UnsignedEvent) -> Result<Vec<u8>> {
            tokio::time::sleep(self.delay).await;
            self.inner.sign(event).await
        }
    }

    fn ticking_node(store: Arc<InMemoryEventStore>, interval_ms: u64) -> EmissionService {
        node(
            1,
            EmissionConfig::default().with_interval(Duration::from_millis(interval_ms)),
            store,
            Arc::new(StaticPeerSet::default()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_waits_for_in_flight_emission() {
        let store = Arc::new(InMemoryEventStore::new());
        let service = EmissionService::new(
            EmissionConfig::default().with_interval(Duration::from_millis(10)),
            store.clone(),
            Arc::new(StaticPeerSet::default()),
            Arc::new(SlowSigner {
                inner: signer(1),
                delay: Duration::from_millis(50),
            }),
        )
        .unwrap();

        service.submit_transaction(b"tx1".to_vec());
        assert!(service.start_emission());

        // First tick at 10ms, signature completes at 60ms
        tokio::time::sleep(Duration::from_millis(15)).await;
        assert!(store.is_empty());

        assert!(service.stop_emission().await);
        assert_eq!(store.len(), 1);
        assert_eq!(service.status().pending_transactions, 0);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.len(), 1);
        assert_eq!(service.status().state, EmissionState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_start_stop_leaves_no_orphan_loop() {
        let store = Arc::new(InMemoryEventStore::new());
        let service = Arc::new(ticking_node(store.clone(), 5));

        let togglers: Vec<_> = (0..8)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    for _ in 0..10 {
                        service.start_emission();
                        tokio::time::sleep(Duration::from_millis(3)).await;
                        service.stop_emission().await;
                    }
                })
            })
            .collect();
        for handle in togglers {
            handle.await.unwrap();
        }

        service.stop_emission().await;
        assert_eq!(service.status().state, EmissionState::Stopped);

        let emitted = store.len();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.len(), emitted);

        let indices: Vec<u64> = store
            .events_by(&service.creator())
            .iter()
            .map(|e| e.index())
            .collect();
        assert_eq!(indices, (1..=emitted as u64).collect::<Vec<_>>());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_and_scheduled_emissions_share_chain() {
        let store = Arc::new(InMemoryEventStore::new());
        let service = ticking_node(store.clone(), 100);

        service.start_emission();
        tokio::time::sleep(Duration::from_millis(150)).await;
        service.emit_event().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        service.stop_emission().await;

        let events = store.events_by(&service.creator());
        let indices: Vec<u64> = events.iter().map(|e| e.index()).collect();
        let clocks: Vec<u64> = events.iter().map(|e| e.logical_clock()).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(clocks, vec![1, 2, 3]);
        assert_eq!(service.status().last_index, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_emission_notifies_subscribers() {
        let store = Arc::new(InMemoryEventStore::new());
        let service = ticking_node(store.clone(), 20);
        let mut rx = service.subscribe();

        service.submit_transaction(b"tx1".to_vec());
        service.start_emission();

        let notification = rx.recv().await.unwrap();
        service.stop_emission().await;

        assert_eq!(notification.index, 1);
        assert_eq!(notification.creator, service.creator());
        assert_eq!(notification.transaction_count, 1);
        assert_eq!(notification.event_hash, notification.event.hash());
    }
}
