//! Parent resolution against the event store
//!
//! Reads go through [`EventStore`]. Only the local node's own height is
//! load-bearing: without it the next index is unknown, so that read fails
//! the emission. Everything about other peers degrades to "skip".

use crate::domain::{
    distinct_peers, select_candidates, PeerChainTip, PeerId, PeerScore, RankingPolicy,
    ResolvedParents, SkipReason,
};
use crate::error::Result;
use crate::ports::{EventStore, PeerSnapshot};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Selects and resolves parents for the local node.
pub struct ParentResolver {
    local: PeerId,
    store: Arc<dyn EventStore>,
    peers: Arc<dyn PeerSnapshot>,
    policy: RankingPolicy,
    fan_in: usize,
}

impl ParentResolver {
    /// Create a resolver for `local` with fan-in width `fan_in`.
    pub fn new(
        local: PeerId,
        store: Arc<dyn EventStore>,
        peers: Arc<dyn PeerSnapshot>,
        policy: RankingPolicy,
        fan_in: usize,
    ) -> Self {
        Self {
            local,
            store,
            peers,
            policy,
            fan_in,
        }
    }

    /// Snapshot peers, rank them, and resolve the top candidates plus self.
    pub async fn resolve(&self) -> Result<ResolvedParents> {
        let self_height = self.store.peer_height(&self.local).await?;

        let snapshot = distinct_peers(self.peers.snapshot().await, &self.local);
        let scores = self.score_peers(snapshot).await;
        let candidates = select_candidates(
            self.policy,
            scores,
            PeerScore {
                peer: self.local,
                height: self_height,
            },
            self.fan_in,
        );

        let mut resolved = ResolvedParents::for_local_chain(self_height)?;
        for candidate in &candidates {
            self.resolve_candidate(candidate, &mut resolved).await;
        }

        debug!(
            "[dag-emit] Resolved {} parents from {} candidates ({} skipped), max parent clock {}",
            resolved.parents.len(),
            candidates.len(),
            resolved.skipped.len(),
            resolved.max_parent_clock
        );
        Ok(resolved)
    }

    /// Attach heights to peers; an unreadable height ranks as zero.
    async fn score_peers(&self, peers: Vec<PeerId>) -> Vec<PeerScore> {
        let mut scores = Vec::with_capacity(peers.len());
        for peer in peers {
            let height = match self.store.peer_height(&peer).await {
                Ok(h) => h,
                Err(e) => {
                    warn!("[dag-emit] No height for peer {}: {}", peer, e);
                    0
                }
            };
            scores.push(PeerScore { peer, height });
        }
        scores
    }

    async fn resolve_candidate(&self, candidate: &PeerScore, resolved: &mut ResolvedParents) {
        let PeerScore { peer, height } = *candidate;
        if height < 1 {
            // Local genesis is already handled by ResolvedParents::for_local_chain
            if peer != self.local {
                resolved.skip(peer, SkipReason::NoEvents);
            }
            return;
        }

        match self.chain_tip(&peer, height).await {
            Ok(tip) => resolved.accept(tip.hash, tip.event.logical_clock()),
            Err(reason) => {
                error!("[dag-emit] Parent {} skipped: {}", peer, reason);
                resolved.skip(peer, reason);
            }
        }
    }

    /// Look up `peer`'s event at `height` together with its hash.
    pub async fn chain_tip(
        &self,
        peer: &PeerId,
        height: u64,
    ) -> std::result::Result<PeerChainTip, SkipReason> {
        let hash = self
            .store
            .event_hash_at(peer, height)
            .await
            .map_err(|e| SkipReason::LookupFailed(e.to_string()))?
            .ok_or(SkipReason::MissingHash { height })?;

        let event = self
            .store
            .event_by_hash(&hash)
            .await
            .map_err(|e| SkipReason::LookupFailed(e.to_string()))?
            .ok_or(SkipReason::MissingEvent { hash })?;

        Ok(PeerChainTip {
            height,
            hash,
            event,
        })
    }
}
