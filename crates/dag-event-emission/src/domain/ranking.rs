//! Peer ranking for parent selection
//!
//! When more peers are known than the fan-in width allows, the ranking
//! decides which of them get referenced. Every policy is a total order: ties
//! on the primary key fall back to the peer identity bytes, so the same
//! snapshot always yields the same candidates.
//!
//! Peers at height 0 (nothing recorded, or height unreadable) cannot supply
//! a parent, so every policy ranks them after all peers with events.

use crate::domain::entities::PeerId;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

/// A peer together with its chain height as known to the local store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeerScore {
    /// Peer identity
    pub peer: PeerId,
    /// Latest known chain height (0 = nothing recorded)
    pub height: u64,
}

/// Ordering policy for parent candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPolicy {
    /// Active peers with the fewest known events first, so lagging chains
    /// get acknowledged and pulled along.
    #[default]
    LowestHeightFirst,
    /// Peers with the most known events first.
    HighestHeightFirst,
    /// Plain identity order among active peers.
    IdentityOrder,
}

impl RankingPolicy {
    /// Compare two scored peers.
    pub fn compare(&self, a: &PeerScore, b: &PeerScore) -> Ordering {
        let silent = (a.height == 0).cmp(&(b.height == 0));
        let primary = match self {
            Self::LowestHeightFirst => a.height.cmp(&b.height),
            Self::HighestHeightFirst => b.height.cmp(&a.height),
            Self::IdentityOrder => Ordering::Equal,
        };
        silent
            .then(primary)
            .then_with(|| a.peer.cmp(&b.peer))
    }

    /// Sort peers by this policy.
    pub fn rank(&self, mut peers: Vec<PeerScore>) -> Vec<PeerScore> {
        peers.sort_by(|a, b| self.compare(a, b));
        peers
    }
}

impl FromStr for RankingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lowest_height_first" | "lowest" => Ok(Self::LowestHeightFirst),
            "highest_height_first" | "highest" => Ok(Self::HighestHeightFirst),
            "identity_order" | "identity" => Ok(Self::IdentityOrder),
            other => Err(format!("unknown ranking policy: {other}")),
        }
    }
}

/// Drop the local identity and duplicate entries from a peer snapshot.
///
/// The local node is always added back as the mandatory last candidate, so
/// it must not also compete for one of the K-1 peer slots.
pub fn distinct_peers(snapshot: Vec<PeerId>, local: &PeerId) -> Vec<PeerId> {
    let mut seen = HashSet::with_capacity(snapshot.len());
    snapshot
        .into_iter()
        .filter(|peer| peer != local && seen.insert(*peer))
        .collect()
}

/// Rank `peers`, keep the best `fan_in - 1`, and append the local node.
pub fn select_candidates(
    policy: RankingPolicy,
    peers: Vec<PeerScore>,
    local: PeerScore,
    fan_in: usize,
) -> Vec<PeerScore> {
    let slots = fan_in.saturating_sub(1);
    let mut candidates = policy.rank(peers);
    candidates.truncate(slots);
    candidates.push(local);
    candidates
}
