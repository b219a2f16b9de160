//! Parent set accumulation
//!
//! Pure bookkeeping for the parent resolver: which hashes made it into the
//! parent set, which candidates were dropped and why, and the running
//! maximum of parent logical clocks.

use crate::domain::entities::{EventHash, LogicalClock, PeerId, UnsignedEvent};
use crate::error::{EmissionError, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Why a candidate did not contribute a parent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Peer is known but has authored nothing yet
    NoEvents,
    /// Height recorded but no hash stored for it
    MissingHash {
        /// Recorded height
        height: u64,
    },
    /// Hash stored but the event body is missing
    MissingEvent {
        /// Dangling hash
        hash: EventHash,
    },
    /// Store lookup returned an error
    LookupFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEvents => write!(f, "no events"),
            Self::MissingHash { height } => write!(f, "no event hash at height {height}"),
            Self::MissingEvent { hash } => write!(f, "no event {hash} in store"),
            Self::LookupFailed(e) => write!(f, "lookup failed: {e}"),
        }
    }
}

/// A candidate that was left out of the parent set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedParent {
    /// Candidate peer
    pub peer: PeerId,
    /// Reason
    pub reason: SkipReason,
}

/// Outcome of parent resolution for one emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedParents {
    /// Index the new event will carry
    pub index: u64,
    /// Height of the local chain before this emission
    pub previous_height: u64,
    /// Parent hashes
    pub parents: BTreeSet<EventHash>,
    /// Highest logical clock among resolved parents
    pub max_parent_clock: LogicalClock,
    /// Candidates that contributed nothing
    pub skipped: Vec<SkippedParent>,
}

impl ResolvedParents {
    /// Start resolution for a node whose own chain is at `self_height`.
    ///
    /// A node without events gets index 1 and the genesis marker as its
    /// self-parent; otherwise the index continues the chain. Fails if the
    /// recorded height leaves no room for another index.
    pub fn for_local_chain(self_height: u64) -> Result<Self> {
        let mut parents = BTreeSet::new();
        let index = if self_height < 1 {
            parents.insert(EventHash::GENESIS);
            1
        } else {
            self_height
                .checked_add(1)
                .ok_or_else(|| EmissionError::InvariantViolation {
                    reason: format!("local height {self_height} has no successor index"),
                })?
        };
        Ok(Self {
            index,
            previous_height: self_height,
            parents,
            max_parent_clock: 0,
            skipped: Vec::new(),
        })
    }

    /// Record a resolved parent.
    pub fn accept(&mut self, hash: EventHash, clock: LogicalClock) {
        self.parents.insert(hash);
        self.max_parent_clock = self.max_parent_clock.max(clock);
    }

    /// Record a candidate that could not be resolved.
    pub fn skip(&mut self, peer: PeerId, reason: SkipReason) {
        self.skipped.push(SkippedParent { peer, reason });
    }

    /// Logical clock for the new event.
    ///
    /// Fails when a parent already sits at the top of the clock range.
    pub fn logical_clock(&self) -> Result<LogicalClock> {
        self.max_parent_clock
            .checked_add(1)
            .ok_or_else(|| EmissionError::InvariantViolation {
                reason: format!(
                    "parent clock {} leaves no room for a successor",
                    self.max_parent_clock
                ),
            })
    }

    /// Build the unsigned event carrying `transactions` at `logical_clock`.
    pub fn into_unsigned(
        self,
        creator: PeerId,
        logical_clock: LogicalClock,
        transactions: Vec<Vec<u8>>,
    ) -> UnsignedEvent {
        UnsignedEvent {
            index: self.index,
            creator,
            logical_clock,
            parents: self.parents,
            external_transactions: transactions,
        }
    }
}
