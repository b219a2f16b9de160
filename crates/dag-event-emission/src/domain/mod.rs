//! Domain layer - Pure logic for event emission
//!
//! No I/O and no async in here; the service layer feeds store lookups in.
//!
//! ## Entities
//!
//! - [`Event`] / [`UnsignedEvent`]: a DAG vertex after and before signing
//! - [`PeerId`], [`EventHash`]: identities
//! - [`EmissionStatus`]: operator-facing snapshot
//!
//! ## Services
//!
//! - [`TransactionBuffer`]: staging area drained once per emission
//! - [`RankingPolicy`]: parent candidate ordering
//! - [`ResolvedParents`]: parent set and logical clock accumulation
//! - [`invariants`]: checks run before signing

pub mod buffer;
mod entities;
pub mod invariants;
pub mod parents;
pub mod ranking;

pub use buffer::TransactionBuffer;
pub use entities::*;
pub use parents::{ResolvedParents, SkipReason, SkippedParent};
pub use ranking::{distinct_peers, select_candidates, PeerScore, RankingPolicy};
