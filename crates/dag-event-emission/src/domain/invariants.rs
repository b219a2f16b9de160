//! Invariant checkers for newly authored events
//!
//! Run on every event before it is signed. A failure here means the local
//! store or emitter state is inconsistent, so the emission is aborted rather
//! than writing a malformed vertex into the DAG.

use super::entities::{EventHash, LogicalClock, UnsignedEvent};
use crate::error::{EmissionError, Result};

/// Index continuity: the new index directly follows the local chain height
/// and moves past anything this emitter already produced.
pub fn check_index_continuity(
    event: &UnsignedEvent,
    previous_height: u64,
    last_emitted_index: u64,
) -> Result<()> {
    if previous_height.checked_add(1) != Some(event.index) {
        return Err(EmissionError::InvariantViolation {
            reason: format!(
                "index {} does not follow local height {}",
                event.index, previous_height
            ),
        });
    }
    if event.index <= last_emitted_index {
        return Err(EmissionError::InvariantViolation {
            reason: format!(
                "index {} would repeat already emitted index {}",
                event.index, last_emitted_index
            ),
        });
    }
    Ok(())
}

/// Clock monotonicity: strictly above every parent's clock.
pub fn check_logical_clock(event: &UnsignedEvent, max_parent_clock: LogicalClock) -> Result<()> {
    if event.logical_clock <= max_parent_clock {
        return Err(EmissionError::InvariantViolation {
            reason: format!(
                "logical clock {} not above parent clock {}",
                event.logical_clock, max_parent_clock
            ),
        });
    }
    Ok(())
}

/// Parent linkage: a first event references genesis, later events never do.
pub fn check_parent_linkage(event: &UnsignedEvent) -> Result<()> {
    let has_genesis = event.parents.contains(&EventHash::GENESIS);
    match (event.index, has_genesis) {
        (1, false) => Err(EmissionError::InvariantViolation {
            reason: "first event must reference the genesis marker".to_string(),
        }),
        (i, true) if i > 1 => Err(EmissionError::InvariantViolation {
            reason: format!("event {} references the genesis marker", i),
        }),
        _ => Ok(()),
    }
}

/// Run all checks.
pub fn check_all(
    event: &UnsignedEvent,
    previous_height: u64,
    last_emitted_index: u64,
    max_parent_clock: LogicalClock,
) -> Result<()> {
    check_index_continuity(event, previous_height, last_emitted_index)?;
    check_logical_clock(event, max_parent_clock)?;
    check_parent_linkage(event)?;
    Ok(())
}
