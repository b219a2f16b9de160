//! Configuration types for event emission

use crate::domain::RankingPolicy;
use crate::error::{EmissionError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Runtime configuration for event emission
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmissionConfig {
    /// Interval between emission ticks, in milliseconds
    pub emit_interval_ms: u64,

    /// Fan-in width K: maximum parents per event, self-parent included
    pub event_parents_count: usize,

    /// Ordering used when more peers are known than parent slots
    pub ranking_policy: RankingPolicy,

    /// Buffered notifications per subscriber before old ones are dropped
    pub event_channel_capacity: usize,
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self {
            emit_interval_ms: crate::DEFAULT_EMIT_INTERVAL_MS,
            event_parents_count: crate::DEFAULT_EVENT_PARENTS_COUNT,
            ranking_policy: RankingPolicy::default(),
            event_channel_capacity: crate::DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl EmissionConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DAG_EMIT_INTERVAL_MS`: Tick interval (default: 1000)
    /// - `DAG_EVENT_PARENTS_COUNT`: Fan-in width K (default: 3)
    /// - `DAG_RANKING_POLICY`: `lowest_height_first` | `highest_height_first` | `identity_order`
    /// - `DAG_EVENT_CHANNEL_CAPACITY`: Notification channel capacity (default: 256)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            emit_interval_ms: env::var("DAG_EMIT_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.emit_interval_ms),

            event_parents_count: env::var("DAG_EVENT_PARENTS_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.event_parents_count),

            ranking_policy: env::var("DAG_RANKING_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ranking_policy),

            event_channel_capacity: env::var("DAG_EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.event_channel_capacity),
        }
    }

    /// Tick interval as a duration
    pub fn emit_interval(&self) -> Duration {
        Duration::from_millis(self.emit_interval_ms)
    }

    /// Reject settings the emitter cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.event_parents_count == 0 {
            return Err(EmissionError::InvalidConfig(
                "event_parents_count must be at least 1".to_string(),
            ));
        }
        if self.emit_interval_ms == 0 {
            return Err(EmissionError::InvalidConfig(
                "emit_interval_ms cannot be 0".to_string(),
            ));
        }
        if self.event_channel_capacity == 0 {
            return Err(EmissionError::InvalidConfig(
                "event_channel_capacity cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to set the fan-in width
    pub fn with_parents_count(mut self, count: usize) -> Self {
        self.event_parents_count = count;
        self
    }

    /// Builder-style method to set the tick interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.emit_interval_ms = interval.as_millis() as u64;
        self
    }

    /// Builder-style method to set the ranking policy
    pub fn with_ranking_policy(mut self, policy: RankingPolicy) -> Self {
        self.ranking_policy = policy;
        self
    }
}
