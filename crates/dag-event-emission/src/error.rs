//! Error types for the event emission subsystem

use shared_crypto::CryptoError;
use thiserror::Error;

/// Result type alias for emission operations
pub type Result<T> = std::result::Result<T, EmissionError>;

/// Errors that can occur while emitting an event
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmissionError {
    /// Signer refused or failed to sign the event
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Event store read or write failed
    #[error("Store error: {0}")]
    StoreError(String),

    /// A freshly built event broke a structural invariant
    #[error("Invariant violation: {reason}")]
    InvariantViolation {
        /// What was violated
        reason: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Cryptographic primitive error
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl EmissionError {
    /// Check if error is recoverable (the next tick may succeed)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::SigningFailed(_) | Self::StoreError(_))
    }

    /// Check if error points at a broken node setup rather than a transient fault
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig(_) | Self::InvariantViolation { .. } | Self::Crypto(_)
        )
    }
}
