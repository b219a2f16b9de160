//! Event schemas for EDA

pub mod outbound;

pub use outbound::EventEmitted;
