//! # Error Types
//!
//! Errors raised while constructing marketplace entities.

use thiserror::Error;

/// Errors that can occur when building marketplace entities from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Wallet address text could not be decoded.
    #[error("Invalid wallet address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    /// The zero address was supplied where an owner is required.
    #[error("Wallet address must not be zero")]
    ZeroAddress,

    /// Deal identifiers are never empty.
    #[error("Deal id must not be empty")]
    EmptyDealId,

    /// Slot is shorter than the marketplace minimum.
    #[error("Slot duration {got_secs}s is below the minimum of {min_secs}s")]
    SlotTooShort { got_secs: u64, min_secs: u64 },

    /// Orders must carry a non-zero price.
    #[error("Price per second must be positive")]
    ZeroPrice,
}
