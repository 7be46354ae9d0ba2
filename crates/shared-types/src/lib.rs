//! # Shared Types Crate
//!
//! Marketplace entities shared between the Hub and its authorization layer.
//!
//! ## Design Principles
//!
//! - **Canonical identity**: wallet addresses are kept in their 20-byte binary
//!   form. Text is parsed once at the edge and never compared as text.
//! - **Valid by construction**: `DealId` cannot be empty and `Order` cannot be
//!   built without a buyer, a long enough slot and a price.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
