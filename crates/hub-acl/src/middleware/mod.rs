//! Tower middleware placing the deal ACL in front of Hub handlers.

pub mod auth;

pub use auth::{DealAuthLayer, DealAuthService};
