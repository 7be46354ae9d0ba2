//! # Ports
//!
//! - **Inbound**: `DealAuthorization`, what the interceptor calls
//! - **Outbound**: `DealRegistry` and `PeerIdentityResolver`, what the
//!   authorizer depends on

pub mod inbound;
pub mod outbound;

pub use inbound::DealAuthorization;
pub use outbound::{DealRegistry, PeerIdentityResolver, StaticPeerResolver, TransportPeerResolver};
