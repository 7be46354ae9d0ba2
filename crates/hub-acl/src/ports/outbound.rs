//! # Outbound Ports
//!
//! Narrow traits for the Hub state and transport identity the authorizer
//! reads. Both are injected, so authorizers can be built over fakes.

use crate::domain::{CallContext, PeerIdentity};
use shared_types::{DealId, DealMeta};
use std::sync::Arc;

/// Read access to the live deal map.
pub trait DealRegistry: Send + Sync {
    /// Current entry for `deal_id`, if the deal is open.
    fn lookup(&self, deal_id: &DealId) -> Option<Arc<DealMeta>>;
}

impl<T: DealRegistry + ?Sized> DealRegistry for Arc<T> {
    fn lookup(&self, deal_id: &DealId) -> Option<Arc<DealMeta>> {
        (**self).lookup(deal_id)
    }
}

/// Resolves the verified wallet of the connection a call arrived on.
pub trait PeerIdentityResolver: Send + Sync {
    fn resolve(&self, ctx: &CallContext<'_>) -> PeerIdentity;
}

/// Reads the `VerifiedPeer` extension the TLS layer attaches.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportPeerResolver;

impl PeerIdentityResolver for TransportPeerResolver {
    fn resolve(&self, ctx: &CallContext<'_>) -> PeerIdentity {
        ctx.verified_peer()
    }
}

// =============================================================================
// Fixed Implementation for Testing
// =============================================================================

/// Resolver returning the same identity for every call.
#[derive(Debug, Clone, Copy)]
pub struct StaticPeerResolver(pub PeerIdentity);

impl PeerIdentityResolver for StaticPeerResolver {
    fn resolve(&self, _ctx: &CallContext<'_>) -> PeerIdentity {
        self.0
    }
}
