//! Deal Authorizer
//!
//! Decides whether a call may act on a deal. The decision pipeline is fixed:
//! 1. Observe cancellation
//! 2. Resolve the transport-verified peer wallet
//! 3. Extract the deal id with the bound extractor
//! 4. Look the deal up in the registry
//! 5. Compare the deal's buyer wallet to the peer wallet
//!
//! Only step 3 varies per RPC method.

use crate::domain::{AuthError, CallContext, PeerIdentity, UnauthenticatedReason};
use crate::extractors::DealExtractor;
use crate::ports::inbound::DealAuthorization;
use crate::ports::outbound::{DealRegistry, PeerIdentityResolver, TransportPeerResolver};
use shared_types::{DealId, WalletAddress};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

/// Successful decision, kept for logging.
struct Grant {
    deal: DealId,
    peer: WalletAddress,
}

/// Authorizer bound to one extraction strategy.
pub struct DealAuthorizer<E> {
    shutdown: CancellationToken,
    registry: Arc<dyn DealRegistry>,
    resolver: Arc<dyn PeerIdentityResolver>,
    extractor: E,
}

impl<E> DealAuthorizer<E> {
    /// Create an authorizer.
    ///
    /// `shutdown` is the Hub's lifetime token; once cancelled every call is
    /// refused.
    pub fn new(shutdown: CancellationToken, registry: Arc<dyn DealRegistry>, extractor: E) -> Self {
        Self {
            shutdown,
            registry,
            resolver: Arc::new(TransportPeerResolver),
            extractor,
        }
    }

    /// Replace the transport identity resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn PeerIdentityResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Authorize a call given its context and message.
    pub fn authorize<R: ?Sized>(
        &self,
        ctx: &CallContext<'_>,
        request: &R,
    ) -> Result<(), AuthError>
    where
        E: DealExtractor<R>,
    {
        let source = self.extractor.source();

        match self.decide(ctx, request) {
            Ok(grant) => {
                debug!(
                    deal = %grant.deal,
                    peer = %grant.peer,
                    source = %source,
                    "Deal access granted"
                );
                Ok(())
            }
            Err(err) if err.is_fault() => {
                error!(
                    kind = %err.kind(),
                    source = %source,
                    error = %err,
                    "Deal authorization fault"
                );
                Err(err)
            }
            Err(err) => {
                warn!(kind = %err.kind(), source = %source, error = %err, "Deal access denied");
                Err(err)
            }
        }
    }

    /// Authorize a tonic request using its metadata and extensions.
    pub fn authorize_request<R>(&self, request: &tonic::Request<R>) -> Result<(), AuthError>
    where
        E: DealExtractor<R>,
    {
        self.authorize(&CallContext::from_request(request), request.get_ref())
    }

    fn decide<R: ?Sized>(&self, ctx: &CallContext<'_>, request: &R) -> Result<Grant, AuthError>
    where
        E: DealExtractor<R>,
    {
        if self.shutdown.is_cancelled() || ctx.is_cancelled() {
            return Err(AuthError::Cancelled);
        }

        let peer = match self.resolver.resolve(ctx) {
            PeerIdentity::Verified(wallet) if wallet.is_zero() => {
                return Err(AuthError::Unauthenticated(UnauthenticatedReason::ZeroWallet));
            }
            PeerIdentity::Verified(wallet) => wallet,
            PeerIdentity::Absent => {
                return Err(AuthError::Unauthenticated(
                    UnauthenticatedReason::NoPeerIdentity,
                ));
            }
        };

        let deal_id = self.extractor.extract(ctx, request)?;

        let Some(deal) = self.registry.lookup(&deal_id) else {
            return Err(AuthError::UnknownDeal(deal_id));
        };

        // Orders are validated on construction, so this is a corrupted entry.
        if deal.buyer().is_zero() {
            return Err(AuthError::Internal(format!(
                "deal {deal_id} has no buyer wallet"
            )));
        }

        if !same_wallet(deal.buyer(), &peer) {
            return Err(AuthError::PermissionDenied {
                deal: deal_id,
                peer,
            });
        }

        Ok(Grant {
            deal: deal_id,
            peer,
        })
    }
}

impl<E, R> DealAuthorization<R> for DealAuthorizer<E>
where
    E: DealExtractor<R>,
    R: ?Sized,
{
    fn authorize(&self, ctx: &CallContext<'_>, request: &R) -> Result<(), AuthError> {
        DealAuthorizer::authorize(self, ctx, request)
    }
}

fn same_wallet(a: &WalletAddress, b: &WalletAddress) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
