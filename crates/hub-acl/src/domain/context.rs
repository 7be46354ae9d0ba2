//! # Call Context
//!
//! Borrowed view over the parts of an inbound call the ACL is allowed to
//! read: the metadata map and the typed extensions the transport attached.
//!
//! Identity comes ONLY from the `VerifiedPeer` extension, which the TLS layer
//! inserts after checking the client certificate. Metadata is caller
//! controlled and is never consulted for identity.

use shared_types::WalletAddress;
use tokio_util::sync::CancellationToken;
use tonic::metadata::MetadataMap;
use tonic::Extensions;

/// Wallet bound to the connection by the transport's certificate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiedPeer(pub WalletAddress);

/// Cancellation handle for a single call, attached by the transport.
#[derive(Clone, Debug, Default)]
pub struct CallCancellation(pub CancellationToken);

/// Result of resolving the peer's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeerIdentity {
    /// Transport-verified wallet. May still be the zero address.
    Verified(WalletAddress),
    /// No verified wallet on this connection.
    Absent,
}

impl PeerIdentity {
    pub fn wallet(&self) -> Option<&WalletAddress> {
        match self {
            PeerIdentity::Verified(wallet) => Some(wallet),
            PeerIdentity::Absent => None,
        }
    }
}

/// Read-only view of an inbound call's metadata and extensions.
#[derive(Clone, Copy, Debug)]
pub struct CallContext<'a> {
    metadata: &'a MetadataMap,
    extensions: &'a Extensions,
}

impl<'a> CallContext<'a> {
    pub fn new(metadata: &'a MetadataMap, extensions: &'a Extensions) -> Self {
        Self {
            metadata,
            extensions,
        }
    }

    /// Borrow the context of a tonic request.
    pub fn from_request<T>(request: &'a tonic::Request<T>) -> Self {
        Self::new(request.metadata(), request.extensions())
    }

    pub fn metadata(&self) -> &'a MetadataMap {
        self.metadata
    }

    pub fn extensions(&self) -> &'a Extensions {
        self.extensions
    }

    /// Typed accessor for the transport-verified wallet.
    pub fn verified_peer(&self) -> PeerIdentity {
        match self.extensions.get::<VerifiedPeer>() {
            Some(VerifiedPeer(wallet)) => PeerIdentity::Verified(*wallet),
            None => PeerIdentity::Absent,
        }
    }

    /// True once the caller cancelled this call.
    pub fn is_cancelled(&self) -> bool {
        self.extensions
            .get::<CallCancellation>()
            .is_some_and(|cancel| cancel.0.is_cancelled())
    }
}
