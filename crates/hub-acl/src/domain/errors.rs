//! # Domain Errors
//!
//! Error taxonomy for deal authorization.
//!
//! Every `AuthError` is a terminal verdict for one call. Callers map it to a
//! wire status and never retry on their own behalf.

use shared_types::{DealId, WalletAddress};
use std::fmt;
use thiserror::Error;

/// Why a deal id could not be produced for a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Request has no `Deal` member (or it is unset).
    #[error("request has no Deal member")]
    MissingDeal,

    /// `Deal` member is not a structure with an `Id`.
    #[error("Deal member has no Id")]
    MissingDealId,

    /// `Deal.Id` exists but holds something other than a string.
    #[error("Deal.Id is {found}, expected a string")]
    DealIdNotString { found: &'static str },

    /// The deal id is present but empty.
    #[error("deal id is empty")]
    EmptyDealId,

    /// Metadata key is absent from the call.
    #[error("metadata {key:?} is missing")]
    MissingMetadata { key: String },

    /// Metadata value is not printable ASCII.
    #[error("metadata {key:?} is not valid ASCII")]
    InvalidMetadata { key: String },
}

/// Why an authenticated identity could not be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthenticatedReason {
    /// Transport attached no verified wallet.
    NoPeerIdentity,
    /// Transport attached the zero wallet.
    ZeroWallet,
}

impl fmt::Display for UnauthenticatedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnauthenticatedReason::NoPeerIdentity => f.write_str("no verified peer wallet"),
            UnauthenticatedReason::ZeroWallet => f.write_str("peer wallet is the zero address"),
        }
    }
}

/// Authorization verdict errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(UnauthenticatedReason),

    #[error("failed to extract deal id: {0}")]
    ExtractionFailed(#[from] ExtractError),

    #[error("unknown deal {0}")]
    UnknownDeal(DealId),

    #[error("wallet {peer} is not the buyer of deal {deal}")]
    PermissionDenied { deal: DealId, peer: WalletAddress },

    #[error("authorization cancelled")]
    Cancelled,

    /// Registry or wiring is in a state that should not exist.
    #[error("internal authorization fault: {0}")]
    Internal(String),
}

/// Flat kind of an `AuthError`, for metrics and wire mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    Unauthenticated,
    ExtractionFailed,
    UnknownDeal,
    PermissionDenied,
    Cancelled,
    Internal,
}

/// Separates expected refusals from faults in monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictClass {
    /// Legitimate policy refusal.
    Denied,
    /// Call was abandoned before a decision.
    Cancelled,
    /// Bug-class failure inside the Hub.
    Fault,
}

impl VerdictClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictClass::Denied => "denied",
            VerdictClass::Cancelled => "cancelled",
            VerdictClass::Fault => "fault",
        }
    }
}

impl AuthErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthErrorKind::Unauthenticated => "unauthenticated",
            AuthErrorKind::ExtractionFailed => "extraction_failed",
            AuthErrorKind::UnknownDeal => "unknown_deal",
            AuthErrorKind::PermissionDenied => "permission_denied",
            AuthErrorKind::Cancelled => "cancelled",
            AuthErrorKind::Internal => "internal",
        }
    }

    pub fn class(&self) -> VerdictClass {
        match self {
            AuthErrorKind::Internal => VerdictClass::Fault,
            AuthErrorKind::Cancelled => VerdictClass::Cancelled,
            _ => VerdictClass::Denied,
        }
    }
}

impl fmt::Display for AuthErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::Unauthenticated(_) => AuthErrorKind::Unauthenticated,
            AuthError::ExtractionFailed(_) => AuthErrorKind::ExtractionFailed,
            AuthError::UnknownDeal(_) => AuthErrorKind::UnknownDeal,
            AuthError::PermissionDenied { .. } => AuthErrorKind::PermissionDenied,
            AuthError::Cancelled => AuthErrorKind::Cancelled,
            AuthError::Internal(_) => AuthErrorKind::Internal,
        }
    }

    /// True for bug-class failures rather than policy refusals.
    pub fn is_fault(&self) -> bool {
        self.kind().class() == VerdictClass::Fault
    }
}

/// Deal book mutation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealBookError {
    #[error("deal {0} is already open")]
    AlreadyOpen(DealId),
}
