//! Hub Deal ACL - authorization of deal-scoped RPCs.
//!
//! Every deal-scoped Hub method asks one question before it runs: is the
//! caller the buyer of the deal this call acts on?
//!
//! # Architecture
//!
//! ```text
//!   tonic request
//!        │
//!  ┌─────┴──────────────────────────────────────────────┐
//!  │ DealAuthLayer (one per method)                     │
//!  │   └── DealAuthorizer<E>                            │
//!  │         1. cancellation                            │
//!  │         2. PeerIdentityResolver  (VerifiedPeer)    │
//!  │         3. E: DealExtractor      (field|metadata)  │
//!  │         4. DealRegistry          (DealBook)        │
//!  │         5. buyer == peer                           │
//!  └─────┬──────────────────────────────────────────────┘
//!        │ Ok                      Err(AuthError) → tonic::Status
//!        ▼
//!   method handler
//! ```
//!
//! # Outcomes
//!
//! | Error | Code |
//! |-------|------|
//! | `Unauthenticated` | `UNAUTHENTICATED` |
//! | `ExtractionFailed` | `INVALID_ARGUMENT` |
//! | `UnknownDeal` | `NOT_FOUND` |
//! | `PermissionDenied` | `PERMISSION_DENIED` |
//! | `Cancelled` | `CANCELLED` |
//! | `Internal` | `INTERNAL` |
//!
//! # Usage
//!
//! ```ignore
//! use hub_acl::{AclConfig, DealBook, HubAcl};
//!
//! let book = DealBook::new_shared();
//! let acl = HubAcl::new(AclConfig::default(), book.clone(), shutdown)?;
//!
//! let start_task = acl.field_layer("/hub.Hub/StartTask")?.layer(start_task_svc);
//! let push_task = acl.metadata_layer("/hub.Hub/PushTask")?.layer(push_task_svc);
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod extractors;
pub mod middleware;
pub mod ports;
pub mod wiring;

// Re-exports
pub use adapters::{status_code, DealBook, VERDICT_METADATA_KEY};
pub use application::DealAuthorizer;
pub use config::{AclConfig, ConfigError};
pub use domain::{
    AuthError, AuthErrorKind, CallCancellation, CallContext, DealBookError, ExtractError,
    PeerIdentity, UnauthenticatedReason, VerdictClass, VerifiedPeer,
};
pub use extractors::{
    AsDealId, DealExtractor, DealSource, FieldDealExtractor, MetadataDealExtractor,
    MethodExtractor, DEAL_METADATA_KEY,
};
pub use middleware::{DealAuthLayer, DealAuthService};
pub use ports::{DealAuthorization, DealRegistry, PeerIdentityResolver};
pub use wiring::HubAcl;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
