//! Wire mapping from `AuthError` to `tonic::Status`.
//!
//! | Kind | gRPC code |
//! |------|-----------|
//! | Unauthenticated | `UNAUTHENTICATED` |
//! | ExtractionFailed | `INVALID_ARGUMENT` |
//! | UnknownDeal | `NOT_FOUND` |
//! | PermissionDenied | `PERMISSION_DENIED` |
//! | Cancelled | `CANCELLED` |
//! | Internal | `INTERNAL` |
//!
//! Every status also carries `x-acl-verdict` so dashboards can tell a fault
//! from an expected refusal without parsing messages.

use crate::domain::{AuthError, AuthErrorKind};
use tonic::metadata::MetadataValue;
use tonic::{Code, Status};

/// Trailer key naming the verdict class.
pub const VERDICT_METADATA_KEY: &str = "x-acl-verdict";

/// gRPC code for an authorization failure kind.
pub fn status_code(kind: AuthErrorKind) -> Code {
    match kind {
        AuthErrorKind::Unauthenticated => Code::Unauthenticated,
        AuthErrorKind::ExtractionFailed => Code::InvalidArgument,
        AuthErrorKind::UnknownDeal => Code::NotFound,
        AuthErrorKind::PermissionDenied => Code::PermissionDenied,
        AuthErrorKind::Cancelled => Code::Cancelled,
        AuthErrorKind::Internal => Code::Internal,
    }
}

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        let kind = err.kind();
        let mut status = Status::new(status_code(kind), err.to_string());
        status.metadata_mut().insert(
            VERDICT_METADATA_KEY,
            MetadataValue::from_static(kind.class().as_str()),
        );
        status
    }
}
