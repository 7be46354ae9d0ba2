//! # Inbound Ports
//!
//! API the interceptor layer drives.

use crate::domain::{AuthError, CallContext};

/// Decides whether a call may act on the deal it names.
pub trait DealAuthorization<R: ?Sized>: Send + Sync {
    /// `Ok(())` permits the call. Any error is a terminal refusal.
    fn authorize(&self, ctx: &CallContext<'_>, request: &R) -> Result<(), AuthError>;
}
