//! Deal authorization middleware.
//!
//! Wraps one RPC method's service and runs the deal ACL before the method
//! body. A refused call returns its `Status` without reaching the inner
//! service.

use crate::domain::CallContext;
use crate::ports::inbound::DealAuthorization;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::{Request, Status};
use tower::{Layer, Service};
use tracing::debug;

/// Deal authorization layer for one method.
pub struct DealAuthLayer<A> {
    method: Arc<str>,
    authorizer: Arc<A>,
}

impl<A> DealAuthLayer<A> {
    pub fn new(method: impl Into<Arc<str>>, authorizer: Arc<A>) -> Self {
        Self {
            method: method.into(),
            authorizer,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl<A> Clone for DealAuthLayer<A> {
    fn clone(&self) -> Self {
        Self {
            method: Arc::clone(&self.method),
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

impl<S, A> Layer<S> for DealAuthLayer<A> {
    type Service = DealAuthService<S, A>;

    fn layer(&self, inner: S) -> Self::Service {
        DealAuthService {
            inner,
            method: Arc::clone(&self.method),
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

/// Deal authorization service
pub struct DealAuthService<S, A> {
    inner: S,
    method: Arc<str>,
    authorizer: Arc<A>,
}

impl<S: Clone, A> Clone for DealAuthService<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            method: Arc::clone(&self.method),
            authorizer: Arc::clone(&self.authorizer),
        }
    }
}

impl<S, A, R> Service<Request<R>> for DealAuthService<S, A>
where
    S: Service<Request<R>, Error = Status>,
    S::Response: Send + 'static,
    S::Future: Send + 'static,
    A: DealAuthorization<R>,
{
    type Response = S::Response;
    type Error = Status;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<R>) -> Self::Future {
        let verdict = self
            .authorizer
            .authorize(&CallContext::from_request(&req), req.get_ref());

        if let Err(err) = verdict {
            debug!(method = %self.method, kind = %err.kind(), "Rejecting call before dispatch");
            return Box::pin(std::future::ready(Err(Status::from(err))));
        }

        Box::pin(self.inner.call(req))
    }
}
