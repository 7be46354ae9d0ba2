//! # Interceptor Wiring
//!
//! `HubAcl` layers placed in front of tower services standing in for the
//! Hub's method handlers. A refused call must never reach its handler.

#[cfg(test)]
mod tests {
    use crate::fixtures::{book_with_deal, start_task, PEER};
    use hub_acl::domain::methods::{PULL_TASK, PUSH_TASK, START_TASK, TASK_STATUS};
    use hub_acl::domain::{Deal, PullTaskRequest, TaskStatusRequest};
    use hub_acl::{AclConfig, ConfigError, DealSource, HubAcl, VerifiedPeer};
    use std::future::{ready, Ready};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::task::{Context, Poll};
    use tokio_util::sync::CancellationToken;
    use tonic::{Code, Request, Response, Status};
    use tower::{Layer, Service, ServiceExt};

    fn hub_acl() -> HubAcl {
        HubAcl::new(
            AclConfig::default(),
            book_with_deal(&PEER.to_string(), "0x42"),
            CancellationToken::new(),
        )
        .unwrap()
    }

    /// Handler that counts how often it runs.
    #[derive(Clone)]
    struct CountingHandler(Arc<AtomicUsize>);

    impl<R> Service<Request<R>> for CountingHandler {
        type Response = Response<&'static str>;
        type Error = Status;
        type Future = Ready<Result<Self::Response, Status>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Status>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<R>) -> Self::Future {
            self.0.fetch_add(1, Ordering::SeqCst);
            ready(Ok(Response::new("ran")))
        }
    }

    #[tokio::test]
    async fn test_start_task_layer() {
        let acl = hub_acl();
        let calls = Arc::new(AtomicUsize::new(0));
        let service = acl
            .field_layer(START_TASK)
            .unwrap()
            .layer(CountingHandler(Arc::clone(&calls)));

        let ok = service
            .clone()
            .oneshot(start_task("0x42", Some(PEER)))
            .await
            .unwrap();
        assert_eq!(*ok.get_ref(), "ran");

        let refused = service
            .oneshot(start_task("0x99", Some(PEER)))
            .await
            .unwrap_err();
        assert_eq!(refused.code(), Code::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pull_task_layer_reads_metadata() {
        let acl = hub_acl();
        let calls = Arc::new(AtomicUsize::new(0));
        let service = acl
            .metadata_layer(PULL_TASK)
            .unwrap()
            .layer(CountingHandler(Arc::clone(&calls)));

        let mut request = Request::new(PullTaskRequest {
            task_id: "t-1".to_string(),
        });
        request.extensions_mut().insert(VerifiedPeer(PEER));
        request.metadata_mut().insert("deal", "0x42".parse().unwrap());
        assert!(service.clone().oneshot(request).await.is_ok());

        let mut missing = Request::new(PullTaskRequest::default());
        missing.extensions_mut().insert(VerifiedPeer(PEER));
        let status = service.oneshot(missing).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_push_task_layer_over_raw_chunks() {
        let acl = hub_acl();
        let calls = Arc::new(AtomicUsize::new(0));
        let service = acl
            .metadata_layer(PUSH_TASK)
            .unwrap()
            .layer(CountingHandler(Arc::clone(&calls)));

        let mut request = Request::new(vec![0u8; 16]);
        request.extensions_mut().insert(VerifiedPeer(PEER));
        request.metadata_mut().insert("deal", "0x42".parse().unwrap());

        assert!(service.oneshot(request).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_layer_for_dispatches_on_table() {
        let acl = hub_acl();
        let calls = Arc::new(AtomicUsize::new(0));
        let service = acl
            .layer_for(TASK_STATUS)
            .unwrap()
            .layer(CountingHandler(Arc::clone(&calls)));

        let mut request = Request::new(TaskStatusRequest {
            deal: Some(Deal::with_id("0x42")),
            task_id: "t-1".to_string(),
        });
        request.extensions_mut().insert(VerifiedPeer(PEER));

        assert!(service.oneshot(request).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_misconfigured_layers_fail_at_startup() {
        let acl = hub_acl();
        assert!(matches!(
            acl.field_layer(PUSH_TASK),
            Err(ConfigError::SourceMismatch {
                configured: DealSource::Metadata,
                ..
            })
        ));
        assert!(matches!(
            acl.layer_for("/hub.Hub/Ping"),
            Err(ConfigError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_config_file_overrides_table() {
        let config = AclConfig::from_toml_str(
            r#"
            deal_metadata_key = "x-deal"

            [methods]
            "/hub.Hub/StartTask" = "metadata"
            "#,
        )
        .unwrap();
        let acl = HubAcl::new(
            config,
            book_with_deal(&PEER.to_string(), "0x42"),
            CancellationToken::new(),
        )
        .unwrap();

        let mut request = start_task("", Some(PEER));
        request.metadata_mut().insert("x-deal", "0x42".parse().unwrap());

        let auth = acl.authorizer_for(START_TASK).unwrap();
        assert_eq!(auth.authorize_request(&request), Ok(()));
        assert!(acl.authorizer_for(TASK_STATUS).is_err());
    }
}
