//! # Concurrency
//!
//! Authorizers run on many tasks at once while the deal lifecycle opens and
//! closes deals. A decision observes each deal either open or closed, never
//! a partial entry.

#[cfg(test)]
mod tests {
    use crate::fixtures::{default_order, deal_id, open, start_task, PEER};
    use hub_acl::{AuthError, DealAuthorizer, DealBook, FieldDealExtractor};
    use shared_types::DealMeta;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_decisions_agree() {
        let book = DealBook::new_shared();
        open(&book, &PEER.to_string(), "0x42");
        open(&book, "0x100500", "0x43");

        let auth = Arc::new(DealAuthorizer::new(
            CancellationToken::new(),
            book,
            FieldDealExtractor,
        ));

        let mut handles = Vec::new();
        for i in 0..64 {
            let auth = Arc::clone(&auth);
            handles.push(tokio::spawn(async move {
                let deal = if i % 2 == 0 { "0x42" } else { "0x43" };
                (i, auth.authorize_request(&start_task(deal, Some(PEER))))
            }));
        }

        for handle in handles {
            let (i, verdict) = handle.await.unwrap();
            if i % 2 == 0 {
                assert_eq!(verdict, Ok(()));
            } else {
                assert!(matches!(verdict, Err(AuthError::PermissionDenied { .. })));
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_decisions_during_open_and_close() {
        let book = DealBook::new_shared();
        let auth = Arc::new(DealAuthorizer::new(
            CancellationToken::new(),
            book.clone(),
            FieldDealExtractor,
        ));

        let lifecycle = {
            let book = Arc::clone(&book);
            tokio::spawn(async move {
                for _ in 0..200 {
                    book.open_deal(
                        deal_id("0x42"),
                        DealMeta::new(default_order(&PEER.to_string())),
                    )
                    .unwrap();
                    tokio::task::yield_now().await;
                    book.close_deal(&deal_id("0x42")).unwrap();
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..4 {
            let auth = Arc::clone(&auth);
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    match auth.authorize_request(&start_task("0x42", Some(PEER))) {
                        Ok(()) | Err(AuthError::UnknownDeal(_)) => {}
                        other => panic!("unexpected verdict {other:?}"),
                    }
                    tokio::task::yield_now().await;
                }
            }));
        }

        lifecycle.await.unwrap();
        for reader in readers {
            reader.await.unwrap();
        }
        assert!(book.is_empty());
    }

    #[test]
    fn test_closed_deal_is_unknown() {
        let book = DealBook::new_shared();
        open(&book, &PEER.to_string(), "0x42");
        let auth = DealAuthorizer::new(
            CancellationToken::new(),
            book.clone(),
            FieldDealExtractor,
        );
        assert_eq!(auth.authorize_request(&start_task("0x42", Some(PEER))), Ok(()));

        book.close_deal(&deal_id("0x42"));
        assert_eq!(
            auth.authorize_request(&start_task("0x42", Some(PEER))),
            Err(AuthError::UnknownDeal(deal_id("0x42")))
        );
    }
}
