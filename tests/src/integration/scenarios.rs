//! # Authorization Scenarios
//!
//! End-to-end decisions over a real `DealBook`:
//!
//! 1. **Buyer**: the verified peer bought the deal, the call is permitted
//! 2. **Stranger**: the deal belongs to another wallet, the call is denied
//! 3. **Spoofed wallet**: a zero transport identity plus a `wallet` metadata
//!    header naming the real buyer is still unauthenticated
//!
//! Plus the extractor edge cases for both deal sources.

#[cfg(test)]
mod tests {
    use crate::fixtures::{book_with_deal, deal_id, start_task, PEER};
    use hub_acl::domain::ExtractError;
    use hub_acl::{
        AuthError, AuthErrorKind, CallContext, DealAuthorizer, DealExtractor, FieldDealExtractor,
        MetadataDealExtractor, UnauthenticatedReason, VerdictClass, VerifiedPeer,
        VERDICT_METADATA_KEY,
    };
    use serde_json::json;
    use shared_types::WalletAddress;
    use tokio_util::sync::CancellationToken;
    use tonic::Code;

    fn field_authorizer(buyer: &str) -> DealAuthorizer<FieldDealExtractor> {
        DealAuthorizer::new(
            CancellationToken::new(),
            book_with_deal(buyer, "0x42"),
            FieldDealExtractor,
        )
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_buyer_may_start_task() {
        let auth = field_authorizer(&PEER.to_string());
        assert_eq!(auth.authorize_request(&start_task("0x42", Some(PEER))), Ok(()));
    }

    #[test]
    fn test_buyer_match_ignores_text_case() {
        let checksummed = PEER.to_string().to_uppercase().replacen("0X", "0x", 1);
        let auth = field_authorizer(&checksummed);
        assert_eq!(auth.authorize_request(&start_task("0x42", Some(PEER))), Ok(()));
    }

    #[test]
    fn test_stranger_is_denied() {
        let auth = field_authorizer("0x100500");
        let err = auth
            .authorize_request(&start_task("0x42", Some(PEER)))
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::PermissionDenied {
                deal: deal_id("0x42"),
                peer: PEER,
            }
        );
        assert_eq!(tonic::Status::from(err).code(), Code::PermissionDenied);
    }

    #[test]
    fn test_wallet_metadata_cannot_stand_in_for_identity() {
        let auth = field_authorizer("0x100500");

        let mut request = start_task("0x42", Some(WalletAddress::ZERO));
        request
            .metadata_mut()
            .insert("wallet", "0x100500".parse().unwrap());

        let err = auth.authorize_request(&request).unwrap_err();
        assert_eq!(
            err,
            AuthError::Unauthenticated(UnauthenticatedReason::ZeroWallet)
        );
    }

    #[test]
    fn test_wallet_metadata_without_transport_identity() {
        let auth = field_authorizer("0x100500");

        let mut request = start_task("0x42", None);
        request
            .metadata_mut()
            .insert("wallet", "0x100500".parse().unwrap());

        let err = auth.authorize_request(&request).unwrap_err();
        assert_eq!(err.kind(), AuthErrorKind::Unauthenticated);

        let status = tonic::Status::from(err);
        assert_eq!(status.code(), Code::Unauthenticated);
        assert_eq!(
            status.metadata().get(VERDICT_METADATA_KEY).unwrap(),
            VerdictClass::Denied.as_str()
        );
    }

    #[test]
    fn test_unknown_deal_is_not_found() {
        let auth = field_authorizer(&PEER.to_string());
        let err = auth
            .authorize_request(&start_task("0x43", Some(PEER)))
            .unwrap_err();

        assert_eq!(err, AuthError::UnknownDeal(deal_id("0x43")));
        assert_eq!(tonic::Status::from(err).code(), Code::NotFound);
    }

    #[test]
    fn test_shutdown_refuses_buyer() {
        let shutdown = CancellationToken::new();
        let auth = DealAuthorizer::new(
            shutdown.clone(),
            book_with_deal(&PEER.to_string(), "0x42"),
            FieldDealExtractor,
        );
        shutdown.cancel();

        let status = tonic::Status::from(
            auth.authorize_request(&start_task("0x42", Some(PEER)))
                .unwrap_err(),
        );
        assert_eq!(status.code(), Code::Cancelled);
        assert_eq!(
            status.metadata().get(VERDICT_METADATA_KEY).unwrap(),
            VerdictClass::Cancelled.as_str()
        );
    }

    // =============================================================================
    // EXTRACTION
    // =============================================================================

    #[test]
    fn test_field_extraction_from_typed_message() {
        let request = start_task("0x42", None);
        let ctx = CallContext::from_request(&request);

        let deal = FieldDealExtractor.extract(&ctx, request.get_ref()).unwrap();
        assert_eq!(deal, deal_id("0x42"));
    }

    #[test]
    fn test_field_extraction_rejects_string_deal() {
        let request = tonic::Request::new(json!({ "Deal": "0x42" }));
        let ctx = CallContext::from_request(&request);

        assert_eq!(
            FieldDealExtractor.extract(&ctx, request.get_ref()),
            Err(ExtractError::MissingDealId)
        );
    }

    #[test]
    fn test_field_extraction_rejects_numeric_id() {
        let request = tonic::Request::new(json!({ "Deal": { "Id": 42 } }));
        let ctx = CallContext::from_request(&request);

        assert_eq!(
            FieldDealExtractor.extract(&ctx, request.get_ref()),
            Err(ExtractError::DealIdNotString { found: "a number" })
        );
    }

    #[test]
    fn test_metadata_extraction_without_message() {
        let mut request = tonic::Request::new(());
        request.metadata_mut().insert("deal", "0x42".parse().unwrap());
        let ctx = CallContext::from_request(&request);

        let deal = MetadataDealExtractor::default().extract(&ctx, &()).unwrap();
        assert_eq!(deal, deal_id("0x42"));
    }

    #[test]
    fn test_extraction_failure_maps_to_invalid_argument() {
        let auth = field_authorizer(&PEER.to_string());
        let mut request = tonic::Request::new(json!({ "Deal": { "Id": "" } }));
        request.extensions_mut().insert(VerifiedPeer(PEER));

        let err = auth.authorize_request(&request).unwrap_err();
        assert_eq!(err, AuthError::ExtractionFailed(ExtractError::EmptyDealId));
        assert_eq!(tonic::Status::from(err).code(), Code::InvalidArgument);
    }
}
