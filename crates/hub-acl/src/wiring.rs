//! # Hub ACL Wiring
//!
//! Builds one authorizer (and tower layer) per Hub method from the method
//! table. Every authorizer shares the same registry, resolver and shutdown
//! token; only the extractor differs.

use crate::application::DealAuthorizer;
use crate::config::{AclConfig, ConfigError};
use crate::extractors::{DealSource, FieldDealExtractor, MetadataDealExtractor, MethodExtractor};
use crate::middleware::DealAuthLayer;
use crate::ports::outbound::{DealRegistry, PeerIdentityResolver, TransportPeerResolver};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Deal ACL wiring for the Hub's gRPC server.
pub struct HubAcl {
    config: AclConfig,
    registry: Arc<dyn DealRegistry>,
    resolver: Arc<dyn PeerIdentityResolver>,
    shutdown: CancellationToken,
}

impl HubAcl {
    /// Validate `config` and bind it to the Hub's deal registry.
    pub fn new(
        config: AclConfig,
        registry: Arc<dyn DealRegistry>,
        shutdown: CancellationToken,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        info!(
            methods = config.methods.len(),
            metadata_key = %config.deal_metadata_key,
            "Deal ACL configured"
        );

        Ok(Self {
            config,
            registry,
            resolver: Arc::new(TransportPeerResolver),
            shutdown,
        })
    }

    /// Replace the transport identity resolver for every authorizer built
    /// afterwards.
    pub fn with_resolver(mut self, resolver: Arc<dyn PeerIdentityResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &AclConfig {
        &self.config
    }

    fn bind<E>(&self, extractor: E) -> DealAuthorizer<E> {
        DealAuthorizer::new(self.shutdown.clone(), Arc::clone(&self.registry), extractor)
            .with_resolver(Arc::clone(&self.resolver))
    }

    fn metadata_extractor(&self) -> MetadataDealExtractor {
        MetadataDealExtractor::with_key(&self.config.deal_metadata_key)
    }

    fn expect_source(&self, method: &str, requested: DealSource) -> Result<(), ConfigError> {
        let configured = self.config.source_for(method)?;
        if configured != requested {
            return Err(ConfigError::SourceMismatch {
                method: method.to_string(),
                configured,
                requested,
            });
        }
        Ok(())
    }

    /// Authorizer reading `Deal.Id` from the request message.
    pub fn field_authorizer(&self) -> DealAuthorizer<FieldDealExtractor> {
        self.bind(FieldDealExtractor)
    }

    /// Authorizer reading the configured deal metadata key.
    pub fn metadata_authorizer(&self) -> DealAuthorizer<MetadataDealExtractor> {
        self.bind(self.metadata_extractor())
    }

    /// Authorizer for `method`, with the extractor its table entry names.
    pub fn authorizer_for(
        &self,
        method: &str,
    ) -> Result<DealAuthorizer<MethodExtractor>, ConfigError> {
        let source = self.config.source_for(method)?;
        Ok(self.bind(MethodExtractor::new(source, self.metadata_extractor())))
    }

    /// Layer for a method whose request message carries the deal.
    pub fn field_layer(
        &self,
        method: &str,
    ) -> Result<DealAuthLayer<DealAuthorizer<FieldDealExtractor>>, ConfigError> {
        self.expect_source(method, DealSource::Field)?;
        Ok(DealAuthLayer::new(method, Arc::new(self.field_authorizer())))
    }

    /// Layer for a streaming method carrying the deal in metadata.
    pub fn metadata_layer(
        &self,
        method: &str,
    ) -> Result<DealAuthLayer<DealAuthorizer<MetadataDealExtractor>>, ConfigError> {
        self.expect_source(method, DealSource::Metadata)?;
        Ok(DealAuthLayer::new(method, Arc::new(self.metadata_authorizer())))
    }

    /// Layer for `method` dispatching on its configured source.
    ///
    /// The request type must expose a deal field even when the method is
    /// metadata-sourced; use [`HubAcl::metadata_layer`] for stream bodies.
    pub fn layer_for(
        &self,
        method: &str,
    ) -> Result<DealAuthLayer<DealAuthorizer<MethodExtractor>>, ConfigError> {
        Ok(DealAuthLayer::new(method, Arc::new(self.authorizer_for(method)?)))
    }
}
