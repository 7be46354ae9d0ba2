//! Metadata-sourced deal extraction.
//!
//! Used by streaming methods whose messages carry no deal. The client sends
//! the deal id as call metadata; gRPC metadata keys are lowercase ASCII.

use super::{DealExtractor, DealSource};
use crate::domain::{CallContext, ExtractError};
use shared_types::DealId;

/// Default metadata key carrying the deal id.
pub const DEAL_METADATA_KEY: &str = "deal";

/// Reads the first value of the deal metadata key. The request is ignored.
#[derive(Debug, Clone)]
pub struct MetadataDealExtractor {
    key: String,
}

impl MetadataDealExtractor {
    /// Extractor reading `key`. Keys are matched lowercase.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into().to_ascii_lowercase(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for MetadataDealExtractor {
    fn default() -> Self {
        Self::with_key(DEAL_METADATA_KEY)
    }
}

impl<R: ?Sized> DealExtractor<R> for MetadataDealExtractor {
    fn extract(&self, ctx: &CallContext<'_>, _request: &R) -> Result<DealId, ExtractError> {
        let value = ctx
            .metadata()
            .get(self.key.as_str())
            .ok_or_else(|| ExtractError::MissingMetadata {
                key: self.key.clone(),
            })?;

        let text = value.to_str().map_err(|_| ExtractError::InvalidMetadata {
            key: self.key.clone(),
        })?;

        DealId::new(text).map_err(|_| ExtractError::EmptyDealId)
    }

    fn source(&self) -> DealSource {
        DealSource::Metadata
    }
}
