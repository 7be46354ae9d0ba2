//! # Deal Extractors
//!
//! Strategies that turn an inbound call into the `DealId` it acts on.
//!
//! | Source | Reads | Ignores |
//! |--------|-------|---------|
//! | `Field` | `Deal.Id` on the request message | call metadata |
//! | `Metadata` | first `deal` metadata value | request message |
//!
//! The authorizer is written against [`DealExtractor`] only, so each RPC
//! method binds whichever strategy matches its request shape.

pub mod field;
pub mod metadata;

pub use field::{AsDealId, FieldDealExtractor};
pub use metadata::{MetadataDealExtractor, DEAL_METADATA_KEY};

use crate::domain::{CallContext, ExtractError};
use serde::{Deserialize, Serialize};
use shared_types::DealId;
use std::fmt;

/// Produces the deal id a call acts on.
///
/// An implementation returns either a non-empty `DealId` or an error, never
/// both and never neither.
pub trait DealExtractor<R: ?Sized>: Send + Sync {
    fn extract(&self, ctx: &CallContext<'_>, request: &R) -> Result<DealId, ExtractError>;

    /// Which strategy this is, for logs.
    fn source(&self) -> DealSource;
}

/// Names an extraction strategy in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealSource {
    Field,
    Metadata,
}

impl fmt::Display for DealSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealSource::Field => f.write_str("field"),
            DealSource::Metadata => f.write_str("metadata"),
        }
    }
}

/// Extractor chosen at runtime from a method table.
#[derive(Debug, Clone)]
pub struct MethodExtractor {
    source: DealSource,
    metadata: MetadataDealExtractor,
}

impl MethodExtractor {
    pub fn new(source: DealSource, metadata: MetadataDealExtractor) -> Self {
        Self { source, metadata }
    }

    pub fn source(&self) -> DealSource {
        self.source
    }
}

impl<R: AsDealId + ?Sized> DealExtractor<R> for MethodExtractor {
    fn extract(&self, ctx: &CallContext<'_>, request: &R) -> Result<DealId, ExtractError> {
        match self.source {
            DealSource::Field => FieldDealExtractor.extract(ctx, request),
            DealSource::Metadata => self.metadata.extract(ctx, request),
        }
    }

    fn source(&self) -> DealSource {
        self.source
    }
}
