//! Field-sourced deal extraction.
//!
//! Any request type can take part by implementing [`AsDealId`]. Typed Hub
//! messages get it from [`impl_as_deal_id!`](crate::impl_as_deal_id); JSON
//! payloads get it by structural inspection of `Deal.Id`.

use super::{DealExtractor, DealSource};
use crate::domain::{CallContext, ExtractError};
use serde_json::Value;
use shared_types::DealId;

/// Capability of a request that names the deal it acts on via `Deal.Id`.
pub trait AsDealId {
    /// Borrow the raw `Deal.Id`.
    fn as_deal_id(&self) -> Result<&str, ExtractError>;
}

/// Implements [`AsDealId`] for message types with a `deal: Option<Deal>` field.
#[macro_export]
macro_rules! impl_as_deal_id {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::extractors::AsDealId for $ty {
                fn as_deal_id(&self) -> ::std::result::Result<&str, $crate::domain::ExtractError> {
                    self.deal
                        .as_ref()
                        .map(|deal| deal.id.as_str())
                        .ok_or($crate::domain::ExtractError::MissingDeal)
                }
            }
        )+
    };
}

impl<T: AsDealId + ?Sized> AsDealId for &T {
    fn as_deal_id(&self) -> Result<&str, ExtractError> {
        (**self).as_deal_id()
    }
}

const DEAL_KEYS: [&str; 2] = ["Deal", "deal"];
const ID_KEYS: [&str; 2] = ["Id", "id"];

impl AsDealId for Value {
    fn as_deal_id(&self) -> Result<&str, ExtractError> {
        let deal = member(self, &DEAL_KEYS).ok_or(ExtractError::MissingDeal)?;
        let id = member(deal, &ID_KEYS).ok_or(ExtractError::MissingDealId)?;
        id.as_str().ok_or(ExtractError::DealIdNotString {
            found: json_kind(id),
        })
    }
}

/// Non-null member of an object under the first matching name.
fn member<'v>(value: &'v Value, names: &[&str]) -> Option<&'v Value> {
    let object = value.as_object()?;
    names
        .iter()
        .find_map(|name| object.get(*name).filter(|found| !found.is_null()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads the deal id from the request message.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDealExtractor;

impl<R: AsDealId + ?Sized> DealExtractor<R> for FieldDealExtractor {
    fn extract(&self, _ctx: &CallContext<'_>, request: &R) -> Result<DealId, ExtractError> {
        let raw = request.as_deal_id()?;
        DealId::new(raw).map_err(|_| ExtractError::EmptyDealId)
    }

    fn source(&self) -> DealSource {
        DealSource::Field
    }
}
