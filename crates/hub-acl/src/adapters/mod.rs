//! # Adapters
//!
//! - `deal_book`: in-memory `DealRegistry` owned by the Hub
//! - `status`: `AuthError` to `tonic::Status` conversion

pub mod deal_book;
pub mod status;

pub use deal_book::DealBook;
pub use status::{status_code, VERDICT_METADATA_KEY};
