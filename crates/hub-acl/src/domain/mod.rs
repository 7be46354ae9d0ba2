//! # Domain Module
//!
//! Call context, error taxonomy, Hub request messages and the method table.

pub mod context;
pub mod errors;
pub mod messages;
pub mod methods;

pub use context::*;
pub use errors::*;
pub use messages::*;
pub use methods::{hub_method, HubMethod, HUB_METHODS};
