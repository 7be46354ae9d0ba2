//! Application layer: the authorizer that composes the ports.

pub mod service;

pub use service::DealAuthorizer;
