//! # Hub Telemetry
//!
//! Structured logging for the Hub and its deal ACL.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     // Authorization decisions are now logged
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HUB_SERVICE_NAME` | `hub` | Service name |
//! | `HUB_LOG_LEVEL` | `info` | Log level filter |
//! | `HUB_JSON_LOGS` | `false` | JSON output (default on in containers) |
//! | `HUB_CONSOLE_OUTPUT` | `true` | Write events to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}
