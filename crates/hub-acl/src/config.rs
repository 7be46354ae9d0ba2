//! ACL configuration with validation.
//!
//! ```toml
//! deal_metadata_key = "deal"
//!
//! [methods]
//! "/hub.Hub/StartTask" = "field"
//! "/hub.Hub/PushTask" = "metadata"
//! ```
//!
//! A `[methods]` table replaces the built-in table entirely.

use crate::domain::HUB_METHODS;
use crate::extractors::{DealSource, DEAL_METADATA_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Deal ACL configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Metadata key carrying the deal id for metadata-sourced methods
    pub deal_metadata_key: String,
    /// Deal source per gRPC method path
    pub methods: BTreeMap<String, DealSource>,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            deal_metadata_key: DEAL_METADATA_KEY.to_string(),
            methods: HUB_METHODS
                .iter()
                .map(|method| (method.path.to_string(), method.source))
                .collect(),
        }
    }
}

impl AclConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AclConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_metadata_key(&self.deal_metadata_key)?;

        for path in self.methods.keys() {
            validate_method_path(path)?;
        }

        Ok(())
    }

    /// Configured deal source for a method.
    pub fn source_for(&self, method: &str) -> Result<DealSource, ConfigError> {
        self.methods
            .get(method)
            .copied()
            .ok_or_else(|| ConfigError::UnknownMethod(method.to_string()))
    }
}

/// gRPC metadata keys: lowercase ASCII, no binary (`-bin`) suffix.
fn validate_metadata_key(key: &str) -> Result<(), ConfigError> {
    let valid_chars = key
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'_' | b'.'));

    if key.is_empty() || !valid_chars || key.ends_with("-bin") {
        return Err(ConfigError::InvalidMetadataKey(key.to_string()));
    }
    Ok(())
}

/// Paths look like "/package.Service/Method".
fn validate_method_path(path: &str) -> Result<(), ConfigError> {
    let valid = path
        .strip_prefix('/')
        .and_then(|rest| rest.split_once('/'))
        .is_some_and(|(service, method)| {
            !service.is_empty() && !method.is_empty() && !method.contains('/')
        });

    if !valid {
        return Err(ConfigError::InvalidMethodPath(path.to_string()));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Metadata key is not a valid ASCII gRPC key
    #[error("invalid deal metadata key: {0:?}")]
    InvalidMetadataKey(String),
    /// Method path is not "/service/Method"
    #[error("invalid method path: {0:?}")]
    InvalidMethodPath(String),
    /// Method has no ACL entry
    #[error("method {0} is not configured for deal authorization")]
    UnknownMethod(String),
    /// Wiring asked for a different extractor than configured
    #[error("method {method} is configured for {configured} extraction, not {requested}")]
    SourceMismatch {
        method: String,
        configured: DealSource,
        requested: DealSource,
    },
    /// TOML could not be parsed
    #[error("failed to parse ACL config: {0}")]
    Parse(String),
    /// Config file could not be read
    #[error("failed to read ACL config: {0}")]
    Io(String),
}
