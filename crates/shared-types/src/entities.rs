//! # Marketplace Entities
//!
//! ## Clusters
//!
//! - **Identity**: `WalletAddress`
//! - **Deals**: `DealId`, `DealMeta`
//! - **Orders**: `Order`, `OrderSpec`, `Slot`, `Resources`

use crate::errors::EntityError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// Re-export U256 from primitive-types for prices
pub use primitive_types::U256;

/// Length of a wallet address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Shortest slot a buyer may order.
pub const MIN_SLOT_DURATION: Duration = Duration::from_secs(10 * 60);

// =============================================================================
// IDENTITY
// =============================================================================

/// A 20-byte Ethereum-style wallet address.
///
/// Equality is byte equality. Text input is normalized on parse: the `0x`
/// prefix is optional, hex digits are case-insensitive and short inputs are
/// left-padded with zeros.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WalletAddress(pub [u8; ADDRESS_LEN]);

impl WalletAddress {
    /// The all-zero address.
    pub const ZERO: WalletAddress = WalletAddress([0u8; ADDRESS_LEN]);

    /// Wrap raw address bytes.
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns true for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }
}

impl FromStr for WalletAddress {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EntityError::InvalidAddress {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(invalid("no hex digits"));
        }
        if digits.len() > ADDRESS_LEN * 2 {
            return Err(invalid("longer than 20 bytes"));
        }

        let mut padded = "0".repeat(ADDRESS_LEN * 2 - digits.len());
        padded.push_str(digits);

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", self)
    }
}

impl From<[u8; ADDRESS_LEN]> for WalletAddress {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for WalletAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// DEALS
// =============================================================================

/// Opaque identifier of a deal. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DealId(String);

impl DealId {
    /// Create a deal id, rejecting the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, EntityError> {
        let id = id.into();
        if id.is_empty() {
            return Err(EntityError::EmptyDealId);
        }
        Ok(Self(id))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DealId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DealId {
    type Error = EntityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DealId {
    type Error = EntityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DealId> for String {
    fn from(id: DealId) -> Self {
        id.0
    }
}

/// Registry value for an open deal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealMeta {
    /// The order the deal was struck on.
    pub order: Order,
}

impl DealMeta {
    pub fn new(order: Order) -> Self {
        Self { order }
    }

    /// Wallet that bought the deal.
    pub fn buyer(&self) -> &WalletAddress {
        &self.order.buyer
    }
}

// =============================================================================
// ORDERS
// =============================================================================

/// Hardware a slot reserves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub cpu_cores: u64,
    pub memory_bytes: u64,
    pub gpu_count: u64,
    pub net_in_bps: u64,
    pub net_out_bps: u64,
    pub storage_bytes: u64,
}

/// A time-bounded reservation of resources.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Reservation length in seconds.
    pub duration_secs: u64,
    pub resources: Resources,
}

impl Slot {
    pub fn new(duration: Duration, resources: Resources) -> Self {
        Self {
            duration_secs: duration.as_secs(),
            resources,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Unvalidated order as received from the market.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    /// Buyer wallet in text form.
    pub buyer_id: String,
    pub slot: Slot,
    pub price_per_second: U256,
}

/// A validated resource order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Buyer wallet in canonical binary form.
    pub buyer: WalletAddress,
    pub slot: Slot,
    pub price_per_second: U256,
}

impl Order {
    /// Validate an order spec.
    ///
    /// # Errors
    ///
    /// - `InvalidAddress` / `ZeroAddress` for a bad buyer
    /// - `SlotTooShort` below [`MIN_SLOT_DURATION`]
    /// - `ZeroPrice` for a free order
    pub fn new(spec: OrderSpec) -> Result<Self, EntityError> {
        let buyer: WalletAddress = spec.buyer_id.parse()?;
        if buyer.is_zero() {
            return Err(EntityError::ZeroAddress);
        }

        if spec.slot.duration() < MIN_SLOT_DURATION {
            return Err(EntityError::SlotTooShort {
                got_secs: spec.slot.duration_secs,
                min_secs: MIN_SLOT_DURATION.as_secs(),
            });
        }

        if spec.price_per_second.is_zero() {
            return Err(EntityError::ZeroPrice);
        }

        Ok(Self {
            buyer,
            slot: spec.slot,
            price_per_second: spec.price_per_second,
        })
    }
}
