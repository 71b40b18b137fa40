//! # Types
//!
//! Shared data structures read from the SumCharity contract.
//!
//! ## Design decisions
//!
//! ### Snapshots, not state
//!
//! A [`ProjectRecord`] is an immutable snapshot taken at read time. The
//! contract is the only writer; callers re-read instead of patching a local
//! copy after a submission.
//!
//! ### Amounts
//!
//! The contract stores `uint256` wei. Amounts are held as `u128` here and
//! serialized as decimal strings so that JSON consumers never round them
//! through a double.
//!
//! ### Status is derived
//!
//! [`ProjectStatus`] is never stored on-chain or locally; see
//! [`crate::status::derive_status`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Lifecycle status of a project, derived from a snapshot and the current time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Accepting donations.
    Active,
    /// Raised amount reached the target.
    Completed,
    /// Deadline passed without reaching the target.
    Ended,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Ended => "Ended",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 20-byte account identifier in `0x`-prefixed hex.
///
/// Parsing normalises to lowercase, so two addresses compare equal whatever
/// checksum casing they arrived in.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub const ZERO: &'static str = "0x0000000000000000000000000000000000000000";

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| ValidationError::InvalidAddress(raw.to_string()))?;

        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidAddress(raw.to_string()));
        }

        Ok(Address(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// Build an address from the low 20 bytes of a 32-byte ABI word.
    pub fn from_bytes(bytes: &[u8; 20]) -> Self {
        let mut s = String::with_capacity(42);
        s.push_str("0x");
        for b in bytes {
            s.push_str(&format!("{b:02x}"));
        }
        Address(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The all-zero address, used by the contract for "no such project".
    pub fn is_zero(&self) -> bool {
        self.0 == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.0
    }
}

/// Full on-chain representation of a charity project.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Contract-assigned identifier, never reused.
    pub id: u64,
    /// Owner of the project; receives funds on withdrawal.
    pub creator: Address,
    pub title: String,
    pub description: String,
    /// Funding target in wei.
    #[serde(with = "wei")]
    pub target_amount: u128,
    /// Total donated so far in wei.
    #[serde(with = "wei")]
    pub raised_amount: u128,
    /// Unix timestamp (seconds) after which the project no longer accepts donations.
    pub deadline: u64,
    /// Raw `extendORNot` flag from the contract. No rule in this crate reads it.
    pub extend_flag: bool,
    /// Raw `withdrawORNot` flag: set once the creator has withdrawn.
    pub withdrawn: bool,
}

/// A `DonationReceived` log entry for one project.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DonationEvent {
    pub project_id: u64,
    pub donor: Address,
    #[serde(with = "wei")]
    pub amount: u128,
    pub transaction_hash: String,
    pub block_number: u64,
    /// Position of the log inside its block; orders donations within one block.
    pub log_index: u64,
}

/// Serialize wei amounts as decimal strings.
pub mod wei {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u128>().map_err(de::Error::custom)
    }
}
