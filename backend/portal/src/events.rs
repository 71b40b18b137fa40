//! Donation log decoding.
//!
//! The contract emits
//! `DonationReceived(uint256 indexed projectId, address donor, uint256 amount)`;
//! `eth_getLogs` returns those as [`RawLog`] entries which are turned into
//! [`DonationEvent`]s here.

use serde::Deserialize;
use sumcharity_core::DonationEvent;
use tracing::debug;

use crate::abi::{self, Decoder, DONATION_RECEIVED_TOPIC};

/// Log kinds recognised from the charity contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A donation was made to a project.
    DonationReceived,
    /// A log from this contract that we don't recognise.
    Unknown,
}

impl EventKind {
    /// Classify a log by its first topic.
    pub fn from_topic(topic: &str) -> Self {
        if topic.eq_ignore_ascii_case(DONATION_RECEIVED_TOPIC) {
            Self::DonationReceived
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DonationReceived => "donation_received",
            Self::Unknown => "unknown",
        }
    }
}

/// A log entry as returned by `eth_getLogs`.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub topics: Vec<String>,
    pub data: String,
    pub block_number: Option<String>,
    pub transaction_hash: Option<String>,
    pub log_index: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

/// Decode the donation logs for `project_id`, ordered by block then log index.
pub fn decode_donation_logs(raw: &[RawLog], project_id: u64) -> Vec<DonationEvent> {
    let mut events: Vec<DonationEvent> = raw
        .iter()
        .filter_map(decode_single)
        .filter(|e| e.project_id == project_id)
        .collect();
    events.sort_by_key(|e| (e.block_number, e.log_index));
    events
}

fn decode_single(raw: &RawLog) -> Option<DonationEvent> {
    if raw.removed {
        return None;
    }

    let kind = EventKind::from_topic(raw.topics.first()?);
    if kind != EventKind::DonationReceived {
        debug!("Skipping {} log", kind.as_str());
        return None;
    }

    let project_topic = abi::from_hex(raw.topics.get(1)?).ok()?;
    let bytes = abi::from_hex(&raw.data).ok()?;
    let data = Decoder::new(&bytes);

    let event = DonationEvent {
        project_id: Decoder::new(&project_topic).u64_at(0).ok()?,
        donor: data.address_at(0).ok()?,
        amount: data.u128_at(32).ok()?,
        transaction_hash: raw.transaction_hash.clone()?,
        block_number: abi::parse_quantity(raw.block_number.as_deref()?).ok()?,
        log_index: raw
            .log_index
            .as_deref()
            .and_then(|i| abi::parse_quantity(i).ok())
            .unwrap_or(0),
    };
    Some(event)
}
