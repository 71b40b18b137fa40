//! Ethereum JSON-RPC transport.
//!
//! ## Resilience
//!
//! * Reads go through [`RpcClient::call`], which applies exponential back-off
//!   on transport errors, HTTP 429 and 5xx, and soft RPC errors, up to
//!   [`MAX_ATTEMPTS`] attempts and [`MAX_BACKOFF_SECS`] between them.
//! * Submissions go through [`RpcClient::call_once`] and are never retried:
//!   a resent transaction could be mined twice.
//! * A revert is deterministic and never retried, whichever code the node
//!   reports it under.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::abi;
use crate::errors::{PortalError, Result};
use sumcharity_core::Address;

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;
pub const MAX_ATTEMPTS: u32 = 5;

/// Invalid request, unknown method, invalid params, execution reverted.
const HARD_ERROR_CODES: [i64; 4] = [-32600, -32601, -32602, 3];
const REVERT_CODE: i64 = 3;
const REVERT_MESSAGE: &str = "execution reverted";

/// True when `err` is the node reporting a contract revert.
pub fn is_revert(err: &PortalError) -> bool {
    match err {
        PortalError::Rpc { code, message } => {
            *code == REVERT_CODE || message.contains(REVERT_MESSAGE)
        }
        _ => false,
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || matches!(
            status,
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
        )
}

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<Value>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl From<RpcError> for PortalError {
    fn from(err: RpcError) -> Self {
        PortalError::Rpc {
            code: err.code,
            message: err.message,
        }
    }
}

enum Attempt {
    Done(Value),
    Retry(PortalError),
}

#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
    url: String,
}

impl RpcClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        RpcClient {
            client,
            url: url.into(),
        }
    }

    /// Call `method`, retrying transient failures with back-off.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let mut backoff = INITIAL_BACKOFF_SECS;
        let mut attempt = 1;

        loop {
            match self.attempt(method, &params).await? {
                Attempt::Done(value) => return Ok(value),
                Attempt::Retry(err) if attempt < MAX_ATTEMPTS => {
                    warn!("{method} failed (attempt {attempt}, will retry in {backoff}s): {err}");
                    tokio::time::sleep(Duration::from_secs(backoff)).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
                    attempt += 1;
                }
                Attempt::Retry(err) => return Err(err),
            }
        }
    }

    /// Call `method` exactly once.
    pub async fn call_once(&self, method: &str, params: Value) -> Result<Value> {
        match self.attempt(method, &params).await? {
            Attempt::Done(value) => Ok(value),
            Attempt::Retry(err) => Err(err),
        }
    }

    async fn attempt(&self, method: &str, params: &Value) -> Result<Attempt> {
        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            }))
            .send()
            .await;

        let resp = match response {
            Err(e) => return Ok(Attempt::Retry(e.into())),
            Ok(resp) => resp,
        };

        let status = resp.status();
        if is_transient_status(status) {
            return Ok(Attempt::Retry(PortalError::Rpc {
                code: i64::from(status.as_u16()),
                message: format!("HTTP {status}"),
            }));
        }

        let body: RpcResponse = resp.json().await?;
        classify(method, body)
    }
}

fn classify(method: &str, body: RpcResponse) -> Result<Attempt> {
    if let Some(err) = body.error {
        let err = PortalError::from(err);
        let hard = is_revert(&err)
            || matches!(err, PortalError::Rpc { code, .. } if HARD_ERROR_CODES.contains(&code));
        if hard {
            return Err(err);
        }
        return Ok(Attempt::Retry(err));
    }

    let result = body
        .result
        .ok_or_else(|| PortalError::Abi(format!("Empty result from {method}")))?;
    debug!("{method} ok");
    Ok(Attempt::Done(result))
}

// ─────────────────────────────────────────────────────────
// Parameter builders
// ─────────────────────────────────────────────────────────

/// Params for a read-only `eth_call` at the latest block.
pub fn call_params(contract: &Address, data: &[u8]) -> Value {
    json!([
        {
            "to": contract.as_str(),
            "data": abi::to_hex(data),
        },
        "latest"
    ])
}

/// Params for `eth_getLogs` over `DonationReceived` logs of one project.
pub fn donation_logs_params(contract: &Address, from_block: u64, project_id: u64) -> Value {
    json!([
        {
            "address": contract.as_str(),
            "fromBlock": abi::to_quantity(u128::from(from_block)),
            "toBlock": "latest",
            "topics": [abi::DONATION_RECEIVED_TOPIC, abi::uint_topic(project_id)],
        }
    ])
}

/// Params for `eth_sendTransaction`; `value` is omitted when zero.
pub fn send_transaction_params(from: &Address, to: &Address, data: &[u8], value: u128) -> Value {
    let mut tx = json!({
        "from": from.as_str(),
        "to": to.as_str(),
        "data": abi::to_hex(data),
    });
    if value > 0 {
        tx["value"] = json!(abi::to_quantity(value));
    }
    json!([tx])
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
