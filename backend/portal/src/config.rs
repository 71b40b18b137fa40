//! Application configuration loaded from environment variables.

use std::net::IpAddr;

use axum::http::HeaderValue;

use crate::errors::{PortalError, Result};
use sumcharity_core::Address;

#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint used for reads (e.g. a Sepolia node)
    pub rpc_url: String,
    /// Endpoint that holds the user's account and signs `eth_sendTransaction`
    pub wallet_rpc_url: String,
    /// Address of the deployed charity contract
    pub contract_address: Address,
    /// Interface the REST API binds to; loopback unless overridden
    pub bind_addr: IpAddr,
    /// Port for the REST API server
    pub api_port: u16,
    /// The single browser origin allowed to call the API
    pub allowed_origin: HeaderValue,
    /// How many blocks back to scan for donation logs
    pub donation_lookback_blocks: u64,
    /// Per-request timeout for RPC calls
    pub rpc_timeout_secs: u64,
}

const DEFAULT_RPC_URL: &str = "https://ethereum-sepolia-rpc.publicnode.com";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| -> Result<String> {
            lookup(key).ok_or_else(|| PortalError::Config(format!("Missing env var: {key}")))
        };

        let rpc_url = var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());

        Ok(Config {
            wallet_rpc_url: var("WALLET_RPC_URL").unwrap_or_else(|_| rpc_url.clone()),
            rpc_url,
            contract_address: var("CONTRACT_ADDRESS")
                .map_err(|_| {
                    PortalError::Config(
                        "CONTRACT_ADDRESS environment variable is required".to_string(),
                    )
                })
                .and_then(|raw| {
                    Address::parse(&raw)
                        .map_err(|_| PortalError::Config("Invalid CONTRACT_ADDRESS".to_string()))
                })?,
            bind_addr: var("BIND_ADDR")
                .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
                .parse()
                .map_err(|_| PortalError::Config("Invalid BIND_ADDR".to_string()))?,
            allowed_origin: var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string())
                .parse()
                .map_err(|_| PortalError::Config("Invalid ALLOWED_ORIGIN".to_string()))?,
            api_port: var("API_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .map_err(|_| PortalError::Config("Invalid API_PORT".to_string()))?,
            donation_lookback_blocks: var("DONATION_LOOKBACK_BLOCKS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .map_err(|_| PortalError::Config("Invalid DONATION_LOOKBACK_BLOCKS".to_string()))?,
            rpc_timeout_secs: var("RPC_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| PortalError::Config("Invalid RPC_TIMEOUT_SECS".to_string()))?,
        })
    }
}
