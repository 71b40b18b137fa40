//! SumCharity portal entry point.
//!
//! Serves project views and forms over a small Axum REST API. Every view is
//! rendered from a fresh read of the charity contract over Ethereum
//! JSON-RPC; submissions are forwarded to a wallet endpoint that signs them.

mod abi;
mod actions;
mod api;
mod config;
mod errors;
mod events;
mod gateway;
mod rpc;
mod views;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use gateway::EthGateway;
use rpc::RpcClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // One HTTP client shared by the read and wallet endpoints.
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(config.rpc_timeout_secs))
        .build()?;

    let gateway = EthGateway::new(
        RpcClient::new(client.clone(), config.rpc_url.clone()),
        RpcClient::new(client, config.wallet_rpc_url.clone()),
        config.contract_address.clone(),
        config.donation_lookback_blocks,
    );
    info!(
        "Contract {} via {} (wallet {})",
        config.contract_address, config.rpc_url, config.wallet_rpc_url
    );

    // ─── REST API ─────────────────────────────────────────
    // Browsers may only call in from the configured front-end origin.
    let cors = CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_state = Arc::new(api::ApiState { gateway });

    let app = Router::new()
        .route("/health", get(api::health))
        .route(
            "/projects",
            get(api::list_projects::<EthGateway>).post(api::create_project::<EthGateway>),
        )
        .route("/projects/:id", get(api::get_project::<EthGateway>))
        .route(
            "/projects/:id/donations",
            get(api::get_project_donations::<EthGateway>),
        )
        .route("/projects/:id/donate", post(api::donate::<EthGateway>))
        .route("/projects/:id/extend", post(api::extend_deadline::<EthGateway>))
        .route("/projects/:id/withdraw", post(api::withdraw::<EthGateway>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(api_state);

    // ─── Shutdown ─────────────────────────────────────────
    let shutdown = CancellationToken::new();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
            }
            shutdown.cancel();
        }
    });

    let addr = SocketAddr::new(config.bind_addr, config.api_port);
    if !config.bind_addr.is_loopback() {
        warn!("API bound to non-loopback address {addr}; anyone who can reach it can submit transactions");
    }
    info!("API listening on http://{addr} (origin {:?})", config.allowed_origin);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
