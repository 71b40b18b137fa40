//! Contract Gateway: every read from and write to the charity contract.
//!
//! [`ContractGateway`] is the seam the views and forms depend on;
//! [`EthGateway`] implements it over Ethereum JSON-RPC. Each call is an
//! independent fresh read or a single submission. Nothing is cached.

use std::future::Future;

use serde::Serialize;
use serde_json::{json, Value};
use sumcharity_core::{Address, DonationEvent, NewProject, ProjectRecord};
use tracing::{debug, info};

use crate::abi;
use crate::errors::{PortalError, Result};
use crate::events::{self, RawLog};
use crate::rpc::{self, RpcClient};

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedTx {
    pub tx_hash: String,
}

pub trait ContractGateway: Send + Sync + 'static {
    /// `None` when the contract has no project with this id.
    fn get_project(&self, id: u64) -> impl Future<Output = Result<Option<ProjectRecord>>> + Send;

    fn get_all_projects(&self) -> impl Future<Output = Result<Vec<ProjectRecord>>> + Send;

    /// Donations to `project_id`, ordered by block number ascending.
    fn get_donation_events(
        &self,
        project_id: u64,
    ) -> impl Future<Output = Result<Vec<DonationEvent>>> + Send;

    fn submit_create_project(
        &self,
        from: &Address,
        project: &NewProject,
    ) -> impl Future<Output = Result<SubmittedTx>> + Send;

    /// `amount` is both the call argument and the value transferred.
    fn submit_donate(
        &self,
        from: &Address,
        project_id: u64,
        amount: u128,
    ) -> impl Future<Output = Result<SubmittedTx>> + Send;

    fn submit_extend_deadline(
        &self,
        from: &Address,
        project_id: u64,
        new_deadline: u64,
    ) -> impl Future<Output = Result<SubmittedTx>> + Send;

    fn submit_withdraw(
        &self,
        from: &Address,
        project_id: u64,
    ) -> impl Future<Output = Result<SubmittedTx>> + Send;
}

/// Gateway backed by a read node and a wallet node.
pub struct EthGateway {
    reads: RpcClient,
    wallet: RpcClient,
    contract: Address,
    lookback_blocks: u64,
}

impl EthGateway {
    pub fn new(reads: RpcClient, wallet: RpcClient, contract: Address, lookback_blocks: u64) -> Self {
        EthGateway {
            reads,
            wallet,
            contract,
            lookback_blocks,
        }
    }

    async fn eth_call(&self, data: &[u8]) -> Result<Vec<u8>> {
        let result = self
            .reads
            .call("eth_call", rpc::call_params(&self.contract, data))
            .await?;
        abi::from_hex(as_str(&result, "eth_call")?)
    }

    async fn send(&self, from: &Address, data: Vec<u8>, value: u128) -> Result<SubmittedTx> {
        let params = rpc::send_transaction_params(from, &self.contract, &data, value);
        let result = self.wallet.call_once("eth_sendTransaction", params).await?;
        let tx_hash = as_str(&result, "eth_sendTransaction")?.to_string();
        info!("Submitted transaction {tx_hash} from {from}");
        Ok(SubmittedTx { tx_hash })
    }
}

fn as_str<'a>(value: &'a Value, method: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| PortalError::Abi(format!("{method} returned non-string result: {value}")))
}

impl ContractGateway for EthGateway {
    async fn get_project(&self, id: u64) -> Result<Option<ProjectRecord>> {
        let data = match self
            .eth_call(&abi::encode_uint_call(abi::PROJECTS_SELECTOR, &[u128::from(id)]))
            .await
        {
            Ok(data) => data,
            // Array getters revert on an out-of-range index.
            Err(e) if rpc::is_revert(&e) => {
                debug!("projects({id}) reverted: {e}");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if data.is_empty() {
            return Ok(None);
        }

        let project = abi::decode_project(&data)?;
        // Unset mapping slots decode to the zero creator.
        if project.creator.is_zero() {
            return Ok(None);
        }
        Ok(Some(project))
    }

    async fn get_all_projects(&self) -> Result<Vec<ProjectRecord>> {
        let data = self
            .eth_call(&abi::encode_uint_call(abi::GET_ALL_PROJECTS_SELECTOR, &[]))
            .await?;
        let projects = abi::decode_project_list(&data)?;
        debug!("Fetched {} projects", projects.len());
        Ok(projects)
    }

    async fn get_donation_events(&self, project_id: u64) -> Result<Vec<DonationEvent>> {
        let latest = self.reads.call("eth_blockNumber", json!([])).await?;
        let latest = abi::parse_quantity(as_str(&latest, "eth_blockNumber")?)?;
        let from_block = latest.saturating_sub(self.lookback_blocks);

        let logs = self
            .reads
            .call(
                "eth_getLogs",
                rpc::donation_logs_params(&self.contract, from_block, project_id),
            )
            .await?;
        let raw: Vec<RawLog> = serde_json::from_value(logs)?;
        let donations = events::decode_donation_logs(&raw, project_id);

        debug!(
            "Fetched {} donation logs → {} donations for project {project_id} (blocks {from_block}..={latest})",
            raw.len(),
            donations.len()
        );
        Ok(donations)
    }

    async fn submit_create_project(&self, from: &Address, project: &NewProject) -> Result<SubmittedTx> {
        let data = abi::encode_create_project(
            &project.title,
            &project.description,
            project.target_amount,
            project.deadline,
        );
        self.send(from, data, 0).await
    }

    async fn submit_donate(&self, from: &Address, project_id: u64, amount: u128) -> Result<SubmittedTx> {
        let data = abi::encode_uint_call(abi::DONATE_SELECTOR, &[u128::from(project_id), amount]);
        self.send(from, data, amount).await
    }

    async fn submit_extend_deadline(
        &self,
        from: &Address,
        project_id: u64,
        new_deadline: u64,
    ) -> Result<SubmittedTx> {
        let data = abi::encode_uint_call(
            abi::EXTEND_DEADLINE_SELECTOR,
            &[u128::from(project_id), u128::from(new_deadline)],
        );
        self.send(from, data, 0).await
    }

    async fn submit_withdraw(&self, from: &Address, project_id: u64) -> Result<SubmittedTx> {
        let data = abi::encode_uint_call(abi::WITHDRAW_SELECTOR, &[u128::from(project_id)]);
        self.send(from, data, 0).await
    }
}
