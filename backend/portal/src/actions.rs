//! Form submissions: validate locally, check eligibility against a fresh
//! snapshot, then hand the transaction to the gateway.
//!
//! Gateway failures are returned untouched. Nothing is retried.

use sumcharity_core::{
    can_extend_deadline, can_withdraw, donate_eligibility, max_donation, validate_donation,
    validate_new_deadline, validate_new_project, Address, DonateEligibility, ProjectRecord,
};
use tracing::info;

use crate::errors::{PortalError, Result};
use crate::gateway::{ContractGateway, SubmittedTx};
use crate::views::{
    parse_account, CreateProjectForm, DonateForm, ExtendDeadlineForm, WithdrawForm,
};

fn require_account(raw: Option<&str>, action: &'static str) -> Result<Address> {
    parse_account(raw)?.ok_or(PortalError::WalletNotConnected(action))
}

async fn load_project<G: ContractGateway>(gateway: &G, project_id: u64) -> Result<ProjectRecord> {
    gateway
        .get_project(project_id)
        .await?
        .ok_or(PortalError::ProjectNotFound(project_id))
}

pub async fn create_project<G: ContractGateway>(
    gateway: &G,
    form: &CreateProjectForm,
    now: u64,
) -> Result<SubmittedTx> {
    let from = require_account(form.account.as_deref(), "create a project")?;
    let deadline = form.deadline.to_unix()?;
    let project = validate_new_project(
        &form.title,
        &form.description,
        &form.target_amount,
        deadline,
        now,
    )?;

    info!("Creating project {:?} for {from}", project.title);
    gateway.submit_create_project(&from, &project).await
}

pub async fn donate<G: ContractGateway>(
    gateway: &G,
    project_id: u64,
    form: &DonateForm,
    now: u64,
) -> Result<SubmittedTx> {
    let account = parse_account(form.account.as_deref())?;
    let project = load_project(gateway, project_id).await?;

    let from = match (donate_eligibility(&project, account.as_ref(), now), account) {
        (DonateEligibility::Allowed, Some(from)) => from,
        (DonateEligibility::Closed, _) => {
            return Err(PortalError::NotEligible("project is not accepting donations"))
        }
        _ => return Err(PortalError::WalletNotConnected("donate to this project")),
    };

    let amount = validate_donation(&form.amount, max_donation(&project))?;

    info!("Donating {amount} wei to project {project_id} from {from}");
    gateway.submit_donate(&from, project_id, amount).await
}

pub async fn extend_deadline<G: ContractGateway>(
    gateway: &G,
    project_id: u64,
    form: &ExtendDeadlineForm,
    now: u64,
) -> Result<SubmittedTx> {
    let from = require_account(form.account.as_deref(), "extend the deadline")?;
    let project = load_project(gateway, project_id).await?;

    if !can_extend_deadline(&project, Some(&from), now) {
        return Err(PortalError::NotEligible("deadline extension is not available"));
    }

    let new_deadline = form.new_deadline.to_unix()?;
    validate_new_deadline(new_deadline, project.deadline, now)?;

    info!("Extending project {project_id} deadline to {new_deadline}");
    gateway
        .submit_extend_deadline(&from, project_id, new_deadline)
        .await
}

pub async fn withdraw<G: ContractGateway>(
    gateway: &G,
    project_id: u64,
    form: &WithdrawForm,
    now: u64,
) -> Result<SubmittedTx> {
    let from = require_account(form.account.as_deref(), "withdraw funds")?;
    let project = load_project(gateway, project_id).await?;

    if !can_withdraw(&project, Some(&from), now) {
        return Err(PortalError::NotEligible("withdrawal is not available"));
    }

    info!("Withdrawing funds of project {project_id} to {from}");
    gateway.submit_withdraw(&from, project_id).await
}
