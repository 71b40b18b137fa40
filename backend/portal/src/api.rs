//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::actions;
use crate::errors::PortalError;
use crate::gateway::{ContractGateway, SubmittedTx};
use crate::views::{
    parse_account, AccountQuery, CreateProjectForm, DonateForm, DonationHistoryView,
    ExtendDeadlineForm, ProjectDetailView, ProjectListView, WithdrawForm,
};

pub struct ApiState<G> {
    pub gateway: G,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SubmissionResponse {
    pub action: &'static str,
    pub project_id: Option<u64>,
    #[serde(flatten)]
    pub tx: SubmittedTx,
}

/// Current wall-clock time in Unix seconds.
pub fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

fn status_for(err: &PortalError) -> StatusCode {
    match err {
        PortalError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PortalError::WalletNotConnected(_) => StatusCode::UNAUTHORIZED,
        PortalError::NotEligible(_) => StatusCode::FORBIDDEN,
        PortalError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
        PortalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        PortalError::Http(_) | PortalError::Json(_) | PortalError::Rpc { .. } | PortalError::Abi(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

fn error_response(err: PortalError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Request failed: {err}");
    } else {
        warn!("Request rejected: {err}");
    }
    (
        status,
        Json(serde_json::json!(ErrorResponse {
            error: err.to_string()
        })),
    )
        .into_response()
}

fn submission_response(
    action: &'static str,
    project_id: Option<u64>,
    result: crate::errors::Result<SubmittedTx>,
) -> Response {
    match result {
        Ok(tx) => (
            StatusCode::OK,
            Json(serde_json::json!(SubmissionResponse {
                action,
                project_id,
                tx,
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /projects`
///
/// Returns a card for every project the contract knows about.
pub async fn list_projects<G: ContractGateway>(State(state): State<Arc<ApiState<G>>>) -> Response {
    match state.gateway.get_all_projects().await {
        Ok(projects) => (
            StatusCode::OK,
            Json(serde_json::json!(ProjectListView::build(&projects, unix_now()))),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /projects/:id?account=0x…`
///
/// Returns the detail view, including what the given account may do.
pub async fn get_project<G: ContractGateway>(
    State(state): State<Arc<ApiState<G>>>,
    Path(project_id): Path<u64>,
    Query(query): Query<AccountQuery>,
) -> Response {
    let account = match parse_account(query.account.as_deref()) {
        Ok(account) => account,
        Err(e) => return error_response(e.into()),
    };

    let project = match state.gateway.get_project(project_id).await {
        Ok(Some(project)) => project,
        Ok(None) => return error_response(PortalError::ProjectNotFound(project_id)),
        Err(e) => return error_response(e),
    };

    let donations = match state.gateway.get_donation_events(project_id).await {
        Ok(donations) => donations,
        Err(e) => return error_response(e),
    };

    let view = ProjectDetailView::build(&project, &donations, account.as_ref(), unix_now());
    (StatusCode::OK, Json(serde_json::json!(view))).into_response()
}

/// `GET /projects/:id/donations`
pub async fn get_project_donations<G: ContractGateway>(
    State(state): State<Arc<ApiState<G>>>,
    Path(project_id): Path<u64>,
) -> Response {
    match state.gateway.get_donation_events(project_id).await {
        Ok(events) => (
            StatusCode::OK,
            Json(serde_json::json!(DonationHistoryView::build(project_id, &events))),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /projects`
pub async fn create_project<G: ContractGateway>(
    State(state): State<Arc<ApiState<G>>>,
    Json(form): Json<CreateProjectForm>,
) -> Response {
    let result = actions::create_project(&state.gateway, &form, unix_now()).await;
    submission_response("create_project", None, result)
}

/// `POST /projects/:id/donate`
pub async fn donate<G: ContractGateway>(
    State(state): State<Arc<ApiState<G>>>,
    Path(project_id): Path<u64>,
    Json(form): Json<DonateForm>,
) -> Response {
    let result = actions::donate(&state.gateway, project_id, &form, unix_now()).await;
    submission_response("donate", Some(project_id), result)
}

/// `POST /projects/:id/extend`
pub async fn extend_deadline<G: ContractGateway>(
    State(state): State<Arc<ApiState<G>>>,
    Path(project_id): Path<u64>,
    Json(form): Json<ExtendDeadlineForm>,
) -> Response {
    let result = actions::extend_deadline(&state.gateway, project_id, &form, unix_now()).await;
    submission_response("extend_deadline", Some(project_id), result)
}

/// `POST /projects/:id/withdraw`
pub async fn withdraw<G: ContractGateway>(
    State(state): State<Arc<ApiState<G>>>,
    Path(project_id): Path<u64>,
    Json(form): Json<WithdrawForm>,
) -> Response {
    let result = actions::withdraw(&state.gateway, project_id, &form, unix_now()).await;
    submission_response("withdraw", Some(project_id), result)
}
