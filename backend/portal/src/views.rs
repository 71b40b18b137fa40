//! View-models for the project list, project detail page and forms.
//!
//! Each view is built from one fresh snapshot plus the explicit connected
//! account and clock; nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sumcharity_core::{
    bar_width, can_extend_deadline, can_withdraw, compute_progress, days_remaining,
    donate_eligibility, format_percent, is_expired, is_owner, max_donation, short_id,
    to_display_currency, truncate_text, Address, DonateEligibility, DonationEvent, ProjectRecord,
    ProjectStatus, ValidationError, PERCENT_DECIMALS, RAISED_DECIMALS, TARGET_DECIMALS,
};

/// Characters of description shown on a list card.
pub const CARD_DESCRIPTION_CHARS: usize = 100;

pub fn format_deadline(deadline: u64) -> String {
    i64::try_from(deadline)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| deadline.to_string())
}

/// Funding progress as shown in both list and detail views.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressView {
    /// Uncapped percentage, formatted to one decimal place.
    pub percent: String,
    /// Bar width in percent, capped at 100.
    pub bar_width: f64,
    pub funded: bool,
}

impl ProgressView {
    pub fn build(project: &ProjectRecord) -> Self {
        let percent = compute_progress(project.raised_amount, project.target_amount);
        ProgressView {
            percent: format_percent(percent, PERCENT_DECIMALS),
            bar_width: bar_width(percent),
            funded: percent >= 100.0,
        }
    }
}

// ─────────────────────────────────────────────────────────
// List
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCardView {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub creator: String,
    pub target_eth: String,
    pub raised_eth: String,
    pub progress: ProgressView,
    pub deadline: String,
    pub status: ProjectStatus,
    pub href: String,
}

impl ProjectCardView {
    pub fn build(project: &ProjectRecord, now: u64) -> Self {
        ProjectCardView {
            id: project.id,
            title: project.title.clone(),
            excerpt: truncate_text(&project.description, CARD_DESCRIPTION_CHARS),
            creator: short_id(project.creator.as_str()),
            target_eth: to_display_currency(project.target_amount, TARGET_DECIMALS),
            raised_eth: to_display_currency(project.raised_amount, RAISED_DECIMALS),
            progress: ProgressView::build(project),
            deadline: format_deadline(project.deadline),
            status: project.status(now),
            href: format!("/projects/{}", project.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectListView {
    pub count: usize,
    pub projects: Vec<ProjectCardView>,
}

impl ProjectListView {
    pub fn build(projects: &[ProjectRecord], now: u64) -> Self {
        ProjectListView {
            count: projects.len(),
            projects: projects
                .iter()
                .map(|p| ProjectCardView::build(p, now))
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Detail
// ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DonationRowView {
    pub transaction: String,
    pub transaction_hash: String,
    pub donor: String,
    pub donor_address: String,
    pub amount_eth: String,
    pub block: u64,
}

impl From<&DonationEvent> for DonationRowView {
    fn from(event: &DonationEvent) -> Self {
        DonationRowView {
            transaction: short_id(&event.transaction_hash),
            transaction_hash: event.transaction_hash.clone(),
            donor: short_id(event.donor.as_str()),
            donor_address: event.donor.to_string(),
            amount_eth: to_display_currency(event.amount, RAISED_DECIMALS),
            block: event.block_number,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DonationHistoryView {
    pub project_id: u64,
    pub count: usize,
    pub donations: Vec<DonationRowView>,
}

impl DonationHistoryView {
    pub fn build(project_id: u64, events: &[DonationEvent]) -> Self {
        DonationHistoryView {
            project_id,
            count: events.len(),
            donations: events.iter().map(DonationRowView::from).collect(),
        }
    }
}

/// Which actions the connected account is offered.
///
/// `withdraw` is `None` for anyone but the owner: the control is not shown
/// at all. `extend_deadline` false likewise means "not offered".
#[derive(Debug, Clone, Serialize)]
pub struct ActionsView {
    pub donate: DonateEligibility,
    pub withdraw: Option<bool>,
    pub extend_deadline: bool,
    /// Largest donation in wei the donation form accepts.
    pub max_donation: String,
}

impl ActionsView {
    pub fn build(project: &ProjectRecord, account: Option<&Address>, now: u64) -> Self {
        ActionsView {
            donate: donate_eligibility(project, account, now),
            withdraw: is_owner(project, account).then(|| can_withdraw(project, account, now)),
            extend_deadline: can_extend_deadline(project, account, now),
            max_donation: max_donation(project).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetailView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub creator: String,
    pub creator_address: String,
    pub target_eth: String,
    pub raised_eth: String,
    pub progress: ProgressView,
    pub deadline: String,
    pub deadline_unix: u64,
    pub deadline_passed: bool,
    pub days_remaining: u64,
    pub status: ProjectStatus,
    pub withdrawn: bool,
    /// Raw `extendORNot` flag, shown as-is.
    pub extend_flag: bool,
    pub actions: ActionsView,
    pub donations: Vec<DonationRowView>,
}

impl ProjectDetailView {
    pub fn build(
        project: &ProjectRecord,
        donations: &[DonationEvent],
        account: Option<&Address>,
        now: u64,
    ) -> Self {
        ProjectDetailView {
            id: project.id,
            title: project.title.clone(),
            description: project.description.clone(),
            creator: short_id(project.creator.as_str()),
            creator_address: project.creator.to_string(),
            target_eth: to_display_currency(project.target_amount, TARGET_DECIMALS),
            raised_eth: to_display_currency(project.raised_amount, RAISED_DECIMALS),
            progress: ProgressView::build(project),
            deadline: format_deadline(project.deadline),
            deadline_unix: project.deadline,
            deadline_passed: is_expired(project.deadline, now),
            days_remaining: days_remaining(project.deadline, now),
            status: project.status(now),
            withdrawn: project.withdrawn,
            extend_flag: project.extend_flag,
            actions: ActionsView::build(project, account, now),
            donations: donations.iter().map(DonationRowView::from).collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────

/// A deadline typed either as Unix seconds or an RFC 3339 timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DeadlineInput {
    Unix(u64),
    Text(String),
}

impl DeadlineInput {
    pub fn to_unix(&self) -> Result<u64, ValidationError> {
        match self {
            Self::Unix(secs) => Ok(*secs),
            Self::Text(raw) => {
                let parsed = DateTime::parse_from_rfc3339(raw.trim())
                    .map_err(|_| ValidationError::InvalidDeadline(raw.clone()))?;
                u64::try_from(parsed.timestamp()).map_err(|_| ValidationError::DeadlineNotInFuture)
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountQuery {
    pub account: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectForm {
    pub account: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Target in wei, as a decimal string.
    pub target_amount: String,
    pub deadline: DeadlineInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonateForm {
    pub account: Option<String>,
    /// Amount in wei, as a decimal string.
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtendDeadlineForm {
    pub account: Option<String>,
    pub new_deadline: DeadlineInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawForm {
    pub account: Option<String>,
}

/// Parse the optional connected account; blank means "not connected".
pub fn parse_account(raw: Option<&str>) -> Result<Option<Address>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Address::parse(s).map(Some),
    }
}
