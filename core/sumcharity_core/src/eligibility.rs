//! Which actions a connected account may take on a project snapshot.
//!
//! The connected account is always passed in explicitly; `None` means no
//! wallet is connected.

use serde::{Deserialize, Serialize};

use crate::status::is_expired;
use crate::types::{Address, ProjectRecord, ProjectStatus};

/// Outcome of the donate check.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonateEligibility {
    Allowed,
    /// The project accepts donations but no wallet is connected.
    ConnectWallet,
    /// Funded, expired, or otherwise not accepting donations.
    Closed,
}

pub fn is_owner(project: &ProjectRecord, account: Option<&Address>) -> bool {
    account.is_some_and(|a| *a == project.creator)
}

pub fn donate_eligibility(
    project: &ProjectRecord,
    account: Option<&Address>,
    now: u64,
) -> DonateEligibility {
    let open = project.status(now) == ProjectStatus::Active
        && project.raised_amount < project.target_amount
        && !is_expired(project.deadline, now);

    if !open {
        DonateEligibility::Closed
    } else if account.is_none() {
        DonateEligibility::ConnectWallet
    } else {
        DonateEligibility::Allowed
    }
}

/// Only the owner may withdraw, once, after the deadline, and only if
/// something was raised.
pub fn can_withdraw(project: &ProjectRecord, account: Option<&Address>, now: u64) -> bool {
    is_owner(project, account)
        && is_expired(project.deadline, now)
        && !project.withdrawn
        && project.raised_amount > 0
}

/// Extension is offered to the owner of an expired project whose raised
/// amount is not exactly the target.
///
/// The comparison is `!=`, not `<`: an overfunded project that has expired
/// still qualifies even though its status is `Completed`.
pub fn can_extend_deadline(project: &ProjectRecord, account: Option<&Address>, now: u64) -> bool {
    is_owner(project, account)
        && is_expired(project.deadline, now)
        && project.raised_amount != project.target_amount
}

/// Largest donation the form accepts: the room left under the target.
pub fn max_donation(project: &ProjectRecord) -> u128 {
    project.target_amount.saturating_sub(project.raised_amount)
}
