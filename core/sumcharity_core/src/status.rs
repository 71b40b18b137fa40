//! Project lifecycle status derivation.

use crate::types::{ProjectRecord, ProjectStatus};

/// Derive a project's status from its funding and deadline.
///
/// Precedence is fixed: a funded project is `Completed` even when its
/// deadline has already passed.
pub fn derive_status(raised_amount: u128, target_amount: u128, deadline: u64, now: u64) -> ProjectStatus {
    if raised_amount >= target_amount {
        ProjectStatus::Completed
    } else if is_expired(deadline, now) {
        ProjectStatus::Ended
    } else {
        ProjectStatus::Active
    }
}

/// `true` once the wall clock is strictly past the deadline.
pub fn is_expired(deadline: u64, now: u64) -> bool {
    now > deadline
}

impl ProjectRecord {
    pub fn status(&self, now: u64) -> ProjectStatus {
        derive_status(self.raised_amount, self.target_amount, self.deadline, now)
    }
}
