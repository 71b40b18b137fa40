#![allow(dead_code)]

use crate::eligibility::{can_extend_deadline, can_withdraw, donate_eligibility, DonateEligibility};
use crate::progress::{bar_width, compute_progress};
use crate::types::{Address, ProjectRecord, ProjectStatus};

/// INV-1: A funded project is Completed, whatever the clock says.
pub fn assert_funded_is_completed(project: &ProjectRecord, now: u64) {
    if project.raised_amount >= project.target_amount {
        assert_eq!(
            project.status(now),
            ProjectStatus::Completed,
            "INV-1 violated: project {} raised {} of {} but is {:?}",
            project.id,
            project.raised_amount,
            project.target_amount,
            project.status(now)
        );
    }
}

/// INV-2: The progress bar is always within 0..=100.
pub fn assert_bar_within_bounds(project: &ProjectRecord) {
    let width = bar_width(compute_progress(project.raised_amount, project.target_amount));
    assert!(
        (0.0..=100.0).contains(&width),
        "INV-2 violated: project {} bar width {}",
        project.id,
        width
    );
}

/// INV-3: Donations are only accepted while Active.
pub fn assert_donate_requires_active(project: &ProjectRecord, account: Option<&Address>, now: u64) {
    if donate_eligibility(project, account, now) != DonateEligibility::Closed {
        assert_eq!(
            project.status(now),
            ProjectStatus::Active,
            "INV-3 violated: project {} open for donations while {:?}",
            project.id,
            project.status(now)
        );
    }
}

/// INV-4: Owner-only actions are never offered to anyone else.
pub fn assert_owner_only_actions(project: &ProjectRecord, account: Option<&Address>, now: u64) {
    let owner = account.is_some_and(|a| *a == project.creator);
    if !owner {
        assert!(
            !can_withdraw(project, account, now),
            "INV-4 violated: withdraw offered to non-owner on project {}",
            project.id
        );
        assert!(
            !can_extend_deadline(project, account, now),
            "INV-4 violated: extension offered to non-owner on project {}",
            project.id
        );
    }
}

/// INV-5: Owner actions only appear once the deadline has passed.
pub fn assert_owner_actions_after_deadline(project: &ProjectRecord, account: Option<&Address>, now: u64) {
    if now <= project.deadline {
        assert!(!can_withdraw(project, account, now), "INV-5 violated: early withdraw");
        assert!(
            !can_extend_deadline(project, account, now),
            "INV-5 violated: early extension"
        );
    }
}

/// Run every stateless invariant.
pub fn assert_all_view_invariants(project: &ProjectRecord, account: Option<&Address>, now: u64) {
    assert_funded_is_completed(project, now);
    assert_bar_within_bounds(project);
    assert_donate_requires_active(project, account, now);
    assert_owner_only_actions(project, account, now);
    assert_owner_actions_after_deadline(project, account, now);
}
