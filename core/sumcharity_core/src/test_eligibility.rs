use crate::eligibility::{
    can_extend_deadline, can_withdraw, donate_eligibility, is_owner, max_donation,
    DonateEligibility,
};
use crate::invariants::assert_all_view_invariants;
use crate::types::{Address, ProjectRecord, ProjectStatus};
use crate::validation::{validate_new_deadline, ValidationError};

const NOW: u64 = 1_704_067_200;
const DAY: u64 = 86_400;

fn creator() -> Address {
    Address::parse("0x1111111111111111111111111111111111111111").unwrap()
}

fn stranger() -> Address {
    Address::parse("0x2222222222222222222222222222222222222222").unwrap()
}

fn project(raised: u128, target: u128, deadline: u64) -> ProjectRecord {
    ProjectRecord {
        id: 7,
        creator: creator(),
        title: "Clean water".to_string(),
        description: "Wells for the village".to_string(),
        target_amount: target,
        raised_amount: raised,
        deadline,
        extend_flag: false,
        withdrawn: false,
    }
}

// ── Donate ──────────────────────────────────────────────────────────

#[test]
fn test_donate_allowed_when_active_and_connected() {
    let p = project(50, 100, NOW + DAY);
    assert_eq!(
        donate_eligibility(&p, Some(&stranger()), NOW),
        DonateEligibility::Allowed
    );
}

#[test]
fn test_donate_without_wallet_asks_to_connect() {
    let p = project(50, 100, NOW + DAY);
    assert_eq!(donate_eligibility(&p, None, NOW), DonateEligibility::ConnectWallet);
}

#[test]
fn test_donate_closed_when_funded() {
    let p = project(100, 100, NOW + DAY);
    assert_eq!(donate_eligibility(&p, Some(&stranger()), NOW), DonateEligibility::Closed);
    assert_eq!(donate_eligibility(&p, None, NOW), DonateEligibility::Closed);
}

#[test]
fn test_donate_closed_when_expired() {
    let p = project(50, 100, NOW - 1);
    assert_eq!(donate_eligibility(&p, Some(&stranger()), NOW), DonateEligibility::Closed);
}

#[test]
fn test_max_donation_saturates() {
    assert_eq!(max_donation(&project(30, 100, NOW + DAY)), 70);
    assert_eq!(max_donation(&project(130, 100, NOW + DAY)), 0);
}

// ── Withdraw ────────────────────────────────────────────────────────

#[test]
fn test_owner_can_withdraw_after_deadline() {
    let p = project(40, 100, NOW - DAY);
    assert!(can_withdraw(&p, Some(&creator()), NOW));
}

#[test]
fn test_withdraw_only_once() {
    let mut p = project(40, 100, NOW - DAY);
    p.withdrawn = true;
    assert!(!can_withdraw(&p, Some(&creator()), NOW));
}

#[test]
fn test_withdraw_requires_funds() {
    let p = project(0, 100, NOW - DAY);
    assert!(!can_withdraw(&p, Some(&creator()), NOW));
}

#[test]
fn test_withdraw_requires_expiry() {
    let p = project(100, 100, NOW + DAY);
    assert!(!can_withdraw(&p, Some(&creator()), NOW));
}

#[test]
fn test_withdraw_rejects_non_owner_and_disconnected() {
    let p = project(40, 100, NOW - DAY);
    assert!(!can_withdraw(&p, Some(&stranger()), NOW));
    assert!(!can_withdraw(&p, None, NOW));
}

#[test]
fn test_owner_match_ignores_checksum_case() {
    let p = project(40, 100, NOW - DAY);
    let mixed = Address::parse("0x1111111111111111111111111111111111111111").unwrap();
    assert!(is_owner(&p, Some(&mixed)));

    let mut q = p.clone();
    q.creator = Address::parse("0xAbCdEf0000000000000000000000000000000001").unwrap();
    let lower = Address::parse("0xabcdef0000000000000000000000000000000001").unwrap();
    assert!(is_owner(&q, Some(&lower)));
}

// ── Extend deadline ─────────────────────────────────────────────────

#[test]
fn test_extend_not_offered_while_active() {
    let p = project(50, 100, NOW + DAY);
    assert_eq!(p.status(NOW), ProjectStatus::Active);
    assert!(!can_extend_deadline(&p, Some(&creator()), NOW));
}

#[test]
fn test_extend_offered_to_owner_of_ended_project() {
    let p = project(50, 100, NOW - DAY);
    assert!(can_extend_deadline(&p, Some(&creator()), NOW));
    assert!(!can_extend_deadline(&p, Some(&stranger()), NOW));
    assert!(!can_extend_deadline(&p, None, NOW));
}

#[test]
fn test_extend_not_offered_when_target_exactly_met() {
    let p = project(100, 100, NOW - DAY);
    assert!(!can_extend_deadline(&p, Some(&creator()), NOW));
}

#[test]
fn test_extend_offered_when_overfunded_and_expired() {
    // Inequality, not less-than: an overfunded project still qualifies.
    let p = project(150, 100, NOW - DAY);
    assert_eq!(p.status(NOW), ProjectStatus::Completed);
    assert!(can_extend_deadline(&p, Some(&creator()), NOW));
}

#[test]
fn test_extend_ignores_extend_flag() {
    let mut p = project(50, 100, NOW - DAY);
    p.extend_flag = true;
    assert!(can_extend_deadline(&p, Some(&creator()), NOW));
}

#[test]
fn test_new_deadline_validation() {
    let current = NOW - DAY;
    assert_eq!(validate_new_deadline(NOW + DAY, current, NOW), Ok(()));
    assert_eq!(
        validate_new_deadline(NOW, current, NOW),
        Err(ValidationError::DeadlineNotInFuture)
    );
    assert_eq!(
        validate_new_deadline(NOW + DAY, NOW + 2 * DAY, NOW),
        Err(ValidationError::DeadlineNotExtended)
    );
    assert_eq!(
        validate_new_deadline(NOW + 2 * DAY, NOW + 2 * DAY, NOW),
        Err(ValidationError::DeadlineNotExtended)
    );
}

#[test]
fn test_invariants_hold_across_lifecycle() {
    for (raised, deadline) in [(0, NOW + DAY), (50, NOW - DAY), (100, NOW - DAY), (150, NOW + DAY)] {
        let p = project(raised, 100, deadline);
        for account in [None, Some(creator()), Some(stranger())] {
            assert_all_view_invariants(&p, account.as_ref(), NOW);
        }
    }
}
