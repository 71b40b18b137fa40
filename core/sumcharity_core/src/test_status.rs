use crate::progress::{bar_width, compute_progress, format_percent, PERCENT_DECIMALS};
use crate::status::derive_status;
use crate::types::ProjectStatus;

const NOW: u64 = 1_704_067_200;
const DAY: u64 = 86_400;

#[test]
fn test_funded_before_deadline_is_completed() {
    assert_eq!(derive_status(100, 100, NOW + DAY, NOW), ProjectStatus::Completed);
}

#[test]
fn test_funded_after_deadline_is_still_completed() {
    assert_eq!(derive_status(100, 100, NOW - DAY, NOW), ProjectStatus::Completed);
    assert_eq!(derive_status(250, 100, NOW - DAY, NOW), ProjectStatus::Completed);
}

#[test]
fn test_underfunded_after_deadline_is_ended() {
    assert_eq!(derive_status(50, 100, NOW - DAY, NOW), ProjectStatus::Ended);
}

#[test]
fn test_underfunded_before_deadline_is_active() {
    assert_eq!(derive_status(50, 100, NOW + DAY, NOW), ProjectStatus::Active);
}

#[test]
fn test_deadline_second_is_still_active() {
    assert_eq!(derive_status(0, 100, NOW, NOW), ProjectStatus::Active);
    assert_eq!(derive_status(0, 100, NOW, NOW + 1), ProjectStatus::Ended);
}

#[test]
fn test_progress_half() {
    assert_eq!(compute_progress(50, 100), 50.0);
}

#[test]
fn test_progress_is_not_capped_but_bar_is() {
    let percent = compute_progress(150, 100);
    assert_eq!(percent, 150.0);
    assert_eq!(bar_width(percent), 100.0);
    assert_eq!(bar_width(compute_progress(30, 100)), 30.0);
}

#[test]
fn test_progress_zero_target_is_infinite_not_nan() {
    assert!(compute_progress(0, 0).is_infinite());
    assert!(compute_progress(10, 0).is_infinite());
    assert_eq!(bar_width(compute_progress(10, 0)), 100.0);
    assert_eq!(format_percent(compute_progress(10, 0), PERCENT_DECIMALS), "∞");
}

#[test]
fn test_format_percent_one_decimal() {
    assert_eq!(format_percent(compute_progress(1, 3), PERCENT_DECIMALS), "33.3");
    assert_eq!(format_percent(compute_progress(150, 100), PERCENT_DECIMALS), "150.0");
    assert_eq!(format_percent(0.0, PERCENT_DECIMALS), "0.0");
}

#[test]
fn test_progress_with_wei_scale_amounts() {
    let target = 2_000_000_000_000_000_000u128;
    let raised = 500_000_000_000_000_000u128;
    assert_eq!(compute_progress(raised, target), 25.0);
}
