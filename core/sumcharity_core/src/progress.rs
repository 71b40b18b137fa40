//! Funding progress and progress-bar width.
//!
//! The percentage itself is never clamped; only the bar is. A zero target
//! cannot come from a valid creation, but if one shows up the percentage is
//! `+∞` (never NaN) and the bar is full.

/// Decimal places used for percentages in list and detail views.
pub const PERCENT_DECIMALS: usize = 1;

pub fn compute_progress(raised_amount: u128, target_amount: u128) -> f64 {
    if target_amount == 0 {
        return f64::INFINITY;
    }
    (raised_amount as f64 / target_amount as f64) * 100.0
}

/// Width of the progress bar in percent, `0..=100`.
pub fn bar_width(percent: f64) -> f64 {
    if percent.is_nan() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0)
}

pub fn format_percent(percent: f64, decimals: usize) -> String {
    if percent.is_infinite() {
        return "∞".to_string();
    }
    format!("{percent:.decimals$}")
}
