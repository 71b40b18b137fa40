//! # SumCharity core
//!
//! Deterministic rules shared by every SumCharity view. Each function here
//! depends only on its arguments (the current time included), so the same
//! snapshot always renders the same way.
//!
//! | Concern            | Entry point(s)                                              |
//! |--------------------|-------------------------------------------------------------|
//! | Status             | [`derive_status`], [`ProjectRecord::status`]                |
//! | Progress           | [`compute_progress`], [`bar_width`], [`format_percent`]     |
//! | Eligibility        | [`donate_eligibility`], [`can_withdraw`], [`can_extend_deadline`] |
//! | Formatting         | [`to_display_currency`], [`truncate_id`], [`truncate_text`] |
//! | Form validation    | [`validate_new_project`], [`validate_donation`], [`validate_new_deadline`] |
//!
//! Everything else (funding limits, fund custody, access control) is the
//! contract's business.

pub mod eligibility;
pub mod format;
pub mod progress;
pub mod status;
pub mod types;
pub mod validation;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_eligibility;
#[cfg(test)]
mod test_format;
#[cfg(test)]
mod test_status;

pub use eligibility::{
    can_extend_deadline, can_withdraw, donate_eligibility, is_owner, max_donation,
    DonateEligibility,
};
pub use format::{
    days_remaining, short_id, to_display_currency, truncate_id, truncate_text, RAISED_DECIMALS,
    TARGET_DECIMALS,
};
pub use progress::{bar_width, compute_progress, format_percent, PERCENT_DECIMALS};
pub use status::{derive_status, is_expired};
pub use types::{Address, DonationEvent, ProjectRecord, ProjectStatus};
pub use validation::{
    parse_wei, validate_donation, validate_new_deadline, validate_new_project, NewProject,
    ValidationError,
};
