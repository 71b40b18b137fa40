//! Local, pre-submission validation for the create / donate / extend forms.
//!
//! A failure here blocks the submission entirely; nothing reaches the
//! gateway.

use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 50;
pub const MAX_DESCRIPTION_CHARS: usize = 800;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Title must be at most {MAX_TITLE_CHARS} characters long")]
    TitleTooLong,

    #[error("Description must be at most {MAX_DESCRIPTION_CHARS} characters long")]
    DescriptionTooLong,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Maximum donation amount is {max}")]
    DonationTooLarge { max: u128 },

    #[error("Invalid deadline: {0}")]
    InvalidDeadline(String),

    #[error("Deadline must be in the future")]
    DeadlineNotInFuture,

    #[error("New deadline must be after the current deadline")]
    DeadlineNotExtended,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// A create-project form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub target_amount: u128,
    pub deadline: u64,
}

/// Parse a wei amount typed as a decimal integer.
pub fn parse_wei(raw: &str) -> Result<u128, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }
    trimmed
        .parse::<u128>()
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

/// Validate the create-project form.
pub fn validate_new_project(
    title: &str,
    description: &str,
    target_amount: &str,
    deadline: u64,
    now: u64,
) -> Result<NewProject, ValidationError> {
    validate_title(title)?;
    validate_description(description)?;

    let target_amount = parse_wei(target_amount)?;
    if target_amount == 0 {
        return Err(ValidationError::ZeroAmount);
    }

    if deadline <= now {
        return Err(ValidationError::DeadlineNotInFuture);
    }

    Ok(NewProject {
        title: title.to_string(),
        description: description.to_string(),
        target_amount,
        deadline,
    })
}

/// Validate a donation against the remaining room under the target.
pub fn validate_donation(amount: &str, max_donation: u128) -> Result<u128, ValidationError> {
    let amount = parse_wei(amount)?;
    if amount == 0 {
        return Err(ValidationError::ZeroAmount);
    }
    if amount > max_donation {
        return Err(ValidationError::DonationTooLarge { max: max_donation });
    }
    Ok(amount)
}

/// The new deadline must be later than both the wall clock and the current deadline.
pub fn validate_new_deadline(
    new_deadline: u64,
    current_deadline: u64,
    now: u64,
) -> Result<(), ValidationError> {
    if new_deadline <= now {
        return Err(ValidationError::DeadlineNotInFuture);
    }
    if new_deadline <= current_deadline {
        return Err(ValidationError::DeadlineNotExtended);
    }
    Ok(())
}
