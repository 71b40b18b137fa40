//! Display formatting for wei amounts, identifiers and free text.

pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
const WEI_DECIMALS: u32 = 18;

/// Decimal places for target amounts.
pub const TARGET_DECIMALS: u32 = 2;
/// Decimal places for raised and donated amounts.
pub const RAISED_DECIMALS: u32 = 4;

pub const ID_PREFIX_LEN: usize = 6;
pub const ID_SUFFIX_LEN: usize = 4;

const ELLIPSIS: &str = "...";
const SECONDS_PER_DAY: u64 = 86_400;

/// Render a wei amount as ether with exactly `decimals` fractional digits,
/// rounding half-up.
pub fn to_display_currency(amount: u128, decimals: u32) -> String {
    let decimals = decimals.min(WEI_DECIMALS);
    let unit = 10u128.pow(WEI_DECIMALS - decimals);

    // Round in wei before splitting into whole and fractional parts.
    let round_up = unit > 1 && (amount % unit) * 2 >= unit;
    let rounded = (amount / unit).saturating_add(u128::from(round_up));
    let scale = 10u128.pow(decimals);
    let whole = rounded / scale;
    let frac = rounded % scale;

    if decimals == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{frac:0width$}", width = decimals as usize)
    }
}

/// Shorten an address or hash to `prefix...suffix`.
///
/// Identifiers shorter than `prefix_len + suffix_len` come back unchanged.
pub fn truncate_id(identifier: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    if chars.len() < prefix_len + suffix_len {
        return identifier.to_string();
    }
    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{prefix}{ELLIPSIS}{suffix}")
}

/// [`truncate_id`] with the default 6/4 split.
pub fn short_id(identifier: &str) -> String {
    truncate_id(identifier, ID_PREFIX_LEN, ID_SUFFIX_LEN)
}

pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let head: String = text.chars().take(max_length).collect();
    format!("{head}{ELLIPSIS}")
}

/// Whole days left until the deadline, zero once it has passed.
pub fn days_remaining(deadline: u64, now: u64) -> u64 {
    deadline.saturating_sub(now) / SECONDS_PER_DAY
}
