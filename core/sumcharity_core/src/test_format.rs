use crate::format::{
    days_remaining, short_id, to_display_currency, truncate_id, truncate_text, RAISED_DECIMALS,
    TARGET_DECIMALS, WEI_PER_ETHER,
};
use crate::types::{Address, ProjectRecord};
use crate::validation::{
    parse_wei, validate_donation, validate_new_project, ValidationError, MAX_DESCRIPTION_CHARS,
    MAX_TITLE_CHARS,
};

const NOW: u64 = 1_704_067_200;

#[test]
fn test_currency_target_two_decimals() {
    assert_eq!(to_display_currency(WEI_PER_ETHER, TARGET_DECIMALS), "1.00");
    assert_eq!(to_display_currency(1_500_000_000_000_000_000, TARGET_DECIMALS), "1.50");
    assert_eq!(to_display_currency(0, TARGET_DECIMALS), "0.00");
}

#[test]
fn test_currency_raised_four_decimals() {
    assert_eq!(to_display_currency(10_000_000_000_000_000, RAISED_DECIMALS), "0.0100");
    assert_eq!(to_display_currency(123_456_789_000_000_000, RAISED_DECIMALS), "0.1235");
}

#[test]
fn test_currency_rounds_half_up() {
    assert_eq!(to_display_currency(5_000_000_000_000_000, TARGET_DECIMALS), "0.01");
    assert_eq!(to_display_currency(4_999_999_999_999_999, TARGET_DECIMALS), "0.00");
    assert_eq!(to_display_currency(9_995_000_000_000_000_000, TARGET_DECIMALS), "10.00");
}

#[test]
fn test_currency_sub_unit_amounts() {
    assert_eq!(to_display_currency(1, RAISED_DECIMALS), "0.0000");
    assert_eq!(to_display_currency(1, 18), "0.000000000000000001");
    assert_eq!(to_display_currency(3 * WEI_PER_ETHER, 0), "3");
}

#[test]
fn test_currency_max_amount_does_not_panic() {
    let s = to_display_currency(u128::MAX, RAISED_DECIMALS);
    assert!(s.starts_with("340282366920938463463"));
}

#[test]
fn test_truncate_id() {
    assert_eq!(truncate_id("0x1234567890abcdef", 6, 4), "0x1234...cdef");
    assert_eq!(
        short_id("0x71c7656ec7ab88b098defb751b7401b5f6d8976f"),
        "0x71c7...976f"
    );
}

#[test]
fn test_truncate_id_short_input_unchanged() {
    assert_eq!(truncate_id("0x12", 6, 4), "0x12");
    assert_eq!(truncate_id("", 6, 4), "");
    assert_eq!(truncate_id("012345678", 6, 4), "012345678");
}

#[test]
fn test_truncate_text() {
    let long = "a".repeat(150);
    let out = truncate_text(&long, 100);
    assert_eq!(out.len(), 103);
    assert!(out.ends_with("..."));

    assert_eq!(truncate_text("short", 100), "short");
    assert_eq!(truncate_text(&"b".repeat(100), 100), "b".repeat(100));
}

#[test]
fn test_truncate_text_counts_characters() {
    let text = "é".repeat(5);
    assert_eq!(truncate_text(&text, 3), "ééé...");
}

#[test]
fn test_days_remaining() {
    assert_eq!(days_remaining(NOW + 3 * 86_400 + 10, NOW), 3);
    assert_eq!(days_remaining(NOW + 86_399, NOW), 0);
    assert_eq!(days_remaining(NOW - 5, NOW), 0);
}

#[test]
fn test_parse_wei() {
    assert_eq!(parse_wei("1000"), Ok(1000));
    assert_eq!(parse_wei(" 42 "), Ok(42));
    assert!(matches!(parse_wei("1.5"), Err(ValidationError::InvalidAmount(_))));
    assert!(matches!(parse_wei("-1"), Err(ValidationError::InvalidAmount(_))));
    assert!(matches!(parse_wei(""), Err(ValidationError::InvalidAmount(_))));
}

#[test]
fn test_new_project_validation() {
    let ok = validate_new_project("Books", "School books", "1000", NOW + 60, NOW).unwrap();
    assert_eq!(ok.target_amount, 1000);
    assert_eq!(ok.deadline, NOW + 60);

    assert_eq!(
        validate_new_project("", "d", "1000", NOW + 60, NOW),
        Err(ValidationError::EmptyTitle)
    );
    assert_eq!(
        validate_new_project(&"t".repeat(MAX_TITLE_CHARS + 1), "d", "1000", NOW + 60, NOW),
        Err(ValidationError::TitleTooLong)
    );
    assert!(validate_new_project(&"t".repeat(MAX_TITLE_CHARS), "", "1", NOW + 60, NOW).is_ok());
    assert_eq!(
        validate_new_project("t", &"d".repeat(MAX_DESCRIPTION_CHARS + 1), "1000", NOW + 60, NOW),
        Err(ValidationError::DescriptionTooLong)
    );
    assert_eq!(
        validate_new_project("t", "d", "0", NOW + 60, NOW),
        Err(ValidationError::ZeroAmount)
    );
    assert_eq!(
        validate_new_project("t", "d", "1000", NOW, NOW),
        Err(ValidationError::DeadlineNotInFuture)
    );
}

#[test]
fn test_donation_validation() {
    assert_eq!(validate_donation("70", 70), Ok(70));
    assert_eq!(validate_donation("0", 70), Err(ValidationError::ZeroAmount));
    assert_eq!(
        validate_donation("71", 70),
        Err(ValidationError::DonationTooLarge { max: 70 })
    );
}

#[test]
fn test_address_parsing() {
    let a = Address::parse("0xABCDEF0123456789abcdef0123456789ABCDEF01").unwrap();
    assert_eq!(a.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    assert!(Address::parse("0x1234").is_err());
    assert!(Address::parse("abcdef0123456789abcdef0123456789abcdef01").is_err());
    assert!(Address::parse("0xzzcdef0123456789abcdef0123456789abcdef01").is_err());
    assert!(Address::parse(Address::ZERO).unwrap().is_zero());
}

#[test]
fn test_record_serializes_amounts_as_strings() {
    let record = ProjectRecord {
        id: 1,
        creator: Address::parse("0x1111111111111111111111111111111111111111").unwrap(),
        title: "t".to_string(),
        description: "d".to_string(),
        target_amount: 2 * WEI_PER_ETHER,
        raised_amount: 0,
        deadline: NOW,
        extend_flag: false,
        withdrawn: false,
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["target_amount"], "2000000000000000000");
    assert_eq!(json["raised_amount"], "0");

    let back: ProjectRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}
