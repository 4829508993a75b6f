#![allow(clippy::unwrap_used, clippy::expect_used)]

use cards::{CardExpirationMonth, CardExpirationYear, CardSecurityCode};
use masking::PeekInterface;

#[test]
fn test_card_security_code() {
    let valid_card_security_code = CardSecurityCode::try_from("123").unwrap();
    let leading_zero = CardSecurityCode::try_from("012").unwrap();

    assert_eq!(valid_card_security_code.peek().peek(), "123");
    assert_eq!(leading_zero.peek().peek(), "012");
    assert_eq!(format!("{valid_card_security_code:?}"), "CardSecurityCode(*** ***)");

    assert!(CardSecurityCode::try_from("12").is_err());
    assert!(CardSecurityCode::try_from("12a").is_err());
    assert!(CardSecurityCode::try_from("12345").is_err());

    let serialized = serde_json::to_string(&valid_card_security_code).unwrap();
    assert_eq!(serialized, "\"123\"");

    let deserialized = serde_json::from_str::<CardSecurityCode>(&serialized).unwrap();
    assert_eq!(deserialized.peek().peek(), "123");

    assert!(serde_json::from_str::<CardSecurityCode>("\"1\"").is_err());
}

#[test]
fn test_card_expiration_month() {
    let card_exp_month = CardExpirationMonth::try_from(9).unwrap();

    assert_eq!(*card_exp_month.peek().peek(), 9);
    assert_eq!(card_exp_month.two_digits().peek(), "09");
    assert_eq!(CardExpirationMonth::try_from(12).unwrap().two_digits().peek(), "12");

    assert!(CardExpirationMonth::try_from(0).is_err());
    assert!(CardExpirationMonth::try_from(13).is_err());

    let deserialized = serde_json::from_str::<CardExpirationMonth>("9").unwrap();
    assert_eq!(deserialized, card_exp_month);
    assert!(serde_json::from_str::<CardExpirationMonth>("13").is_err());
}

#[test]
fn test_card_expiration_year() {
    let card_exp_year = CardExpirationYear::try_from(2013).unwrap();

    assert_eq!(card_exp_year.two_digits().peek(), "13");
    assert_eq!(CardExpirationYear::try_from(2100).unwrap().two_digits().peek(), "00");

    assert!(CardExpirationYear::try_from(13).is_err());

    let serialized = serde_json::to_string(&card_exp_year).unwrap();
    assert_eq!(serialized, "2013");
    assert!(serde_json::from_str::<CardExpirationYear>("123").is_err());
}
