use std::str::FromStr;

use brainy_pockets::currency::{
    format_currency, format_currency_value, parse_amount_input, CurrencyCode, FormatOptions,
    LocaleConfig, NegativeStyle,
};
use rust_decimal::Decimal;

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

#[test]
fn home_screen_amounts_use_argentine_formatting() {
    let locale = LocaleConfig::es_ar();
    assert_eq!(format_currency(dec("12500.75"), &locale), "$12.500,75");
    assert_eq!(format_currency(dec("-500"), &locale), "-$500,00");
    assert_eq!(format_currency(dec("0"), &locale), "$0,00");
    assert_eq!(format_currency(dec("1234567.891"), &locale), "$1.234.567,89");
}

#[test]
fn other_locales_and_styles_are_available() {
    let options = FormatOptions {
        currency: CurrencyCode::new("usd"),
        negative_style: NegativeStyle::Parentheses,
    };
    assert_eq!(
        format_currency_value(dec("-1500.5"), &LocaleConfig::en_us(), &options),
        "($1,500.50)"
    );
}

#[test]
fn typed_amounts_accept_decimal_comma_and_grouping() {
    assert_eq!(parse_amount_input("12,5").unwrap(), dec("12.5"));
    assert_eq!(parse_amount_input("12.50").unwrap(), dec("12.50"));
    assert_eq!(parse_amount_input("1000").unwrap(), dec("1000"));
    assert_eq!(parse_amount_input("1.000,50").unwrap(), dec("1000.50"));
    assert_eq!(parse_amount_input("$ 2.500").unwrap(), dec("2500"));
}

#[test]
fn typed_amounts_reject_malformed_input() {
    for bad in ["", "abc", "12,345", "1,2,3", "-5", "1.00.0", "12.3.4,5"] {
        assert!(parse_amount_input(bad).is_err(), "`{}` should be rejected", bad);
    }
}
