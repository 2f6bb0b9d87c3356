//! Money formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as `$1,234.50`.
///
/// Two decimals, half-up rounding, comma-grouped thousands. Negative
/// amounts get a leading minus (`-$12.00`).
///
/// # Examples
///
/// ```
/// use paystub_engine::render::format_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::new(5000, 0)), "$5,000.00");
/// assert_eq!(format_money(Decimal::ZERO), "$0.00");
/// assert_eq!(format_money(Decimal::new(12345, 1)), "$1,234.50");
/// ```
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_examples() {
        assert_eq!(format_money(dec("5000.0")), "$5,000.00");
        assert_eq!(format_money(dec("0.0")), "$0.00");
        assert_eq!(format_money(dec("1234.5")), "$1,234.50");
    }

    #[test]
    fn test_small_amounts_have_no_separator() {
        assert_eq!(format_money(dec("0.07")), "$0.07");
        assert_eq!(format_money(dec("999.99")), "$999.99");
    }

    #[test]
    fn test_large_amounts_group_every_three_digits() {
        assert_eq!(format_money(dec("1234567.891")), "$1,234,567.89");
        assert_eq!(format_money(dec("100000")), "$100,000.00");
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(format_money(dec("2.005")), "$2.01");
        assert_eq!(format_money(dec("2.004")), "$2.00");
        assert_eq!(format_money(dec("999.995")), "$1,000.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_money(dec("-1234.5")), "-$1,234.50");
        assert_eq!(format_money(dec("-0.001")), "$0.00");
    }

    proptest! {
        #[test]
        fn prop_format_shape(cents in 0i64..10_000_000_000) {
            let formatted = format_money(Decimal::new(cents, 2));
            prop_assert!(formatted.starts_with('$'));

            let (whole, frac) = formatted[1..].split_once('.').unwrap();
            prop_assert_eq!(frac.len(), 2);
            for (i, group) in whole.split(',').enumerate() {
                if i == 0 {
                    prop_assert!((1..=3).contains(&group.len()));
                } else {
                    prop_assert_eq!(group.len(), 3);
                }
            }

            let digits: String = formatted[1..].chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(Decimal::from_str(&digits).unwrap(), Decimal::new(cents, 2));
        }
    }
}
