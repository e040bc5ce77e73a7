//! Whole-unit currency presentation for calculator results.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::{Currency, Money};

/// How amounts are rendered: symbol prefix and thousands separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub currency: Currency,
    pub symbol: String,
    pub group_separator: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::for_currency(Currency::AUD)
    }
}

impl CurrencyFormat {
    pub fn for_currency(currency: Currency) -> Self {
        CurrencyFormat {
            symbol: currency.symbol().to_string(),
            currency,
            group_separator: ",".to_string(),
        }
    }
}

/// Format an amount in Australian dollars with no cents, e.g. `$1,234,568`.
pub fn format_currency(amount: Money) -> String {
    format_currency_with(amount, &CurrencyFormat::default())
}

/// Round to the nearest whole unit (halves away from zero), group thousands
/// and prefix the symbol. Negative amounts render as `-$1,234`.
pub fn format_currency_with(amount: Money, format: &CurrencyFormat) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let digits = rounded.abs().trunc().normalize().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    if negative {
        out.push('-');
    }
    out.push_str(&format.symbol);
    out.push_str(&group_digits(&digits, &format.group_separator));
    out
}

fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rounds_up_and_groups() {
        assert_eq!(format_currency(dec!(1234567.8)), "$1,234,568");
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(2.5)), "$3");
        assert_eq!(format_currency(dec!(2.49)), "$2");
        assert_eq!(format_currency(dec!(-2.5)), "-$3");
    }

    #[test]
    fn test_small_and_exact_groups() {
        assert_eq!(format_currency(Decimal::ZERO), "$0");
        assert_eq!(format_currency(dec!(999)), "$999");
        assert_eq!(format_currency(dec!(1000)), "$1,000");
        assert_eq!(format_currency(dec!(100000)), "$100,000");
        assert_eq!(format_currency(dec!(1000000.00)), "$1,000,000");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_currency(dec!(-1234.4)), "-$1,234");
        assert_eq!(format_currency(dec!(-0.4)), "$0");
    }

    #[test]
    fn test_zero_rate_payment_formats_to_whole_dollars() {
        assert_eq!(format_currency(dec!(20000) / dec!(60)), "$333");
    }

    #[test]
    fn test_custom_format() {
        let format = CurrencyFormat {
            currency: Currency::EUR,
            symbol: "€".into(),
            group_separator: ".".into(),
        };
        assert_eq!(format_currency_with(dec!(1234567.8), &format), "€1.234.568");
        assert_eq!(
            format_currency_with(dec!(42), &CurrencyFormat::for_currency(Currency::GBP)),
            "£42"
        );
    }

    #[test]
    fn test_formats_form_text() {
        use crate::validation::parse_field;

        let amount = parse_field("amount", "$1,234.50").unwrap();
        assert_eq!(format_currency(amount), "$1,235");
        let amount = parse_field("amount", "2.5e5").unwrap();
        assert_eq!(format_currency(amount), "$250,000");
        assert!(matches!(
            parse_field("amount", "twelve"),
            Err(crate::LoanCalcError::MissingInput { .. })
        ));
    }
}
