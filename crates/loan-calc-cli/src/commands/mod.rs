pub mod format;
pub mod loan;
pub mod refinance;

use loan_calc_core::{format_currency_with, CurrencyFormat, Money};
use serde::Serialize;
use serde_json::{Map, Value};

/// Serialise a computation envelope and attach a `formatted` object holding
/// display strings for the key figures.
pub fn with_formatted(
    output: &impl Serialize,
    figures: &[(&str, Money)],
    format: &CurrencyFormat,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut value = serde_json::to_value(output)?;
    let formatted: Map<String, Value> = figures
        .iter()
        .map(|(key, amount)| {
            (
                key.to_string(),
                Value::String(format_currency_with(*amount, format)),
            )
        })
        .collect();

    if let Value::Object(map) = &mut value {
        map.insert("formatted".into(), Value::Object(formatted));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_with_formatted_adds_display_strings() {
        let value = with_formatted(
            &json!({"result": {"monthly_payment": "2997.75"}}),
            &[("monthly_payment", dec!(2997.75)), ("total_amount", dec!(1079190.95))],
            &CurrencyFormat::default(),
        )
        .unwrap();
        assert_eq!(
            value["formatted"],
            json!({"monthly_payment": "$2,998", "total_amount": "$1,079,191"})
        );
        assert_eq!(value["result"]["monthly_payment"], "2997.75");
    }
}
