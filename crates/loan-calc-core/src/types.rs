use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates as entered on the calculator forms, in percent (6.0 = 6%).
pub type Rate = Decimal;

/// Loan terms in years. Fractional years are allowed.
pub type Years = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    AUD,
    NZD,
    USD,
    CAD,
    GBP,
    EUR,
    Other(String),
}

impl Currency {
    /// Symbol shown in front of formatted amounts.
    pub fn symbol(&self) -> &str {
        match self {
            Currency::AUD | Currency::NZD | Currency::USD | Currency::CAD => "$",
            Currency::GBP => "£",
            Currency::EUR => "€",
            Currency::Other(_) => "",
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for warning in &warnings {
        tracing::warn!(methodology, "{warning}");
    }
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_currency_is_aud() {
        assert_eq!(Currency::default(), Currency::AUD);
        assert_eq!(Currency::default().symbol(), "$");
    }

    #[test]
    fn test_with_metadata_records_assumptions() {
        let out = with_metadata("test", &dec!(1.5), vec!["w".into()], 7, 42u32);
        assert_eq!(out.result, 42);
        assert_eq!(out.methodology, "test");
        assert_eq!(out.warnings, vec!["w".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.assumptions, serde_json::json!("1.5"));
    }
}
