use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};

use loan_calc_core::validation::parse_field;
use loan_calc_core::{format_currency_with, Money};

use crate::config::Settings;

/// Arguments for currency formatting
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct FormatArgs {
    /// Amount to format, e.g. 1234567.8
    #[arg(long)]
    pub amount: String,
}

#[derive(Serialize)]
struct FormattedAmount {
    amount: Money,
    formatted: String,
}

pub fn run_format(args: FormatArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let amount = parse_field("amount", &args.amount)?;
    let result = FormattedAmount {
        amount,
        formatted: format_currency_with(amount, &settings.currency),
    };
    Ok(json!({ "result": result }))
}
