use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::panels::LoanPanel;
use loan_calc_core::refinance::{self, RefinanceInput};
use loan_calc_core::validation::LoanForm;

use super::with_formatted;
use crate::config::Settings;
use crate::input;

/// Arguments for the refinance comparison
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RefinanceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance being refinanced
    #[arg(long)]
    pub balance: Option<String>,

    /// Proposed annual rate in percent
    #[arg(long)]
    pub new_rate: Option<String>,

    /// New loan term in years
    #[arg(long)]
    pub term: Option<String>,

    /// Points above the new rate assumed for the current loan
    #[arg(long)]
    pub rate_delta: Option<Decimal>,
}

fn refinance_input(
    args: &RefinanceArgs,
    settings: &Settings,
) -> Result<RefinanceInput, Box<dyn std::error::Error>> {
    let has_flags = args.balance.is_some() || args.new_rate.is_some() || args.term.is_some();

    let mut request = if args.input.is_none() && has_flags {
        let form = LoanForm {
            principal: args.balance.clone().unwrap_or_default(),
            rate: args.new_rate.clone().unwrap_or_default(),
            term: args.term.clone().unwrap_or_default(),
        };
        let loan = form.parse_as(&LoanPanel::Refinance.field_labels())?;
        RefinanceInput {
            balance: loan.principal,
            new_rate_percent: loan.annual_rate_percent,
            term_years: loan.term_years,
            assumed_rate_delta_percent: None,
        }
    } else {
        input::read_request(args.input.as_deref())?.ok_or(
            "--balance, --new-rate and --term (or --input <file.json>) are required",
        )?
    };

    if args.rate_delta.is_some() {
        request.assumed_rate_delta_percent = args.rate_delta;
    }
    request
        .assumed_rate_delta_percent
        .get_or_insert(settings.assumed_rate_delta_percent);
    Ok(request)
}

pub fn run_refinance(
    args: RefinanceArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = refinance_input(&args, settings)?;
    let output = refinance::calculate_refinance(&request)?;

    let c = &output.result;
    with_formatted(
        &output,
        &[
            ("monthly_payment", c.proposed.monthly_payment),
            ("baseline_monthly_payment", c.baseline.monthly_payment),
            ("monthly_savings", c.monthly_savings),
            ("total_amount", c.proposed.total_amount),
            ("savings", c.savings),
        ],
        &settings.currency,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn flags() -> RefinanceArgs {
        RefinanceArgs {
            input: None,
            balance: Some("300000".into()),
            new_rate: Some("5.5".into()),
            term: Some("25".into()),
            rate_delta: None,
        }
    }

    #[test]
    fn test_settings_delta_applies_when_not_given() {
        let settings = Settings {
            assumed_rate_delta_percent: dec!(2),
            ..Settings::default()
        };
        let request = refinance_input(&flags(), &settings).unwrap();
        assert_eq!(request.assumed_rate_delta_percent, Some(dec!(2)));
    }

    #[test]
    fn test_flag_delta_wins() {
        let args = RefinanceArgs {
            rate_delta: Some(dec!(0.5)),
            ..flags()
        };
        let request = refinance_input(&args, &Settings::default()).unwrap();
        assert_eq!(request.assumed_rate_delta_percent, Some(dec!(0.5)));
    }

    #[test]
    fn test_run_refinance_reports_savings() {
        let value = run_refinance(flags(), &Settings::default()).unwrap();
        assert_eq!(value["result"]["baseline_rate_percent"], "7.0");
        assert_eq!(value["formatted"]["monthly_payment"], "$1,842");
        assert_eq!(value["formatted"]["baseline_monthly_payment"], "$2,120");
    }
}
