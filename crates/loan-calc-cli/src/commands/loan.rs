use clap::Args;
use serde_json::Value;

use loan_calc_core::amortization::{self, LoanInput};
use loan_calc_core::panels::LoanPanel;
use loan_calc_core::schedule;
use loan_calc_core::validation::{FieldLabels, LoanForm};

use super::with_formatted;
use crate::config::Settings;
use crate::input;

/// Arguments shared by the home, personal, car and schedule commands
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed, e.g. 500000 or "$500,000"
    #[arg(long, alias = "amount")]
    pub principal: Option<String>,

    /// Annual interest rate in percent, e.g. 6.0
    #[arg(long)]
    pub rate: Option<String>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<String>,
}

impl LoanArgs {
    fn has_flags(&self) -> bool {
        self.principal.is_some() || self.rate.is_some() || self.term.is_some()
    }

    fn form(&self) -> LoanForm {
        LoanForm {
            principal: self.principal.clone().unwrap_or_default(),
            rate: self.rate.clone().unwrap_or_default(),
            term: self.term.clone().unwrap_or_default(),
        }
    }
}

fn loan_input(
    args: &LoanArgs,
    labels: &FieldLabels,
) -> Result<LoanInput, Box<dyn std::error::Error>> {
    if args.input.is_none() && args.has_flags() {
        return Ok(args.form().parse_as(labels)?);
    }
    input::read_request(args.input.as_deref())?
        .ok_or_else(|| "--principal, --rate and --term (or --input <file.json>) are required".into())
}

pub fn run_loan(
    panel: LoanPanel,
    args: LoanArgs,
    settings: &Settings,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = loan_input(&args, &panel.field_labels())?;
    tracing::info!(panel = %panel, "Calculating repayments");
    let output = amortization::calculate_loan(&request)?;

    let r = &output.result;
    with_formatted(
        &output,
        &[
            ("monthly_payment", r.monthly_payment),
            ("total_interest", r.total_interest),
            ("total_amount", r.total_amount),
        ],
        &settings.currency,
    )
}

pub fn run_schedule(args: LoanArgs, settings: &Settings) -> Result<Value, Box<dyn std::error::Error>> {
    let request = loan_input(&args, &FieldLabels::default())?;
    let output = schedule::build_schedule(&request)?;

    let s = &output.result;
    with_formatted(
        &output,
        &[
            ("monthly_payment", s.monthly_payment),
            ("total_paid", s.total_paid),
            ("total_interest", s.total_interest),
        ],
        &settings.currency,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flags(principal: &str, rate: &str, term: &str) -> LoanArgs {
        LoanArgs {
            input: None,
            principal: Some(principal.into()),
            rate: Some(rate.into()),
            term: Some(term.into()),
        }
    }

    #[test]
    fn test_run_home_loan_from_flags() {
        let value = run_loan(LoanPanel::Home, flags("500000", "6", "30"), &Settings::default())
            .unwrap();
        assert_eq!(value["formatted"]["monthly_payment"], "$2,998");
        assert_eq!(value["methodology"], "Fixed-rate annuity amortization");
    }

    #[test]
    fn test_missing_flag_uses_panel_label() {
        let args = LoanArgs {
            term: None,
            ..flags("30000", "7", "")
        };
        let err = run_loan(LoanPanel::Car, args, &Settings::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing input: please fill in the loan term field"
        );
    }

    #[test]
    fn test_run_schedule_from_flags() {
        let value = run_schedule(flags("12000", "0", "1"), &Settings::default()).unwrap();
        assert_eq!(value["result"]["rows"].as_array().unwrap().len(), 12);
        assert_eq!(value["formatted"]["total_interest"], "$0");
    }
}
