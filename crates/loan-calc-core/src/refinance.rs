//! Refinance savings illustration.
//!
//! The website has no record of the borrower's existing loan, so the
//! "current" rate is assumed to sit a fixed margin above the new rate. The
//! margin defaults to [`DEFAULT_ASSUMED_RATE_DELTA_PERCENT`] and can be
//! overridden per request until a real current-rate field exists.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_amortization, LoanInput, LoanResult};
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::validation::{
    validate_at_most, validate_non_negative, FieldLabels, MAX_RATE_PERCENT,
};
use crate::LoanCalcResult;

/// Percentage points added to the new rate to stand in for the current rate.
pub const DEFAULT_ASSUMED_RATE_DELTA_PERCENT: Rate = dec!(1.5);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceInput {
    /// Outstanding balance being refinanced.
    pub balance: Money,
    /// Proposed annual rate in percent.
    pub new_rate_percent: Rate,
    /// New loan term in years.
    pub term_years: Years,
    /// Margin over the new rate assumed for the current loan; `None` uses
    /// the 1.5 point default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assumed_rate_delta_percent: Option<Rate>,
}

impl RefinanceInput {
    pub fn rate_delta(&self) -> Rate {
        self.assumed_rate_delta_percent
            .unwrap_or(DEFAULT_ASSUMED_RATE_DELTA_PERCENT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceComparison {
    /// Loan at the proposed rate.
    pub proposed: LoanResult,
    /// Same balance and term at the assumed current rate.
    pub baseline: LoanResult,
    /// Rate used for the baseline (new rate + delta).
    pub baseline_rate_percent: Rate,
    /// Reduction in monthly repayment, floored at zero.
    pub monthly_savings: Money,
    /// Reduction in total repaid over the term, floored at zero.
    pub savings: Money,
}

/// Compare the proposed loan against the assumed current-rate baseline.
pub fn compute_refinance_comparison(
    balance: Money,
    new_rate_percent: Rate,
    term_years: Years,
    assumed_rate_delta_percent: Rate,
) -> RefinanceComparison {
    let baseline_rate_percent = new_rate_percent.saturating_add(assumed_rate_delta_percent);
    let proposed = compute_amortization(balance, new_rate_percent, term_years);
    let baseline = compute_amortization(balance, baseline_rate_percent, term_years);

    let savings = baseline
        .total_amount
        .saturating_sub(proposed.total_amount)
        .max(Decimal::ZERO);
    let monthly_savings =
        baseline.monthly_payment.saturating_sub(proposed.monthly_payment).max(Decimal::ZERO);

    RefinanceComparison {
        proposed,
        baseline,
        baseline_rate_percent,
        monthly_savings,
        savings,
    }
}

/// Validate a refinance request and compare it against the baseline.
pub fn calculate_refinance(
    input: &RefinanceInput,
) -> LoanCalcResult<ComputationOutput<RefinanceComparison>> {
    let start = Instant::now();

    let labels = FieldLabels {
        principal: "balance",
        rate: "new_rate_percent",
        term: "term_years",
    };
    LoanInput {
        principal: input.balance,
        annual_rate_percent: input.new_rate_percent,
        term_years: input.term_years,
    }
    .validate_as(&labels)?;
    let delta = input.rate_delta();
    validate_non_negative("assumed_rate_delta_percent", delta)?;
    validate_at_most("assumed_rate_delta_percent", delta, MAX_RATE_PERCENT)?;

    let warnings = vec![format!(
        "Current rate assumed to be {} points above the new rate; not the borrower's actual rate",
        delta
    )];

    let comparison = compute_refinance_comparison(
        input.balance,
        input.new_rate_percent,
        input.term_years,
        delta,
    );
    tracing::debug!(
        balance = %input.balance,
        new_rate = %input.new_rate_percent,
        baseline_rate = %comparison.baseline_rate_percent,
        savings = %comparison.savings,
        "compared refinance"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance comparison against assumed current rate",
        input,
        warnings,
        elapsed,
        comparison,
    ))
}
