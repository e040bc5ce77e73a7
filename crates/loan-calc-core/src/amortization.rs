//! Fixed-rate loan amortization.
//!
//! One closed-form annuity calculation shared by every loan calculator
//! (home, personal, car and refinance). Rates are annual percentages as typed
//! into the forms; terms are years and may be fractional. All math in
//! `rust_decimal::Decimal`.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

const PERCENT: Decimal = dec!(100);

/// Annual rates above this (in percent) are flagged in the output warnings.
const HIGH_RATE_WARNING_PERCENT: Decimal = dec!(25);

/// Terms above this (in years) are flagged in the output warnings.
const LONG_TERM_WARNING_YEARS: Decimal = dec!(40);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Inputs shared by every loan calculator panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Amount borrowed.
    pub principal: Money,
    /// Annual interest rate in percent (e.g., 6.0 = 6%).
    pub annual_rate_percent: Rate,
    /// Loan term in years.
    pub term_years: Years,
}

/// Result of a fixed-rate amortization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    /// Fixed monthly repayment.
    pub monthly_payment: Money,
    /// Interest paid over the life of the loan.
    pub total_interest: Money,
    /// Everything repaid: principal plus interest.
    pub total_amount: Money,
    /// Number of monthly periods (term × 12, not rounded).
    pub num_payments: Decimal,
    /// Periodic rate as a decimal (annual percent / 100 / 12).
    pub monthly_rate: Decimal,
}

// ---------------------------------------------------------------------------
// Core calculation
// ---------------------------------------------------------------------------

/// Fixed monthly payment, total interest and total amount repaid.
///
/// Expects `principal > 0`, `term_years > 0` and `annual_rate_percent >= 0`;
/// callers validate first (see [`LoanInput::validate`]). A zero rate takes
/// the straight-line branch instead of the annuity formula. Inputs beyond the
/// validation limits saturate at `Decimal::MAX` rather than panic.
pub fn compute_amortization(
    principal: Money,
    annual_rate_percent: Rate,
    term_years: Years,
) -> LoanResult {
    let monthly_rate = annual_rate_percent / PERCENT / MONTHS_PER_YEAR;
    let num_payments = term_years.saturating_mul(MONTHS_PER_YEAR);

    let monthly_payment = if monthly_rate.is_zero() {
        saturating_div(principal, num_payments)
    } else {
        annuity_payment(principal, monthly_rate, num_payments)
    };

    let (total_amount, total_interest) = if monthly_rate.is_zero() {
        (principal, Decimal::ZERO)
    } else {
        let total = monthly_payment.saturating_mul(num_payments);
        (total, total.saturating_sub(principal))
    };

    LoanResult {
        monthly_payment,
        total_interest,
        total_amount,
        num_payments,
        monthly_rate,
    }
}

/// P·r·(1+r)^n / ((1+r)^n − 1), evaluated as P·r / (1 − (1+r)^−n) so large
/// growth factors cannot overflow the intermediate product.
fn annuity_payment(principal: Money, monthly_rate: Decimal, num_payments: Decimal) -> Money {
    let interest_only = principal.saturating_mul(monthly_rate);
    let growth = match (Decimal::ONE + monthly_rate).checked_powd(num_payments) {
        Some(g) => g,
        // Growth beyond Decimal range: the payment converges on interest-only.
        None => return interest_only,
    };

    let discount = Decimal::ONE - Decimal::ONE / growth;
    if discount.is_zero() {
        // Rate too small to register after 28 significant digits.
        return saturating_div(principal, num_payments);
    }

    saturating_div(interest_only, discount)
}

/// Division of non-negative amounts, clamped to `Decimal::MAX` on overflow.
pub(crate) fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::MAX)
}

// ---------------------------------------------------------------------------
// Validated entry point
// ---------------------------------------------------------------------------

/// Validate a loan input and amortize it, wrapping the result in the
/// standard output envelope.
pub fn calculate_loan(input: &LoanInput) -> LoanCalcResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    input.validate()?;

    let mut warnings: Vec<String> = Vec::new();
    if input.annual_rate_percent > HIGH_RATE_WARNING_PERCENT {
        warnings.push(format!(
            "Annual rate of {}% is unusually high",
            input.annual_rate_percent
        ));
    }
    if input.term_years > LONG_TERM_WARNING_YEARS {
        warnings.push(format!("Term of {} years is unusually long", input.term_years));
    }

    let result = compute_amortization(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
    );
    tracing::debug!(
        principal = %input.principal,
        rate = %input.annual_rate_percent,
        term = %input.term_years,
        monthly_payment = %result.monthly_payment,
        "amortized loan"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity amortization",
        input,
        warnings,
        elapsed,
        result,
    ))
}
