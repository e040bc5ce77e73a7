//! Month-by-month amortization schedule.
//!
//! Walks the balance forward one period at a time using the payment from
//! [`compute_amortization`]. The last row absorbs whatever remains (a
//! fractional final period, or rounding drift) so the loan always closes at
//! exactly zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_amortization, LoanInput, MONTHS_PER_YEAR};
use crate::error::LoanCalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate, Years};
use crate::LoanCalcResult;

/// One hundred years of monthly rows.
pub const MAX_SCHEDULE_ROWS: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    /// Balance remaining after this payment.
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub rows: Vec<ScheduleRow>,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Build the schedule without validating; see [`build_schedule`].
///
/// Expects the same domain as [`compute_amortization`]; longer terms are cut
/// off at [`MAX_SCHEDULE_ROWS`] periods, with the last row clearing the balance.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_percent: Rate,
    term_years: Years,
) -> AmortizationSchedule {
    let loan = compute_amortization(principal, annual_rate_percent, term_years);
    let periods = loan
        .num_payments
        .ceil()
        .to_u32()
        .unwrap_or(MAX_SCHEDULE_ROWS)
        .min(MAX_SCHEDULE_ROWS);

    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=periods {
        let interest = balance.saturating_mul(loan.monthly_rate);
        let due = balance.saturating_add(interest);
        let payment = if month == periods {
            due
        } else {
            loan.monthly_payment.min(due)
        };
        let principal_paid = payment - interest;
        balance -= principal_paid;
        if month == periods || balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        total_paid = total_paid.saturating_add(payment);
        total_interest = total_interest.saturating_add(interest);
        rows.push(ScheduleRow {
            month,
            payment,
            interest,
            principal: principal_paid,
            balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    AmortizationSchedule {
        monthly_payment: loan.monthly_payment,
        rows,
        total_paid,
        total_interest,
    }
}

/// Validate a loan input and lay out its repayment schedule.
pub fn build_schedule(
    input: &LoanInput,
) -> LoanCalcResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    input.validate()?;

    let months = input.term_years.saturating_mul(MONTHS_PER_YEAR);
    if months.ceil() > Decimal::from(MAX_SCHEDULE_ROWS) {
        return Err(LoanCalcError::InvalidRange {
            field: "term_years".into(),
            reason: format!("Schedules are limited to {MAX_SCHEDULE_ROWS} monthly rows"),
        });
    }

    let mut warnings: Vec<String> = Vec::new();
    if !months.fract().is_zero() {
        warnings.push(
            "Term is not a whole number of months; the final payment is adjusted".to_string(),
        );
    }

    let schedule = amortization_schedule(
        input.principal,
        input.annual_rate_percent,
        input.term_years,
    );
    tracing::debug!(rows = schedule.rows.len(), "built amortization schedule");

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization schedule",
        input,
        warnings,
        elapsed,
        schedule,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(principal: Decimal, rate: Decimal, term: Decimal) -> LoanInput {
        LoanInput {
            principal,
            annual_rate_percent: rate,
            term_years: term,
        }
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let s = amortization_schedule(dec!(250_000), dec!(5.75), dec!(30));
        assert_eq!(s.rows.len(), 360);
        let last = s.rows.last().unwrap();
        assert_eq!(last.balance, Decimal::ZERO);

        let repaid: Decimal = s.rows.iter().map(|r| r.principal).sum();
        assert!((repaid - dec!(250_000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_totals_match_closed_form() {
        let loan = compute_amortization(dec!(250_000), dec!(5.75), dec!(30));
        let s = amortization_schedule(dec!(250_000), dec!(5.75), dec!(30));
        assert!((s.total_paid - loan.total_amount).abs() < dec!(0.01));
        assert!((s.total_interest - loan.total_interest).abs() < dec!(0.01));
    }

    #[test]
    fn test_first_row_split() {
        let s = amortization_schedule(dec!(500_000), dec!(6), dec!(30));
        let first = &s.rows[0];
        assert_eq!(first.month, 1);
        // 500,000 × 0.005
        assert_eq!(first.interest, dec!(2500));
        assert!((first.principal - dec!(497.75)).abs() < dec!(0.01));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let s = amortization_schedule(dec!(12_000), Decimal::ZERO, dec!(1));
        assert_eq!(s.rows.len(), 12);
        assert!(s.rows.iter().all(|r| r.interest.is_zero()));
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.rows[0].payment, dec!(1000));
        assert_eq!(s.rows[11].balance, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_term_adds_short_final_row() {
        let out = build_schedule(&input(dec!(10_000), dec!(8), dec!(1.04))).unwrap();
        let s = &out.result;
        assert_eq!(s.rows.len(), 13);
        assert_eq!(out.warnings.len(), 1);
        let last = s.rows.last().unwrap();
        assert!(last.payment < s.monthly_payment);
        assert_eq!(last.balance, Decimal::ZERO);
    }

    #[test]
    fn test_build_schedule_limits_rows() {
        let out = build_schedule(&input(dec!(10_000), dec!(5), dec!(100))).unwrap();
        assert_eq!(out.result.rows.len(), MAX_SCHEDULE_ROWS as usize);

        let err = build_schedule(&input(dec!(10_000), dec!(5), dec!(101)));
        assert!(matches!(err, Err(LoanCalcError::InvalidRange { .. })));
    }

    #[test]
    fn test_unvalidated_huge_term_is_capped() {
        let s = amortization_schedule(
            dec!(500_000),
            dec!(6),
            dec!(10_000_000_000_000_000_000_000_000_000),
        );
        assert_eq!(s.rows.len(), MAX_SCHEDULE_ROWS as usize);
        assert_eq!(s.rows.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_build_schedule_validates() {
        let err = build_schedule(&input(dec!(10_000), dec!(5), Decimal::ZERO));
        assert!(matches!(err, Err(LoanCalcError::InvalidRange { .. })));
    }
}
