//! Caller-side input checks.
//!
//! The amortization core assumes its inputs are already sane. Everything
//! that reads user-typed text goes through here first: blank or unparsable
//! fields become `MissingInput`, sign and size violations become
//! `InvalidRange`.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::amortization::LoanInput;
use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// Currency symbols tolerated in front of an amount.
const CURRENCY_PREFIXES: [char; 3] = ['$', '£', '€'];

/// Largest principal accepted (one quadrillion).
pub const MAX_PRINCIPAL: Decimal = dec!(1_000_000_000_000_000);

/// Largest annual rate accepted, in percent.
pub const MAX_RATE_PERCENT: Decimal = dec!(1000);

/// Longest term accepted, in years (1200 monthly periods).
pub const MAX_TERM_YEARS: Decimal = dec!(100);

const DAYS_PER_YEAR: Decimal = dec!(365);

/// Names used for each field in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLabels {
    pub principal: &'static str,
    pub rate: &'static str,
    pub term: &'static str,
}

impl Default for FieldLabels {
    fn default() -> Self {
        FieldLabels {
            principal: "principal",
            rate: "annual_rate_percent",
            term: "term_years",
        }
    }
}

/// Raw text of a loan calculator form, exactly as typed. Absent keys read
/// as blank fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanForm {
    pub principal: String,
    pub rate: String,
    pub term: String,
}

impl LoanForm {
    pub fn new(principal: &str, rate: &str, term: &str) -> Self {
        LoanForm {
            principal: principal.to_string(),
            rate: rate.to_string(),
            term: term.to_string(),
        }
    }

    /// Parse and validate using the default field names.
    pub fn parse(&self) -> LoanCalcResult<LoanInput> {
        self.parse_as(&FieldLabels::default())
    }

    /// Parse and validate, reporting errors under the given field names.
    pub fn parse_as(&self, labels: &FieldLabels) -> LoanCalcResult<LoanInput> {
        let input = LoanInput {
            principal: parse_field(labels.principal, &self.principal)?,
            annual_rate_percent: parse_field(labels.rate, &self.rate)?,
            term_years: parse_field(labels.term, &self.term)?,
        };
        input.validate_as(labels)?;
        Ok(input)
    }
}

impl LoanInput {
    pub fn validate(&self) -> LoanCalcResult<()> {
        self.validate_as(&FieldLabels::default())
    }

    /// Signs first, then the size limits that keep every intermediate of
    /// the calculation inside `Decimal` range.
    pub fn validate_as(&self, labels: &FieldLabels) -> LoanCalcResult<()> {
        validate_positive(labels.principal, self.principal)?;
        validate_positive(labels.term, self.term_years)?;
        validate_non_negative(labels.rate, self.annual_rate_percent)?;

        validate_at_most(labels.principal, self.principal, MAX_PRINCIPAL)?;
        validate_at_most(labels.rate, self.annual_rate_percent, MAX_RATE_PERCENT)?;
        validate_at_most(labels.term, self.term_years, MAX_TERM_YEARS)?;
        if self.term_years * DAYS_PER_YEAR < Decimal::ONE {
            return Err(LoanCalcError::range(labels.term, "must be at least one day"));
        }
        Ok(())
    }
}

/// Parse one numeric form field.
///
/// Accepts surrounding whitespace, a leading currency symbol, `,` or `_`
/// digit grouping and a trailing `%`. Blank or unparsable text is reported
/// as missing.
pub fn parse_field(field: &str, raw: &str) -> LoanCalcResult<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let unsigned = unsigned
        .strip_prefix(&CURRENCY_PREFIXES[..])
        .unwrap_or(unsigned)
        .trim_start();

    let cleaned: String = unsigned
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() {
        return Err(LoanCalcError::missing(field));
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|_| LoanCalcError::missing(field))?;

    Ok(if negative { -value } else { value })
}

pub fn validate_positive(field: &str, value: Decimal) -> LoanCalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(LoanCalcError::range(field, "must be greater than zero"));
    }
    Ok(())
}

pub fn validate_non_negative(field: &str, value: Decimal) -> LoanCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(LoanCalcError::range(field, "cannot be negative"));
    }
    Ok(())
}

pub fn validate_at_most(field: &str, value: Decimal, max: Decimal) -> LoanCalcResult<()> {
    if value > max {
        return Err(LoanCalcError::InvalidRange {
            field: field.to_string(),
            reason: format!("cannot exceed {}", max),
        });
    }
    Ok(())
}
