//! The website's calculator panels.
//!
//! Home, personal and car loans differ only in how their fields are labelled;
//! all of them run the single amortization calculation. The refinance panel
//! treats its principal as the outstanding balance and adds the comparison
//! against the assumed current rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::amortization::{compute_amortization, LoanResult};
use crate::error::LoanCalcError;
use crate::format::{format_currency_with, CurrencyFormat};
use crate::refinance::{compute_refinance_comparison, RefinanceComparison};
use crate::validation::{
    validate_at_most, validate_non_negative, FieldLabels, LoanForm, MAX_RATE_PERCENT,
};
use crate::types::Rate;
use crate::LoanCalcResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPanel {
    Home,
    Personal,
    Car,
    Refinance,
}

impl LoanPanel {
    pub const ALL: [LoanPanel; 4] = [
        LoanPanel::Home,
        LoanPanel::Personal,
        LoanPanel::Car,
        LoanPanel::Refinance,
    ];

    /// Lowercase identifier accepted by `FromStr` and used in JSON.
    pub fn key(&self) -> &'static str {
        match self {
            LoanPanel::Home => "home",
            LoanPanel::Personal => "personal",
            LoanPanel::Car => "car",
            LoanPanel::Refinance => "refinance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanPanel::Home => "Home Loan",
            LoanPanel::Personal => "Personal Loan",
            LoanPanel::Car => "Car Loan",
            LoanPanel::Refinance => "Refinance",
        }
    }

    /// Field names as they appear in validation messages for this panel.
    pub fn field_labels(&self) -> FieldLabels {
        match self {
            LoanPanel::Refinance => FieldLabels {
                principal: "current loan balance",
                rate: "new interest rate",
                term: "loan term",
            },
            LoanPanel::Home | LoanPanel::Personal | LoanPanel::Car => FieldLabels {
                principal: "loan amount",
                rate: "interest rate",
                term: "loan term",
            },
        }
    }
}

impl fmt::Display for LoanPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanPanel {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "refi" {
            return Ok(LoanPanel::Refinance);
        }
        LoanPanel::ALL
            .into_iter()
            .find(|panel| panel.key() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = LoanPanel::ALL.iter().map(|p| p.key()).collect();
                LoanCalcError::InvalidRange {
                    field: "panel".into(),
                    reason: format!(
                        "unknown calculator panel '{wanted}'; expected one of {}",
                        known.join(", ")
                    ),
                }
            })
    }
}

/// Figures ready to drop into the panel's result elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayFigures {
    pub monthly_payment: String,
    pub total_interest: String,
    pub total_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelQuote {
    pub panel: LoanPanel,
    pub loan: LoanResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refinance: Option<RefinanceComparison>,
    pub display: DisplayFigures,
}

/// Parse a panel's form, run the calculation and format the figures.
///
/// The refinance panel uses `assumed_rate_delta_percent` for its baseline;
/// the other panels ignore it.
pub fn quote(
    panel: LoanPanel,
    form: &LoanForm,
    format: &CurrencyFormat,
    assumed_rate_delta_percent: Rate,
) -> LoanCalcResult<PanelQuote> {
    let input = form.parse_as(&panel.field_labels())?;
    tracing::debug!(panel = %panel, "quoting calculator panel");

    let (loan, refinance) = match panel {
        LoanPanel::Refinance => {
            validate_non_negative("assumed_rate_delta_percent", assumed_rate_delta_percent)?;
            validate_at_most(
                "assumed_rate_delta_percent",
                assumed_rate_delta_percent,
                MAX_RATE_PERCENT,
            )?;
            let comparison = compute_refinance_comparison(
                input.principal,
                input.annual_rate_percent,
                input.term_years,
                assumed_rate_delta_percent,
            );
            (comparison.proposed.clone(), Some(comparison))
        }
        LoanPanel::Home | LoanPanel::Personal | LoanPanel::Car => (
            compute_amortization(
                input.principal,
                input.annual_rate_percent,
                input.term_years,
            ),
            None,
        ),
    };

    let display = DisplayFigures {
        monthly_payment: format_currency_with(loan.monthly_payment, format),
        total_interest: format_currency_with(loan.total_interest.max(Decimal::ZERO), format),
        total_amount: format_currency_with(loan.total_amount, format),
        savings: refinance
            .as_ref()
            .map(|c| format_currency_with(c.savings, format)),
    };

    Ok(PanelQuote {
        panel,
        loan,
        refinance,
        display,
    })
}
