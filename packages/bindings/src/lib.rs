use napi::Result as NapiResult;
use napi_derive::napi;
use std::str::FromStr;

use loan_calc_core::panels::{self, LoanPanel};
use loan_calc_core::refinance::DEFAULT_ASSUMED_RATE_DELTA_PERCENT;
use loan_calc_core::validation::{parse_field, LoanForm};
use loan_calc_core::CurrencyFormat;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::amortization::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_calc_core::amortization::calculate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_refinance(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::refinance::RefinanceInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        loan_calc_core::refinance::calculate_refinance(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: loan_calc_core::amortization::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loan_calc_core::schedule::build_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form panels
// ---------------------------------------------------------------------------

/// Quote a calculator panel straight from the raw form text
/// (`{"principal": "...", "rate": "...", "term": "..."}`).
#[napi]
pub fn quote_panel(panel: String, form_json: String) -> NapiResult<String> {
    let panel = LoanPanel::from_str(&panel).map_err(to_napi_error)?;
    let form: LoanForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let quote = panels::quote(
        panel,
        &form,
        &CurrencyFormat::default(),
        DEFAULT_ASSUMED_RATE_DELTA_PERCENT,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&quote).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Accepts the same text as the form fields: `"$1,234.50"`, `"2.5e5"`.
#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let amount = parse_field("amount", &amount).map_err(to_napi_error)?;
    Ok(loan_calc_core::format_currency(amount))
}
