pub mod amortization;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

#[cfg(feature = "refinance")]
pub mod refinance;

#[cfg(feature = "refinance")]
pub mod panels;

#[cfg(feature = "schedule")]
pub mod schedule;

pub use amortization::{compute_amortization, LoanInput, LoanResult};
pub use error::LoanCalcError;
pub use format::{format_currency, format_currency_with, CurrencyFormat};
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
