use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Missing input: please fill in the {field} field")]
    MissingInput { field: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidRange { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    pub(crate) fn missing(field: &str) -> Self {
        LoanCalcError::MissingInput {
            field: field.to_string(),
        }
    }

    pub(crate) fn range(field: &str, reason: &str) -> Self {
        LoanCalcError::InvalidRange {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}
