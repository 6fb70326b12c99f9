//! Error types for the repayment calculator

use thiserror::Error;

/// Errors raised by the engine, the calculator form and configuration loading
#[derive(Debug, Error)]
pub enum CalculatorError {
    /// A loan parameter is outside its declared domain
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CalculatorError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalculatorError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by out-of-domain loan parameters
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CalculatorError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
