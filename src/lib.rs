//! Home Loan Calculator - repayment engine for home loan estimates
//!
//! This library provides:
//! - Periodic repayment calculation (principal & interest, interest only)
//! - Weekly, fortnightly and monthly figures on a common monthly basis
//! - Monthly amortization schedules
//! - Calculator form state with input clamping and parsing
//! - Rate comparison tables and en-AU currency formatting

pub mod calculator;
pub mod comparison;
pub mod config;
pub mod error;
pub mod format;
pub mod loan;
pub mod repayment;

// Re-export commonly used types
pub use calculator::Calculator;
pub use comparison::ComparisonTable;
pub use config::CalculatorConfig;
pub use error::{CalculatorError, Result};
pub use loan::{LoanParameters, PaymentFrequency, RepaymentType};
pub use repayment::{amortization_schedule, compute, quote, AmortizationSchedule, RepaymentQuote};
