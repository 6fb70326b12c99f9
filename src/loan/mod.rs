//! Loan parameter types and input validation

mod params;

pub use params::{term_years_from_f64, LoanParameters, PaymentFrequency, RepaymentType};
