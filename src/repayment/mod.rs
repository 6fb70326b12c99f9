//! Repayment calculation engine
//!
//! Pure functions only. Callers decide when to recompute, typically once per
//! changed input.

mod engine;
mod quote;
mod schedule;

pub use engine::{
    compute, interest_only_payment, monthly_amortizing_payment, repayment, scale_monthly,
    MONTHS_PER_YEAR,
};
pub use quote::{quote, RepaymentQuote};
pub use schedule::{amortization_schedule, AmortizationSchedule, ScheduleRow, ScheduleSummary};
