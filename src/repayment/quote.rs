//! Repayment quote covering every payment frequency

use serde::{Deserialize, Serialize};

use super::engine::{repayment_unchecked, MONTHS_PER_YEAR};
use crate::error::Result;
use crate::loan::{LoanParameters, PaymentFrequency};

/// Repayment amounts for one loan at each frequency, plus lifetime totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepaymentQuote {
    pub loan: LoanParameters,

    /// Amount due per the loan's selected frequency
    pub repayment: f64,

    pub weekly: f64,
    pub fortnightly: f64,
    pub monthly: f64,

    /// Sum of all monthly-basis payments over the term
    pub total_repaid: f64,

    /// Portion of `total_repaid` that is interest
    pub total_interest: f64,

    /// Principal still owed after the last payment (interest only loans)
    pub balance_at_term_end: f64,
}

impl RepaymentQuote {
    /// Amount due at a given frequency
    pub fn amount_for(&self, frequency: PaymentFrequency) -> f64 {
        match frequency {
            PaymentFrequency::Weekly => self.weekly,
            PaymentFrequency::Fortnightly => self.fortnightly,
            PaymentFrequency::Monthly => self.monthly,
        }
    }

    /// Annualised repayment on the monthly basis
    pub fn annual_total(&self) -> f64 {
        self.monthly * MONTHS_PER_YEAR as f64
    }
}

/// Build a quote for the given loan
pub fn quote(params: &LoanParameters) -> Result<RepaymentQuote> {
    params.validate()?;

    let weekly = repayment_unchecked(&params.with_frequency(PaymentFrequency::Weekly));
    let fortnightly = repayment_unchecked(&params.with_frequency(PaymentFrequency::Fortnightly));
    let monthly = repayment_unchecked(&params.with_frequency(PaymentFrequency::Monthly));

    let total_repaid = monthly * params.number_of_months() as f64;
    let (total_interest, balance_at_term_end) = if params.repayment_type.is_amortizing() {
        (total_repaid - params.principal, 0.0)
    } else {
        (total_repaid, params.principal)
    };

    let repayment = match params.payment_frequency {
        PaymentFrequency::Weekly => weekly,
        PaymentFrequency::Fortnightly => fortnightly,
        PaymentFrequency::Monthly => monthly,
    };

    Ok(RepaymentQuote {
        loan: *params,
        repayment,
        weekly,
        fortnightly,
        monthly,
        total_repaid,
        total_interest,
        balance_at_term_end,
    })
}
