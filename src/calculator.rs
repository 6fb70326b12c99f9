//! Calculator form state
//!
//! Holds the current inputs of the repayment form and applies the same input
//! rules the form does: the loan amount is clamped to the slider bounds, typed
//! amounts ignore unparseable text and an unparseable rate reads as zero.
//! Nothing is recomputed implicitly; call [`Calculator::repayment`] after the
//! inputs change.

use log::debug;

use crate::config::CalculatorConfig;
use crate::error::{CalculatorError, Result};
use crate::format::{format_currency, format_loan_amount, parse_loan_amount, parse_rate_prefix};
use crate::loan::{LoanParameters, PaymentFrequency, RepaymentType};
use crate::repayment::{self, RepaymentQuote};

#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    loan_amount: f64,
    interest_rate: f64,
    term_years: u32,
    repayment_type: RepaymentType,
    payment_frequency: PaymentFrequency,
}

impl Calculator {
    /// Calculator populated with the default form values
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            loan_amount: config.loan_amount,
            interest_rate: config.interest_rate,
            term_years: config.term_years,
            repayment_type: config.repayment_type,
            payment_frequency: config.payment_frequency,
            config,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn loan_amount(&self) -> f64 {
        self.loan_amount
    }

    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn repayment_type(&self) -> RepaymentType {
        self.repayment_type
    }

    pub fn payment_frequency(&self) -> PaymentFrequency {
        self.payment_frequency
    }

    pub fn set_repayment_type(&mut self, repayment_type: RepaymentType) {
        self.repayment_type = repayment_type;
    }

    pub fn set_payment_frequency(&mut self, payment_frequency: PaymentFrequency) {
        self.payment_frequency = payment_frequency;
    }

    /// Select a loan term; only the configured term options are accepted
    pub fn set_term_years(&mut self, term_years: u32) -> Result<()> {
        if !self.config.term_options.contains(&term_years) {
            return Err(CalculatorError::invalid(
                "loan term",
                format!(
                    "{} years is not one of the offered terms {:?}",
                    term_years, self.config.term_options
                ),
            ));
        }
        self.term_years = term_years;
        Ok(())
    }

    /// Set the rate in percent p.a.; negative or non-finite rates are rejected
    pub fn set_interest_rate(&mut self, rate_percent: f64) -> Result<()> {
        if !rate_percent.is_finite() || rate_percent < 0.0 {
            return Err(CalculatorError::invalid(
                "interest rate",
                format!("must be a non-negative number, got {}", rate_percent),
            ));
        }
        self.interest_rate = rate_percent;
        Ok(())
    }

    /// Set the rate from typed text such as `"6.5"` or `"6.5%"`
    ///
    /// The leading number is read and trailing text ignored. Text with no
    /// leading number, or one that is not finite, reads as 0%.
    pub fn set_interest_rate_text(&mut self, text: &str) -> Result<()> {
        let rate = parse_rate_prefix(text)
            .filter(|r| r.is_finite())
            .unwrap_or(0.0);
        self.set_interest_rate(rate)
    }

    /// Set the loan amount from the slider, clamped and snapped to its bounds
    pub fn set_loan_amount(&mut self, amount: f64) {
        let clamped = self.config.loan_amount_bounds.clamp(amount);
        if clamped != amount {
            debug!("loan amount {} clamped to {}", amount, clamped);
        }
        self.loan_amount = clamped;
    }

    /// Set the loan amount from typed text such as `"450,000"`
    ///
    /// Returns `false` and keeps the current amount when the text has no
    /// leading digits. Parsed values are kept to the slider range but are not
    /// snapped to its step.
    pub fn set_loan_amount_text(&mut self, text: &str) -> bool {
        match parse_loan_amount(text) {
            Some(amount) => {
                let amount = amount as f64;
                let clamped = self.config.loan_amount_bounds.clamp_range(amount);
                if clamped != amount {
                    debug!("typed loan amount {} clamped to {}", amount, clamped);
                }
                self.loan_amount = clamped;
                true
            }
            None => {
                debug!("ignoring unparseable loan amount {:?}", text);
                false
            }
        }
    }

    /// Current inputs as loan parameters
    pub fn parameters(&self) -> Result<LoanParameters> {
        LoanParameters::new(
            self.loan_amount,
            self.interest_rate,
            self.term_years,
            self.repayment_type,
            self.payment_frequency,
        )
    }

    /// Repayment for the current inputs at the selected frequency
    pub fn repayment(&self) -> Result<f64> {
        repayment::repayment(&self.parameters()?)
    }

    /// Full quote for the current inputs
    pub fn quote(&self) -> Result<RepaymentQuote> {
        repayment::quote(&self.parameters()?)
    }

    /// Loan amount as shown in the amount field
    pub fn loan_amount_display(&self) -> String {
        format_loan_amount(self.loan_amount)
    }

    /// Repayment as shown in the result panel, e.g. `$410.19`
    pub fn repayment_display(&self) -> Result<String> {
        Ok(format_currency(self.repayment()?))
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
