//! Loan parameters as collected by the calculator form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};

/// How each repayment is applied to the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentType {
    /// Each payment reduces principal and covers accrued interest
    #[serde(rename = "principal_interest")]
    PrincipalAndInterest,
    /// Each payment covers accrued interest only
    InterestOnly,
}

impl RepaymentType {
    pub const ALL: [RepaymentType; 2] = [
        RepaymentType::PrincipalAndInterest,
        RepaymentType::InterestOnly,
    ];

    /// Wire name used by the form and the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentType::PrincipalAndInterest => "principal_interest",
            RepaymentType::InterestOnly => "interest_only",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentType::PrincipalAndInterest => "Principal & Interest",
            RepaymentType::InterestOnly => "Interest Only",
        }
    }

    pub fn is_amortizing(&self) -> bool {
        matches!(self, RepaymentType::PrincipalAndInterest)
    }
}

impl Default for RepaymentType {
    fn default() -> Self {
        RepaymentType::PrincipalAndInterest
    }
}

impl fmt::Display for RepaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentType {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "principal_interest" | "principal_and_interest" | "p&i" | "pi" => {
                Ok(RepaymentType::PrincipalAndInterest)
            }
            "interest_only" | "io" => Ok(RepaymentType::InterestOnly),
            other => Err(CalculatorError::invalid(
                "repayment type",
                format!("unknown value '{}', expected principal_interest or interest_only", other),
            )),
        }
    }
}

/// Cadence at which repayments are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    Weekly,
    Fortnightly,
    Monthly,
}

impl PaymentFrequency {
    /// Order matches the frequency buttons on the form
    pub const ALL: [PaymentFrequency; 3] = [
        PaymentFrequency::Weekly,
        PaymentFrequency::Fortnightly,
        PaymentFrequency::Monthly,
    ];

    /// Number of payments in a year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Fortnightly => 26,
            PaymentFrequency::Monthly => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "weekly",
            PaymentFrequency::Fortnightly => "fortnightly",
            PaymentFrequency::Monthly => "monthly",
        }
    }

    /// Period noun, e.g. "week" in "per week"
    pub fn period_noun(&self) -> &'static str {
        match self {
            PaymentFrequency::Weekly => "week",
            PaymentFrequency::Fortnightly => "fortnight",
            PaymentFrequency::Monthly => "month",
        }
    }
}

impl Default for PaymentFrequency {
    fn default() -> Self {
        PaymentFrequency::Weekly
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentFrequency {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(PaymentFrequency::Weekly),
            "fortnightly" | "fortnight" => Ok(PaymentFrequency::Fortnightly),
            "monthly" | "month" => Ok(PaymentFrequency::Monthly),
            other => Err(CalculatorError::invalid(
                "payment frequency",
                format!("unknown value '{}', expected weekly, fortnightly or monthly", other),
            )),
        }
    }
}

/// Inputs to a single repayment calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed, in currency units
    pub principal: f64,

    /// Annual rate in percent, e.g. 5.89 for 5.89% p.a.
    pub annual_rate_percent: f64,

    /// Loan term in whole years
    pub term_years: u32,

    pub repayment_type: RepaymentType,

    pub payment_frequency: PaymentFrequency,
}

impl LoanParameters {
    /// Create validated loan parameters
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
        repayment_type: RepaymentType,
        payment_frequency: PaymentFrequency,
    ) -> Result<Self> {
        let params = Self {
            principal,
            annual_rate_percent,
            term_years,
            repayment_type,
            payment_frequency,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every numeric field against its domain
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_finite() {
            return Err(CalculatorError::invalid(
                "principal",
                format!("must be a finite number, got {}", self.principal),
            ));
        }
        if self.principal <= 0.0 {
            return Err(CalculatorError::invalid(
                "principal",
                format!("must be greater than zero, got {}", self.principal),
            ));
        }
        if !self.annual_rate_percent.is_finite() {
            return Err(CalculatorError::invalid(
                "interest rate",
                format!("must be a finite number, got {}", self.annual_rate_percent),
            ));
        }
        if self.annual_rate_percent < 0.0 {
            return Err(CalculatorError::invalid(
                "interest rate",
                format!("must not be negative, got {}", self.annual_rate_percent),
            ));
        }
        if self.term_years == 0 {
            return Err(CalculatorError::invalid(
                "loan term",
                "must be at least one year",
            ));
        }
        // month count is used as an i32 exponent
        if self.term_years > i32::MAX as u32 / 12 {
            return Err(CalculatorError::invalid(
                "loan term",
                format!("is too large, got {} years", self.term_years),
            ));
        }
        Ok(())
    }

    /// Annual rate as a decimal fraction
    pub fn annual_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0
    }

    /// Number of monthly periods over the term
    pub fn number_of_months(&self) -> u32 {
        self.term_years * 12
    }

    /// Same loan at a different frequency
    pub fn with_frequency(&self, payment_frequency: PaymentFrequency) -> Self {
        Self {
            payment_frequency,
            ..*self
        }
    }
}

/// Convert a real-valued term into whole years, rejecting zero and fractions
pub fn term_years_from_f64(value: f64) -> Result<u32> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalculatorError::invalid(
            "loan term",
            format!("must be a positive whole number of years, got {}", value),
        ));
    }
    if value.fract() != 0.0 {
        return Err(CalculatorError::invalid(
            "loan term",
            format!("must be a whole number of years, got {}", value),
        ));
    }
    if value > u32::MAX as f64 {
        return Err(CalculatorError::invalid(
            "loan term",
            format!("is too large, got {}", value),
        ));
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_loan() -> LoanParameters {
        LoanParameters::new(
            300_000.0,
            5.89,
            30,
            RepaymentType::PrincipalAndInterest,
            PaymentFrequency::Weekly,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        for principal in [-100.0, 0.0, f64::NAN, f64::INFINITY] {
            let result = LoanParameters::new(
                principal,
                5.0,
                30,
                RepaymentType::PrincipalAndInterest,
                PaymentFrequency::Monthly,
            );
            assert!(result.unwrap_err().is_invalid_input(), "principal {}", principal);
        }
    }

    #[test]
    fn test_rejects_negative_rate_and_zero_term() {
        let mut loan = default_loan();
        loan.annual_rate_percent = -0.5;
        assert!(loan.validate().is_err());

        let mut loan = default_loan();
        loan.term_years = 0;
        assert!(loan.validate().is_err());

        let mut loan = default_loan();
        loan.annual_rate_percent = 0.0;
        assert!(loan.validate().is_ok());
    }

    #[test]
    fn test_term_years_from_f64() {
        assert_eq!(term_years_from_f64(25.0).unwrap(), 25);
        assert!(term_years_from_f64(25.5).is_err());
        assert!(term_years_from_f64(0.0).is_err());
        assert!(term_years_from_f64(-10.0).is_err());
        assert!(term_years_from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(
            "principal_interest".parse::<RepaymentType>().unwrap(),
            RepaymentType::PrincipalAndInterest
        );
        assert_eq!(
            "Interest-Only".parse::<RepaymentType>().unwrap(),
            RepaymentType::InterestOnly
        );
        assert!("balloon".parse::<RepaymentType>().is_err());

        assert_eq!(
            "Fortnightly".parse::<PaymentFrequency>().unwrap(),
            PaymentFrequency::Fortnightly
        );
        assert!("daily".parse::<PaymentFrequency>().is_err());
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&default_loan()).unwrap();
        assert!(json.contains("\"repayment_type\":\"principal_interest\""));
        assert!(json.contains("\"payment_frequency\":\"weekly\""));

        let io: RepaymentType = serde_json::from_str("\"interest_only\"").unwrap();
        assert_eq!(io, RepaymentType::InterestOnly);
    }

    #[test]
    fn test_derived_values() {
        let loan = default_loan();
        assert!((loan.annual_rate() - 0.0589).abs() < 1e-12);
        assert_eq!(loan.number_of_months(), 360);
        let monthly = loan.with_frequency(PaymentFrequency::Monthly);
        assert_eq!(monthly.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(monthly.principal, loan.principal);
        assert!(RepaymentType::PrincipalAndInterest.is_amortizing());
        assert!(!RepaymentType::InterestOnly.is_amortizing());
    }
}
