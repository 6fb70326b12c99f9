//! Calculator configuration: form defaults and input bounds
//!
//! Loaded from JSON (missing fields fall back to the defaults below) and
//! optionally overridden from environment variables:
//!   LOAN_AMOUNT, INTEREST_RATE, LOAN_TERM, REPAYMENT_TYPE, PAYMENT_FREQUENCY

use std::env;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{CalculatorError, Result};
use crate::loan::{PaymentFrequency, RepaymentType};

/// Default loan amount on the form ($300,000)
pub const DEFAULT_LOAN_AMOUNT: f64 = 300_000.0;

/// Default interest rate on the form (5.89% p.a.)
pub const DEFAULT_INTEREST_RATE: f64 = 5.89;

/// Default loan term in years
pub const DEFAULT_TERM_YEARS: u32 = 30;

/// Loan amount slider bounds and step
pub const MIN_LOAN_AMOUNT: f64 = 50_000.0;
pub const MAX_LOAN_AMOUNT: f64 = 1_000_000.0;
pub const LOAN_AMOUNT_STEP: f64 = 5_000.0;

/// Loan terms offered by the term selector
pub const TERM_OPTIONS: [u32; 5] = [10, 15, 20, 25, 30];

/// Bounds for the loan amount slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanAmountBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for LoanAmountBounds {
    fn default() -> Self {
        Self {
            min: MIN_LOAN_AMOUNT,
            max: MAX_LOAN_AMOUNT,
            step: LOAN_AMOUNT_STEP,
        }
    }
}

impl LoanAmountBounds {
    /// Clamp to [min, max] and snap to the nearest step above `min`
    pub fn clamp(&self, amount: f64) -> f64 {
        if amount.is_nan() {
            return self.min;
        }
        let clamped = amount.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Clamp to [min, max] without snapping to the step
    pub fn clamp_range(&self, amount: f64) -> f64 {
        if amount.is_nan() {
            return self.min;
        }
        amount.clamp(self.min, self.max)
    }

    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Configuration for the calculator form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub loan_amount: f64,
    pub interest_rate: f64,
    pub term_years: u32,
    pub repayment_type: RepaymentType,
    pub payment_frequency: PaymentFrequency,
    pub loan_amount_bounds: LoanAmountBounds,
    pub term_options: Vec<u32>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            loan_amount: DEFAULT_LOAN_AMOUNT,
            interest_rate: DEFAULT_INTEREST_RATE,
            term_years: DEFAULT_TERM_YEARS,
            repayment_type: RepaymentType::PrincipalAndInterest,
            payment_frequency: PaymentFrequency::Weekly,
            loan_amount_bounds: LoanAmountBounds::default(),
            term_options: TERM_OPTIONS.to_vec(),
        }
    }
}

impl CalculatorConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading calculator config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup; unparseable values are ignored with a warning
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_override(&lookup, "LOAN_AMOUNT") {
            self.loan_amount = v;
        }
        if let Some(v) = parse_override(&lookup, "INTEREST_RATE") {
            self.interest_rate = v;
        }
        if let Some(v) = parse_override(&lookup, "LOAN_TERM") {
            self.term_years = v;
        }
        if let Some(v) = parse_override(&lookup, "REPAYMENT_TYPE") {
            self.repayment_type = v;
        }
        if let Some(v) = parse_override(&lookup, "PAYMENT_FREQUENCY") {
            self.payment_frequency = v;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check bounds are coherent and the defaults fall inside them
    pub fn validate(&self) -> Result<()> {
        let bounds = &self.loan_amount_bounds;
        if !(bounds.min > 0.0 && bounds.min < bounds.max) {
            return Err(CalculatorError::Config(format!(
                "loan amount bounds must satisfy 0 < min < max, got {}..{}",
                bounds.min, bounds.max
            )));
        }
        if !(bounds.step > 0.0 && bounds.step.is_finite()) {
            return Err(CalculatorError::Config(format!(
                "loan amount step must be positive, got {}",
                bounds.step
            )));
        }
        if !bounds.contains(self.loan_amount) {
            return Err(CalculatorError::Config(format!(
                "default loan amount {} is outside {}..{}",
                self.loan_amount, bounds.min, bounds.max
            )));
        }
        if !(self.interest_rate.is_finite() && self.interest_rate >= 0.0) {
            return Err(CalculatorError::Config(format!(
                "default interest rate must be a non-negative number, got {}",
                self.interest_rate
            )));
        }
        if self.term_options.is_empty() || self.term_options.contains(&0) {
            return Err(CalculatorError::Config(
                "term options must be a non-empty list of positive years".to_string(),
            ));
        }
        if !self.term_options.contains(&self.term_years) {
            return Err(CalculatorError::Config(format!(
                "default term {} is not one of the term options {:?}",
                self.term_years, self.term_options
            )));
        }
        Ok(())
    }
}

fn parse_override<F, T>(lookup: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => {
            debug!("{} overridden from environment: {}", key, raw.trim());
            Some(v)
        }
        Err(_) => {
            warn!("ignoring unparseable {}={:?}", key, raw);
            None
        }
    }
}
