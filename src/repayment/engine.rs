//! Periodic repayment calculation
//!
//! All amounts are derived from a monthly basis. Principal & interest loans
//! amortize with monthly compounding and the monthly payment is rescaled
//! linearly to weekly or fortnightly (`monthly * 12 / 52`, `monthly * 12 / 26`).
//! Weekly and fortnightly figures are therefore not true weekly/fortnightly
//! amortization schedules.

use log::{debug, trace};

use crate::error::Result;
use crate::loan::{LoanParameters, PaymentFrequency, RepaymentType};

/// Months in a year; the compounding basis for every calculation
pub const MONTHS_PER_YEAR: u32 = 12;

/// Calculate the repayment due per `payment_frequency`
///
/// # Arguments
/// * `principal` - Amount borrowed (> 0)
/// * `annual_rate_percent` - Annual rate in percent, e.g. 5.89 (>= 0)
/// * `term_years` - Loan term in whole years (> 0)
/// * `repayment_type` - Principal & interest or interest only
/// * `payment_frequency` - Weekly, fortnightly or monthly
///
/// # Returns
/// * `Result<f64>` - Amount due each period, or `InvalidInput` for out-of-domain parameters
pub fn compute(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    repayment_type: RepaymentType,
    payment_frequency: PaymentFrequency,
) -> Result<f64> {
    let params = LoanParameters::new(
        principal,
        annual_rate_percent,
        term_years,
        repayment_type,
        payment_frequency,
    )?;
    Ok(repayment_unchecked(&params))
}

/// Calculate the repayment for a set of loan parameters
pub fn repayment(params: &LoanParameters) -> Result<f64> {
    params.validate()?;
    Ok(repayment_unchecked(params))
}

/// Repayment for parameters that have already been validated
pub(crate) fn repayment_unchecked(params: &LoanParameters) -> f64 {
    let annual_rate = params.annual_rate();
    let amount = match params.repayment_type {
        RepaymentType::InterestOnly => {
            interest_only_payment(params.principal, annual_rate, params.payment_frequency)
        }
        RepaymentType::PrincipalAndInterest => {
            let monthly = monthly_amortizing_payment(
                params.principal,
                annual_rate,
                params.number_of_months(),
            );
            scale_monthly(monthly, params.payment_frequency)
        }
    };

    debug!(
        "repayment {} {} on {:.2} at {}% over {}y = {:.6}",
        params.repayment_type,
        params.payment_frequency,
        params.principal,
        params.annual_rate_percent,
        params.term_years,
        amount
    );
    amount
}

/// Simple pro-rated interest with no principal reduction
pub fn interest_only_payment(principal: f64, annual_rate: f64, frequency: PaymentFrequency) -> f64 {
    principal * annual_rate / frequency.periods_per_year() as f64
}

/// Level monthly payment that amortizes `principal` over `months` payments
///
/// A zero rate is the limiting case of the annuity formula, `principal / months`.
/// `(1 + r)^n - 1` is evaluated as `expm1(n * ln1p(r))` so rates too small to
/// move `1 + r` still converge to that limit instead of cancelling to zero.
pub fn monthly_amortizing_payment(principal: f64, annual_rate: f64, months: u32) -> f64 {
    let n = months as f64;
    if annual_rate == 0.0 {
        trace!("zero rate, straight-line amortization over {} months", months);
        return principal / n;
    }

    let monthly_rate = annual_rate / MONTHS_PER_YEAR as f64;
    let growth_less_one = (n * monthly_rate.ln_1p()).exp_m1();
    let growth = 1.0 + growth_less_one;
    principal * (monthly_rate / growth_less_one) * growth
}

/// Rescale a monthly amount to the requested frequency
pub fn scale_monthly(monthly: f64, frequency: PaymentFrequency) -> f64 {
    match frequency {
        PaymentFrequency::Monthly => monthly,
        other => monthly * MONTHS_PER_YEAR as f64 / other.periods_per_year() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PI: RepaymentType = RepaymentType::PrincipalAndInterest;
    const IO: RepaymentType = RepaymentType::InterestOnly;

    #[test]
    fn test_principal_and_interest_monthly() {
        let monthly = compute(300_000.0, 5.89, 30, PI, PaymentFrequency::Monthly).unwrap();
        assert_abs_diff_eq!(monthly, 1777.49, epsilon = 0.005);
    }

    #[test]
    fn test_principal_and_interest_weekly_is_rescaled_monthly() {
        let monthly = compute(300_000.0, 5.89, 30, PI, PaymentFrequency::Monthly).unwrap();
        let weekly = compute(300_000.0, 5.89, 30, PI, PaymentFrequency::Weekly).unwrap();
        let fortnightly = compute(300_000.0, 5.89, 30, PI, PaymentFrequency::Fortnightly).unwrap();

        assert_eq!(weekly, monthly * 12.0 / 52.0);
        assert_eq!(fortnightly, monthly * 12.0 / 26.0);
        assert_abs_diff_eq!(weekly, 410.19, epsilon = 0.005);
    }

    #[test]
    fn test_interest_only() {
        let weekly = compute(300_000.0, 5.89, 30, IO, PaymentFrequency::Weekly).unwrap();
        let fortnightly = compute(300_000.0, 5.89, 30, IO, PaymentFrequency::Fortnightly).unwrap();
        let monthly = compute(300_000.0, 5.89, 30, IO, PaymentFrequency::Monthly).unwrap();

        assert_eq!(weekly, 300_000.0 * (5.89 / 100.0) / 52.0);
        assert_abs_diff_eq!(weekly, 339.81, epsilon = 0.005);
        assert_abs_diff_eq!(fortnightly, 679.62, epsilon = 0.005);
        assert_abs_diff_eq!(monthly, 1472.50, epsilon = 0.005);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let monthly = compute(300_000.0, 0.0, 30, PI, PaymentFrequency::Monthly).unwrap();
        assert_eq!(monthly, 300_000.0 / 360.0);
        assert!(monthly.is_finite());

        let weekly = compute(300_000.0, 0.0, 30, PI, PaymentFrequency::Weekly).unwrap();
        assert_eq!(weekly, (300_000.0 / 360.0) * 12.0 / 52.0);

        let interest_only = compute(300_000.0, 0.0, 30, IO, PaymentFrequency::Weekly).unwrap();
        assert_eq!(interest_only, 0.0);
    }

    #[test]
    fn test_small_rate_approaches_straight_line() {
        let tiny = monthly_amortizing_payment(300_000.0, 1e-6, 360);
        let zero = monthly_amortizing_payment(300_000.0, 0.0, 360);
        assert!(tiny > zero);
        assert_abs_diff_eq!(tiny, zero, epsilon = 0.1);
    }

    #[test]
    fn test_vanishing_rate_stays_finite() {
        let straight_line = 300_000.0 / 360.0;
        for rate in [1e-12, 1e-14, 1e-15, 1e-100, 1e-300] {
            let monthly = compute(300_000.0, rate, 30, PI, PaymentFrequency::Monthly).unwrap();
            assert!(monthly.is_finite(), "{}% gave {}", rate, monthly);
            assert_abs_diff_eq!(monthly, straight_line, epsilon = 0.01);
        }
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(compute(-100.0, 5.89, 30, PI, PaymentFrequency::Monthly)
            .unwrap_err()
            .is_invalid_input());
        assert!(compute(300_000.0, -1.0, 30, IO, PaymentFrequency::Monthly).is_err());
        assert!(compute(300_000.0, 5.89, 0, PI, PaymentFrequency::Monthly).is_err());
        assert!(compute(300_000.0, f64::NAN, 30, PI, PaymentFrequency::Monthly).is_err());
    }

    #[test]
    fn test_scale_monthly() {
        assert_eq!(scale_monthly(1300.0, PaymentFrequency::Monthly), 1300.0);
        assert_eq!(scale_monthly(1300.0, PaymentFrequency::Weekly), 300.0);
        assert_eq!(scale_monthly(1300.0, PaymentFrequency::Fortnightly), 600.0);
    }
}
