use approx::{assert_abs_diff_eq, assert_relative_eq};
use home_loan_calculator::{compute, quote, LoanParameters, PaymentFrequency, RepaymentType};

const TERMS: [u32; 5] = [10, 15, 20, 25, 30];
const RATES: [f64; 8] = [0.0, 1e-9, 1e-6, 0.5, 3.0, 5.89, 6.0, 12.0];

fn pay(principal: f64, rate: f64, term: u32, ty: RepaymentType, freq: PaymentFrequency) -> f64 {
    compute(principal, rate, term, ty, freq).expect("valid inputs")
}

#[test]
fn published_scenarios_300k_30_years() {
    let pi = RepaymentType::PrincipalAndInterest;
    let io = RepaymentType::InterestOnly;

    let monthly = pay(300_000.0, 5.89, 30, pi, PaymentFrequency::Monthly);
    assert_abs_diff_eq!(monthly, 1777.49, epsilon = 0.005);

    let weekly = pay(300_000.0, 5.89, 30, pi, PaymentFrequency::Weekly);
    assert_eq!(weekly, monthly * 12.0 / 52.0);

    let io_weekly = pay(300_000.0, 5.89, 30, io, PaymentFrequency::Weekly);
    assert_abs_diff_eq!(io_weekly, 339.81, epsilon = 0.005);

    let zero = pay(300_000.0, 0.0, 30, pi, PaymentFrequency::Monthly);
    assert_eq!(zero, 300_000.0 / 360.0);
    assert_abs_diff_eq!(zero, 833.33, epsilon = 0.005);
}

#[test]
fn zero_rate_equals_principal_over_months() {
    for term in TERMS {
        let monthly = pay(
            450_000.0,
            0.0,
            term,
            RepaymentType::PrincipalAndInterest,
            PaymentFrequency::Monthly,
        );
        assert_eq!(monthly, 450_000.0 / (term * 12) as f64);
    }
}

#[test]
fn small_rates_converge_to_straight_line() {
    for term in TERMS {
        let straight_line = 450_000.0 / (term * 12) as f64;
        for rate in [1e-15, 1e-12, 1e-9, 1e-6] {
            let monthly = pay(
                450_000.0,
                rate,
                term,
                RepaymentType::PrincipalAndInterest,
                PaymentFrequency::Monthly,
            );
            assert!(monthly.is_finite());
            assert_abs_diff_eq!(monthly, straight_line, epsilon = 0.01);
        }
    }
}

#[test]
fn deterministic_for_identical_inputs() {
    for ty in RepaymentType::ALL {
        for freq in PaymentFrequency::ALL {
            let a = pay(612_345.67, 6.13, 25, ty, freq);
            let b = pay(612_345.67, 6.13, 25, ty, freq);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}

#[test]
fn increasing_principal_increases_repayment() {
    for ty in RepaymentType::ALL {
        for &rate in &RATES[1..] {
            let mut previous = 0.0;
            for principal in [50_000.0, 100_000.0, 300_000.0, 750_000.0, 1_000_000.0] {
                let amount = pay(principal, rate, 30, ty, PaymentFrequency::Fortnightly);
                assert!(amount > previous, "{:?} at {}%: {} !> {}", ty, rate, amount, previous);
                previous = amount;
            }
        }
    }
}

#[test]
fn increasing_rate_increases_repayment() {
    for ty in RepaymentType::ALL {
        for term in TERMS {
            let amounts: Vec<f64> = RATES
                .iter()
                .map(|&rate| pay(300_000.0, rate, term, ty, PaymentFrequency::Monthly))
                .collect();
            assert!(
                amounts.windows(2).all(|w| w[0] < w[1]),
                "{:?} over {} years: {:?}",
                ty,
                term,
                amounts
            );
        }
    }
}

#[test]
fn longer_term_lowers_principal_and_interest_only() {
    for &rate in &RATES {
        let pi: Vec<f64> = TERMS
            .iter()
            .map(|&t| pay(300_000.0, rate, t, RepaymentType::PrincipalAndInterest, PaymentFrequency::Weekly))
            .collect();
        assert!(pi.windows(2).all(|w| w[0] > w[1]), "rate {}: {:?}", rate, pi);

        let io: Vec<f64> = TERMS
            .iter()
            .map(|&t| pay(300_000.0, rate, t, RepaymentType::InterestOnly, PaymentFrequency::Weekly))
            .collect();
        assert!(io.windows(2).all(|w| w[0] == w[1]), "rate {}: {:?}", rate, io);
    }
}

#[test]
fn frequencies_agree_on_annual_total() {
    for ty in RepaymentType::ALL {
        for &rate in &RATES {
            for term in TERMS {
                let weekly = pay(380_000.0, rate, term, ty, PaymentFrequency::Weekly);
                let fortnightly = pay(380_000.0, rate, term, ty, PaymentFrequency::Fortnightly);
                let monthly = pay(380_000.0, rate, term, ty, PaymentFrequency::Monthly);

                assert_relative_eq!(weekly * 52.0, monthly * 12.0, max_relative = 1e-12);
                assert_relative_eq!(fortnightly * 26.0, monthly * 12.0, max_relative = 1e-12);
            }
        }
    }
}

#[test]
fn interest_only_never_reduces_principal() {
    let loan = LoanParameters::new(
        300_000.0,
        5.89,
        30,
        RepaymentType::InterestOnly,
        PaymentFrequency::Monthly,
    )
    .unwrap();
    let q = quote(&loan).unwrap();
    assert_eq!(q.balance_at_term_end, 300_000.0);
    assert_relative_eq!(q.monthly * 12.0, 300_000.0 * 0.0589, max_relative = 1e-12);
}

#[test]
fn invalid_inputs_are_rejected() {
    let pi = RepaymentType::PrincipalAndInterest;
    let m = PaymentFrequency::Monthly;

    let err = compute(-100.0, 5.89, 30, pi, m).unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("principal"));

    assert!(compute(0.0, 5.89, 30, pi, m).is_err());
    assert!(compute(300_000.0, -0.01, 30, pi, m).is_err());
    assert!(compute(300_000.0, f64::INFINITY, 30, pi, m).is_err());
    assert!(compute(300_000.0, 5.89, 0, pi, m).is_err());
    assert!("quarterly".parse::<PaymentFrequency>().is_err());
    assert!("split".parse::<RepaymentType>().is_err());
}
