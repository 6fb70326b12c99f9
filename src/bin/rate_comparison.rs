//! Write an engine-computed rate comparison grid to CSV
//!
//! Accepts config via environment variables:
//!   LOAN_AMOUNTS (comma separated, default 200000..600000 step 100000)
//!   RATES (comma separated percent, default 3,4,5,6)
//!   LOAN_TERM, REPAYMENT_TYPE, PAYMENT_FREQUENCY
//! The first argument, if given, is the output path.

use home_loan_calculator::comparison::{PUBLISHED_LOAN_AMOUNTS, PUBLISHED_RATES};
use home_loan_calculator::{ComparisonTable, PaymentFrequency, RepaymentType};
use std::env;
use std::time::Instant;

fn parse_list(key: &str) -> anyhow::Result<Option<Vec<f64>>> {
    let raw = match env::var(key) {
        Ok(raw) => raw,
        Err(_) => return Ok(None),
    };
    let values = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| anyhow::anyhow!("{}: {}", key, e))?;
    Ok(Some(values))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = Instant::now();
    let output_path = env::args().nth(1).unwrap_or_else(|| "rate_comparison.csv".to_string());

    let loan_amounts = parse_list("LOAN_AMOUNTS")?.unwrap_or_else(|| PUBLISHED_LOAN_AMOUNTS.to_vec());
    let rates = parse_list("RATES")?.unwrap_or_else(|| PUBLISHED_RATES.to_vec());

    let term_years: u32 = match env::var("LOAN_TERM") {
        Ok(s) => s.trim().parse()?,
        Err(_) => 30,
    };
    let repayment_type: RepaymentType = match env::var("REPAYMENT_TYPE") {
        Ok(s) => s.parse()?,
        Err(_) => RepaymentType::PrincipalAndInterest,
    };
    let frequency: PaymentFrequency = match env::var("PAYMENT_FREQUENCY") {
        Ok(s) => s.parse()?,
        Err(_) => PaymentFrequency::Weekly,
    };

    let table = ComparisonTable::computed(&loan_amounts, &rates, term_years, repayment_type, frequency)?;
    table.write_csv_path(&output_path)?;

    print!("{}", table.render());
    println!(
        "\nWritten {} rows to {} in {:?}",
        table.rows.len(),
        output_path,
        start.elapsed()
    );
    Ok(())
}
