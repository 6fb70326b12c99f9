//! Rate comparison table: repayments across loan amounts and interest rates

use std::io::Write;
use std::path::Path;

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::format::format_currency_whole;
use crate::loan::{LoanParameters, PaymentFrequency, RepaymentType};
use crate::repayment;

pub const COMPARISON_FOOTNOTE: &str =
    "* All calculations are estimates and for illustrative purposes only. Actual repayments may vary.";

/// Rates (percent p.a.) shown as table columns
pub const PUBLISHED_RATES: [f64; 4] = [3.0, 4.0, 5.0, 6.0];

/// Loan amounts shown as table rows
pub const PUBLISHED_LOAN_AMOUNTS: [f64; 5] = [200_000.0, 300_000.0, 400_000.0, 500_000.0, 600_000.0];

/// Published weekly figures, one row per entry of `PUBLISHED_LOAN_AMOUNTS`
const PUBLISHED_WEEKLY: [[f64; 4]; 5] = [
    [311.0, 357.0, 407.0, 460.0],
    [466.0, 536.0, 610.0, 689.0],
    [621.0, 714.0, 814.0, 919.0],
    [777.0, 893.0, 1017.0, 1149.0],
    [932.0, 1071.0, 1221.0, 1379.0],
];

/// Repayments for one loan amount at each column rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub loan_amount: f64,
    pub repayments: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonTable {
    pub term_years: u32,
    pub repayment_type: RepaymentType,
    pub frequency: PaymentFrequency,
    /// Column rates in percent p.a.
    pub rates: Vec<f64>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// The weekly repayment table as published with the calculator
    /// (30-year term, principal & interest). Figures are reference data and
    /// are not reproduced by the engine.
    pub fn published() -> Self {
        let rows = PUBLISHED_LOAN_AMOUNTS
            .iter()
            .zip(PUBLISHED_WEEKLY.iter())
            .map(|(&loan_amount, weekly)| ComparisonRow {
                loan_amount,
                repayments: weekly.to_vec(),
            })
            .collect();

        Self {
            term_years: 30,
            repayment_type: RepaymentType::PrincipalAndInterest,
            frequency: PaymentFrequency::Weekly,
            rates: PUBLISHED_RATES.to_vec(),
            rows,
        }
    }

    /// Compute every cell with the repayment engine, one row per loan amount
    pub fn computed(
        loan_amounts: &[f64],
        rates: &[f64],
        term_years: u32,
        repayment_type: RepaymentType,
        frequency: PaymentFrequency,
    ) -> Result<Self> {
        let rows = loan_amounts
            .par_iter()
            .map(|&loan_amount| {
                let repayments = rates
                    .iter()
                    .map(|&rate| {
                        let params = LoanParameters::new(
                            loan_amount,
                            rate,
                            term_years,
                            repayment_type,
                            frequency,
                        )?;
                        repayment::repayment(&params)
                    })
                    .collect::<Result<Vec<f64>>>()?;
                Ok(ComparisonRow {
                    loan_amount,
                    repayments,
                })
            })
            .collect::<Result<Vec<ComparisonRow>>>()?;

        info!(
            "computed {}x{} comparison grid ({}y, {}, {})",
            rows.len(),
            rates.len(),
            term_years,
            repayment_type,
            frequency
        );

        Ok(Self {
            term_years,
            repayment_type,
            frequency,
            rates: rates.to_vec(),
            rows,
        })
    }

    /// Engine-computed counterpart of the published table
    pub fn computed_default() -> Result<Self> {
        Self::computed(
            &PUBLISHED_LOAN_AMOUNTS,
            &PUBLISHED_RATES,
            30,
            RepaymentType::PrincipalAndInterest,
            PaymentFrequency::Weekly,
        )
    }

    /// Repayment at a given loan amount and rate, if both are in the table
    pub fn lookup(&self, loan_amount: f64, rate: f64) -> Option<f64> {
        let col = self.rates.iter().position(|&r| r == rate)?;
        self.rows
            .iter()
            .find(|row| row.loan_amount == loan_amount)
            .and_then(|row| row.repayments.get(col).copied())
    }

    pub fn caption(&self) -> String {
        format!(
            "Compare {} repayments for different loan amounts and interest rates ({}-year term, {}):",
            self.frequency,
            self.term_years,
            self.repayment_type.label()
        )
    }

    /// Render as an aligned text table with whole-dollar figures
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.caption());
        out.push('\n');

        out.push_str(&format!("{:<14}", "Loan Amount"));
        for rate in &self.rates {
            out.push_str(&format!("{:>12}", format!("{:.1}% p.a.", rate)));
        }
        out.push('\n');
        out.push_str(&"-".repeat(14 + 12 * self.rates.len()));
        out.push('\n');

        for row in &self.rows {
            out.push_str(&format!("{:<14}", format_currency_whole(row.loan_amount)));
            for value in &row.repayments {
                out.push_str(&format!("{:>12}", format_currency_whole(*value)));
            }
            out.push('\n');
        }

        out.push_str(COMPARISON_FOOTNOTE);
        out.push('\n');
        out
    }

    /// Write the table as CSV, one column per rate
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["LoanAmount".to_string()];
        header.extend(self.rates.iter().map(|r| format!("Rate{}", r)));
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![format!("{:.2}", row.loan_amount)];
            record.extend(row.repayments.iter().map(|v| format!("{:.2}", v)));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_published_table() {
        let table = ComparisonTable::published();
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rates, vec![3.0, 4.0, 5.0, 6.0]);
        assert_eq!(table.lookup(200_000.0, 3.0), Some(311.0));
        assert_eq!(table.lookup(600_000.0, 6.0), Some(1379.0));
        assert_eq!(table.lookup(250_000.0, 3.0), None);
    }

    #[test]
    fn test_computed_table_uses_engine() {
        let table = ComparisonTable::computed_default().unwrap();
        assert_eq!(table.rows.len(), 5);
        // rayon preserves input order on collect
        assert_eq!(table.rows[0].loan_amount, 200_000.0);
        assert_eq!(table.rows[4].loan_amount, 600_000.0);

        let cell = table.lookup(300_000.0, 6.0).unwrap();
        let direct = repayment::compute(
            300_000.0,
            6.0,
            30,
            RepaymentType::PrincipalAndInterest,
            PaymentFrequency::Weekly,
        )
        .unwrap();
        assert_eq!(cell, direct);
        assert_abs_diff_eq!(cell, 415.07, epsilon = 0.005);
    }

    #[test]
    fn test_computed_rows_increase_with_rate_and_amount() {
        let table = ComparisonTable::computed_default().unwrap();
        for row in &table.rows {
            assert!(row.repayments.windows(2).all(|w| w[0] < w[1]));
        }
        for pair in table.rows.windows(2) {
            assert!(pair[0].repayments[0] < pair[1].repayments[0]);
        }
    }

    #[test]
    fn test_computed_rejects_invalid_amount() {
        let result = ComparisonTable::computed(
            &[100_000.0, -1.0],
            &[5.0],
            30,
            RepaymentType::PrincipalAndInterest,
            PaymentFrequency::Weekly,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_render_and_csv() {
        let table = ComparisonTable::published();
        let text = table.render();
        assert!(text.starts_with("Compare weekly repayments"));
        assert!(text.contains("$200,000"));
        assert!(text.contains("$1,379"));
        assert!(text.contains("3.0% p.a."));
        assert!(text.trim_end().ends_with("Actual repayments may vary."));

        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        let csv_text = String::from_utf8(buf).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(lines.next(), Some("LoanAmount,Rate3,Rate4,Rate5,Rate6"));
        assert_eq!(lines.next(), Some("200000.00,311.00,357.00,407.00,460.00"));
    }
}
