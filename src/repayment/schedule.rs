//! Monthly amortization schedule on the same basis as the repayment engine

use std::io::Write;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::engine::{monthly_amortizing_payment, MONTHS_PER_YEAR};
use crate::error::Result;
use crate::loan::{LoanParameters, RepaymentType};

/// One month of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month number
    pub month: u32,
    /// 1-based loan year
    pub year: u32,
    pub opening_balance: f64,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Complete month-by-month schedule for one loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan: LoanParameters,
    pub rows: Vec<ScheduleRow>,
}

/// Totals over a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_months: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,
}

impl AmortizationSchedule {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Closing balance at the end of a given loan year, if the year is in the term
    pub fn balance_after_year(&self, year: u32) -> Option<f64> {
        let idx = (year as usize).checked_mul(MONTHS_PER_YEAR as usize)?.checked_sub(1)?;
        self.rows.get(idx).map(|r| r.closing_balance)
    }

    pub fn summary(&self) -> ScheduleSummary {
        let total_paid: f64 = self.rows.iter().map(|r| r.payment).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_principal: f64 = self.rows.iter().map(|r| r.principal).sum();
        let final_balance = self
            .rows
            .last()
            .map(|r| r.closing_balance)
            .unwrap_or(self.loan.principal);

        ScheduleSummary {
            total_months: self.rows.len() as u32,
            total_paid,
            total_interest,
            total_principal,
            final_balance,
        }
    }

    /// Write one CSV record per month, headed by the row field names
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

/// Build the monthly schedule for a loan
///
/// The payment frequency of `params` is ignored; rows are always monthly.
/// Principal & interest schedules finish at exactly zero: the last payment
/// clears whatever balance floating point leaves behind.
pub fn amortization_schedule(params: &LoanParameters) -> Result<AmortizationSchedule> {
    params.validate()?;

    let months = params.number_of_months();
    let annual_rate = params.annual_rate();
    let monthly_rate = annual_rate / MONTHS_PER_YEAR as f64;
    let level_payment = match params.repayment_type {
        RepaymentType::PrincipalAndInterest => {
            monthly_amortizing_payment(params.principal, annual_rate, months)
        }
        RepaymentType::InterestOnly => params.principal * annual_rate / MONTHS_PER_YEAR as f64,
    };

    let mut rows = Vec::with_capacity(months as usize);
    let mut balance = params.principal;

    for month in 1..=months {
        let opening_balance = balance;
        let interest = opening_balance * monthly_rate;
        let principal = match params.repayment_type {
            RepaymentType::InterestOnly => 0.0,
            RepaymentType::PrincipalAndInterest if month == months => opening_balance,
            RepaymentType::PrincipalAndInterest => level_payment - interest,
        };
        balance = opening_balance - principal;

        rows.push(ScheduleRow {
            month,
            year: (month - 1) / MONTHS_PER_YEAR + 1,
            opening_balance,
            payment: interest + principal,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    debug!(
        "built {} month schedule, level payment {:.2}, final balance {:.2}",
        rows.len(),
        level_payment,
        balance
    );

    Ok(AmortizationSchedule { loan: *params, rows })
}
