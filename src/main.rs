//! Home Loan Calculator CLI
//!
//! Command-line front end for the repayment engine

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use log::info;

use home_loan_calculator::format::{format_currency, format_loan_amount};
use home_loan_calculator::{
    Calculator, CalculatorConfig, ComparisonTable, PaymentFrequency, RepaymentType,
};

#[derive(Debug, Parser)]
#[command(name = "home-loan-calculator", version, about = "See your estimated repayments per week/fortnight/month")]
struct Cli {
    /// JSON file with form defaults and input bounds
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimated repayment for one loan
    Quote {
        #[command(flatten)]
        loan: LoanArgs,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },
    /// Monthly amortization schedule
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,

        /// Write every month to a CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,

        /// Number of months to print
        #[arg(long, default_value_t = 12)]
        months: usize,
    },
    /// How interest rates affect repayments
    Compare {
        /// Compute the table with the engine instead of showing the published figures
        #[arg(long)]
        computed: bool,

        /// Write the table to a CSV file
        #[arg(long, value_name = "PATH")]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct LoanArgs {
    /// Estimated loan amount, e.g. 450,000
    #[arg(long)]
    amount: Option<String>,

    /// Interest rate in % p.a.
    #[arg(long)]
    rate: Option<f64>,

    /// Loan term in years
    #[arg(long)]
    term: Option<u32>,

    /// principal_interest or interest_only
    #[arg(long = "type", value_name = "TYPE")]
    repayment_type: Option<RepaymentType>,

    /// weekly, fortnightly or monthly
    #[arg(long)]
    frequency: Option<PaymentFrequency>,
}

impl LoanArgs {
    /// Apply the arguments to a calculator the way the form applies user input
    fn apply(&self, calc: &mut Calculator) -> anyhow::Result<()> {
        if let Some(amount) = &self.amount {
            if !calc.set_loan_amount_text(amount) {
                bail!("could not read loan amount {:?}", amount);
            }
        }
        if let Some(rate) = self.rate {
            calc.set_interest_rate(rate)?;
        }
        if let Some(term) = self.term {
            calc.set_term_years(term)?;
        }
        if let Some(repayment_type) = self.repayment_type {
            calc.set_repayment_type(repayment_type);
        }
        if let Some(frequency) = self.frequency {
            calc.set_payment_frequency(frequency);
        }
        Ok(())
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    let config = config.with_env_overrides()?;

    match cli.command {
        Command::Quote { loan, json } => {
            let mut calc = Calculator::with_config(config);
            loan.apply(&mut calc)?;
            let quote = calc.quote()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
                return Ok(());
            }

            println!("Home Loan Repayment Calculator");
            println!("==============================\n");
            println!("  Loan amount:     ${}", format_loan_amount(calc.loan_amount()));
            println!("  Interest rate:   {}% p.a.", calc.interest_rate());
            println!("  Loan term:       {} years", calc.term_years());
            println!("  Repayment type:  {}", calc.repayment_type().label());
            println!();
            println!("Your estimated repayments would be");
            println!(
                "  {} per {}",
                format_currency(quote.repayment),
                calc.payment_frequency().period_noun()
            );
            println!();
            for frequency in PaymentFrequency::ALL {
                println!("  {:<12} {:>14}", frequency, format_currency(quote.amount_for(frequency)));
            }
            println!();
            println!("  Total repaid:    {}", format_currency(quote.total_repaid));
            println!("  Total interest:  {}", format_currency(quote.total_interest));
            if quote.balance_at_term_end > 0.0 {
                println!("  Owing at end:    {}", format_currency(quote.balance_at_term_end));
            }
        }
        Command::Schedule { loan, csv, months } => {
            let mut calc = Calculator::with_config(config);
            loan.apply(&mut calc)?;
            let schedule = home_loan_calculator::amortization_schedule(&calc.parameters()?)?;

            println!(
                "{:>5} {:>4} {:>14} {:>12} {:>12} {:>12} {:>14}",
                "Month", "Year", "Opening", "Payment", "Interest", "Principal", "Closing"
            );
            println!("{}", "-".repeat(79));
            for row in schedule.rows.iter().take(months) {
                println!(
                    "{:>5} {:>4} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                    row.month,
                    row.year,
                    row.opening_balance,
                    row.payment,
                    row.interest,
                    row.principal,
                    row.closing_balance
                );
            }
            if schedule.len() > months {
                println!("... ({} more months)", schedule.len() - months);
            }

            let summary = schedule.summary();
            println!("\nSummary:");
            println!("  Total Months:    {}", summary.total_months);
            println!("  Total Paid:      {}", format_currency(summary.total_paid));
            println!("  Total Interest:  {}", format_currency(summary.total_interest));
            println!("  Final Balance:   {}", format_currency(summary.final_balance));

            if let Some(path) = csv {
                schedule
                    .write_csv_path(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("schedule written to {}", path.display());
                println!("\nFull schedule written to: {}", path.display());
            }
        }
        Command::Compare { computed, csv } => {
            let table = if computed {
                ComparisonTable::computed_default()?
            } else {
                ComparisonTable::published()
            };
            println!("How interest rates affect your repayments\n");
            print!("{}", table.render());

            if let Some(path) = csv {
                table
                    .write_csv_path(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nTable written to: {}", path.display());
            }
        }
    }

    Ok(())
}
