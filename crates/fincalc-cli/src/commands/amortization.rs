use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::amortization::schedule::{self, LoanInput, ScheduleKind};

use crate::input;

/// Amortization system selector for the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleArg {
    /// Constant total payment
    French,
    /// Constant principal payment
    German,
}

impl From<ScheduleArg> for ScheduleKind {
    fn from(arg: ScheduleArg) -> Self {
        match arg {
            ScheduleArg::French => ScheduleKind::French,
            ScheduleArg::German => ScheduleKind::German,
        }
    }
}

/// Arguments for the loan simulator
#[derive(Args)]
pub struct AmortizeArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate as a percentage (12 = 12%)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<Decimal>,

    /// Payments per year (1 = annual, 12 = monthly)
    #[arg(long, default_value = "12")]
    pub payments_per_year: u32,

    /// Amortization system
    #[arg(long, value_enum, default_value = "french")]
    pub schedule: ScheduleArg,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            payments_per_year: args.payments_per_year,
            schedule: args.schedule.into(),
        }
    };

    let result = schedule::simulate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
