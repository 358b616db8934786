use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::interest::compound::{self, CompoundInterestInput, CompoundVariable};
use fincalc_core::interest::simple::{self, SimpleInterestInput, SimpleVariable};

use crate::input;

/// Unknown-variable selector for the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SolveForArg {
    /// C: capital placed at interest
    Principal,
    /// i: annual rate as a percentage
    Rate,
    /// n: time in years
    Time,
    /// I: interest earned
    Interest,
    /// M: maturity amount
    Amount,
}

impl From<SolveForArg> for SimpleVariable {
    fn from(arg: SolveForArg) -> Self {
        match arg {
            SolveForArg::Principal => SimpleVariable::Principal,
            SolveForArg::Rate => SimpleVariable::Rate,
            SolveForArg::Time => SimpleVariable::Time,
            SolveForArg::Interest => SimpleVariable::Interest,
            SolveForArg::Amount => SimpleVariable::Amount,
        }
    }
}

impl From<SolveForArg> for CompoundVariable {
    fn from(arg: SolveForArg) -> Self {
        match arg {
            SolveForArg::Principal => CompoundVariable::Principal,
            SolveForArg::Rate => CompoundVariable::Rate,
            SolveForArg::Time => CompoundVariable::Time,
            SolveForArg::Interest => CompoundVariable::Interest,
            SolveForArg::Amount => CompoundVariable::Amount,
        }
    }
}

/// Arguments for the simple interest solver
#[derive(Args)]
pub struct SimpleInterestArgs {
    /// Variable to solve for
    #[arg(long, value_enum)]
    pub solve_for: Option<SolveForArg>,

    /// Capital C
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate i as a percentage (12 = 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time n in years
    #[arg(long)]
    pub time: Option<Decimal>,

    /// Interest earned I
    #[arg(long)]
    pub interest: Option<Decimal>,

    /// Maturity amount M
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Your computed answer, graded against the derived value (1% tolerance)
    #[arg(long)]
    pub answer: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the compound interest solver
#[derive(Args)]
pub struct CompoundInterestArgs {
    /// Variable to solve for
    #[arg(long, value_enum)]
    pub solve_for: Option<SolveForArg>,

    /// Compounding periods per year (1 = annual, 12 = monthly)
    #[arg(long, default_value = "1")]
    pub compounds_per_year: u32,

    /// Capital C
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate i as a percentage (12 = 12%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time n in years
    #[arg(long)]
    pub time: Option<Decimal>,

    /// Interest earned I
    #[arg(long)]
    pub interest: Option<Decimal>,

    /// Maturity amount M
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Your computed answer, graded against the derived value (1% tolerance)
    #[arg(long)]
    pub answer: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solver_input: SimpleInterestInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SimpleInterestInput {
            solve_for: args
                .solve_for
                .ok_or("--solve-for is required (or provide --input)")?
                .into(),
            principal: args.principal,
            rate: args.rate,
            time: args.time,
            interest: args.interest,
            amount: args.amount,
            submitted_answer: args.answer,
        }
    };

    let result = simple::solve_simple_interest(&solver_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compound_interest(
    args: CompoundInterestArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let solver_input: CompoundInterestInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        CompoundInterestInput {
            solve_for: args
                .solve_for
                .ok_or("--solve-for is required (or provide --input)")?
                .into(),
            compounds_per_year: args.compounds_per_year,
            principal: args.principal,
            rate: args.rate,
            time: args.time,
            interest: args.interest,
            amount: args.amount,
            submitted_answer: args.answer,
        }
    };

    let result = compound::solve_compound_interest(&solver_input)?;
    Ok(serde_json::to_value(result)?)
}
