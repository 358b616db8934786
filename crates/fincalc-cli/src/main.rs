mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::AmortizeArgs;
use commands::interest::{CompoundInterestArgs, SimpleInterestArgs};

/// Financial calculators with decimal precision
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Financial calculators: simple interest, compound interest, loan amortization",
    long_about = "A CLI for the fincalc engines. Solves any variable of the simple and \
                  compound interest relations and generates loan amortization tables \
                  under the French (constant payment) or German (constant principal) \
                  system, with decimal precision throughout."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a loan amortization table with totals
    Amortize(AmortizeArgs),
    /// Solve a variable of the simple interest relation
    SimpleInterest(SimpleInterestArgs),
    /// Solve a variable of the compound interest relation
    CompoundInterest(CompoundInterestArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::amortization::run_amortize(args),
        Commands::SimpleInterest(args) => commands::interest::run_simple_interest(args),
        Commands::CompoundInterest(args) => commands::interest::run_compound_interest(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
