mod commands;
mod config;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::format::FormatArgs;
use commands::loan::LoanArgs;
use commands::refinance::RefinanceArgs;
use config::Settings;
use loan_calc_core::panels::LoanPanel;

/// Loan repayment calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Home, personal, car and refinance loan calculations",
    long_about = "A CLI for fixed-rate loan repayment calculations with decimal precision. \
                  Computes monthly repayments, total interest and total repaid, compares \
                  refinance savings against an assumed current rate, and prints full \
                  amortization schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a TOML settings file (defaults to ~/.loancalc/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Home loan repayments
    Home(LoanArgs),
    /// Personal loan repayments
    Personal(LoanArgs),
    /// Car loan repayments
    Car(LoanArgs),
    /// Refinance savings against an assumed current rate
    Refinance(RefinanceArgs),
    /// Month-by-month amortization schedule
    Schedule(LoanArgs),
    /// Format an amount as whole-unit currency
    Format(FormatArgs),
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

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    } else {
        EnvFilter::new(default_level)
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .init();
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref()).unwrap_or_else(|e| fail(e));

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Home(args) => commands::loan::run_loan(LoanPanel::Home, args, &settings),
        Commands::Personal(args) => commands::loan::run_loan(LoanPanel::Personal, args, &settings),
        Commands::Car(args) => commands::loan::run_loan(LoanPanel::Car, args, &settings),
        Commands::Refinance(args) => commands::refinance::run_refinance(args, &settings),
        Commands::Schedule(args) => commands::loan::run_schedule(args, &settings),
        Commands::Format(args) => commands::format::run_format(args, &settings),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
