mod commands;
mod input;
mod output;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::pricing::PricingArgs;
use commands::proforma::{CashflowArgs, GenerateArgs, PreviewArgs};

/// Solar project pro-forma generation
#[derive(Parser)]
#[command(
    name = "proforma",
    version,
    about = "Solar project pro-forma generation",
    long_about = "A CLI for generating solar project pro-formas with decimal precision: \
                  25-year cash flow projections, SREC income for the Maryland and DC \
                  markets, ITC and bonus-depreciation tax benefits, payback analysis, \
                  and a formatted Excel workbook."
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
    /// Generate the full pro-forma and write the Excel workbook
    Generate(GenerateArgs),
    /// Compute pricing, incentives, and year-1 metrics without writing an artifact
    Preview(PreviewArgs),
    /// Print the 25-year cash-flow table
    Cashflow(CashflowArgs),
    /// Show the cost breakdown for a pricing schedule
    Pricing(PricingArgs),
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
        Commands::Generate(args) => commands::proforma::run_generate(args),
        Commands::Preview(args) => commands::proforma::run_preview(args),
        Commands::Cashflow(args) => commands::proforma::run_cashflow(args),
        Commands::Pricing(args) => commands::pricing::run_pricing(args),
        Commands::Version => {
            println!("proforma {}", env!("CARGO_PKG_VERSION"));
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
