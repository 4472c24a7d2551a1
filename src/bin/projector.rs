//! Command line front end for projections, milestone status and change attribution
//!
//! Projections are written as CSV (one row per month) for spreadsheet comparison;
//! the other commands print the same JSON the Lambda returns.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use finance_projection::api::{Api, MilestonesRequest, ProjectionQuery};
use finance_projection::attribution::load_transactions;
use finance_projection::{compute_what_changed, EngineConfig, Period, ProjectionAssumptions};

#[derive(Parser)]
#[command(name = "projector", version, about = "Net-worth projections and month-over-month change attribution")]
struct Cli {
    /// JSON engine configuration (pace tolerance, bounds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project net worth month by month
    Project {
        #[arg(long)]
        months: u32,
        /// Annual return in percent
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        annual_return: f64,
        #[arg(long, default_value_t = 0.0)]
        monthly_contribution: f64,
        /// Defaults to --months
        #[arg(long)]
        horizon_months: Option<u32>,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start_value: f64,
        /// CSV output file (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Rank category changes between two months from a transactions CSV
    WhatChanged {
        /// CSV with header date,amount,category,type
        #[arg(long)]
        transactions: PathBuf,
        /// YYYY-MM
        #[arg(long)]
        month: String,
        /// YYYY-MM
        #[arg(long)]
        previous_month: String,
        /// Only print the first N changes
        #[arg(long)]
        top: Option<usize>,
    },
    /// Classify milestones from a JSON request file
    Milestones {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let api = Api::new(config);
    let start = Instant::now();

    match cli.command {
        Command::Project {
            months,
            annual_return,
            monthly_contribution,
            horizon_months,
            start_value,
            output,
        } => {
            let query = ProjectionQuery {
                months,
                start_value,
                assumptions: ProjectionAssumptions::new(
                    annual_return,
                    monthly_contribution,
                    horizon_months.unwrap_or(months),
                ),
            };
            let result = api.projection(&query)?;

            let sink: Box<dyn Write> = match &output {
                Some(path) => Box::new(
                    File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
                ),
                None => Box::new(io::stdout().lock()),
            };
            let mut writer = csv::Writer::from_writer(sink);
            for point in &result.projection {
                writer.serialize(point)?;
            }
            writer.flush()?;

            eprintln!(
                "Projected {} months at {:.4}% per month",
                result.projection.len(),
                result.assumptions.monthly_return
            );
            if let Some(last) = result.projection.last() {
                eprintln!("  Month {}: net worth ${:.2}", last.month_index, last.net_worth);
            }
        }
        Command::WhatChanged {
            transactions,
            month,
            previous_month,
            top,
        } => {
            let txs = load_transactions(&transactions)?;
            let mut result = compute_what_changed(&txs, &month, &previous_month)?;
            if let Some(n) = top {
                result.top_changes.truncate(n);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Milestones { input } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let request: MilestonesRequest =
                serde_json::from_str(&text).with_context(|| format!("failed to parse {}", input.display()))?;
            let result = api.milestones(&request, Period::current())?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    log::info!("Done in {:?}", start.elapsed());
    Ok(())
}
