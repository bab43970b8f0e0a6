// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ferry - two-port ferry crossing simulation

mod error;

use anyhow::Result;
use clap::Parser;
use error::CliError;
use ferry_core::{audit, create_log_file, SimConfig, Simulation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "ferry",
    version,
    about = "Simulate trucks and cars crossing between two ports on one ferry",
    allow_negative_numbers = true
)]
struct Cli {
    /// NUM_TRUCKS NUM_CARS CAPACITY MAX_VEHICLE_ARRIVAL_US MAX_FERRY_ARRIVAL_US
    #[arg(value_name = "ARG")]
    args: Vec<String>,

    /// Action log file (truncated at start)
    #[arg(long, short, default_value = "ferry.out")]
    output: PathBuf,

    /// Root seed for the random delays and port choices
    #[arg(long)]
    seed: Option<u64>,

    /// Audit the finished action log and fail on any violation
    #[arg(long)]
    check: bool,

    /// Print a JSON run report to stdout
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CliError>() {
            Some(cli_err) => {
                eprint!("{}", cli_err);
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = SimConfig::from_args(&cli.args).map_err(CliError::invalid_arguments)?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let sink = create_log_file(&cli.output).map_err(|e| CliError::log_unwritable(&cli.output, e))?;
    let simulation = Simulation::new(config.clone(), sink)?;
    info!(seed = simulation.seed(), output = %cli.output.display(), "writing action log");
    let report = simulation.run().await?;

    if cli.check {
        let text = std::fs::read_to_string(&cli.output)?;
        let violations = audit::check_text(&text, &config);
        if !violations.is_empty() {
            for violation in &violations {
                eprintln!("violation: {}", violation);
            }
            warn!(count = violations.len(), "action log failed audit");
            return Err(CliError::audit_failed(&cli.output, violations.len()).into());
        }
    }

    if cli.summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
