//! Forecast CLI - Monte Carlo Portfolio Forecasts
//!
//! # Commands
//!
//! - `forecast simulate` - Run a forecast and print mean and percentile bands
//! - `forecast paths --output <file>` - Export the simulated paths as CSV

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use forecast_cli::commands::{self, simulate::OutputFormat};
use forecast_cli::config::{build_settings, SettingsOverrides};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Monte Carlo portfolio forecasting
#[derive(Parser)]
#[command(name = "forecast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "FORECAST_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Simulation parameters shared by every command
#[derive(Args, Debug, Default)]
struct SimulationArgs {
    /// Starting portfolio value
    #[arg(long, allow_negative_numbers = true)]
    initial_investment: Option<f64>,

    /// Expected annual return (0.08 = 8%)
    #[arg(long, allow_negative_numbers = true)]
    annual_return: Option<f64>,

    /// Annual volatility (0.15 = 15%)
    #[arg(long, allow_negative_numbers = true)]
    annual_volatility: Option<f64>,

    /// Investment horizon in years
    #[arg(short, long, allow_negative_numbers = true)]
    years: Option<i64>,

    /// Number of simulated paths
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    simulations: Option<i64>,

    /// Seed for reproducible runs
    #[arg(long, conflicts_with = "unseeded")]
    seed: Option<u64>,

    /// Draw a fresh seed from OS entropy
    #[arg(long)]
    unseeded: bool,

    /// Use per-path random streams and generate paths in parallel
    #[arg(long)]
    parallel: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a forecast and print the terminal value summary
    Simulate {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Percentile to report (repeatable)
        #[arg(short, long = "percentile", value_name = "P", allow_negative_numbers = true)]
        percentiles: Vec<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Export the simulated paths as CSV
    Paths {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Export only the first N paths
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
}

fn overrides(args: &SimulationArgs, percentiles: Vec<f64>, log_level: Option<String>) -> SettingsOverrides {
    SettingsOverrides {
        initial_investment: args.initial_investment,
        annual_return: args.annual_return,
        annual_volatility: args.annual_volatility,
        years: args.years,
        simulations: args.simulations,
        seed: args.seed,
        unseeded: args.unseeded,
        parallel: args.parallel,
        percentiles,
        log_level,
    }
}

fn init_tracing(log_level: &str) {
    // Logs go to stderr so stdout stays clean for JSON and CSV output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (simulation, percentiles) = match &cli.command {
        Commands::Simulate {
            simulation,
            percentiles,
            ..
        } => (simulation, percentiles.clone()),
        Commands::Paths { simulation, .. } => (simulation, Vec::new()),
    };
    let cli_overrides = overrides(simulation, percentiles, cli.log_level.clone());
    let settings = build_settings(cli.config.as_deref(), &cli_overrides)
        .context("failed to load forecast settings")?;

    let level = if cli.verbose {
        "debug"
    } else {
        settings.log_level.as_filter_str()
    };
    init_tracing(level);

    info!("Forecast CLI v{}", forecast_cli::VERSION);
    debug!(?settings, "Settings loaded");

    match cli.command {
        Commands::Simulate { format, .. } => {
            let stdout = std::io::stdout();
            commands::simulate::run(&settings, format, &mut stdout.lock())
                .context("forecast failed")?;
        }
        Commands::Paths { output, limit, .. } => {
            commands::paths::run(&settings, output.as_deref(), limit)
                .context("path export failed")?;
        }
    }

    Ok(())
}
