//! Simulate command implementation
//!
//! Runs one forecast session and prints the terminal value summary.

use std::io::Write;

use clap::ValueEnum;
use forecast_engine::SimulationSession;
use tracing::info;

use crate::config::ForecastSettings;
use crate::report::{render_json, render_table};
use crate::Result;

/// Output format for the summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Run the simulate command
pub fn run<W: Write>(settings: &ForecastSettings, format: OutputFormat, out: &mut W) -> Result<()> {
    let config = settings.to_simulation_config()?;
    info!("Starting forecast...");
    info!("  Initial investment: {}", config.initial_investment());
    info!("  Horizon: {} years", config.years());
    info!("  Simulations: {}", config.simulation_count());
    info!("  Sampling: {}", config.sampling());

    let session = SimulationSession::run(config)?;
    let summary = session.summarise(&settings.percentiles)?;

    let rendered = match format {
        OutputFormat::Table => render_table(&session, &summary),
        OutputFormat::Json => render_json(&session, &summary)?,
    };
    out.write_all(rendered.as_bytes())?;

    info!(seed = session.seed(), "Forecast complete");
    Ok(())
}
