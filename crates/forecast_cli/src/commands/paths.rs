//! Paths command implementation
//!
//! Exports the simulated path matrix as CSV for external plotting tools.
//! Header: `path,year_0,year_1,...,year_N`; one row per simulated path.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use forecast_engine::{PathMatrix, SimulationSession};
use tracing::info;

use crate::config::ForecastSettings;
use crate::{CliError, Result};

/// Run the paths command, writing to `output` or stdout
pub fn run(settings: &ForecastSettings, output: Option<&Path>, limit: Option<usize>) -> Result<()> {
    if limit == Some(0) {
        return Err(CliError::InvalidArgument(
            "--limit must be at least 1".to_string(),
        ));
    }

    let session = SimulationSession::run(settings.to_simulation_config()?)?;
    let paths = session.paths();
    let rows = limit.map_or(paths.n_paths(), |n| n.min(paths.n_paths()));

    match output {
        Some(file) => {
            info!(file = %file.display(), rows, "Exporting paths");
            write_csv(paths, rows, File::create(file)?)?;
        }
        None => write_csv(paths, rows, io::stdout().lock())?,
    }

    info!(seed = session.seed(), rows, "Path export complete");
    Ok(())
}

/// Write the first `rows` paths of `paths` as CSV
pub fn write_csv<W: Write>(paths: &PathMatrix, rows: usize, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let header = std::iter::once("path".to_string())
        .chain((0..paths.n_columns()).map(|year| format!("year_{}", year)));
    csv.write_record(header)?;

    for (index, row) in paths.rows().take(rows).enumerate() {
        let record =
            std::iter::once(index.to_string()).chain(row.iter().map(|value| value.to_string()));
        csv.write_record(record)?;
    }

    csv.flush()?;
    Ok(())
}
