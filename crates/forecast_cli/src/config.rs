//! Forecast settings management
//!
//! Settings come from, lowest to highest priority:
//! 1. Built-in defaults (the classic $100k / 8% / 15% / 20 year example)
//! 2. A TOML file (`--config`)
//! 3. Command-line flags and `FORECAST_LOG_LEVEL`

use forecast_engine::{ForecastError, SamplingScheme, SimulationConfig, DEFAULT_PERCENTILES};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Forecast settings as read from file and command line.
///
/// Counts are kept signed here; range checks happen when the settings are
/// turned into a [`SimulationConfig`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastSettings {
    /// Starting portfolio value
    pub initial_investment: f64,
    /// Expected annual return
    pub annual_return: f64,
    /// Annual volatility
    pub annual_volatility: f64,
    /// Horizon in years
    pub years: i64,
    /// Number of simulated paths
    pub simulations: i64,
    /// Seed; `None` draws one from OS entropy
    pub seed: Option<u64>,
    /// How draws are assigned to paths
    pub sampling: SamplingScheme,
    /// Percentiles to report
    pub percentiles: Vec<f64>,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            initial_investment: 100_000.0,
            annual_return: 0.08,
            annual_volatility: 0.15,
            years: 20,
            simulations: 10_000,
            seed: Some(42),
            sampling: SamplingScheme::SingleStream,
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            log_level: LogLevel::Info,
        }
    }
}

impl ForecastSettings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &SettingsOverrides) -> Result<(), ConfigError> {
        if let Some(value) = cli.initial_investment {
            self.initial_investment = value;
        }
        if let Some(value) = cli.annual_return {
            self.annual_return = value;
        }
        if let Some(value) = cli.annual_volatility {
            self.annual_volatility = value;
        }
        if let Some(value) = cli.years {
            self.years = value;
        }
        if let Some(value) = cli.simulations {
            self.simulations = value;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if cli.unseeded {
            self.seed = None;
        }
        if cli.parallel {
            self.sampling = SamplingScheme::PerPathStreams;
        }
        if !cli.percentiles.is_empty() {
            self.percentiles = cli.percentiles.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Build the engine configuration
    pub fn to_simulation_config(&self) -> Result<SimulationConfig, ForecastError> {
        SimulationConfig::builder()
            .initial_investment(self.initial_investment)
            .annual_return(self.annual_return)
            .annual_volatility(self.annual_volatility)
            .years(self.years)
            .simulation_count(self.simulations)
            .maybe_seed(self.seed)
            .sampling(self.sampling)
            .build()
    }
}

/// Command-line overrides for [`ForecastSettings`]
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub initial_investment: Option<f64>,
    pub annual_return: Option<f64>,
    pub annual_volatility: Option<f64>,
    pub years: Option<i64>,
    pub simulations: Option<i64>,
    pub seed: Option<u64>,
    pub unseeded: bool,
    pub parallel: bool,
    pub percentiles: Vec<f64>,
    pub log_level: Option<String>,
}

/// Build settings from all sources
pub fn build_settings(
    config_file: Option<&Path>,
    cli: &SettingsOverrides,
) -> crate::Result<ForecastSettings> {
    let mut settings = match config_file {
        Some(path) => ForecastSettings::from_file(path)?,
        None => ForecastSettings::default(),
    };

    settings.merge_with_cli(cli)?;
    Ok(settings)
}
