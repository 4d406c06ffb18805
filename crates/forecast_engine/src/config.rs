//! Simulation configuration.
//!
//! This module provides [`SimulationConfig`] and its builder. A config can
//! only be obtained through [`SimulationConfigBuilder::build`], which
//! enforces every invariant, so holding a `SimulationConfig` means holding a
//! valid one.

use crate::error::{ForecastError, Result};

/// Maximum number of simulated paths allowed.
pub const MAX_SIMULATIONS: usize = 10_000_000;

/// Maximum investment horizon in years.
pub const MAX_YEARS: usize = 1_000;

/// Maximum number of cells (`simulation_count × (years + 1)`) in one path matrix.
pub const MAX_CELLS: usize = 200_000_000;

/// How random draws are assigned to paths.
///
/// The traversal order is part of the reproducibility contract: the same
/// seed under a different scheme yields a different (equally valid) path
/// matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SamplingScheme {
    /// One generator seeded with the base seed, drawn path-major: the outer
    /// loop runs over paths, the inner loop over years. Sequential.
    #[default]
    SingleStream,

    /// Path `i` draws from sub-stream `i` of the base seed, years in order.
    /// Rows are generated in parallel and the result does not depend on the
    /// number of worker threads.
    PerPathStreams,
}

impl std::fmt::Display for SamplingScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplingScheme::SingleStream => write!(f, "single_stream"),
            SamplingScheme::PerPathStreams => write!(f, "per_path_streams"),
        }
    }
}

/// Monte Carlo forecast configuration.
///
/// Immutable. Use [`SimulationConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .initial_investment(100_000.0)
///     .annual_return(0.08)
///     .annual_volatility(0.15)
///     .years(20)
///     .simulation_count(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.years(), 20);
/// assert_eq!(config.simulation_count(), 10_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    initial_investment: f64,
    annual_return: f64,
    annual_volatility: f64,
    years: usize,
    simulation_count: usize,
    seed: Option<u64>,
    sampling: SamplingScheme,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Returns the starting portfolio value.
    #[inline]
    pub fn initial_investment(&self) -> f64 {
        self.initial_investment
    }

    /// Returns the expected annual return (mean of the return distribution).
    #[inline]
    pub fn annual_return(&self) -> f64 {
        self.annual_return
    }

    /// Returns the annual volatility (standard deviation of the return distribution).
    #[inline]
    pub fn annual_volatility(&self) -> f64 {
        self.annual_volatility
    }

    /// Returns the investment horizon in years.
    #[inline]
    pub fn years(&self) -> usize {
        self.years
    }

    /// Returns the number of simulated paths.
    #[inline]
    pub fn simulation_count(&self) -> usize {
        self.simulation_count
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the sampling scheme.
    #[inline]
    pub fn sampling(&self) -> SamplingScheme {
        self.sampling
    }

    /// Number of cells in the path matrix this config produces.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.simulation_count * (self.years + 1)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidConfiguration` if:
    /// - `initial_investment` is not a positive finite number
    /// - `annual_return` is not finite
    /// - `annual_volatility` is negative or not finite
    /// - `years` exceeds [`MAX_YEARS`]
    /// - `simulation_count` is 0 or exceeds [`MAX_SIMULATIONS`]
    /// - the matrix would exceed [`MAX_CELLS`]
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_investment.is_finite() && self.initial_investment > 0.0) {
            return Err(ForecastError::config(
                "initial_investment",
                format!("must be positive and finite, got {}", self.initial_investment),
            ));
        }
        if !self.annual_return.is_finite() {
            return Err(ForecastError::config(
                "annual_return",
                format!("must be finite, got {}", self.annual_return),
            ));
        }
        if !(self.annual_volatility.is_finite() && self.annual_volatility >= 0.0) {
            return Err(ForecastError::config(
                "annual_volatility",
                format!(
                    "must be non-negative and finite, got {}",
                    self.annual_volatility
                ),
            ));
        }
        if self.years > MAX_YEARS {
            return Err(ForecastError::config(
                "years",
                format!("must be at most {}, got {}", MAX_YEARS, self.years),
            ));
        }
        if self.simulation_count == 0 || self.simulation_count > MAX_SIMULATIONS {
            return Err(ForecastError::config(
                "simulation_count",
                format!(
                    "must be in range [1, {}], got {}",
                    MAX_SIMULATIONS, self.simulation_count
                ),
            ));
        }
        if self.cell_count() > MAX_CELLS {
            return Err(ForecastError::config(
                "simulation_count",
                format!(
                    "{} paths over {} years need {} cells, limit is {}",
                    self.simulation_count,
                    self.years,
                    self.cell_count(),
                    MAX_CELLS
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
///
/// Counts are accepted as signed integers so that values coming from loosely
/// typed sources (files, command lines) are rejected with
/// `InvalidConfiguration` rather than wrapping.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::{ForecastError, SimulationConfig};
///
/// let result = SimulationConfig::builder()
///     .initial_investment(1_000.0)
///     .years(-1)
///     .simulation_count(100)
///     .build();
///
/// assert!(matches!(
///     result,
///     Err(ForecastError::InvalidConfiguration { field: "years", .. })
/// ));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    initial_investment: Option<f64>,
    annual_return: f64,
    annual_volatility: f64,
    years: Option<i64>,
    simulation_count: Option<i64>,
    seed: Option<u64>,
    sampling: SamplingScheme,
}

impl SimulationConfigBuilder {
    /// Sets the starting portfolio value (must be positive).
    #[inline]
    pub fn initial_investment(mut self, value: f64) -> Self {
        self.initial_investment = Some(value);
        self
    }

    /// Sets the expected annual return. Defaults to `0.0`.
    #[inline]
    pub fn annual_return(mut self, value: f64) -> Self {
        self.annual_return = value;
        self
    }

    /// Sets the annual volatility. Defaults to `0.0`.
    #[inline]
    pub fn annual_volatility(mut self, value: f64) -> Self {
        self.annual_volatility = value;
        self
    }

    /// Sets the horizon in years, in `[0, MAX_YEARS]`.
    #[inline]
    pub fn years(mut self, years: i64) -> Self {
        self.years = Some(years);
        self
    }

    /// Sets the number of paths, in `[1, MAX_SIMULATIONS]`.
    #[inline]
    pub fn simulation_count(mut self, count: i64) -> Self {
        self.simulation_count = Some(count);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the sampling scheme.
    #[inline]
    pub fn sampling(mut self, sampling: SamplingScheme) -> Self {
        self.sampling = sampling;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidConfiguration` if a required field is
    /// missing, a count is negative, or [`SimulationConfig::validate`] fails.
    pub fn build(self) -> Result<SimulationConfig> {
        let initial_investment = self
            .initial_investment
            .ok_or_else(|| ForecastError::config("initial_investment", "must be specified"))?;
        let years = non_negative("years", self.years)?;
        let simulation_count = non_negative("simulation_count", self.simulation_count)?;

        let config = SimulationConfig {
            initial_investment,
            annual_return: self.annual_return,
            annual_volatility: self.annual_volatility,
            years,
            simulation_count,
            seed: self.seed,
            sampling: self.sampling,
        };

        config.validate()?;
        Ok(config)
    }
}

fn non_negative(field: &'static str, value: Option<i64>) -> Result<usize> {
    let value = value.ok_or_else(|| ForecastError::config(field, "must be specified"))?;
    usize::try_from(value)
        .map_err(|_| ForecastError::config(field, format!("must be non-negative, got {}", value)))
}
