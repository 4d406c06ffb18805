//! One complete forecast run.
//!
//! [`SimulationSession`] validates a [`SimulationConfig`], resolves the seed,
//! simulates the path matrix exactly once and then serves read-only views
//! and summaries of it.

use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::paths::{simulate_paths, PathMatrix};
use crate::rng::{ForecastRng, NormalReturns};
use crate::summary::{summarise, SummaryStatistics};

/// Percentiles reported when the caller has no preference.
pub const DEFAULT_PERCENTILES: [f64; 2] = [5.0, 95.0];

/// A completed Monte Carlo forecast.
///
/// Owns its configuration, the effective seed and the path matrix. Sessions
/// share nothing, so any number can run in the same process without
/// interfering with one another.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::{SimulationConfig, SimulationSession};
///
/// let config = SimulationConfig::builder()
///     .initial_investment(100_000.0)
///     .annual_return(0.08)
///     .annual_volatility(0.15)
///     .years(20)
///     .simulation_count(1_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let session = SimulationSession::run(config).unwrap();
/// let summary = session.summarise(&[5.0, 95.0]).unwrap();
///
/// assert!(summary.percentile(5.0).unwrap() < summary.mean());
/// assert!(summary.mean() < summary.percentile(95.0).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct SimulationSession {
    config: SimulationConfig,
    seed: u64,
    paths: PathMatrix,
}

impl SimulationSession {
    /// Validates `config` and simulates every path.
    ///
    /// Without a configured seed a fresh one is drawn from OS entropy; it is
    /// available from [`seed`](Self::seed) afterwards so the run can be
    /// reproduced.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidConfiguration` if the config violates
    /// an invariant. Nothing is allocated in that case.
    pub fn run(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let seed = config
            .seed()
            .unwrap_or_else(|| ForecastRng::from_entropy().seed());
        let distribution = NormalReturns::new(config.annual_return(), config.annual_volatility());

        debug!(
            seed,
            seeded = config.seed().is_some(),
            sampling = %config.sampling(),
            paths = config.simulation_count(),
            years = config.years(),
            "Simulating portfolio paths"
        );

        let paths = simulate_paths(&config, &distribution, seed);

        info!(
            paths = paths.n_paths(),
            columns = paths.n_columns(),
            seed,
            "Simulation complete"
        );

        Ok(Self {
            config,
            seed,
            paths,
        })
    }

    /// Returns the configuration this session ran with.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the seed actually used, whether configured or drawn.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view of the simulated paths.
    #[inline]
    pub fn paths(&self) -> &PathMatrix {
        &self.paths
    }

    /// Summarises the terminal values with the requested percentiles.
    ///
    /// Each call builds a fresh snapshot; repeated calls return equal
    /// results.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidParameter` for percentiles outside
    /// `[0, 100]`. The session itself stays usable.
    pub fn summarise(&self, percentiles: &[f64]) -> Result<SummaryStatistics> {
        summarise(&self.paths.terminal_values(), percentiles)
    }

    /// Summarises with [`DEFAULT_PERCENTILES`].
    pub fn default_summary(&self) -> Result<SummaryStatistics> {
        self.summarise(&DEFAULT_PERCENTILES)
    }

    /// Consumes the session, returning the path matrix.
    #[inline]
    pub fn into_paths(self) -> PathMatrix {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingScheme;
    use crate::error::ForecastError;

    fn config(seed: Option<u64>) -> SimulationConfig {
        SimulationConfig::builder()
            .initial_investment(10_000.0)
            .annual_return(0.07)
            .annual_volatility(0.2)
            .years(10)
            .simulation_count(500)
            .maybe_seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_seeded_session_reports_seed() {
        let session = SimulationSession::run(config(Some(42))).unwrap();
        assert_eq!(session.seed(), 42);
        assert_eq!(session.config().seed(), Some(42));
    }

    #[test]
    fn test_unseeded_session_can_be_replayed() {
        let first = SimulationSession::run(config(None)).unwrap();
        let replay = SimulationSession::run(config(Some(first.seed()))).unwrap();
        assert_eq!(first.paths(), replay.paths());
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = SimulationSession::run(config(Some(1))).unwrap();
        let b = SimulationSession::run(config(Some(2))).unwrap();
        let a_again = SimulationSession::run(config(Some(1))).unwrap();

        assert_ne!(a.paths(), b.paths());
        assert_eq!(a.paths(), a_again.paths());
    }

    #[test]
    fn test_invalid_percentile_keeps_session_usable() {
        let session = SimulationSession::run(config(Some(3))).unwrap();

        let err = session.summarise(&[150.0]).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));

        let summary = session.summarise(&[5.0]).unwrap();
        assert_eq!(summary.count(), 500);
    }

    #[test]
    fn test_default_summary() {
        let session = SimulationSession::run(config(Some(4))).unwrap();
        let summary = session.default_summary().unwrap();
        assert!(summary.percentile(5.0).is_some());
        assert!(summary.percentile(95.0).is_some());
        assert_eq!(summary, session.summarise(&DEFAULT_PERCENTILES).unwrap());
    }

    #[test]
    fn test_into_paths() {
        let session = SimulationSession::run(config(Some(5))).unwrap();
        let expected = session.paths().clone();
        assert_eq!(session.into_paths(), expected);
    }

    #[test]
    fn test_per_path_session() {
        let cfg = SimulationConfig::builder()
            .initial_investment(1.0)
            .annual_return(0.0)
            .annual_volatility(0.1)
            .years(3)
            .simulation_count(100)
            .seed(6)
            .sampling(SamplingScheme::PerPathStreams)
            .build()
            .unwrap();
        let session = SimulationSession::run(cfg).unwrap();
        assert_eq!(session.paths().n_paths(), 100);
    }
}
