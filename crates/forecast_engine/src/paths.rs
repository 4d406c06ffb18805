//! Path generation for Monte Carlo portfolio forecasts.
//!
//! Each path starts at the initial investment and compounds one sampled
//! annual return per year:
//!
//! ```text
//! V[0] = initial_investment
//! V[t] = V[t-1] × (1 + r[t])      t = 1..=years
//! ```
//!
//! Values are not clamped: a return below -100% drives a path negative,
//! which is a property of the normal return model rather than an error.
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[path * (years + 1) + year]`
//! where `year = 0` holds the initial investment.

use rayon::prelude::*;

use crate::config::{SamplingScheme, SimulationConfig};
use crate::rng::{ForecastRng, ReturnDistribution};

/// Simulated portfolio values, one row per path and one column per year.
///
/// Shape is `simulation_count × (years + 1)`. Immutable once built; all
/// access is read-only.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::{SimulationConfig, SimulationSession};
///
/// let config = SimulationConfig::builder()
///     .initial_investment(1_000.0)
///     .annual_return(0.05)
///     .annual_volatility(0.1)
///     .years(3)
///     .simulation_count(4)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// let session = SimulationSession::run(config).unwrap();
/// let paths = session.paths();
///
/// assert_eq!(paths.n_paths(), 4);
/// assert_eq!(paths.n_columns(), 4);
/// assert!(paths.column(0).all(|v| v == 1_000.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    values: Vec<f64>,
    n_paths: usize,
    years: usize,
}

impl PathMatrix {
    /// Number of simulated paths (rows).
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Horizon in years.
    #[inline]
    pub fn years(&self) -> usize {
        self.years
    }

    /// Number of columns, `years + 1`.
    #[inline]
    pub fn n_columns(&self) -> usize {
        self.years + 1
    }

    /// Value of `path` at `year`, or `None` when out of range.
    #[inline]
    pub fn value(&self, path: usize, year: usize) -> Option<f64> {
        if path < self.n_paths && year <= self.years {
            Some(self.values[path * self.n_columns() + year])
        } else {
            None
        }
    }

    /// One path as a slice of `years + 1` values.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths()`.
    #[inline]
    pub fn row(&self, path: usize) -> &[f64] {
        let width = self.n_columns();
        &self.values[path * width..(path + 1) * width]
    }

    /// Iterates over all paths in row order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.n_columns())
    }

    /// Iterates over the values of every path at `year`.
    ///
    /// # Panics
    ///
    /// Panics if `year > years()`.
    pub fn column(&self, year: usize) -> impl ExactSizeIterator<Item = f64> + '_ {
        assert!(year <= self.years, "year {} beyond horizon {}", year, self.years);
        self.rows().map(move |row| row[year])
    }

    /// Terminal values (column `years`), one per path.
    pub fn terminal_values(&self) -> Vec<f64> {
        self.column(self.years).collect()
    }

    /// Raw row-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Builds the full path matrix for `config`.
///
/// Draws come from `distribution` using generators derived from
/// `base_seed` according to [`SimulationConfig::sampling`]:
///
/// - [`SamplingScheme::SingleStream`]: one generator, path-major traversal
/// - [`SamplingScheme::PerPathStreams`]: sub-stream `i` for path `i`,
///   rows filled in parallel
///
/// The config is assumed valid; [`SimulationSession`](crate::SimulationSession)
/// validates before calling this.
pub fn simulate_paths<D: ReturnDistribution>(
    config: &SimulationConfig,
    distribution: &D,
    base_seed: u64,
) -> PathMatrix {
    let n_paths = config.simulation_count();
    let years = config.years();
    let width = years + 1;
    let initial = config.initial_investment();

    let mut values = vec![0.0; n_paths * width];

    match config.sampling() {
        SamplingScheme::SingleStream => {
            let mut rng = ForecastRng::from_seed(base_seed);
            for row in values.chunks_exact_mut(width) {
                advance_path(row, initial, distribution, &mut rng);
            }
        }
        SamplingScheme::PerPathStreams => {
            values
                .par_chunks_exact_mut(width)
                .enumerate()
                .for_each(|(path_idx, row)| {
                    let mut rng = ForecastRng::substream(base_seed, path_idx as u64);
                    advance_path(row, initial, distribution, &mut rng);
                });
        }
    }

    PathMatrix {
        values,
        n_paths,
        years,
    }
}

/// Fills one row: year 0 is `initial`, every later year compounds one draw.
#[inline]
fn advance_path<D: ReturnDistribution>(
    row: &mut [f64],
    initial: f64,
    distribution: &D,
    rng: &mut ForecastRng,
) {
    row[0] = initial;
    for year in 1..row.len() {
        let r = distribution.sample(rng);
        row[year] = row[year - 1] * (1.0 + r);
    }
}
