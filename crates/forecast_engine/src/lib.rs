//! # Forecast Engine
//!
//! Monte Carlo forecasting of a single portfolio's value under normally
//! distributed annual returns.
//!
//! ## Pipeline
//!
//! ```text
//! SimulationConfig ──▶ simulate_paths ──▶ PathMatrix ──▶ summarise ──▶ SummaryStatistics
//!        │                   ▲
//!        └── seed ──▶ ForecastRng / NormalReturns
//! ```
//!
//! - [`rng`]: seeded generator, per-path sub-streams, return distributions
//! - [`paths`]: the path recurrence `V[t] = V[t-1] × (1 + r)`
//! - [`summary`]: mean and interpolated percentiles of terminal values
//! - [`session`]: one validated run owning its generator state and matrix
//!
//! Plotting and report formatting are left to consumers of [`PathMatrix`]
//! and [`SummaryStatistics`]; this crate has no presentation code.
//!
//! ## Usage Example
//!
//! ```rust
//! use forecast_engine::{SimulationConfig, SimulationSession};
//!
//! let config = SimulationConfig::builder()
//!     .initial_investment(100_000.0)
//!     .annual_return(0.08)
//!     .annual_volatility(0.0)
//!     .years(20)
//!     .simulation_count(5)
//!     .build()
//!     .unwrap();
//!
//! let session = SimulationSession::run(config).unwrap();
//! let summary = session.summarise(&[5.0, 95.0]).unwrap();
//!
//! let expected = 100_000.0 * 1.08_f64.powi(20);
//! assert!((summary.mean() - expected).abs() / expected < 1e-9);
//! ```
//!
//! ## Known Modelling Limitation
//!
//! Normal returns allow draws below -100%, so a path can go negative. The
//! engine does not clamp such paths.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod paths;
pub mod rng;
pub mod session;
pub mod summary;

pub use config::{SamplingScheme, SimulationConfig, SimulationConfigBuilder};
pub use error::{ForecastError, Result};
pub use paths::{simulate_paths, PathMatrix};
pub use session::{SimulationSession, DEFAULT_PERCENTILES};
pub use summary::{summarise, SummaryStatistics};
