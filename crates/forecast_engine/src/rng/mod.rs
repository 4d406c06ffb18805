//! # Random Return Generation
//!
//! This module provides the random number facilities for the path simulator:
//! a seeded pseudo-random generator and the return distributions sampled
//! from it.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded explicitly; there is no
//!   process-wide random state
//! - **Sub-streams**: a base seed can be split into one independent
//!   generator per path, so parallel work partitioning never changes results
//! - **Separation**: the distribution family is a trait, independent of the
//!   path recurrence that consumes it
//!
//! ## Module Structure
//!
//! - `prng`: Pseudo-random number generator wrapper with seed management
//! - `distribution`: Annual return distributions
//!
//! ## Usage Example
//!
//! ```rust
//! use forecast_engine::rng::{ForecastRng, NormalReturns, ReturnDistribution};
//!
//! let mut rng = ForecastRng::from_seed(42);
//! let returns = NormalReturns::new(0.08, 0.15);
//!
//! let r = returns.sample(&mut rng);
//! assert!(r.is_finite());
//! ```

mod distribution;
mod prng;

pub use distribution::{NormalReturns, ReturnDistribution};
pub use prng::{derive_substream_seed, ForecastRng};

#[cfg(test)]
mod tests;
