//! Error types for the forecasting engine.
//!
//! Every failure in the engine is a caller input error detected
//! synchronously; nothing here is transient or worth retrying.

use thiserror::Error;

/// Categorised forecasting errors.
///
/// # Variants
/// - `InvalidConfiguration`: a [`SimulationConfig`](crate::SimulationConfig)
///   invariant was violated; raised before any path is allocated
/// - `InvalidParameter`: a per-call argument (e.g. a percentile) was out of
///   range; an already simulated path matrix stays valid
///
/// # Examples
/// ```
/// use forecast_engine::ForecastError;
///
/// let err = ForecastError::InvalidParameter {
///     name: "percentile",
///     reason: "101 is outside [0, 100]".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Invalid parameter 'percentile': 101 is outside [0, 100]"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// Simulation configuration violates an invariant.
    #[error("Invalid configuration '{field}': {reason}")]
    InvalidConfiguration {
        /// Offending configuration field.
        field: &'static str,
        /// Description of the violation.
        reason: String,
    },

    /// Argument passed to an operation is out of range.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        reason: String,
    },
}

impl ForecastError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for configuration errors.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ForecastError>;
