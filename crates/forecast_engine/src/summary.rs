//! Terminal value statistics.
//!
//! Reduces a sample of ending portfolio values to a mean and a set of
//! percentiles. Percentiles use linear interpolation between order
//! statistics at rank `p / 100 × (n - 1)`, the conventional definition for
//! risk bands (e.g. the 5th and 95th percentiles of ending wealth).

use crate::error::{ForecastError, Result};

/// Read-only snapshot of the terminal value distribution.
///
/// Built once from a completed path matrix; a new matrix needs a new
/// summary.
///
/// With the `serde` feature it serialises as a mapping with the percentile
/// table keyed by percentile:
///
/// ```json
/// {"mean": 466095.71, "std_dev": 0.0, "min": 466095.71, "max": 466095.71,
///  "count": 5, "percentiles": {"5": 466095.71, "95": 466095.71}}
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStatistics {
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
    count: usize,
    percentiles: Vec<(f64, f64)>,
}

impl SummaryStatistics {
    /// Arithmetic mean of the terminal values.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation (n - 1 denominator); zero for a single value.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Smallest terminal value.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest terminal value.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of terminal values summarised.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Value at a requested percentile, or `None` if it was not requested.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(requested, _)| *requested == p)
            .map(|(_, value)| *value)
    }

    /// `(percentile, value)` pairs in request order.
    #[inline]
    pub fn percentiles(&self) -> &[(f64, f64)] {
        &self.percentiles
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SummaryStatistics {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        struct PercentileTable<'a>(&'a [(f64, f64)]);

        impl serde::Serialize for PercentileTable<'_> {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (p, value) in self.0 {
                    map.serialize_entry(&format_percentile_key(*p), value)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("SummaryStatistics", 6)?;
        state.serialize_field("mean", &self.mean)?;
        state.serialize_field("std_dev", &self.std_dev)?;
        state.serialize_field("min", &self.min)?;
        state.serialize_field("max", &self.max)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("percentiles", &PercentileTable(&self.percentiles))?;
        state.end()
    }
}

/// Formats a percentile as a map key: `5.0` → `"5"`, `97.5` → `"97.5"`.
pub fn format_percentile_key(p: f64) -> String {
    if p.fract() == 0.0 {
        format!("{}", p as i64)
    } else {
        format!("{}", p)
    }
}

/// Summarises `values` with the requested percentiles.
///
/// `values` is not modified; a sorted copy is taken internally. Repeated
/// percentiles are reported once, in the position they were first requested.
///
/// # Errors
///
/// Returns `ForecastError::InvalidParameter` if `values` is empty or any
/// percentile is NaN or outside `[0, 100]`. Percentiles are checked before
/// any work is done.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::summarise;
///
/// let stats = summarise(&[4.0, 1.0, 3.0, 2.0], &[25.0, 50.0]).unwrap();
/// assert_eq!(stats.mean(), 2.5);
/// assert_eq!(stats.percentile(25.0), Some(1.75));
/// assert_eq!(stats.percentile(50.0), Some(2.5));
/// ```
pub fn summarise(values: &[f64], percentiles: &[f64]) -> Result<SummaryStatistics> {
    for &p in percentiles {
        validate_percentile(p)?;
    }
    if values.is_empty() {
        return Err(ForecastError::parameter(
            "values",
            "cannot summarise an empty sample",
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = running_mean(&sorted);
    let std_dev = sample_std_dev(&sorted, mean);

    let mut table: Vec<(f64, f64)> = Vec::with_capacity(percentiles.len());
    for &p in percentiles {
        if table.iter().all(|&(seen, _)| seen != p) {
            table.push((p, interpolate(&sorted, p)));
        }
    }

    Ok(SummaryStatistics {
        mean,
        std_dev,
        min: sorted[0],
        max: sorted[n - 1],
        count: n,
        percentiles: table,
    })
}

/// Incremental mean; stays finite whenever every value is finite.
fn running_mean(values: &[f64]) -> f64 {
    values
        .iter()
        .enumerate()
        .fold(0.0, |m, (k, &x)| if x == m { m } else { m + (x - m) / (k + 1) as f64 })
}

/// Sample standard deviation (n - 1), with deviations scaled by the largest
/// magnitude before squaring.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        return (sum_sq / (n - 1) as f64).sqrt();
    }
    let sum_sq = values
        .iter()
        .map(|v| (v / scale - mean / scale).powi(2))
        .sum::<f64>();
    scale * (sum_sq / (n - 1) as f64).sqrt()
}

/// Percentile of an already sorted sample.
///
/// # Errors
///
/// Returns `ForecastError::InvalidParameter` if `sorted` is empty or `p` is
/// NaN or outside `[0, 100]`.
///
/// # Examples
///
/// ```rust
/// use forecast_engine::summary::percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&sorted, 0.0).unwrap(), 1.0);
/// assert_eq!(percentile(&sorted, 100.0).unwrap(), 4.0);
/// assert!(percentile(&sorted, 100.5).is_err());
/// ```
pub fn percentile(sorted: &[f64], p: f64) -> Result<f64> {
    validate_percentile(p)?;
    if sorted.is_empty() {
        return Err(ForecastError::parameter(
            "values",
            "cannot take a percentile of an empty sample",
        ));
    }
    debug_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    Ok(interpolate(sorted, p))
}

fn validate_percentile(p: f64) -> Result<()> {
    if (0.0..=100.0).contains(&p) {
        Ok(())
    } else {
        Err(ForecastError::parameter(
            "percentile",
            format!("{} is outside [0, 100]", p),
        ))
    }
}

/// Linear interpolation between the order statistics around rank
/// `p / 100 × (n - 1)`. `sorted` is non-empty and `p` in range.
fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);

    if lower == upper {
        sorted[lower]
    } else {
        let (a, b) = (sorted[lower], sorted[upper]);
        let weight = rank - lower as f64;
        // Keep within [a, b] so percentiles stay monotone under rounding
        (a + (b - a) * weight).max(a).min(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_percentile_interpolates_between_points() {
        let stats = summarise(&[1.0, 2.0, 3.0, 4.0], &[25.0, 75.0, 10.0]).unwrap();
        assert_relative_eq!(stats.percentile(25.0).unwrap(), 1.75, epsilon = 1e-12);
        assert_relative_eq!(stats.percentile(75.0).unwrap(), 3.25, epsilon = 1e-12);
        assert_relative_eq!(stats.percentile(10.0).unwrap(), 1.3, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_endpoints_are_min_and_max() {
        let values = [5.0, -2.0, 9.0, 0.5];
        let stats = summarise(&values, &[0.0, 100.0]).unwrap();
        assert_eq!(stats.percentile(0.0), Some(-2.0));
        assert_eq!(stats.percentile(100.0), Some(9.0));
        assert_eq!(stats.min(), -2.0);
        assert_eq!(stats.max(), 9.0);
    }

    #[test]
    fn test_mean_and_std_dev() {
        let stats = summarise(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], &[]).unwrap();
        assert_relative_eq!(stats.mean(), 5.0, max_relative = 1e-12);
        // Sample variance: 32 / 7
        assert_relative_eq!(stats.std_dev(), (32.0_f64 / 7.0).sqrt(), max_relative = 1e-12);
        assert_eq!(stats.count(), 8);
        assert!(stats.percentiles().is_empty());
    }

    #[test]
    fn test_single_value() {
        let stats = summarise(&[42.0], &[5.0, 50.0, 95.0]).unwrap();
        assert_eq!(stats.mean(), 42.0);
        assert_eq!(stats.std_dev(), 0.0);
        for (_, value) in stats.percentiles() {
            assert_eq!(*value, 42.0);
        }
    }

    #[test]
    fn test_unrequested_percentile_is_none() {
        let stats = summarise(&[1.0, 2.0], &[5.0]).unwrap();
        assert_eq!(stats.percentile(95.0), None);
    }

    #[test]
    fn test_percentiles_keep_request_order() {
        let stats = summarise(&[1.0, 2.0, 3.0], &[95.0, 5.0]).unwrap();
        let requested: Vec<f64> = stats.percentiles().iter().map(|(p, _)| *p).collect();
        assert_eq!(requested, vec![95.0, 5.0]);
    }

    #[test]
    fn test_repeated_percentiles_reported_once() {
        let stats = summarise(&[1.0, 2.0, 3.0], &[5.0, 95.0, 5.0, 5.0]).unwrap();
        let requested: Vec<f64> = stats.percentiles().iter().map(|(p, _)| *p).collect();
        assert_eq!(requested, vec![5.0, 95.0]);
        assert_relative_eq!(stats.percentile(5.0).unwrap(), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_large_finite_values_keep_finite_moments() {
        let stats = summarise(&[1.0e308, 1.5e308], &[50.0]).unwrap();
        assert_relative_eq!(stats.mean(), 1.25e308, max_relative = 1e-12);
        assert!(stats.std_dev().is_finite());
        assert_relative_eq!(stats.std_dev(), 0.5e308 / 2.0_f64.sqrt(), max_relative = 1e-12);
        assert!(stats.mean() <= stats.max());
    }

    #[test]
    fn test_overflowed_sample_mean_is_infinite() {
        let stats = summarise(&[f64::INFINITY; 3], &[50.0]).unwrap();
        assert_eq!(stats.mean(), f64::INFINITY);
        assert_eq!(stats.percentile(50.0), Some(f64::INFINITY));
    }

    #[test]
    fn test_out_of_range_percentile_rejected() {
        for p in [-0.1, 100.1, f64::NAN, f64::INFINITY] {
            let result = summarise(&[1.0, 2.0], &[5.0, p]);
            assert!(
                matches!(
                    result,
                    Err(ForecastError::InvalidParameter {
                        name: "percentile",
                        ..
                    })
                ),
                "percentile {} should be rejected",
                p
            );
        }
    }

    #[test]
    fn test_empty_sample_rejected() {
        assert!(matches!(
            summarise(&[], &[5.0]),
            Err(ForecastError::InvalidParameter { name: "values", .. })
        ));
        assert!(percentile(&[], 5.0).is_err());
    }

    #[test]
    fn test_input_not_mutated_and_idempotent() {
        let values = vec![3.0, 1.0, 2.0];
        let first = summarise(&values, &[5.0, 95.0]).unwrap();
        let second = summarise(&values, &[5.0, 95.0]).unwrap();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_format_percentile_key() {
        assert_eq!(format_percentile_key(5.0), "5");
        assert_eq!(format_percentile_key(100.0), "100");
        assert_eq!(format_percentile_key(97.5), "97.5");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialises_as_mapping() {
        let stats = summarise(&[1.0, 2.0, 3.0, 4.0], &[5.0, 97.5]).unwrap();
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["mean"], 2.5);
        assert_eq!(json["count"], 4);
        assert_eq!(json["min"], 1.0);
        assert!(json["percentiles"]["5"].is_number());
        assert!(json["percentiles"]["97.5"].is_number());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_repeated_percentile_serialises_single_key() {
        let stats = summarise(&[1.0, 2.0, 3.0], &[5.0, 5.0]).unwrap();
        let text = serde_json::to_string(&stats).unwrap();
        assert_eq!(text.matches("\"5\"").count(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Percentiles are monotone in p and bracketed by min and max.
        #[test]
        fn prop_percentiles_monotone(
            values in prop::collection::vec(-1.0e6..1.0e6_f64, 1..200),
        ) {
            let stats = summarise(&values, &[5.0, 50.0, 95.0]).unwrap();
            let p5 = stats.percentile(5.0).unwrap();
            let p50 = stats.percentile(50.0).unwrap();
            let p95 = stats.percentile(95.0).unwrap();

            prop_assert!(stats.min() <= p5);
            prop_assert!(p5 <= p50);
            prop_assert!(p50 <= p95);
            prop_assert!(p95 <= stats.max());
            let slack = 1e-9 * stats.max().abs().max(stats.min().abs()).max(1.0);
            prop_assert!(stats.min() - slack <= stats.mean());
            prop_assert!(stats.mean() <= stats.max() + slack);
        }
    }
}
