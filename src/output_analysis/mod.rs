//! The output analysis module provides standard statistical analysis tools
//! for analyzing simulation outputs, and in particular for judging how
//! closely a simulation run has converged toward the analytic queueing
//! metrics.  Independent, identically-distributed (IID) samples are
//! analyzed with the `IndependentSample`.  Queue-length time series (which
//! carry initialization bias and autocorrelation) are analyzed with
//! `SteadyStateEstimate`.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

pub mod t_scores;

use crate::utils::{sample_mean, sample_variance};

/// Fraction of a time series deleted from the front as simulation warmup,
/// for initialization bias reduction.
const WARMUP_FRACTION: f64 = 0.2;

/// Batch count cap - for a fixed total sample size there is little benefit
/// from more than 30 batches, even when independence between batch means
/// could be retained.
const MAX_BATCH_COUNT: usize = 30;

/// The confidence interval provides an upper and lower estimate on a given
/// output, whether that output is an independent, identically-distributed
/// sample or time series data.
#[wasm_bindgen]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    lower: f64,
    upper: f64,
}

#[wasm_bindgen]
impl ConfidenceInterval {
    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn half_width(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

/// The independent sample is for independent, identically-distributed (IID)
/// samples, or where treating the data as an IID sample is determined to be
/// reasonable.  Typically, this will be non-time series data - no
/// autocorrelation.  There are no additional requirements on the data
/// beyond being IID; in particular, there are no normality assumptions.
#[wasm_bindgen]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IndependentSample {
    points: Vec<f64>,
    mean: f64,
    variance: f64,
}

#[wasm_bindgen]
impl IndependentSample {
    /// This constructor method creates an `IndependentSample` from a set of
    /// f64 points.
    pub fn post(points: Vec<f64>) -> IndependentSample {
        let mean = sample_mean(&points);
        let variance = sample_variance(&points, &mean);
        IndependentSample {
            points,
            mean,
            variance,
        }
    }

    /// Calculate the confidence interval of the mean, based on the provided
    /// value of alpha.
    pub fn confidence_interval_mean(&self, alpha: f64) -> ConfidenceInterval {
        if self.points.len() == 1 {
            return ConfidenceInterval {
                lower: self.mean,
                upper: self.mean,
            };
        }
        let half_width = t_scores::t_score(alpha, self.points.len() - 1) * self.variance.sqrt()
            / (self.points.len() as f64).sqrt();
        ConfidenceInterval {
            lower: self.mean - half_width,
            upper: self.mean + half_width,
        }
    }

    /// Return the sample mean.
    pub fn point_estimate_mean(&self) -> f64 {
        self.mean
    }

    /// Return the sample variance.
    pub fn variance(&self) -> f64 {
        self.variance
    }
}

/// The steady-state estimate is for long-run simulation outputs, where the
/// initial conditions are not of interest - for example, the queue-length
/// series a simulation returns, to be compared against an analytic
/// steady-state average.  A fixed warmup fraction is deleted from the front
/// of the series for initialization bias reduction, and the remainder is
/// divided into batches whose means are treated as an approximately
/// independent sample, to manage autocorrelation.
#[wasm_bindgen]
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SteadyStateEstimate {
    batch_means: Vec<f64>,
    mean: f64,
    variance: f64,
}

#[wasm_bindgen]
impl SteadyStateEstimate {
    /// This constructor method takes the simulation output time series, as
    /// a f64 vector, and runs the warmup deletion and batching analysis.
    /// An empty series produces a degenerate estimate - zero batches, and a
    /// zero mean.
    pub fn post(time_series: Vec<f64>) -> SteadyStateEstimate {
        let deletion_point = ((time_series.len() as f64) * WARMUP_FRACTION) as usize;
        let retained = &time_series[deletion_point..];
        if retained.is_empty() {
            return SteadyStateEstimate::default();
        }
        let batch_count = ((retained.len() as f64).sqrt() as usize)
            .min(MAX_BATCH_COUNT)
            .max(1);
        let batch_size = (retained.len() / batch_count).max(1);
        // Leftover points that do not fill a batch are dropped from the
        // front, with the rest of the warmup
        let leftover = retained.len() - batch_count * batch_size;
        let batch_means: Vec<f64> = (0..batch_count)
            .map(|batch_index| {
                let start = leftover + batch_index * batch_size;
                sample_mean(&retained[start..start + batch_size])
            })
            .collect();
        let mean = sample_mean(&batch_means);
        let variance = sample_variance(&batch_means, &mean);
        SteadyStateEstimate {
            batch_means,
            mean,
            variance,
        }
    }

    /// The method provides a confidence interval on the steady-state mean,
    /// over the batch means.
    pub fn confidence_interval_mean(&self, alpha: f64) -> ConfidenceInterval {
        if self.batch_means.len() <= 1 {
            return ConfidenceInterval {
                lower: self.mean,
                upper: self.mean,
            };
        }
        let half_width = t_scores::t_score(alpha, self.batch_means.len() - 1)
            * self.variance.sqrt()
            / (self.batch_means.len() as f64).sqrt();
        ConfidenceInterval {
            lower: self.mean - half_width,
            upper: self.mean + half_width,
        }
    }

    /// The method provides a point estimate on the steady-state mean.
    pub fn point_estimate_mean(&self) -> f64 {
        self.mean
    }

    pub fn batch_count(&self) -> usize {
        self.batch_means.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epsilon() -> f64 {
        1.0e-12
    }

    #[test]
    fn confidence_interval_mean() {
        let sample = IndependentSample::post(vec![
            1.02, 0.73, 3.20, 0.23, 1.76, 0.47, 1.89, 1.45, 0.44, 0.23,
        ]);
        let confidence_interval = sample.confidence_interval_mean(0.1);
        assert!((confidence_interval.lower() - 0.7492630635369267).abs() < epsilon());
        assert!((confidence_interval.upper() - 1.534736936463073).abs() < epsilon());
        assert!(confidence_interval.contains(sample.point_estimate_mean()));
    }

    #[test]
    fn single_point_interval_is_degenerate() {
        let sample = IndependentSample::post(vec![7.0]);
        let confidence_interval = sample.confidence_interval_mean(0.05);
        assert!((confidence_interval.half_width()).abs() < epsilon());
        assert!((confidence_interval.lower() - 7.0).abs() < epsilon());
    }

    #[test]
    fn steady_state_estimate_recovers_a_constant_series() {
        let estimate = SteadyStateEstimate::post(vec![3.0; 1000]);
        assert!((estimate.point_estimate_mean() - 3.0).abs() < epsilon());
        assert!(estimate.confidence_interval_mean(0.05).half_width() < epsilon());
        assert_eq!(estimate.batch_count(), 28);
    }

    #[test]
    fn warmup_deletion_discards_initial_bias() {
        // First fifth of the series is wildly biased; the estimate should
        // only see the steady portion
        let mut time_series = vec![1000.0; 200];
        time_series.extend(vec![2.0; 800]);
        let estimate = SteadyStateEstimate::post(time_series);
        assert!((estimate.point_estimate_mean() - 2.0).abs() < epsilon());
    }

    #[test]
    fn short_series_collapses_to_one_batch() {
        let estimate = SteadyStateEstimate::post(vec![1.0, 2.0]);
        assert_eq!(estimate.batch_count(), 1);
        assert!(estimate.confidence_interval_mean(0.05).half_width() < epsilon());
    }

    #[test]
    fn empty_series_yields_degenerate_estimate() {
        // A zero-duration simulation run returns no samples, so the
        // estimate must tolerate an empty series
        let estimate = SteadyStateEstimate::post(Vec::new());
        assert_eq!(estimate.batch_count(), 0);
        assert_eq!(estimate.point_estimate_mean(), 0.0);
        let confidence_interval = estimate.confidence_interval_mean(0.05);
        assert_eq!(confidence_interval.lower(), 0.0);
        assert_eq!(confidence_interval.upper(), 0.0);
    }
}
