//! End-to-end reliability analysis of a failure-time sample.
//!
//! [`analyze`] runs the full pipeline once and bundles every indicator into an
//! [`AnalysisResult`]:
//!
//! 1. **Prepare** ([`FailureSample`]): sort and validate observations
//! 2. **Partition** ([`IntervalPartition`]): split `[0, max]` into equal intervals
//! 3. **Estimate** ([`DensityHistogram`]): failure density per interval
//! 4. **Integrate** ([`SurvivalCurve`]): survival and hazard at any time
//! 5. **Solve** ([`gamma_percentile_life`]): time at which survival reaches gamma

use serde::{Deserialize, Serialize};

use crate::{
    descriptive::DescriptiveStats,
    error::ReliabilityError,
    histogram::{DensityBin, DensityHistogram, ZeroPolicy},
    partition::{DEFAULT_INTERVAL_COUNT, IntervalPartition},
    percentile::{PercentileLife, gamma_percentile_life},
    sample::FailureSample,
    survival::SurvivalCurve,
};

/// Parameters of an analysis run.
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of equal-width intervals `[0, max]` is split into.
    pub interval_count: usize,
    /// How observations equal to zero are counted.
    pub zero_policy: ZeroPolicy,
    /// Time at which the survival probability is reported.
    pub uptime: f64,
    /// Time at which the hazard rate is reported.
    pub lambda_uptime: f64,
    /// Target survival probability for the gamma-percentile life.
    pub gamma: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interval_count: DEFAULT_INTERVAL_COUNT,
            zero_policy: ZeroPolicy::Exclude,
            uptime: 388.0,
            lambda_uptime: 1012.0,
            gamma: 0.89,
        }
    }
}

/// Every indicator derived from one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// The observations in ascending order.
    pub sorted_sample: Vec<f64>,
    pub count: usize,
    /// Arithmetic mean time-to-failure.
    pub mean: f64,
    /// Largest observed time-to-failure.
    pub max: f64,
    pub summary: DescriptiveStats,
    pub interval_width: f64,
    /// `interval_count + 1` boundaries from `0` to `max`.
    pub boundaries: Vec<f64>,
    pub bins: Vec<DensityBin>,
    /// Failure density per interval.
    pub densities: Vec<f64>,
    /// Fraction of observations counted in some interval.
    pub captured_fraction: f64,
    /// Survival probability at each boundary.
    pub survival_at_boundaries: Vec<f64>,
    pub percentile_life: PercentileLife,
    pub uptime: f64,
    /// Survival probability at `uptime`.
    pub survival_at_uptime: f64,
    pub lambda_uptime: f64,
    /// Hazard rate at `lambda_uptime`.
    pub hazard_rate: f64,
}

/// Runs the analysis with the default partition settings.
///
/// # Examples
///
/// ```
/// use relia_stats::analysis::analyze;
///
/// let result = analyze([1.0, 2.0, 3.0, 4.0, 5.0], 1.0, 1.75, 0.7).unwrap();
/// assert_eq!(result.max, 5.0);
/// assert_eq!(result.interval_width, 0.5);
/// assert!((result.survival_at_uptime - 0.8).abs() < 1e-12);
/// assert!((result.percentile_life.time - 1.75).abs() < 1e-12);
/// ```
pub fn analyze<I>(
    sample: I,
    uptime: f64,
    lambda_uptime: f64,
    gamma: f64,
) -> Result<AnalysisResult, ReliabilityError>
where
    I: IntoIterator<Item = f64>,
{
    let config = AnalysisConfig {
        uptime,
        lambda_uptime,
        gamma,
        ..AnalysisConfig::default()
    };
    analyze_with(sample, &config)
}

/// Runs the analysis with explicit configuration.
pub fn analyze_with<I>(sample: I, config: &AnalysisConfig) -> Result<AnalysisResult, ReliabilityError>
where
    I: IntoIterator<Item = f64>,
{
    let sample = FailureSample::new(sample)?;
    let partition = IntervalPartition::new(sample.max(), config.interval_count)?;
    let histogram = DensityHistogram::new(&sample, &partition, config.zero_policy);
    let curve = SurvivalCurve::new(&histogram);

    let percentile_life = gamma_percentile_life(&curve, config.gamma)?;
    let survival_at_uptime = curve.survival_at(config.uptime)?;
    let hazard_rate = curve.hazard_rate(config.lambda_uptime)?;
    tracing::debug!(
        survival_at_uptime,
        hazard_rate,
        "evaluated survival and hazard"
    );

    Ok(AnalysisResult {
        count: sample.count(),
        mean: sample.mean(),
        max: sample.max(),
        summary: sample.describe(),
        interval_width: partition.interval_width(),
        boundaries: partition.boundaries().to_vec(),
        densities: histogram.densities(),
        captured_fraction: histogram.captured_fraction(),
        survival_at_boundaries: curve.survival_at_boundaries(),
        bins: histogram.bins.clone(),
        percentile_life,
        uptime: config.uptime,
        survival_at_uptime,
        lambda_uptime: config.lambda_uptime,
        hazard_rate,
        sorted_sample: sample.into_times(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILURE_TIMES: [f64; 100] = [
        58.0, 14.0, 23.0, 70.0, 297.0, 112.0, 237.0, 475.0, 279.0, 738.0, 134.0, 4.0, 120.0,
        90.0, 401.0, 13.0, 405.0, 52.0, 1007.0, 19.0, 77.0, 12.0, 32.0, 259.0, 46.0, 518.0,
        52.0, 0.0, 172.0, 512.0, 13.0, 1.0, 119.0, 128.0, 310.0, 131.0, 235.0, 284.0, 79.0,
        16.0, 69.0, 18.0, 305.0, 461.0, 12.0, 93.0, 85.0, 348.0, 48.0, 146.0, 121.0, 39.0,
        126.0, 415.0, 419.0, 28.0, 39.0, 516.0, 65.0, 2.0, 36.0, 192.0, 34.0, 21.0, 346.0,
        622.0, 617.0, 59.0, 330.0, 580.0, 80.0, 6.0, 960.0, 234.0, 52.0, 438.0, 170.0, 75.0,
        92.0, 340.0, 403.0, 177.0, 113.0, 55.0, 87.0, 51.0, 165.0, 58.0, 1271.0, 4.0, 51.0,
        300.0, 48.0, 56.0, 112.0, 139.0, 22.0, 226.0, 127.0, 186.0,
    ];

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.interval_count, 10);
        assert_eq!(config.zero_policy, ZeroPolicy::Exclude);
        assert_eq!(config.gamma, 0.89);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{ "gamma": 0.5, "zero_policy": "include-in-first" }"#)
                .unwrap();
        assert_eq!(config.gamma, 0.5);
        assert_eq!(config.zero_policy, ZeroPolicy::IncludeInFirst);
        assert_eq!(config.interval_count, 10);
        assert_eq!(config.uptime, 388.0);
    }

    #[test]
    fn test_small_sample_scenario() {
        let result = analyze([5.0, 4.0, 3.0, 2.0, 1.0], 0.5, 1.0, 0.9).unwrap();
        assert_eq!(result.sorted_sample, [1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(result.count, 5);
        assert!((result.mean - 3.0).abs() < 1e-12);
        assert_eq!(result.boundaries.len(), 11);
        assert!((result.densities[1] - 0.4).abs() < 1e-12);
        assert!((result.survival_at_boundaries[1] - 1.0).abs() < 1e-12);
        assert!((result.survival_at_boundaries[2] - 0.8).abs() < 1e-12);
        assert!((result.survival_at_uptime - 1.0).abs() < 1e-12);
        // at t = 1.0 the (1.0, 1.5] interval is in effect, which is empty
        assert_eq!(result.hazard_rate, 0.0);
    }

    #[test]
    fn test_failure_time_dataset() {
        let result = analyze(FAILURE_TIMES, 388.0, 1012.0, 0.89).unwrap();
        assert_eq!(result.count, 100);
        assert_eq!(result.max, 1271.0);
        assert!((result.mean - 198.34).abs() < 1e-9);
        assert!((result.interval_width - 127.1).abs() < 1e-12);

        // the single zero observation is excluded
        assert!((result.captured_fraction - 0.99).abs() < 1e-12);
        let counts = result.bins.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, [55, 15, 11, 8, 6, 1, 0, 2, 0, 1]);

        let expected = [1.0, 0.45, 0.30, 0.19, 0.11, 0.05, 0.04, 0.04, 0.02, 0.02, 0.01];
        for (s, e) in result.survival_at_boundaries.iter().zip(expected) {
            assert!((s - e).abs() < 1e-9, "{s} != {e}");
        }

        // S(0) = 1, S(127.1) = 0.45 => 127.1 - 127.1 * (0.45 - 0.89) / (0.45 - 1)
        assert_eq!(result.percentile_life.boundary_index, 1);
        assert!((result.percentile_life.time - 25.42).abs() < 1e-9);

        // 388 falls in (381.3, 508.4] holding 8 observations
        let density = 8.0 / (100.0 * 127.1);
        let expected_uptime = 0.19 - density * (388.0 - 381.3);
        assert!((result.survival_at_uptime - expected_uptime).abs() < 1e-9);

        // 1012 falls in (889.7, 1016.8] holding 2 observations
        let density = 2.0 / (100.0 * 127.1);
        let survival = 0.04 - density * (1012.0 - 889.7);
        assert!((result.hazard_rate - density / survival).abs() < 1e-9);
    }

    #[test]
    fn test_idempotent() {
        let first = analyze(FAILURE_TIMES, 388.0, 1012.0, 0.89).unwrap();
        let second = analyze(FAILURE_TIMES, 388.0, 1012.0, 0.89).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            analyze(Vec::new(), 1.0, 1.0, 0.5),
            Err(ReliabilityError::InvalidSample { .. })
        ));
        assert!(matches!(
            analyze([0.0, 0.0, 0.0], 1.0, 1.0, 0.5),
            Err(ReliabilityError::DegenerateRange { .. })
        ));
        assert!(matches!(
            analyze([1.0, 2.0], -1.0, 1.0, 0.5),
            Err(ReliabilityError::NegativeTime { .. })
        ));
        assert!(matches!(
            analyze([1.0, 2.0], 1.0, 1.0, 1.0),
            Err(ReliabilityError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_oversized_interval_count_is_rejected() {
        let config = AnalysisConfig {
            interval_count: usize::MAX,
            ..AnalysisConfig::default()
        };
        assert_eq!(
            analyze_with([1.0, 2.0], &config),
            Err(ReliabilityError::InvalidIntervalCount { count: usize::MAX })
        );
    }

    #[test]
    fn test_zero_policy_changes_survival() {
        let config = AnalysisConfig {
            zero_policy: ZeroPolicy::IncludeInFirst,
            ..AnalysisConfig::default()
        };
        let result = analyze_with(FAILURE_TIMES, &config).unwrap();
        assert!((result.captured_fraction - 1.0).abs() < 1e-12);
        assert!(result.survival_at_boundaries[10].abs() < 1e-12);
    }

    #[test]
    fn test_result_serializes() {
        let result = analyze([1.0, 2.0, 3.0, 4.0, 5.0], 1.0, 1.75, 0.7).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["count"], 5);
        assert_eq!(json["bins"].as_array().unwrap().len(), 10);
        assert_eq!(json["percentile_life"]["boundary_index"], 4);
    }
}
