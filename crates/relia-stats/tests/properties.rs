//! Property tests for the reliability pipeline.
//!
//! Uses proptest to verify, for arbitrary non-negative samples:
//! 1. Partition shape: boundaries start at 0, end at the maximum, strictly increase
//! 2. Density mass: the histogram integrates to the captured fraction
//! 3. Survival shape: S(0) = 1, non-increasing at boundaries, ends at 1 - mass
//! 4. Determinism: analyzing twice gives identical results

use proptest::prelude::*;
use relia_stats::{
    analysis::{AnalysisConfig, analyze_with},
    histogram::{DensityHistogram, ZeroPolicy},
    partition::IntervalPartition,
    percentile::gamma_percentile_life,
    sample::FailureSample,
    survival::SurvivalCurve,
};

// ── Strategies ───────────────────────────────────────────────────────

/// Samples with a positive maximum; a handful of zeros may appear.
fn arb_sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(
        prop_oneof![
            1 => Just(0.0),
            9 => (0.001..10_000.0_f64).prop_map(|t| (t * 1000.0).round() / 1000.0),
        ],
        1..200,
    )
    .prop_filter("needs a positive observation", |v| v.iter().any(|&t| t > 0.0))
}

fn arb_zero_policy() -> impl Strategy<Value = ZeroPolicy> {
    prop_oneof![Just(ZeroPolicy::Exclude), Just(ZeroPolicy::IncludeInFirst)]
}

fn build(values: &[f64], intervals: usize, policy: ZeroPolicy) -> DensityHistogram {
    let sample = FailureSample::new(values.iter().copied()).unwrap();
    let partition = IntervalPartition::new(sample.max(), intervals).unwrap();
    DensityHistogram::new(&sample, &partition, policy)
}

// ── 1. Partition shape ───────────────────────────────────────────────

proptest! {
    #[test]
    fn boundaries_span_observed_range(values in arb_sample(), intervals in 1..40_usize) {
        let sample = FailureSample::new(values.iter().copied()).unwrap();
        let partition = IntervalPartition::new(sample.max(), intervals).unwrap();
        let boundaries = partition.boundaries();

        prop_assert_eq!(boundaries.len(), intervals + 1);
        prop_assert_eq!(boundaries[0], 0.0);
        prop_assert_eq!(boundaries[intervals], sample.max());
        prop_assert!(boundaries.windows(2).all(|w| w[0] < w[1]));
    }
}

// ── 2. Density mass ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn density_integrates_to_captured_fraction(
        values in arb_sample(),
        intervals in 1..40_usize,
        policy in arb_zero_policy(),
    ) {
        let histogram = build(&values, intervals, policy);
        let mass = histogram.densities().iter().sum::<f64>() * histogram.interval_width;

        let zeros = values.iter().filter(|&&t| t == 0.0).count();
        let captured = match policy {
            ZeroPolicy::Exclude => values.len() - zeros,
            ZeroPolicy::IncludeInFirst => values.len(),
        };
        #[expect(clippy::cast_precision_loss)]
        let expected = captured as f64 / values.len() as f64;

        prop_assert_eq!(histogram.captured_count(), captured);
        prop_assert!((mass - expected).abs() < 1e-9, "mass {} != {}", mass, expected);
        prop_assert!(histogram.bins.iter().all(|b| b.density >= 0.0));
    }
}

// ── 3. Survival shape ────────────────────────────────────────────────

proptest! {
    #[test]
    fn survival_starts_at_one_and_never_increases(
        values in arb_sample(),
        intervals in 1..40_usize,
        policy in arb_zero_policy(),
    ) {
        let histogram = build(&values, intervals, policy);
        let curve = SurvivalCurve::new(&histogram);
        let survival = curve.survival_at_boundaries();

        prop_assert_eq!(survival[0], 1.0);
        prop_assert!(survival.windows(2).all(|w| w[1] <= w[0]));

        let mass = histogram.densities().iter().sum::<f64>() * histogram.interval_width;
        let last = survival[survival.len() - 1];
        prop_assert!((last - (1.0 - mass)).abs() < 1e-9);
    }

    #[test]
    fn survival_at_boundary_matches_pointwise(values in arb_sample()) {
        let histogram = build(&values, 10, ZeroPolicy::Exclude);
        let curve = SurvivalCurve::new(&histogram);
        for (b, s) in curve.boundaries().zip(curve.survival_at_boundaries()) {
            prop_assert_eq!(curve.survival_at(b).unwrap(), s);
        }
    }

    #[test]
    fn hazard_rate_defined_just_below_maximum(
        values in arb_sample(),
        intervals in 1..40_usize,
        policy in arb_zero_policy(),
    ) {
        let histogram = build(&values, intervals, policy);
        let curve = SurvivalCurve::new(&histogram);
        let max = values.iter().copied().fold(0.0, f64::max);
        let t = f64::from_bits(max.to_bits() - 1);
        let hazard = curve.hazard_rate(t).unwrap();
        prop_assert!(hazard > 0.0 && hazard.is_finite(), "hazard at {} = {}", t, hazard);
    }

    #[test]
    fn percentile_life_lies_in_bracketing_interval(
        values in arb_sample(),
        gamma in 0.05..0.95_f64,
    ) {
        let histogram = build(&values, 10, ZeroPolicy::IncludeInFirst);
        let curve = SurvivalCurve::new(&histogram);
        // every observation is captured, so survival reaches 0 and any gamma is reachable
        let life = gamma_percentile_life(&curve, gamma).unwrap();
        let boundaries = curve.boundaries().collect::<Vec<_>>();
        let (t0, t1) = (boundaries[life.boundary_index - 1], boundaries[life.boundary_index]);
        prop_assert!(t0 - 1e-9 <= life.time && life.time <= t1 + 1e-9);
    }
}

// ── 4. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn analysis_is_idempotent(values in arb_sample(), gamma in 0.05..0.95_f64) {
        let config = AnalysisConfig {
            zero_policy: ZeroPolicy::IncludeInFirst,
            uptime: 1.0,
            lambda_uptime: 0.0,
            gamma,
            ..AnalysisConfig::default()
        };
        let first = analyze_with(values.iter().copied(), &config);
        let second = analyze_with(values.iter().copied(), &config);
        prop_assert_eq!(first, second);
    }
}
