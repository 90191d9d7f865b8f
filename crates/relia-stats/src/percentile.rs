//! Gamma-percentile operating life.
//!
//! The gamma-percentile life is the time by which the survival probability has
//! fallen to `gamma`: a fraction `gamma` of units is expected to still be
//! operating at that time.

use serde::Serialize;

use crate::{error::ReliabilityError, survival::SurvivalCurve};

/// Solution of `S(t) = gamma` over the partition boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileLife {
    /// Target survival probability.
    pub gamma: f64,
    /// Interpolated time at which survival reaches `gamma`.
    pub time: f64,
    /// Index of the first boundary whose survival is at or below `gamma`.
    pub boundary_index: usize,
}

/// Finds the time at which `curve` first drops to or below `gamma`.
///
/// Boundary survival values are scanned in increasing order for the first one
/// at or below `gamma`; the time is then linearly interpolated between that
/// boundary and the previous one:
///
/// ```text
/// t* = t1 - width * (S(t1) - gamma) / (S(t1) - S(t0))
/// ```
///
/// The curve cannot be extrapolated past the largest observation, so a target
/// below the survival at the last boundary is unreachable.
///
/// # Examples
///
/// ```
/// # use relia_stats::{
/// #     histogram::{DensityHistogram, ZeroPolicy},
/// #     partition::IntervalPartition,
/// #     percentile::gamma_percentile_life,
/// #     sample::FailureSample,
/// #     survival::SurvivalCurve,
/// # };
/// let sample = FailureSample::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let partition = IntervalPartition::new(sample.max(), 10).unwrap();
/// let histogram = DensityHistogram::new(&sample, &partition, ZeroPolicy::Exclude);
/// let curve = SurvivalCurve::new(&histogram);
///
/// // S(0.5) = 1.0 and S(1.0) = 0.8, so 0.9 is crossed halfway between them
/// let life = gamma_percentile_life(&curve, 0.9).unwrap();
/// assert!((life.time - 0.75).abs() < 1e-12);
/// assert_eq!(life.boundary_index, 2);
/// ```
pub fn gamma_percentile_life(
    curve: &SurvivalCurve<'_>,
    gamma: f64,
) -> Result<PercentileLife, ReliabilityError> {
    if gamma.is_nan() || gamma <= 0.0 || gamma >= 1.0 {
        return Err(ReliabilityError::InvalidTarget { gamma });
    }

    let survival = curve.survival_at_boundaries();
    debug_assert!(
        survival.windows(2).all(|w| w[1] <= w[0]),
        "survival must be non-increasing across boundaries"
    );

    let Some(index) = survival.iter().position(|&s| s <= gamma) else {
        let min_survival = survival.last().copied().unwrap_or(1.0);
        return Err(ReliabilityError::PercentileUnreachable {
            gamma,
            min_survival,
        });
    };
    // S(0) = 1 > gamma, so the first crossing always has a predecessor
    if index == 0 {
        return Err(ReliabilityError::InvalidTarget { gamma });
    }

    let boundaries = curve.boundaries().collect::<Vec<_>>();
    let (t0, t1) = (boundaries[index - 1], boundaries[index]);
    let (s0, s1) = (survival[index - 1], survival[index]);
    let drop = s1 - s0;
    if drop >= 0.0 {
        return Err(ReliabilityError::FlatIntervalAtPercentile { index });
    }

    let width = curve.histogram().interval_width;
    let time = t1 - width * (s1 - gamma) / drop;
    tracing::debug!(gamma, t0, t1, s0, s1, time, "solved gamma-percentile life");
    Ok(PercentileLife {
        gamma,
        time,
        boundary_index: index,
    })
}
