use serde::{Deserialize, Serialize};

use crate::{partition::IntervalPartition, sample::FailureSample};

/// How observations exactly equal to zero are counted.
///
/// Interval membership is left-open (`lower < x <= upper`), and the first
/// interval's lower bound is also zero, so a zero-valued observation falls in
/// no interval unless the first interval is closed on the left.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroPolicy {
    /// Zero-valued observations are not counted in any interval. They still
    /// count towards the sample size used to normalize densities.
    #[default]
    Exclude,
    /// The first interval is closed on the left and counts zero-valued observations.
    IncludeInFirst,
}

/// Failure-probability density estimated per interval.
///
/// Each bin's density is `count / (total_observations * interval_width)`, the
/// probability of failing inside the interval per unit time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityHistogram {
    /// The bins in interval order.
    pub bins: Vec<DensityBin>,
    /// Width shared by every bin.
    pub interval_width: f64,
    /// Size of the sample the densities are normalized by.
    pub total_count: usize,
    /// The zero-observation policy the histogram was built with.
    pub zero_policy: ZeroPolicy,
}

/// A single interval of a [`DensityHistogram`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityBin {
    /// Exclusive lower bound (inclusive for the first bin under [`ZeroPolicy::IncludeInFirst`]).
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
    /// Number of observations that fall in this interval.
    pub count: usize,
    /// Estimated failure-probability density in this interval.
    pub density: f64,
}

impl DensityHistogram {
    /// Builds the density histogram of `sample` over `partition`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relia_stats::{
    /// #     histogram::{DensityHistogram, ZeroPolicy},
    /// #     partition::IntervalPartition,
    /// #     sample::FailureSample,
    /// # };
    /// let sample = FailureSample::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let partition = IntervalPartition::new(sample.max(), 10).unwrap();
    /// let histogram = DensityHistogram::new(&sample, &partition, ZeroPolicy::Exclude);
    ///
    /// // (0.5, 1.0] holds the single observation 1.0
    /// assert!((histogram.bins[1].density - 0.4).abs() < 1e-12);
    /// assert_eq!(histogram.bins[0].count, 0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(
        sample: &FailureSample,
        partition: &IntervalPartition,
        zero_policy: ZeroPolicy,
    ) -> Self {
        let times = sample.times();
        let total_count = times.len();
        let interval_width = partition.interval_width();
        let normalizer = total_count as f64 * interval_width;

        let bins = partition
            .boundaries()
            .windows(2)
            .enumerate()
            .map(|(i, bounds)| {
                let (lower, upper) = (bounds[0], bounds[1]);
                let include_lower = i == 0 && zero_policy == ZeroPolicy::IncludeInFirst;
                // the sample is sorted, so each interval is a contiguous run
                let start = if include_lower {
                    times.partition_point(|&x| x < lower)
                } else {
                    times.partition_point(|&x| x <= lower)
                };
                let end = times.partition_point(|&x| x <= upper);
                let count = end.saturating_sub(start);
                DensityBin {
                    lower,
                    upper,
                    count,
                    density: count as f64 / normalizer,
                }
            })
            .collect::<Vec<_>>();

        let histogram = Self {
            bins,
            interval_width,
            total_count,
            zero_policy,
        };
        tracing::debug!(
            captured = histogram.captured_count(),
            total = total_count,
            ?zero_policy,
            "estimated density histogram"
        );
        histogram
    }

    /// The per-interval densities in interval order.
    #[must_use]
    pub fn densities(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.density).collect()
    }

    /// Density of interval `index`, or `0.0` for any index past the last interval.
    ///
    /// Time beyond the observed range contributes no further failure density.
    #[must_use]
    pub fn density_or_zero(&self, index: usize) -> f64 {
        self.bins.get(index).map_or(0.0, |bin| bin.density)
    }

    /// Index of the interval `[lower, upper)` containing `t`, or
    /// `bins.len()` once `t` reaches the last boundary.
    ///
    /// This is the only mapping from a time to an interval. It starts from
    /// `floor(t / width)` and corrects it against the stored boundaries, so a
    /// time equal to a boundary always maps to the interval that starts there.
    /// `t` must already be validated as finite and non-negative.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub(crate) fn interval_at(&self, t: f64) -> usize {
        debug_assert!(t.is_finite() && t >= 0.0);
        let n = self.bins.len();
        // saturates at usize::MAX for very large t
        let mut k = ((t / self.interval_width).floor() as usize).min(n);
        if k < n && t >= self.bins[k].upper {
            k += 1;
        } else if k > 0 && t < self.bins[k - 1].upper {
            k -= 1;
        }
        k
    }

    /// Number of observations counted in some interval.
    #[must_use]
    pub fn captured_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// Fraction of the sample counted in some interval.
    ///
    /// Below 1 only when zero-valued observations are excluded.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn captured_fraction(&self) -> f64 {
        self.captured_count() as f64 / self.total_count as f64
    }
}
