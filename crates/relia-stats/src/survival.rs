use crate::{error::ReliabilityError, histogram::DensityHistogram};

/// Survival (error-free operation) function integrated from a density histogram.
///
/// The curve is piecewise linear: inside interval `k` the cumulative failure
/// probability grows at rate `density[k]`. It is evaluated on demand and never
/// materialized.
///
/// ```text
/// k    = index of the interval [lower, upper) containing t
/// F(t) = width * (density[0] + ... + density[k-1]) + density[k] * (t - lower[k])
/// S(t) = 1 - F(t)
/// ```
///
/// `density[k]` is taken as `0` once `k` passes the last interval, so survival
/// stays flat beyond the largest observation.
#[derive(Debug, Clone, Copy)]
pub struct SurvivalCurve<'a> {
    histogram: &'a DensityHistogram,
}

impl<'a> SurvivalCurve<'a> {
    #[must_use]
    pub fn new(histogram: &'a DensityHistogram) -> Self {
        Self { histogram }
    }

    #[must_use]
    pub fn histogram(&self) -> &'a DensityHistogram {
        self.histogram
    }

    /// Probability of operating without failure through time `t`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relia_stats::{
    /// #     histogram::{DensityHistogram, ZeroPolicy},
    /// #     partition::IntervalPartition,
    /// #     sample::FailureSample,
    /// #     survival::SurvivalCurve,
    /// # };
    /// let sample = FailureSample::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
    /// let partition = IntervalPartition::new(sample.max(), 10).unwrap();
    /// let histogram = DensityHistogram::new(&sample, &partition, ZeroPolicy::Exclude);
    /// let curve = SurvivalCurve::new(&histogram);
    ///
    /// assert_eq!(curve.survival_at(0.0).unwrap(), 1.0);
    /// assert_eq!(curve.survival_at(0.5).unwrap(), 1.0);
    /// assert!((curve.survival_at(1.0).unwrap() - 0.8).abs() < 1e-12);
    /// assert!(curve.survival_at(-1.0).is_err());
    /// ```
    pub fn survival_at(&self, t: f64) -> Result<f64, ReliabilityError> {
        ReliabilityError::check_time(t)?;
        Ok(1.0 - self.cumulative_failure(t))
    }

    /// Probability of having failed by time `t`, i.e. `1 - S(t)`.
    pub fn failure_probability(&self, t: f64) -> Result<f64, ReliabilityError> {
        ReliabilityError::check_time(t)?;
        Ok(self.cumulative_failure(t))
    }

    /// Instantaneous failure rate at `t` given survival up to `t`.
    ///
    /// Beyond the observed range the density is `0`, and so is the hazard rate.
    /// The survival in the denominator is summed from the tail of the
    /// histogram, so it stays positive right up to the maximum instead of
    /// cancelling to zero.
    pub fn hazard_rate(&self, t: f64) -> Result<f64, ReliabilityError> {
        ReliabilityError::check_time(t)?;
        let density = self.density_at(t);
        if density <= 0.0 {
            return Ok(0.0);
        }
        let survival = self.remaining_mass(t);
        if survival <= 0.0 {
            return Err(ReliabilityError::SurvivalExhausted { time: t, survival });
        }
        Ok(density / survival)
    }

    /// Failure density in effect at time `t`.
    fn density_at(&self, t: f64) -> f64 {
        self.histogram
            .density_or_zero(self.histogram.interval_at(t))
    }

    /// Interval boundaries the curve is defined over, from `0` to the maximum.
    pub fn boundaries(&self) -> impl Iterator<Item = f64> + 'a {
        let bins = &self.histogram.bins;
        bins.iter()
            .map(|bin| bin.lower)
            .chain(bins.last().map(|bin| bin.upper))
    }

    /// Survival evaluated at every interval boundary.
    ///
    /// The first value is always exactly `1.0`; the sequence is non-increasing.
    #[must_use]
    pub fn survival_at_boundaries(&self) -> Vec<f64> {
        self.boundaries()
            .map(|b| 1.0 - self.cumulative_failure(b))
            .collect()
    }

    fn cumulative_failure(&self, t: f64) -> f64 {
        let bins = &self.histogram.bins;
        let k = self.histogram.interval_at(t);
        let elapsed = bins.iter().take(k).map(|bin| bin.density).sum::<f64>();
        let partial = bins
            .get(k)
            .map_or(0.0, |bin| bin.density * (t - bin.lower));
        elapsed * self.histogram.interval_width + partial
    }

    /// `S(t)` as the probability mass not yet spent at `t`: the rest of the
    /// current interval, every later interval, and the uncaptured fraction.
    fn remaining_mass(&self, t: f64) -> f64 {
        let bins = &self.histogram.bins;
        let k = self.histogram.interval_at(t);
        let partial = bins
            .get(k)
            .map_or(0.0, |bin| bin.density * (bin.upper - t));
        let later = bins.iter().skip(k + 1).map(|bin| bin.density).sum::<f64>();
        let uncaptured = 1.0 - self.histogram.captured_fraction();
        partial + later * self.histogram.interval_width + uncaptured
    }
}
