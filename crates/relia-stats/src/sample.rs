//! Validated, sorted failure-time samples.

use crate::{descriptive::DescriptiveStats, error::ReliabilityError};

/// A non-empty sample of observed times-to-failure, sorted ascending.
///
/// Construction rejects empty input and any value that cannot be a
/// time-to-failure (negative, NaN or infinite). Once built the sample is
/// immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureSample {
    sorted: Vec<f64>,
    mean: f64,
}

impl FailureSample {
    /// Sorts and validates the observations.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relia_stats::sample::FailureSample;
    /// let sample = FailureSample::new([5.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(sample.times(), &[1.0, 3.0, 5.0]);
    /// assert_eq!(sample.count(), 3);
    /// assert_eq!(sample.mean(), 3.0);
    /// assert_eq!(sample.max(), 5.0);
    ///
    /// assert!(FailureSample::new(Vec::new()).is_err());
    /// assert!(FailureSample::new([1.0, -2.0]).is_err());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new<I>(values: I) -> Result<Self, ReliabilityError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        if sorted.is_empty() {
            return Err(ReliabilityError::invalid_sample("sample is empty"));
        }
        if let Some(bad) = sorted.iter().find(|v| !v.is_finite()) {
            return Err(ReliabilityError::invalid_sample(format!(
                "observation {bad} is not finite"
            )));
        }
        if let Some(bad) = sorted.iter().find(|v| **v < 0.0) {
            return Err(ReliabilityError::invalid_sample(format!(
                "observation {bad} is negative"
            )));
        }
        sorted.sort_by(f64::total_cmp);

        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
        tracing::debug!(count = sorted.len(), mean, "prepared failure sample");
        Ok(Self { sorted, mean })
    }

    /// The observations in ascending order.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.sorted
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.sorted.len()
    }

    /// Arithmetic mean time-to-failure.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Largest observed time-to-failure.
    #[must_use]
    pub fn max(&self) -> f64 {
        // non-empty by construction
        self.sorted[self.sorted.len() - 1]
    }

    #[must_use]
    pub fn describe(&self) -> DescriptiveStats {
        DescriptiveStats::from_sorted(&self.sorted)
            .unwrap_or_else(|| unreachable!("failure sample is never empty"))
    }

    #[must_use]
    pub fn into_times(self) -> Vec<f64> {
        self.sorted
    }
}
