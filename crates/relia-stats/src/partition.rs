//! Equal-width partition of the observed time range.

use serde::Serialize;

use crate::error::ReliabilityError;

/// Number of intervals used when the caller does not choose one.
pub const DEFAULT_INTERVAL_COUNT: usize = 10;

/// Largest accepted interval count. Each interval costs one boundary and one
/// histogram bin.
pub const MAX_INTERVAL_COUNT: usize = 1_000_000;

/// Division of `[0, max_time]` into `interval_count` equal-width intervals.
///
/// Interval `i` covers `(boundaries[i], boundaries[i + 1]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalPartition {
    interval_width: f64,
    boundaries: Vec<f64>,
}

impl IntervalPartition {
    /// Partitions `[0, max_time]` into `interval_count` intervals.
    ///
    /// Each boundary is `index * width` computed directly, so error does not
    /// accumulate across intervals. The last boundary is exactly `max_time`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use relia_stats::partition::IntervalPartition;
    /// let partition = IntervalPartition::new(5.0, 10).unwrap();
    /// assert_eq!(partition.interval_width(), 0.5);
    /// assert_eq!(partition.boundaries().len(), 11);
    /// assert_eq!(partition.boundaries()[2], 1.0);
    /// assert_eq!(partition.boundaries()[10], 5.0);
    ///
    /// assert!(IntervalPartition::new(0.0, 10).is_err());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    pub fn new(max_time: f64, interval_count: usize) -> Result<Self, ReliabilityError> {
        if !(1..=MAX_INTERVAL_COUNT).contains(&interval_count) {
            return Err(ReliabilityError::InvalidIntervalCount {
                count: interval_count,
            });
        }
        if !max_time.is_finite() || max_time <= 0.0 {
            return Err(ReliabilityError::DegenerateRange { max_time });
        }

        let interval_width = max_time / interval_count as f64;
        if interval_width <= 0.0 {
            return Err(ReliabilityError::DegenerateRange { max_time });
        }
        let mut boundaries = (0..=interval_count)
            .map(|i| i as f64 * interval_width)
            .collect::<Vec<_>>();
        boundaries[interval_count] = max_time;

        tracing::debug!(interval_count, interval_width, "partitioned observed range");
        Ok(Self {
            interval_width,
            boundaries,
        })
    }

    /// Partitions `[0, max_time]` into [`DEFAULT_INTERVAL_COUNT`] intervals.
    pub fn with_default_count(max_time: f64) -> Result<Self, ReliabilityError> {
        Self::new(max_time, DEFAULT_INTERVAL_COUNT)
    }

    #[must_use]
    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }

    /// The `interval_count + 1` boundaries, starting at 0 and ending at the maximum.
    #[must_use]
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }
}
