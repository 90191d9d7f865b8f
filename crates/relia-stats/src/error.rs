/// Errors raised by the reliability pipeline.
///
/// Every stage validates its own inputs and fails immediately; there is no
/// partial result when any stage fails.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ReliabilityError {
    /// The sample is empty or contains a value that cannot be a time-to-failure.
    #[display("invalid sample: {reason}")]
    InvalidSample { reason: String },
    /// All observations are zero, so `[0, max]` cannot be partitioned.
    #[display("degenerate range: maximum time {max_time} must be positive")]
    DegenerateRange { max_time: f64 },
    /// The partition was asked for no intervals or for more than
    /// [`MAX_INTERVAL_COUNT`](crate::partition::MAX_INTERVAL_COUNT).
    #[display(
        "interval count {count} must be between 1 and {}",
        crate::partition::MAX_INTERVAL_COUNT
    )]
    InvalidIntervalCount { count: usize },
    /// A time argument was negative.
    #[display("time {time} must not be negative")]
    NegativeTime { time: f64 },
    /// A time argument was NaN or infinite.
    #[display("time {time} must be finite")]
    NonFiniteTime { time: f64 },
    /// The target survival probability is outside `(0, 1)`.
    #[display("target probability {gamma} must lie strictly between 0 and 1")]
    InvalidTarget { gamma: f64 },
    /// Survival never falls to the target within the observed range.
    #[display(
        "survival never drops to {gamma} within the observed range (minimum {min_survival})"
    )]
    PercentileUnreachable { gamma: f64, min_survival: f64 },
    /// The bracketing interval has zero density, so interpolation is undefined.
    #[display("survival is flat in the interval ending at boundary {index}")]
    FlatIntervalAtPercentile { index: usize },
    /// Hazard rate requested where survival has already reached zero.
    #[display("survival at time {time} is {survival}, hazard rate is undefined")]
    SurvivalExhausted { time: f64, survival: f64 },
}

impl ReliabilityError {
    pub(crate) fn invalid_sample(reason: impl Into<String>) -> Self {
        Self::InvalidSample {
            reason: reason.into(),
        }
    }

    /// Validates a time argument shared by every evaluator.
    pub(crate) fn check_time(time: f64) -> Result<(), Self> {
        if !time.is_finite() {
            return Err(Self::NonFiniteTime { time });
        }
        if time < 0.0 {
            return Err(Self::NegativeTime { time });
        }
        Ok(())
    }
}
