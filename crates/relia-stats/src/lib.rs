//! Empirical reliability indicators from observed times-to-failure.
//!
//! This crate estimates reliability indicators directly from a failure-time
//! sample, without fitting a parametric distribution:
//!
//! - **Density histogram**: failure probability per unit time in each of a fixed
//!   number of equal-width intervals over `[0, max]`
//! - **Survival function**: probability of error-free operation through time `t`,
//!   integrated from the histogram
//! - **Gamma-percentile life**: time at which survival falls to a target `gamma`
//! - **Hazard rate**: failure intensity at time `t` given survival up to `t`
//!
//! # Modules
//!
//! - [`sample`]: Sorting and validation of the observed times
//! - [`partition`]: Equal-width partition of the observed range
//! - [`histogram`]: Density estimation per interval
//! - [`survival`]: Survival function and hazard rate
//! - [`percentile`]: Gamma-percentile life by interpolation
//! - [`descriptive`]: Descriptive statistics of the sample
//! - [`analysis`]: The whole pipeline in one call
//!
//! # Examples
//!
//! ## Running the whole analysis
//!
//! ```
//! use relia_stats::analysis::analyze;
//!
//! let times = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let result = analyze(times, 1.0, 1.75, 0.7).unwrap();
//! assert_eq!(result.boundaries.len(), 11);
//! assert!((result.survival_at_boundaries[2] - 0.8).abs() < 1e-12);
//! ```
//!
//! ## Evaluating the survival curve directly
//!
//! ```
//! use relia_stats::{
//!     histogram::{DensityHistogram, ZeroPolicy},
//!     partition::IntervalPartition,
//!     sample::FailureSample,
//!     survival::SurvivalCurve,
//! };
//!
//! let sample = FailureSample::new([4.0, 9.0, 9.5, 20.0]).unwrap();
//! let partition = IntervalPartition::with_default_count(sample.max()).unwrap();
//! let histogram = DensityHistogram::new(&sample, &partition, ZeroPolicy::Exclude);
//! let curve = SurvivalCurve::new(&histogram);
//!
//! assert_eq!(curve.survival_at(0.0).unwrap(), 1.0);
//! assert!(curve.survival_at(10.0).unwrap() < 0.5);
//! assert_eq!(curve.hazard_rate(30.0).unwrap(), 0.0);
//! ```

pub mod analysis;
pub mod descriptive;
pub mod histogram;
pub mod partition;
pub mod percentile;
pub mod sample;
pub mod survival;

mod error;

pub use self::error::ReliabilityError;
