//! Moment accumulators for vector streams
//!
//! This module provides one-pass estimators of per-component moments that
//! never store the observations themselves.
//!
//! # Accumulators
//!
//! - [`MeanAccumulator`]: running mean
//! - [`SkewnessAccumulator`]: running mean, variance and skewness
//!
//! # Example
//!
//! ```
//! use iterstats::moments::SkewnessAccumulator;
//! use iterstats::traits::IterativeStatistic;
//!
//! let mut acc = SkewnessAccumulator::new(2);
//!
//! let batch = vec![vec![1.0, 0.5], vec![2.0, 0.25], vec![6.0, 0.125]];
//! acc.increment_batch(&batch).unwrap();
//!
//! println!("mean: {:?}", acc.mean());
//! println!("variance: {:?}", acc.variance());
//! println!("skewness: {:?}", acc.skewness());
//! ```

mod mean;
mod skewness;

pub use mean::MeanAccumulator;
pub use skewness::SkewnessAccumulator;
