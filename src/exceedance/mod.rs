//! Threshold-exceedance counting
//!
//! # Example
//!
//! ```
//! use iterstats::exceedance::ThresholdExceedanceAccumulator;
//! use iterstats::traits::IterativeStatistic;
//!
//! // Count readings above 100.0 for three sensors
//! let mut acc = ThresholdExceedanceAccumulator::new(3, 100.0);
//!
//! acc.increment(&[99.0, 101.0, 250.0]).unwrap();
//! acc.increment(&[100.0, 180.0, 12.0]).unwrap();
//!
//! assert_eq!(acc.threshold_exceedance(), vec![0.0, 2.0, 1.0]);
//! assert_eq!(acc.exceedance_frequency(), vec![0.0, 1.0, 0.5]);
//! ```

mod threshold;

pub use threshold::ThresholdExceedanceAccumulator;
