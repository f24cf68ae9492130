//! # Iterstats
//!
//! One-pass statistics over streams of fixed-length vector observations.
//!
//! Iterstats keeps running estimates of per-component moments and
//! threshold-exceedance counts without storing the observations. Every
//! accumulator uses a numerically stable incremental recurrence, so the
//! streamed result agrees with the two-pass computation to floating-point
//! tolerance.
//!
//! ## Features
//!
//! - **Mean**: [`MeanAccumulator`] with the incremental-average recurrence
//! - **Variance and Skewness**: [`SkewnessAccumulator`] with the one-pass
//!   third-moment recurrence
//! - **Threshold Exceedance**: [`ThresholdExceedanceAccumulator`] counting
//!   observations strictly above a threshold
//! - **Shared Handles**: [`Accumulator`] shares one instance across clones
//!   and stores heterogeneous accumulators behind one type
//! - **Exact Persistence**: [`AccumulatorState`] restores an accumulator
//!   bit-for-bit
//!
//! ## Quick Start
//!
//! ```rust
//! use iterstats::prelude::*;
//!
//! let mut acc = SkewnessAccumulator::new(1);
//! for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
//!     acc.increment_scalar(value).unwrap();
//! }
//! println!("variance: {:?}, skewness: {:?}", acc.variance(), acc.skewness());
//! ```
//!
//! ## Input Granularity
//!
//! Observations can be folded in one scalar at a time (one-dimensional
//! accumulators only), one vector at a time, or as a batch of vectors:
//!
//! ```rust
//! use iterstats::prelude::*;
//!
//! let mut mean = MeanAccumulator::new(2);
//! mean.increment(&[1.0, 2.0]).unwrap();
//! mean.increment_batch(&[vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
//!
//! assert_eq!(mean.iteration(), 3);
//! assert_eq!(mean.values(), vec![3.0, 4.0]);
//!
//! // A batch is checked as a whole before anything is folded in
//! assert!(mean.increment_batch(&[vec![0.0, 0.0], vec![0.0]]).is_err());
//! assert_eq!(mean.iteration(), 3);
//! ```
//!
//! ## Persistence
//!
//! ```rust
//! use iterstats::prelude::*;
//!
//! let acc = Accumulator::threshold_exceedance(2, 0.0);
//! acc.increment(&[1.0, -1.0]).unwrap();
//!
//! let restored = Accumulator::restore(acc.state()).unwrap();
//! assert_eq!(restored.state(), acc.state());
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde` (default): Serialization of accumulators and handles
//! - `full`: Enable everything
//!
//! Without `std` the crate builds on `core` + `alloc` and uses `libm` for math.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod exceedance;
pub mod handle;
mod math;
pub mod moments;
pub mod state;
pub mod traits;

pub mod prelude {
    pub use crate::exceedance::ThresholdExceedanceAccumulator;
    pub use crate::handle::Accumulator;
    pub use crate::moments::{MeanAccumulator, SkewnessAccumulator};
    pub use crate::state::AccumulatorState;
    pub use crate::traits::*;
}

pub use exceedance::ThresholdExceedanceAccumulator;
pub use handle::Accumulator;
pub use moments::{MeanAccumulator, SkewnessAccumulator};
pub use state::AccumulatorState;
pub use traits::{AccumulatorError, IterativeStatistic, StatisticKind};
