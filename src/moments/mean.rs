//! Running mean of vector observations
//!
//! Uses the incremental-average recurrence `m += (x - m) / n`, which keeps
//! intermediate values bounded by the data instead of growing a running sum.

use crate::state::AccumulatorState;
use crate::traits::{self, AccumulatorError, IterativeStatistic, StatisticKind};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Per-component running mean
///
/// # Example
///
/// ```
/// use iterstats::moments::MeanAccumulator;
/// use iterstats::traits::IterativeStatistic;
///
/// let mut mean = MeanAccumulator::new(2);
///
/// mean.increment(&[1.0, 10.0]).unwrap();
/// mean.increment(&[3.0, 20.0]).unwrap();
///
/// assert_eq!(mean.values(), vec![2.0, 15.0]);
/// assert_eq!(mean.iteration(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct MeanAccumulator {
    /// Number of components per observation
    dimension: usize,
    /// Number of observations folded in
    iteration: u64,
    /// Running mean per component
    running_mean: Vec<f64>,
}

impl Default for MeanAccumulator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl MeanAccumulator {
    /// Create an empty accumulator for observations of `dimension` components
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "dimension must be positive");

        Self {
            dimension,
            iteration: 0,
            running_mean: traits::zeros(dimension),
        }
    }

    /// Number of components per observation (same as `dimension()`)
    pub fn size(&self) -> usize {
        self.dimension
    }

    /// Current mean estimate per component
    ///
    /// All zeros before the first observation.
    pub fn values(&self) -> Vec<f64> {
        self.running_mean.clone()
    }

    fn fold(&mut self, point: &[f64]) {
        self.iteration += 1;
        let n = self.iteration as f64;
        for (m, &x) in self.running_mean.iter_mut().zip(point) {
            *m += (x - *m) / n;
        }
    }
}

impl IterativeStatistic for MeanAccumulator {
    fn kind(&self) -> StatisticKind {
        StatisticKind::Mean
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn iteration(&self) -> u64 {
        self.iteration
    }

    fn increment(&mut self, point: &[f64]) -> Result<(), AccumulatorError> {
        traits::check_point(self.kind(), self.dimension, point)?;
        self.fold(point);
        Ok(())
    }

    fn increment_batch(&mut self, batch: &[Vec<f64>]) -> Result<(), AccumulatorError> {
        traits::check_batch(self.kind(), self.dimension, batch)?;
        for row in batch {
            self.fold(row);
        }
        Ok(())
    }

    fn state(&self) -> AccumulatorState {
        AccumulatorState::Mean {
            dimension: self.dimension,
            iteration_count: self.iteration,
            running_mean: self.running_mean.clone(),
        }
    }
}

/// Accumulators of the same variant compare equal regardless of content.
impl PartialEq for MeanAccumulator {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl core::fmt::Display for MeanAccumulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}(dimension={}, iteration={}, values=",
            self.name(),
            self.dimension,
            self.iteration
        )?;
        traits::write_values(f, &self.running_mean)?;
        f.write_str(")")
    }
}

impl TryFrom<AccumulatorState> for MeanAccumulator {
    type Error = AccumulatorError;

    fn try_from(state: AccumulatorState) -> Result<Self, Self::Error> {
        state.validate()?;
        match state {
            AccumulatorState::Mean {
                dimension,
                iteration_count,
                running_mean,
            } => {
                tracing::trace!(dimension, iteration_count, "restored MeanAccumulator");
                Ok(Self {
                    dimension,
                    iteration: iteration_count,
                    running_mean,
                })
            }
            other => Err(AccumulatorError::KindMismatch {
                expected: StatisticKind::Mean,
                found: other.kind(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MeanAccumulator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.state(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MeanAccumulator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let state = <AccumulatorState as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from(state).map_err(serde::de::Error::custom)
    }
}
