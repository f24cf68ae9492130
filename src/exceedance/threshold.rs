//! Per-component count of observations strictly above a fixed threshold

use crate::state::AccumulatorState;
use crate::traits::{self, AccumulatorError, IterativeStatistic, StatisticKind};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Running threshold-exceedance counter
///
/// Counts, per component, how many observations were strictly greater than
/// the threshold. A value equal to the threshold is not an exceedance.
///
/// # Example
///
/// ```
/// use iterstats::exceedance::ThresholdExceedanceAccumulator;
/// use iterstats::traits::IterativeStatistic;
///
/// let mut acc = ThresholdExceedanceAccumulator::new(1, 0.0);
///
/// for value in [-2.0, -1.0, 1.0, 2.0, 3.0] {
///     acc.increment_scalar(value).unwrap();
/// }
///
/// assert_eq!(acc.threshold_exceedance(), vec![3.0]);
/// assert_eq!(acc.iteration(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct ThresholdExceedanceAccumulator {
    /// Number of components per observation
    dimension: usize,
    /// Number of observations folded in
    iteration: u64,
    /// Exceedance threshold
    threshold_value: f64,
    /// Exceedance counts per component
    exceedance_count: Vec<f64>,
}

impl Default for ThresholdExceedanceAccumulator {
    fn default() -> Self {
        Self::new(1, 0.0)
    }
}

impl ThresholdExceedanceAccumulator {
    /// Create an empty counter for `dimension` components and `threshold`
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero
    pub fn new(dimension: usize, threshold: f64) -> Self {
        assert!(dimension > 0, "dimension must be positive");

        Self {
            dimension,
            iteration: 0,
            threshold_value: threshold,
            exceedance_count: traits::zeros(dimension),
        }
    }

    /// The fixed threshold
    pub fn threshold_value(&self) -> f64 {
        self.threshold_value
    }

    /// Raw exceedance counts per component
    ///
    /// Divide by `iteration()` for a frequency, or use
    /// [`exceedance_frequency`](Self::exceedance_frequency).
    pub fn threshold_exceedance(&self) -> Vec<f64> {
        self.exceedance_count.clone()
    }

    /// Fraction of observations above the threshold, per component
    ///
    /// All zeros before the first observation.
    pub fn exceedance_frequency(&self) -> Vec<f64> {
        if self.iteration == 0 {
            return traits::zeros(self.dimension);
        }
        let n = self.iteration as f64;
        self.exceedance_count.iter().map(|c| c / n).collect()
    }

    fn fold(&mut self, point: &[f64]) {
        self.iteration += 1;
        for (count, &x) in self.exceedance_count.iter_mut().zip(point) {
            if x > self.threshold_value {
                *count += 1.0;
            }
        }
    }
}

impl IterativeStatistic for ThresholdExceedanceAccumulator {
    fn kind(&self) -> StatisticKind {
        StatisticKind::ThresholdExceedance
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
        AccumulatorState::ThresholdExceedance {
            dimension: self.dimension,
            iteration_count: self.iteration,
            threshold_value: self.threshold_value,
            exceedance_count: self.exceedance_count.clone(),
        }
    }
}

/// Accumulators of the same variant compare equal regardless of content.
impl PartialEq for ThresholdExceedanceAccumulator {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl core::fmt::Display for ThresholdExceedanceAccumulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}(dimension={}, iteration={}, threshold={}, exceedance=",
            self.name(),
            self.dimension,
            self.iteration,
            self.threshold_value
        )?;
        traits::write_values(f, &self.exceedance_count)?;
        f.write_str(")")
    }
}

impl TryFrom<AccumulatorState> for ThresholdExceedanceAccumulator {
    type Error = AccumulatorError;

    fn try_from(state: AccumulatorState) -> Result<Self, Self::Error> {
        state.validate()?;
        match state {
            AccumulatorState::ThresholdExceedance {
                dimension,
                iteration_count,
                threshold_value,
                exceedance_count,
            } => {
                tracing::trace!(
                    dimension,
                    iteration_count,
                    threshold_value,
                    "restored ThresholdExceedanceAccumulator"
                );
                Ok(Self {
                    dimension,
                    iteration: iteration_count,
                    threshold_value,
                    exceedance_count,
                })
            }
            other => Err(AccumulatorError::KindMismatch {
                expected: StatisticKind::ThresholdExceedance,
                found: other.kind(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThresholdExceedanceAccumulator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.state(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ThresholdExceedanceAccumulator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let state = <AccumulatorState as serde::Deserialize>::deserialize(deserializer)?;
        Self::try_from(state).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut acc = ThresholdExceedanceAccumulator::new(1, 0.0);
        for v in [-2.0, -1.0, 1.0, 2.0, 3.0] {
            acc.increment_scalar(v).unwrap();
        }

        assert_eq!(acc.threshold_exceedance(), vec![3.0]);
        assert_eq!(acc.iteration(), 5);
        assert_eq!(acc.threshold_value(), 0.0);
    }

    #[test]
    fn test_equal_to_threshold_is_not_exceedance() {
        let mut acc = ThresholdExceedanceAccumulator::new(1, 1.5);
        acc.increment_scalar(1.5).unwrap();
        acc.increment_scalar(1.5000001).unwrap();

        assert_eq!(acc.threshold_exceedance(), vec![1.0]);
    }

    #[test]
    fn test_iteration_counts_vectors_not_components() {
        let mut acc = ThresholdExceedanceAccumulator::new(3, 0.0);
        acc.increment(&[1.0, 1.0, 1.0]).unwrap();
        acc.increment(&[-1.0, 1.0, 0.0]).unwrap();

        assert_eq!(acc.iteration(), 2);
        assert_eq!(acc.threshold_exceedance(), vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_frequency() {
        let mut acc = ThresholdExceedanceAccumulator::new(2, 10.0);
        assert_eq!(acc.exceedance_frequency(), vec![0.0, 0.0]);

        let batch = vec![
            vec![11.0, 0.0],
            vec![12.0, 0.0],
            vec![0.0, 20.0],
            vec![13.0, 0.0],
        ];
        acc.increment_batch(&batch).unwrap();

        assert_eq!(acc.iteration(), 4);
        assert_eq!(acc.exceedance_frequency(), vec![0.75, 0.25]);
    }

    #[test]
    fn test_nan_never_exceeds() {
        let mut acc = ThresholdExceedanceAccumulator::new(1, 0.0);
        acc.increment_scalar(f64::NAN).unwrap();

        assert_eq!(acc.iteration(), 1);
        assert_eq!(acc.threshold_exceedance(), vec![0.0]);
    }

    #[test]
    fn test_infinite_threshold() {
        let mut acc = ThresholdExceedanceAccumulator::new(1, f64::NEG_INFINITY);
        acc.increment_scalar(-1e300).unwrap();
        acc.increment_scalar(f64::NEG_INFINITY).unwrap();

        assert_eq!(acc.threshold_exceedance(), vec![1.0]);
    }

    #[test]
    fn test_batch_rejected_atomically() {
        let mut acc = ThresholdExceedanceAccumulator::new(2, 0.0);
        let batch = vec![vec![1.0, 1.0], vec![1.0, 1.0, 1.0]];

        assert!(acc.increment_batch(&batch).is_err());
        assert!(acc.is_empty());
        assert_eq!(acc.threshold_exceedance(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_default() {
        let acc = ThresholdExceedanceAccumulator::default();
        assert_eq!(acc.dimension(), 1);
        assert_eq!(acc.threshold_value(), 0.0);
    }

    #[test]
    fn test_display() {
        let mut acc = ThresholdExceedanceAccumulator::new(2, 0.5);
        acc.increment(&[1.0, 0.0]).unwrap();

        assert_eq!(
            acc.to_string(),
            "ThresholdExceedanceAccumulator(dimension=2, iteration=1, threshold=0.5, exceedance=[1, 0])"
        );
    }

    #[test]
    fn test_state_roundtrip() {
        let mut acc = ThresholdExceedanceAccumulator::new(2, -0.25);
        for i in 0..10 {
            acc.increment(&[i as f64 - 5.0, 5.0 - i as f64]).unwrap();
        }

        let restored = ThresholdExceedanceAccumulator::try_from(acc.state()).unwrap();

        assert_eq!(restored.iteration(), 10);
        assert_eq!(restored.threshold_value(), -0.25);
        assert_eq!(restored.threshold_exceedance(), acc.threshold_exceedance());
    }
}
