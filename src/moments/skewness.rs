//! Running mean, variance and skewness of vector observations
//!
//! Tracks three per-component accumulators with the one-pass third-moment
//! recurrence (Terriberry's extension of Welford's algorithm):
//!
//! ```text
//! delta  = x - mean1
//! delta_n = delta / n
//! term1  = delta * delta_n * (n - 1)
//! mean1 += delta_n
//! mean3 += term1 * delta_n * (n - 2) - 3 * delta_n * mean2
//! mean2 += term1
//! ```
//!
//! `mean2` and `mean3` are sums of squared and cubed deviations from the
//! mean, not yet divided by the observation count. `mean3` must be advanced
//! with the previous `mean2`, so the order of the last two lines matters.

use crate::math;
use crate::state::AccumulatorState;
use crate::traits::{self, AccumulatorError, IterativeStatistic, StatisticKind};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Per-component running mean, population variance and skewness
///
/// Skewness is reported as `sqrt(n) * M3 / M2^1.5`. Components with zero
/// spread (every observation equal) report a skewness of 0.
///
/// # Example
///
/// ```
/// use iterstats::moments::SkewnessAccumulator;
/// use iterstats::traits::IterativeStatistic;
///
/// let mut acc = SkewnessAccumulator::new(1);
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     acc.increment_scalar(value).unwrap();
/// }
///
/// assert!((acc.mean()[0] - 5.0).abs() < 1e-12);
/// assert!((acc.variance()[0] - 4.0).abs() < 1e-12);
/// assert!((acc.skewness()[0] - 0.65625).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct SkewnessAccumulator {
    /// Number of components per observation
    dimension: usize,
    /// Number of observations folded in
    iteration: u64,
    /// Running mean
    mean1: Vec<f64>,
    /// Sum of squared deviations from the mean (M2)
    mean2: Vec<f64>,
    /// Sum of cubed deviations from the mean (M3)
    mean3: Vec<f64>,
}

impl Default for SkewnessAccumulator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl SkewnessAccumulator {
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
            mean1: traits::zeros(dimension),
            mean2: traits::zeros(dimension),
            mean3: traits::zeros(dimension),
        }
    }

    /// Number of components per observation (same as `dimension()`)
    pub fn size(&self) -> usize {
        self.dimension
    }

    /// Running mean per component
    pub fn mean(&self) -> Vec<f64> {
        self.mean1.clone()
    }

    /// Population variance per component (`M2 / n`)
    ///
    /// All zeros before the first observation.
    pub fn variance(&self) -> Vec<f64> {
        if self.iteration == 0 {
            return traits::zeros(self.dimension);
        }
        let n = self.iteration as f64;
        self.mean2.iter().map(|m2| m2 / n).collect()
    }

    /// Population standard deviation per component
    pub fn standard_deviation(&self) -> Vec<f64> {
        self.variance().into_iter().map(math::sqrt).collect()
    }

    /// Skewness per component (`sqrt(n) * M3 / M2^1.5`)
    ///
    /// Components whose M2 is zero report 0.
    pub fn skewness(&self) -> Vec<f64> {
        let sqrt_n = math::sqrt(self.iteration as f64);
        self.mean2
            .iter()
            .zip(&self.mean3)
            .map(|(&m2, &m3)| {
                if m2 == 0.0 {
                    0.0
                } else {
                    sqrt_n * m3 / math::pow_three_halves(m2)
                }
            })
            .collect()
    }

    fn fold(&mut self, point: &[f64]) {
        self.iteration += 1;
        let n = self.iteration as f64;

        for (i, &x) in point.iter().enumerate() {
            let delta = x - self.mean1[i];
            let delta_n = delta / n;
            let term1 = delta * delta_n * (n - 1.0);

            self.mean1[i] += delta_n;
            self.mean3[i] += term1 * delta_n * (n - 2.0) - 3.0 * delta_n * self.mean2[i];
            self.mean2[i] += term1;
        }
    }
}

impl IterativeStatistic for SkewnessAccumulator {
    fn kind(&self) -> StatisticKind {
        StatisticKind::Skewness
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
        AccumulatorState::Skewness {
            dimension: self.dimension,
            iteration_count: self.iteration,
            mean1: self.mean1.clone(),
            mean2: self.mean2.clone(),
            mean3: self.mean3.clone(),
        }
    }
}

/// Accumulators of the same variant compare equal regardless of content.
impl PartialEq for SkewnessAccumulator {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl core::fmt::Display for SkewnessAccumulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}(dimension={}, iteration={}, mean=",
            self.name(),
            self.dimension,
            self.iteration
        )?;
        traits::write_values(f, &self.mean1)?;
        f.write_str(", variance=")?;
        traits::write_values(f, &self.variance())?;
        f.write_str(", skewness=")?;
        traits::write_values(f, &self.skewness())?;
        f.write_str(")")
    }
}

impl TryFrom<AccumulatorState> for SkewnessAccumulator {
    type Error = AccumulatorError;

    fn try_from(state: AccumulatorState) -> Result<Self, Self::Error> {
        state.validate()?;
        match state {
            AccumulatorState::Skewness {
                dimension,
                iteration_count,
                mean1,
                mean2,
                mean3,
            } => {
                tracing::trace!(dimension, iteration_count, "restored SkewnessAccumulator");
                Ok(Self {
                    dimension,
                    iteration: iteration_count,
                    mean1,
                    mean2,
                    mean3,
                })
            }
            other => Err(AccumulatorError::KindMismatch {
                expected: StatisticKind::Skewness,
                found: other.kind(),
            }),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SkewnessAccumulator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.state(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SkewnessAccumulator {
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

    /// Two-pass population moments: (mean, M2 / n, sqrt(n) * M3 / M2^1.5)
    fn two_pass(data: &[f64]) -> (f64, f64, f64) {
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let m2: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
        let m3: f64 = data.iter().map(|x| (x - mean).powi(3)).sum();
        let skew = if m2 == 0.0 {
            0.0
        } else {
            n.sqrt() * m3 / m2.powf(1.5)
        };
        (mean, m2 / n, skew)
    }

    #[test]
    fn test_textbook_sample() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut acc = SkewnessAccumulator::new(1);
        for v in data {
            acc.increment_scalar(v).unwrap();
        }

        let (mean, variance, skewness) = two_pass(&data);
        assert_eq!(acc.iteration(), 8);
        assert!((acc.mean()[0] - mean).abs() < 1e-9);
        assert!((acc.variance()[0] - 4.0).abs() < 1e-9);
        assert!((acc.variance()[0] - variance).abs() < 1e-9);
        assert!((acc.skewness()[0] - skewness).abs() < 1e-9);
        assert!((acc.standard_deviation()[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_third_moment_matches_two_pass() {
        // Right-skewed sample with a long tail.
        let data = [0.5, 1.0, 1.2, 1.3, 2.0, 2.1, 3.5, 7.9, 12.4, 30.0];
        let mut acc = SkewnessAccumulator::new(1);
        for v in data {
            acc.increment_scalar(v).unwrap();
        }

        let (mean, variance, skewness) = two_pass(&data);
        assert!((acc.mean()[0] - mean).abs() < 1e-9);
        assert!((acc.variance()[0] - variance).abs() < 1e-9 * variance);
        assert!((acc.skewness()[0] - skewness).abs() < 1e-9);
        assert!(acc.skewness()[0] > 1.0);
    }

    #[test]
    fn test_mirrored_sample_flips_sign() {
        let data = [1.0, 2.0, 2.5, 9.0, 0.1];
        let mut acc = SkewnessAccumulator::new(2);
        for v in data {
            acc.increment(&[v, -v]).unwrap();
        }

        let skewness = acc.skewness();
        assert!((skewness[0] + skewness[1]).abs() < 1e-12);
        assert!(skewness[0] > 0.0);
    }

    #[test]
    fn test_symmetric_cycle() {
        let mut acc = SkewnessAccumulator::new(1);
        for _ in 0..1000 {
            for v in [-1.0, 0.0, 1.0] {
                acc.increment_scalar(v).unwrap();
            }
        }

        assert_eq!(acc.iteration(), 3000);
        assert!(acc.mean()[0].abs() < 1e-12);
        assert!((acc.variance()[0] - 2.0 / 3.0).abs() < 1e-9);
        assert!(acc.skewness()[0].abs() < 1e-6);
    }

    #[test]
    fn test_constant_stream_has_zero_skewness() {
        let mut acc = SkewnessAccumulator::new(2);
        for _ in 0..10 {
            acc.increment(&[3.0, -7.5]).unwrap();
        }

        assert_eq!(acc.variance(), vec![0.0, 0.0]);
        assert_eq!(acc.skewness(), vec![0.0, 0.0]);
        assert_eq!(acc.mean(), vec![3.0, -7.5]);
    }

    #[test]
    fn test_empty() {
        let acc = SkewnessAccumulator::new(2);

        assert!(acc.is_empty());
        assert_eq!(acc.mean(), vec![0.0, 0.0]);
        assert_eq!(acc.variance(), vec![0.0, 0.0]);
        assert_eq!(acc.skewness(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_single_observation() {
        let mut acc = SkewnessAccumulator::new(1);
        acc.increment_scalar(42.0).unwrap();

        assert_eq!(acc.mean(), vec![42.0]);
        assert_eq!(acc.variance(), vec![0.0]);
        assert_eq!(acc.skewness(), vec![0.0]);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let rows = vec![
            vec![1.0, 10.0],
            vec![4.0, -3.0],
            vec![2.5, 8.0],
            vec![9.0, 0.5],
            vec![-1.0, 2.0],
        ];

        let mut sequential = SkewnessAccumulator::new(2);
        for row in &rows {
            sequential.increment(row).unwrap();
        }

        let mut batched = SkewnessAccumulator::new(2);
        batched.increment_batch(&rows).unwrap();

        assert_eq!(batched.iteration(), 5);
        assert_eq!(batched.state(), sequential.state());
    }

    #[test]
    fn test_batch_rejected_atomically() {
        let mut acc = SkewnessAccumulator::new(2);
        acc.increment(&[1.0, 2.0]).unwrap();
        let before = acc.state();

        let batch = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            acc.increment_batch(&batch),
            Err(AccumulatorError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(acc.state(), before);
    }

    #[test]
    fn test_scalar_on_vector_accumulator() {
        let mut acc = SkewnessAccumulator::new(3);
        assert!(acc.increment_scalar(1.0).is_err());
        assert!(acc.is_empty());
    }

    #[test]
    fn test_display() {
        let mut acc = SkewnessAccumulator::new(1);
        acc.increment_scalar(1.0).unwrap();
        acc.increment_scalar(3.0).unwrap();

        assert_eq!(
            acc.to_string(),
            "SkewnessAccumulator(dimension=1, iteration=2, mean=[2], variance=[1], skewness=[0])"
        );
    }

    #[test]
    fn test_state_roundtrip() {
        let mut acc = SkewnessAccumulator::new(3);
        for i in 0..25 {
            let x = i as f64;
            acc.increment(&[x.sin(), x * x / 7.0, 1.0 / (x + 1.0)]).unwrap();
        }

        let restored = SkewnessAccumulator::try_from(acc.state()).unwrap();

        assert_eq!(restored.iteration(), acc.iteration());
        for (a, b) in restored.variance().iter().zip(acc.variance()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        for (a, b) in restored.skewness().iter().zip(acc.skewness()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_restore_rejects_bad_lengths() {
        let state = AccumulatorState::Skewness {
            dimension: 2,
            iteration_count: 1,
            mean1: vec![0.0, 0.0],
            mean2: vec![0.0],
            mean3: vec![0.0, 0.0],
        };
        assert!(matches!(
            SkewnessAccumulator::try_from(state),
            Err(AccumulatorError::LengthMismatch { field: "mean2", .. })
        ));
    }
}
