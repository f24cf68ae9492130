//! Core contract for iterative statistics
//!
//! Every accumulator implements [`IterativeStatistic`]. The trait is object
//! safe so heterogeneous accumulators can live behind one
//! [`Accumulator`](crate::handle::Accumulator) handle type.

use core::fmt::{Debug, Display};

use crate::state::AccumulatorState;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Error raised by accumulator operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorError {
    /// Observation length differs from the accumulator dimension
    DimensionMismatch { expected: usize, found: usize },
    /// Persisted state belongs to a different accumulator variant
    KindMismatch {
        expected: StatisticKind,
        found: StatisticKind,
    },
    /// Persisted state declares a dimension of zero
    ZeroDimension,
    /// Persisted per-dimension sequence has the wrong length
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl core::fmt::Display for AccumulatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccumulatorError::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {}, found {}", expected, found)
            }
            AccumulatorError::KindMismatch { expected, found } => {
                write!(f, "state kind mismatch: expected {}, found {}", expected, found)
            }
            AccumulatorError::ZeroDimension => write!(f, "dimension must be positive"),
            AccumulatorError::LengthMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "field `{}` has length {}, expected {}",
                field, found, expected
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AccumulatorError {}

/// Type discriminator for the concrete accumulator variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticKind {
    Mean,
    Skewness,
    ThresholdExceedance,
}

impl StatisticKind {
    /// Name of the concrete accumulator type
    pub fn name(self) -> &'static str {
        match self {
            StatisticKind::Mean => "MeanAccumulator",
            StatisticKind::Skewness => "SkewnessAccumulator",
            StatisticKind::ThresholdExceedance => "ThresholdExceedanceAccumulator",
        }
    }
}

impl Display for StatisticKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Contract shared by all iterative accumulators
///
/// Observations are fixed-length vectors of `f64`. A scalar is accepted only
/// by one-dimensional accumulators. Batches are validated as a whole before
/// any row is folded in, so a failed call never leaves a partial update.
pub trait IterativeStatistic: Debug + Display {
    /// Which concrete variant this is
    fn kind(&self) -> StatisticKind;

    /// Number of components in each observation
    fn dimension(&self) -> usize;

    /// Number of observations folded in so far
    fn iteration(&self) -> u64;

    /// Fold one observation vector in
    ///
    /// Fails with [`AccumulatorError::DimensionMismatch`] when
    /// `point.len() != self.dimension()`, leaving the state untouched.
    fn increment(&mut self, point: &[f64]) -> Result<(), AccumulatorError>;

    /// Fold a single scalar in (one-dimensional accumulators only)
    fn increment_scalar(&mut self, value: f64) -> Result<(), AccumulatorError> {
        self.increment(&[value])
    }

    /// Fold a batch of observations in, in row order
    fn increment_batch(&mut self, batch: &[Vec<f64>]) -> Result<(), AccumulatorError> {
        check_batch(self.kind(), self.dimension(), batch)?;
        for row in batch {
            self.increment(row)?;
        }
        Ok(())
    }

    /// Closing pass after the last observation
    ///
    /// A no-op for the moment and exceedance accumulators. Calling it more
    /// than once has no further effect.
    fn finalize(&mut self) {
        tracing::trace!(kind = self.kind().name(), "finalize");
    }

    /// Snapshot of the full internal state for persistence
    fn state(&self) -> AccumulatorState;

    /// Name of the concrete accumulator type
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Check whether no observation has been folded in yet
    fn is_empty(&self) -> bool {
        self.iteration() == 0
    }
}

/// Verify a single observation against the accumulator dimension
pub(crate) fn check_point(
    kind: StatisticKind,
    dimension: usize,
    point: &[f64],
) -> Result<(), AccumulatorError> {
    if point.len() == dimension {
        return Ok(());
    }
    tracing::debug!(
        kind = kind.name(),
        expected = dimension,
        found = point.len(),
        "rejected observation"
    );
    Err(AccumulatorError::DimensionMismatch {
        expected: dimension,
        found: point.len(),
    })
}

/// Verify every row of a batch before anything is mutated
pub(crate) fn check_batch(
    kind: StatisticKind,
    dimension: usize,
    batch: &[Vec<f64>],
) -> Result<(), AccumulatorError> {
    match batch.iter().position(|row| row.len() != dimension) {
        None => Ok(()),
        Some(row) => {
            let found = batch[row].len();
            tracing::debug!(
                kind = kind.name(),
                row,
                expected = dimension,
                found,
                "rejected batch"
            );
            Err(AccumulatorError::DimensionMismatch {
                expected: dimension,
                found,
            })
        }
    }
}

/// Zero-filled per-dimension sequence
pub(crate) fn zeros(dimension: usize) -> Vec<f64> {
    let mut values = Vec::with_capacity(dimension);
    values.resize(dimension, 0.0);
    values
}

/// Write a per-dimension sequence as `[a, b, c]`
pub(crate) fn write_values(f: &mut core::fmt::Formatter<'_>, values: &[f64]) -> core::fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", v)?;
    }
    f.write_str("]")
}
