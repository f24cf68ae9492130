//! Persistence record for accumulators
//!
//! [`AccumulatorState`] carries every field an accumulator needs to be
//! rebuilt exactly, tagged with the variant it came from. With the `serde`
//! feature it serializes as a flat record with a `"type"` discriminator:
//!
//! ```json
//! {"type": "Mean", "dimension": 2, "iteration_count": 3, "running_mean": [2.0, 4.0]}
//! ```
//!
//! Field order does not matter and unknown fields are ignored on load.

use crate::traits::{AccumulatorError, StatisticKind};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Complete internal state of one accumulator
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum AccumulatorState {
    Mean {
        dimension: usize,
        iteration_count: u64,
        running_mean: Vec<f64>,
    },
    Skewness {
        dimension: usize,
        iteration_count: u64,
        mean1: Vec<f64>,
        mean2: Vec<f64>,
        mean3: Vec<f64>,
    },
    ThresholdExceedance {
        dimension: usize,
        iteration_count: u64,
        threshold_value: f64,
        exceedance_count: Vec<f64>,
    },
}

impl AccumulatorState {
    /// Variant this record restores to
    pub fn kind(&self) -> StatisticKind {
        match self {
            AccumulatorState::Mean { .. } => StatisticKind::Mean,
            AccumulatorState::Skewness { .. } => StatisticKind::Skewness,
            AccumulatorState::ThresholdExceedance { .. } => StatisticKind::ThresholdExceedance,
        }
    }

    /// Recorded dimension
    pub fn dimension(&self) -> usize {
        match *self {
            AccumulatorState::Mean { dimension, .. }
            | AccumulatorState::Skewness { dimension, .. }
            | AccumulatorState::ThresholdExceedance { dimension, .. } => dimension,
        }
    }

    /// Recorded iteration count
    pub fn iteration(&self) -> u64 {
        match *self {
            AccumulatorState::Mean {
                iteration_count, ..
            }
            | AccumulatorState::Skewness {
                iteration_count, ..
            }
            | AccumulatorState::ThresholdExceedance {
                iteration_count, ..
            } => iteration_count,
        }
    }

    /// Check the record against the data model invariants
    ///
    /// The dimension must be positive and every per-dimension sequence must
    /// have exactly `dimension` entries.
    pub fn validate(&self) -> Result<(), AccumulatorError> {
        let dimension = self.dimension();
        if dimension == 0 {
            return Err(AccumulatorError::ZeroDimension);
        }

        let check = |field: &'static str, values: &[f64]| {
            if values.len() == dimension {
                Ok(())
            } else {
                Err(AccumulatorError::LengthMismatch {
                    field,
                    expected: dimension,
                    found: values.len(),
                })
            }
        };

        match self {
            AccumulatorState::Mean { running_mean, .. } => {
                check("running_mean", running_mean.as_slice())
            }
            AccumulatorState::Skewness {
                mean1,
                mean2,
                mean3,
                ..
            } => {
                check("mean1", mean1.as_slice())?;
                check("mean2", mean2.as_slice())?;
                check("mean3", mean3.as_slice())
            }
            AccumulatorState::ThresholdExceedance {
                exceedance_count, ..
            } => check("exceedance_count", exceedance_count.as_slice()),
        }
    }
}
