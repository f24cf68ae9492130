//! Shared accumulator handle
//!
//! [`Accumulator`] is a cheap-to-clone handle around exactly one accumulator
//! instance. Cloning the handle shares the instance: an increment through
//! any clone is seen by all of them. The handle is generic over the
//! accumulator type, so a typed handle keeps access to the concrete getters
//! while `Accumulator` (i.e. `Accumulator<dyn IterativeStatistic>`) stores
//! heterogeneous accumulators side by side.
//!
//! # Thread Safety
//!
//! The handle uses `Rc<RefCell<_>>` and is neither `Send` nor `Sync`. Feed
//! one accumulator per thread and combine the results yourself.

use core::cell::{Ref, RefCell, RefMut};

use crate::exceedance::ThresholdExceedanceAccumulator;
use crate::moments::{MeanAccumulator, SkewnessAccumulator};
use crate::state::AccumulatorState;
use crate::traits::{AccumulatorError, IterativeStatistic, StatisticKind};

#[cfg(feature = "std")]
use std::{rc::Rc, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{rc::Rc, vec::Vec};

/// Shared handle to one accumulator
///
/// # Example
///
/// ```
/// use iterstats::handle::Accumulator;
/// use iterstats::moments::MeanAccumulator;
///
/// let mean = Accumulator::new(MeanAccumulator::new(1));
/// let view = mean.clone();
///
/// mean.increment_scalar(4.0).unwrap();
/// mean.increment_scalar(8.0).unwrap();
///
/// // Both handles see the same instance
/// assert_eq!(view.iteration(), 2);
/// assert_eq!(view.borrow().values(), vec![6.0]);
/// ```
///
/// Heterogeneous storage:
///
/// ```
/// use iterstats::handle::Accumulator;
///
/// let accumulators = vec![
///     Accumulator::mean(2),
///     Accumulator::skewness(2),
///     Accumulator::threshold_exceedance(2, 0.0),
/// ];
///
/// for acc in &accumulators {
///     acc.increment(&[1.0, -1.0]).unwrap();
/// }
/// assert!(accumulators.iter().all(|acc| acc.iteration() == 1));
/// ```
pub struct Accumulator<A: ?Sized + IterativeStatistic = dyn IterativeStatistic> {
    inner: Rc<RefCell<A>>,
}

impl<A: IterativeStatistic> Accumulator<A> {
    /// Wrap an accumulator in a new handle
    pub fn new(accumulator: A) -> Self {
        Self {
            inner: Rc::new(RefCell::new(accumulator)),
        }
    }
}

impl<A: IterativeStatistic + 'static> Accumulator<A> {
    /// Erase the concrete type, keeping the same shared instance
    pub fn into_dyn(self) -> Accumulator {
        let inner: Rc<RefCell<dyn IterativeStatistic>> = self.inner;
        Accumulator { inner }
    }
}

impl Accumulator {
    /// Handle to a new [`MeanAccumulator`]
    pub fn mean(dimension: usize) -> Self {
        Accumulator::new(MeanAccumulator::new(dimension)).into_dyn()
    }

    /// Handle to a new [`SkewnessAccumulator`]
    pub fn skewness(dimension: usize) -> Self {
        Accumulator::new(SkewnessAccumulator::new(dimension)).into_dyn()
    }

    /// Handle to a new [`ThresholdExceedanceAccumulator`]
    pub fn threshold_exceedance(dimension: usize, threshold: f64) -> Self {
        Accumulator::new(ThresholdExceedanceAccumulator::new(dimension, threshold)).into_dyn()
    }

    /// Rebuild the accumulator variant named by a persistence record
    pub fn restore(state: AccumulatorState) -> Result<Self, AccumulatorError> {
        let handle = match state.kind() {
            StatisticKind::Mean => Accumulator::new(MeanAccumulator::try_from(state)?).into_dyn(),
            StatisticKind::Skewness => {
                Accumulator::new(SkewnessAccumulator::try_from(state)?).into_dyn()
            }
            StatisticKind::ThresholdExceedance => {
                Accumulator::new(ThresholdExceedanceAccumulator::try_from(state)?).into_dyn()
            }
        };
        Ok(handle)
    }
}

impl<A: ?Sized + IterativeStatistic> Accumulator<A> {
    /// Which concrete variant is behind the handle
    pub fn kind(&self) -> StatisticKind {
        self.inner.borrow().kind()
    }

    /// Name of the concrete accumulator type
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Number of components per observation
    pub fn dimension(&self) -> usize {
        self.inner.borrow().dimension()
    }

    /// Number of observations folded in so far
    pub fn iteration(&self) -> u64 {
        self.inner.borrow().iteration()
    }

    /// Check whether no observation has been folded in yet
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Fold one observation vector into the shared instance
    ///
    /// # Panics
    ///
    /// Panics if a [`borrow`](Self::borrow) of the same instance is alive
    pub fn increment(&self, point: &[f64]) -> Result<(), AccumulatorError> {
        self.inner.borrow_mut().increment(point)
    }

    /// Fold a scalar into the shared instance (one-dimensional only)
    pub fn increment_scalar(&self, value: f64) -> Result<(), AccumulatorError> {
        self.inner.borrow_mut().increment_scalar(value)
    }

    /// Fold a batch into the shared instance, all rows or none
    pub fn increment_batch(&self, batch: &[Vec<f64>]) -> Result<(), AccumulatorError> {
        self.inner.borrow_mut().increment_batch(batch)
    }

    /// Run the closing pass on the shared instance
    pub fn finalize(&self) {
        self.inner.borrow_mut().finalize()
    }

    /// Persistence record of the shared instance
    pub fn state(&self) -> AccumulatorState {
        self.inner.borrow().state()
    }

    /// Immutable access to the accumulator, e.g. for its concrete getters
    pub fn borrow(&self) -> Ref<'_, A> {
        self.inner.borrow()
    }

    /// Mutable access to the accumulator
    pub fn borrow_mut(&self) -> RefMut<'_, A> {
        self.inner.borrow_mut()
    }

    /// Check whether two handles share the same instance
    pub fn ptr_eq<B: ?Sized + IterativeStatistic>(&self, other: &Accumulator<B>) -> bool {
        core::ptr::eq(
            Rc::as_ptr(&self.inner) as *const u8,
            Rc::as_ptr(&other.inner) as *const u8,
        )
    }

    /// Number of handles sharing the instance
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}

impl<A: ?Sized + IterativeStatistic> Clone for Accumulator<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: IterativeStatistic> From<A> for Accumulator<A> {
    fn from(accumulator: A) -> Self {
        Self::new(accumulator)
    }
}

/// Handles compare equal when they hold the same accumulator variant.
impl<A, B> PartialEq<Accumulator<B>> for Accumulator<A>
where
    A: ?Sized + IterativeStatistic,
    B: ?Sized + IterativeStatistic,
{
    fn eq(&self, other: &Accumulator<B>) -> bool {
        self.kind() == other.kind()
    }
}

impl<A: ?Sized + IterativeStatistic> core::fmt::Debug for Accumulator<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Accumulator")
            .field("inner", &self.inner)
            .finish()
    }
}

impl<A: ?Sized + IterativeStatistic> core::fmt::Display for Accumulator<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&*self.inner.borrow(), f)
    }
}

#[cfg(feature = "serde")]
impl<A: ?Sized + IterativeStatistic> serde::Serialize for Accumulator<A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.state(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Accumulator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let state = <AccumulatorState as serde::Deserialize>::deserialize(deserializer)?;
        Self::restore(state).map_err(serde::de::Error::custom)
    }
}
