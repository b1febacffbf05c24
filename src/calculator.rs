use std::{cell::Cell, fmt, rc::Rc};

use crate::{
    enumeration::{
        CircularQueueEnumeration, EnumerationFactory, Generation, NumericEnumeration,
        VolatilityCheck,
    },
    MovingAverageCalculatorBuilder, Result,
};


/// Maintains a moving average of the last `N` added samples, and gives access to those samples through
/// an enumeration.
pub trait MovingAverageCalculator {
    type Enumeration: NumericEnumeration;

    fn moving_average(&self) -> f64;

    fn add(&mut self, value: f64);

    fn iterator(&self) -> Self::Enumeration;
}

/// A [MovingAverageCalculator] backed by a fixed-size circular queue.
///
/// Alongside the samples, the calculator keeps a running sum. Adding a sample adds it to the sum and
/// subtracts the sample it overwrites, so that both [add](MovingAverageCalculator::add) and
/// [moving_average](MovingAverageCalculator::moving_average) are O(1) regardless of capacity.
/// Slots that were never written hold `0.0`, so subtracting them is a no-op.
///
/// Enumerations share the queue's storage instead of copying it. Every call to `add` moves the calculator
/// to a new [Generation], which invalidates every outstanding enumeration, including ones created by the
/// caller that is adding. This check is best-effort: it helps catch iteration logic errors during
/// development at almost no cost, and is not a substitute for synchronisation. The calculator is not
/// thread-safe, and its `Rc`-based internals keep it from being sent across threads.
pub struct CircularQueueMovingAverageCalculator {
    values: Rc<[Cell<f64>]>,
    // sum of every element in values
    moving_sum: f64,
    // index where the next element is about to be written
    tail: usize,
    size: usize,
    generation: Rc<Generation>,
    enumeration_factory: Rc<dyn EnumerationFactory>,
}

/// A serialisable summary of a calculator's state
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverageSummary {
    pub capacity: usize,
    pub len: usize,
    pub moving_average: f64,
}

impl CircularQueueMovingAverageCalculator {
    /// Builds a calculator retaining the last `capacity` samples, using the [default enumeration factory](crate::DefaultEnumerationFactory).
    /// Fails with [InvalidArgument](crate::Error::InvalidArgument) if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::builder(capacity).build()
    }

    pub fn builder(capacity: usize) -> MovingAverageCalculatorBuilder {
        MovingAverageCalculatorBuilder::new(capacity)
    }

    pub(crate) fn with_factory(
        capacity: usize,
        enumeration_factory: Rc<dyn EnumerationFactory>,
    ) -> Self {
        debug_assert!(capacity > 0);
        log::debug!("Creating moving average calculator with a capacity of {capacity}");
        Self {
            values: (0..capacity).map(|_| Cell::new(0.0)).collect(),
            moving_sum: 0.0,
            tail: 0,
            size: 0,
            generation: Rc::new(Generation::new()),
            enumeration_factory,
        }
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Number of samples currently taken into account by the moving average
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn summary(&self) -> MovingAverageSummary {
        MovingAverageSummary {
            capacity: self.capacity(),
            len: self.len(),
            moving_average: self.moving_average(),
        }
    }

    /// Fails with [ConcurrentMutation](crate::Error::ConcurrentMutation) if `generation` is not the
    /// calculator's current generation
    pub fn check_volatility(&self, generation: i64) -> Result<()> {
        self.generation.check_volatility(generation)
    }

    #[inline]
    fn index_incremented(&self, index: usize) -> usize {
        (index + 1) % self.values.len()
    }
}

impl MovingAverageCalculator for CircularQueueMovingAverageCalculator {
    type Enumeration = CircularQueueEnumeration;

    fn moving_average(&self) -> f64 {
        // max avoids dividing by zero before the first sample
        self.moving_sum / self.size.max(1) as f64
    }

    fn add(&mut self, value: f64) {
        let generation = self.generation.incr();

        let slot = &self.values[self.tail];
        self.moving_sum = self.moving_sum - slot.get() + value;
        slot.set(value);

        self.tail = self.index_incremented(self.tail);
        self.size = std::cmp::min(self.values.len(), self.size + 1);
        log::trace!(
            "Added {value}, moving average is now {} (generation {generation})",
            self.moving_average()
        );
    }

    fn iterator(&self) -> CircularQueueEnumeration {
        let start = if self.size < self.values.len() {
            0
        } else {
            self.tail
        };
        let generation = self.generation.current();
        log::trace!(
            "Creating an enumeration of {} elements starting at {start} (generation {generation})",
            self.size
        );
        self.enumeration_factory.create(
            Rc::clone(&self.values),
            start,
            self.size,
            generation,
            Rc::clone(&self.generation) as Rc<dyn VolatilityCheck>,
        )
    }
}

impl Extend<f64> for CircularQueueMovingAverageCalculator {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        for value in iter {
            self.add(value);
        }
    }
}

impl fmt::Debug for CircularQueueMovingAverageCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularQueueMovingAverageCalculator")
            .field("capacity", &self.capacity())
            .field("size", &self.size)
            .field("tail", &self.tail)
            .field("moving_sum", &self.moving_sum)
            .field("generation", &self.generation.current())
            .finish()
    }
}
