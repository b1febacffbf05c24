use std::{cell::Cell, fmt, rc::Rc};

use crate::{Error, Result};

pub use self::{factory::*, volatility::*};

mod factory;
mod volatility;

/// A forward-only cursor over a collection of numbers
pub trait NumericEnumeration {
    fn has_more_elements(&self) -> Result<bool>;

    fn next_element(&mut self) -> Result<f64>;
}

/// Walks the logical contents of a circular queue, starting at `start` and wrapping around the end of
/// the underlying storage, for `count` elements.
///
/// The enumeration shares the queue's storage rather than copying it. Every operation first runs the
/// [VolatilityCheck] against the generation captured at creation, so that a modification of the queue
/// surfaces as [Error::ConcurrentMutation] instead of silently stale reads. Once that happens, the
/// enumeration stays invalidated: generations only ever move forward.
///
/// Enumerations are single use. Ask the calculator for a new one to start over.
pub struct CircularQueueEnumeration {
    values: Rc<[Cell<f64>]>,
    current: usize,
    remaining: usize,
    generation: i64,
    volatility_check: Rc<dyn VolatilityCheck>,
    fused: bool,
}

impl CircularQueueEnumeration {
    /// Arguments are trusted and only checked in debug builds.
    ///
    /// # Panics
    ///
    /// Reading an element panics if `start` is not a valid index into `values`, which is only allowed
    /// when `count` is zero. Debug builds panic here instead.
    pub fn new(
        values: Rc<[Cell<f64>]>,
        start: usize,
        count: usize,
        generation: i64,
        volatility_check: Rc<dyn VolatilityCheck>,
    ) -> Self {
        debug_assert!(
            count == 0 || start < values.len(),
            "start {start} out of bounds for {count} elements over a storage of {}",
            values.len()
        );
        Self {
            values,
            current: start,
            remaining: count,
            generation,
            volatility_check,
            fused: false,
        }
    }

    /// Number of elements left to read. Unlike [NumericEnumeration::has_more_elements], this does not
    /// run the volatility check.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    fn index_incremented(&self, index: usize) -> usize {
        (index + 1) % self.values.len()
    }
}

impl NumericEnumeration for CircularQueueEnumeration {
    fn has_more_elements(&self) -> Result<bool> {
        self.volatility_check.check_volatility(self.generation)?;
        Ok(self.remaining > 0)
    }

    fn next_element(&mut self) -> Result<f64> {
        if !self.has_more_elements()? {
            return Err(Error::EndOfSequence);
        }
        let value = self.values[self.current].get();
        self.current = self.index_incremented(self.current);
        self.remaining -= 1;
        Ok(value)
    }
}

/// Yields the remaining elements in order. If the underlying queue was modified, yields a single
/// [Error::ConcurrentMutation] and then ends.
impl Iterator for CircularQueueEnumeration {
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.has_more_elements() {
            Ok(true) => Some(self.next_element()),
            Ok(false) => {
                self.fused = true;
                None
            }
            Err(e) => {
                self.fused = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.fused {
            (0, Some(0))
        } else {
            (0, Some(self.remaining + 1))
        }
    }
}

impl std::iter::FusedIterator for CircularQueueEnumeration {}

impl fmt::Debug for CircularQueueEnumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularQueueEnumeration")
            .field("capacity", &self.values.len())
            .field("current", &self.current)
            .field("remaining", &self.remaining)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::{CircularQueueEnumeration, NumericEnumeration, VolatilityCheck};
    use crate::{Error, Result};

    fn values(values: &[f64]) -> Rc<[Cell<f64>]> {
        values.iter().copied().map(Cell::new).collect()
    }

    /// A check that passes only for `expected`, and fails loudly for anything else
    fn accepting(expected: i64) -> Rc<dyn VolatilityCheck> {
        Rc::new(move |generation: i64| -> Result<()> {
            assert_eq!(generation, expected, "enumeration checked the wrong generation");
            Ok(())
        })
    }

    fn rejecting(live: i64) -> Rc<dyn VolatilityCheck> {
        Rc::new(move |captured: i64| -> Result<()> {
            Err(Error::ConcurrentMutation { captured, live })
        })
    }

    fn one_two_three(start: usize, count: usize, generation: i64) -> CircularQueueEnumeration {
        CircularQueueEnumeration::new(
            values(&[1.0, 2.0, 3.0]),
            start,
            count,
            generation,
            accepting(generation),
        )
    }

    fn drain(sut: &mut CircularQueueEnumeration) -> Vec<f64> {
        let mut res = Vec::new();
        while sut.has_more_elements().unwrap() {
            res.push(sut.next_element().unwrap());
        }
        res
    }

    #[test]
    fn constructor_accepts_counts_beyond_the_storage() {
        let _ = CircularQueueEnumeration::new(values(&[]), 0, 0, 0, accepting(0));
        let _ = CircularQueueEnumeration::new(values(&[0.0; 4]), 2, 5, 0, accepting(0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of bounds")]
    fn constructor_rejects_elements_over_empty_storage() {
        let _ = CircularQueueEnumeration::new(values(&[]), 0, 1, 0, accepting(0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "out of bounds")]
    fn constructor_rejects_start_past_the_storage() {
        let _ = CircularQueueEnumeration::new(values(&[0.0; 3]), 3, 1, 0, accepting(0));
    }

    #[test]
    fn has_more_elements_propagates_failed_check() {
        let sut = CircularQueueEnumeration::new(values(&[0.0; 4]), 0, 3, 1, rejecting(2));
        assert_eq!(
            sut.has_more_elements(),
            Err(Error::ConcurrentMutation {
                captured: 1,
                live: 2
            })
        );
    }

    #[test]
    fn next_element_propagates_failed_check() {
        let mut sut = CircularQueueEnumeration::new(values(&[0.0; 4]), 0, 4, 1, rejecting(2));
        assert_eq!(
            sut.next_element(),
            Err(Error::ConcurrentMutation {
                captured: 1,
                live: 2
            })
        );
        // a failed read must not move the cursor
        assert_eq!(sut.remaining(), 4);
    }

    #[test]
    fn empty_enumeration_has_no_elements() {
        let sut = CircularQueueEnumeration::new(values(&[0.0; 3]), 0, 0, 2, accepting(2));
        assert_eq!(sut.has_more_elements(), Ok(false));
    }

    #[test]
    fn reads_partially_filled_queue_from_the_start() {
        let mut sut = one_two_three(0, 2, 2);
        assert_eq!(drain(&mut sut), vec![1.0, 2.0]);
    }

    #[test]
    fn reads_full_queue_from_the_start() {
        let mut sut = one_two_three(0, 3, 3);
        assert_eq!(drain(&mut sut), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn wraps_around_when_partially_read_from_an_offset() {
        let mut sut = one_two_three(2, 2, 4);
        assert_eq!(drain(&mut sut), vec![3.0, 1.0]);
    }

    #[test]
    fn wraps_around_when_fully_read_from_an_offset() {
        let mut sut = one_two_three(1, 3, 5);
        assert_eq!(drain(&mut sut), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn reading_past_the_end_from_the_start_fails() {
        let mut sut = one_two_three(0, 2, 6);
        assert_eq!(sut.next_element(), Ok(1.0));
        assert_eq!(sut.next_element(), Ok(2.0));
        assert_eq!(sut.next_element(), Err(Error::EndOfSequence));
    }

    #[test]
    fn reading_past_the_end_from_an_offset_fails() {
        let mut sut = one_two_three(2, 1, 6);
        assert_eq!(sut.next_element(), Ok(3.0));
        assert_eq!(sut.next_element(), Err(Error::EndOfSequence));
    }

    #[test]
    fn sees_writes_to_the_shared_storage() {
        let storage = values(&[1.0, 2.0, 3.0]);
        let mut sut = CircularQueueEnumeration::new(Rc::clone(&storage), 0, 3, 0, accepting(0));
        storage[1].set(20.0);
        assert_eq!(drain(&mut sut), vec![1.0, 20.0, 3.0]);
    }

    #[test]
    fn iterator_yields_values_then_ends() {
        let sut = CircularQueueEnumeration::new(values(&[1.0, 2.0, 3.0]), 1, 3, 0, accepting(0));
        assert_eq!(sut.collect::<Result<Vec<_>>>(), Ok(vec![2.0, 3.0, 1.0]));
    }

    #[test]
    fn iterator_yields_a_single_error_once_invalidated() {
        let mut sut = CircularQueueEnumeration::new(values(&[1.0, 2.0]), 0, 2, 1, rejecting(2));
        assert!(matches!(
            sut.next(),
            Some(Err(Error::ConcurrentMutation { .. }))
        ));
        assert_eq!(sut.next(), None);
        assert_eq!(sut.next(), None);
    }
}
