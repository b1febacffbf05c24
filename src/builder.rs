use std::rc::Rc;

use crate::{
    enumeration::{DefaultEnumerationFactory, EnumerationFactory},
    CircularQueueMovingAverageCalculator, Error, Result,
};

pub struct MovingAverageCalculatorBuilder {
    capacity: usize,
    enumeration_factory: Rc<dyn EnumerationFactory>,
}

impl MovingAverageCalculatorBuilder {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            enumeration_factory: Rc::new(DefaultEnumerationFactory),
        }
    }

    /// Replaces the factory the calculator goes through every time it creates an enumeration
    pub fn with_enumeration_factory(mut self, factory: Rc<dyn EnumerationFactory>) -> Self {
        self.enumeration_factory = factory;
        self
    }

    pub fn build(self) -> Result<CircularQueueMovingAverageCalculator> {
        if self.capacity < 1 {
            return Err(Error::InvalidArgument(self.capacity));
        }
        Ok(CircularQueueMovingAverageCalculator::with_factory(
            self.capacity,
            self.enumeration_factory,
        ))
    }
}
